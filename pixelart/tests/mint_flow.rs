/// End-to-end: draw, build a mint call, submit through a wallet, then
/// read the token back from a contract snapshot.
use pixelart::codec::PackedImage;
use pixelart::config::ChainRegistry;
use pixelart::contract::{
    self, ContractReader, ContractSnapshot, ContractWriter, MintArgs, MintCall, TokenSnapshot,
    TxHash,
};
use pixelart::editor::Editor;
use pixelart::error::TransactionError;
use pixelart::metadata;
use pixelart::render;
use pixelart::submission::{self, MintState, MintSubmission};
use pixelart::token::MintBlock;

/// Wallet double that records calls and replays scripted outcomes.
#[derive(Default)]
struct ScriptedWallet {
    sent: Vec<MintCall>,
    send_error: Option<TransactionError>,
    receipt_error: Option<TransactionError>,
}

impl ContractWriter for ScriptedWallet {
    fn send(&mut self, call: &MintCall) -> Result<TxHash, TransactionError> {
        if let Some(err) = self.send_error.take() {
            return Err(err);
        }
        self.sent.push(call.clone());
        Ok(TxHash([self.sent.len() as u8; 32]))
    }

    fn wait_for_receipt(&mut self, _tx: &TxHash) -> Result<(), TransactionError> {
        match self.receipt_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn snapshot_with(image: &PackedImage, total: u64, max: u64, price: u128) -> ContractSnapshot {
    let svg = render::render_svg(&image.unpack(), 10);
    let mut snap = ContractSnapshot {
        platform_fee: 1_000,
        next_id: 2,
        ..Default::default()
    };
    snap.tokens.insert(
        1,
        TokenSnapshot {
            uri: metadata::encode_token_uri("Pixel Art #1", "A tiny heart", &svg),
            edition_price: price,
            total_supply: total,
            max_supply: max,
            creator: "0x00000000000000000000000000000000000000aa".parse().unwrap(),
        },
    );
    snap
}

#[test]
fn create_then_view_then_mint_edition() {
    let mut editor = Editor::new();
    editor.select_color(2).unwrap();
    for (x, y) in [(3, 4), (4, 4), (3, 5)] {
        editor.paint_at(x, y).unwrap();
    }
    let image = editor.packed();

    let config = ChainRegistry::default().resolve(31337);
    let snap = snapshot_with(&image, 1, 3, 5_000);
    let fee = snap.platform_fee().unwrap();

    // create
    let mut wallet = ScriptedWallet::default();
    let mut sub = MintSubmission::new();
    let create = MintCall::mint_new(config, image, 5_000, 3, fee);
    let tx = submission::submit(&mut wallet, &create, &mut sub).unwrap();
    assert_eq!(sub.state(), &MintState::Success { tx });
    assert_eq!(wallet.sent[0].value, 1_000);
    match &wallet.sent[0].args {
        MintArgs::MintNew { image: sent, .. } => assert_eq!(sent, &image),
        other => panic!("unexpected args {other:?}"),
    }

    // view
    let gallery = contract::load_gallery(&snap).unwrap();
    assert_eq!(gallery.len(), 1);
    let view = &gallery[0];
    assert_eq!(view.title(), "Pixel Art #1");
    assert_eq!(view.metadata.description.as_deref(), Some("A tiny heart"));
    let svg = view.metadata.image.as_ref().unwrap();
    assert_eq!(render::grid_from_svg(svg.as_str()).unwrap(), image.unpack());
    assert_eq!(view.info.supply_label().as_deref(), Some("1 / 3"));

    // mint an edition
    let edition = MintCall::mint_edition(config, view.id, &view.info, fee).unwrap();
    assert_eq!(edition.value, 6_000);
    submission::submit(&mut wallet, &edition, &mut sub).unwrap();
    assert_eq!(wallet.sent.len(), 2);
}

#[test]
fn sold_out_token_cannot_be_minted() {
    let snap = snapshot_with(&PackedImage::default(), 3, 3, 5_000);
    let view = contract::load_token(&snap, 1);
    let config = ChainRegistry::default().resolve(1);
    let err = MintCall::mint_edition(config, 1, &view.info, 0).unwrap_err();
    assert_eq!(
        err.to_string(),
        MintBlock::SupplyExhausted.message()
    );
}

#[test]
fn missing_token_degrades_to_empty_view() {
    let snap = snapshot_with(&PackedImage::default(), 0, 0, 0);
    let view = contract::load_token(&snap, 42);
    assert_eq!(view.title(), "Pixel Art #42");
    assert!(view.metadata.image.is_none());
    assert_eq!(view.info.edition_price, None);
}

#[test]
fn malformed_uri_degrades_to_empty_metadata() {
    let mut snap = snapshot_with(&PackedImage::default(), 0, 0, 1);
    snap.tokens.get_mut(&1).unwrap().uri = "ipfs://not-inline".into();
    let view = contract::load_token(&snap, 1);
    assert_eq!(view.metadata, metadata::TokenMetadata::default());
    assert_eq!(view.info.edition_price, Some(1));
}

#[test]
fn rejected_submission_is_reported_and_retryable() {
    let config = ChainRegistry::default().resolve(31337);
    let call = MintCall::mint_new(config, PackedImage::default(), 1, 0, 0);
    let mut wallet = ScriptedWallet {
        send_error: Some(TransactionError::Rejected("User rejected the request.".into())),
        ..Default::default()
    };
    let mut sub = MintSubmission::new();

    let err = submission::submit(&mut wallet, &call, &mut sub).unwrap_err();
    assert!(matches!(err, TransactionError::Rejected(_)));
    assert!(sub.can_submit());
    assert!(sub.status_message().unwrap().starts_with("Error: transaction rejected"));

    // manual retry succeeds
    submission::submit(&mut wallet, &call, &mut sub).unwrap();
    assert!(matches!(sub.state(), MintState::Success { .. }));
}

#[test]
fn reverted_receipt_ends_failed() {
    let config = ChainRegistry::default().resolve(31337);
    let call = MintCall::mint_new(config, PackedImage::default(), 1, 0, 0);
    let mut wallet = ScriptedWallet {
        receipt_error: Some(TransactionError::Failed("execution reverted".into())),
        ..Default::default()
    };
    let mut sub = MintSubmission::new();
    assert!(submission::submit(&mut wallet, &call, &mut sub).is_err());
    assert!(matches!(
        sub.state(),
        MintState::Failed { error: TransactionError::Failed(_) }
    ));
}

#[test]
fn snapshot_loads_from_json() {
    let json = r#"{
        "platform_fee": 100,
        "next_id": 3,
        "tokens": {
            "1": {"uri": "data:application/json;utf8,{\"name\":\"One\"}", "edition_price": 0,
                  "total_supply": 1, "max_supply": 0,
                  "creator": "0x00000000000000000000000000000000000000aa"},
            "2": {"uri": "garbage", "edition_price": 10, "total_supply": 0, "max_supply": 5,
                  "creator": "0x00000000000000000000000000000000000000bb"}
        }
    }"#;
    let snap: ContractSnapshot = serde_json::from_str(json).unwrap();
    let gallery = contract::load_gallery(&snap).unwrap();
    assert_eq!(gallery.len(), 2);
    assert_eq!(gallery[0].title(), "One");
    assert_eq!(gallery[0].info.mint_status(), Err(MintBlock::NotForSale));
    assert_eq!(gallery[1].title(), "Pixel Art #2");
    assert_eq!(gallery[1].info.mint_status(), Ok(()));
}
