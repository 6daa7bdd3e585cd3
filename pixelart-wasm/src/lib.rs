use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use pixelart::amount::{self, Wei};
use pixelart::codec::{self, PackedImage};
use pixelart::contract::{ContractConfig, MintCall, TxHash};
use pixelart::editor::Editor as CoreEditor;
use pixelart::metadata;
use pixelart::palette::PALETTE;
use pixelart::render;
use pixelart::submission::{MintState, MintSubmission, WalletEvent};
use pixelart::token::{self, Address, TokenInfo};

// ── Tsify types for TypeScript interface generation ──

/// Token metadata returned to JavaScript.
#[derive(Tsify, Serialize, Deserialize)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct WasmTokenMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Inline SVG markup, unsanitized. Only render markup from a trusted contract.
    pub image: Option<String>,
}

/// Per-token contract reads, amounts as decimal wei strings.
#[derive(Tsify, Serialize, Deserialize)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct WasmTokenInfo {
    pub edition_price: Option<String>,
    pub total_supply: Option<u64>,
    pub max_supply: Option<u64>,
}

/// Gating verdict for the mint-edition page.
#[derive(Tsify, Serialize, Deserialize)]
#[tsify(into_wasm_abi)]
pub struct WasmMintStatus {
    pub can_mint: bool,
    /// User-facing reason when minting is blocked.
    pub message: Option<String>,
    pub supply_label: Option<String>,
    pub price_label: Option<String>,
}

/// Submission state for the submit button and status banners.
#[derive(Tsify, Serialize, Deserialize)]
#[tsify(into_wasm_abi)]
pub struct WasmMintState {
    /// One of "idle", "pending", "confirming", "success", "failed".
    pub state: String,
    pub busy: bool,
    pub tx: Option<String>,
    pub message: Option<String>,
}

impl WasmTokenInfo {
    fn into_core(self) -> Result<TokenInfo, JsError> {
        Ok(TokenInfo {
            edition_price: self.edition_price.as_deref().map(parse_wei).transpose()?,
            total_supply: self.total_supply,
            max_supply: self.max_supply,
            creator: None,
        })
    }
}

fn parse_wei(s: &str) -> Result<Wei, JsError> {
    s.trim()
        .parse()
        .map_err(|_| JsError::new(&format!("invalid wei amount: {s}")))
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

// ── Codec ──

/// Pack 256 palette indices into 128 bytes.
#[wasm_bindgen(js_name = "encodePixels")]
pub fn encode_pixels(indices: &[u8]) -> Result<Vec<u8>, JsError> {
    Ok(codec::encode(indices).map_err(js_err)?.as_bytes().to_vec())
}

/// Unpack 128 bytes into 256 palette indices.
#[wasm_bindgen(js_name = "decodePixels")]
pub fn decode_pixels(bytes: &[u8]) -> Result<Vec<u8>, JsError> {
    Ok(codec::decode(bytes).map_err(js_err)?.as_slice().to_vec())
}

/// `0x`-prefixed hex payload for `mintNew`.
#[wasm_bindgen(js_name = "packedToHex")]
pub fn packed_to_hex(bytes: &[u8]) -> Result<String, JsError> {
    Ok(PackedImage::from_bytes(bytes).map_err(js_err)?.to_hex())
}

/// Palette colors as `#RRGGBB`, indexed by palette index.
#[wasm_bindgen]
pub fn palette() -> Vec<String> {
    PALETTE.iter().map(|c| c.hex()).collect()
}

// ── Metadata ──

/// Decode a token URI. Throws on malformed input; callers show "No image".
#[wasm_bindgen(js_name = "decodeTokenUri")]
pub fn decode_token_uri(uri: &str) -> Result<WasmTokenMetadata, JsError> {
    let meta = metadata::decode_token_uri(uri).map_err(js_err)?;
    Ok(WasmTokenMetadata {
        name: meta.name,
        description: meta.description,
        image: meta.image.map(|svg| svg.into_string()),
    })
}

/// Resize and sharpen token SVG for a fluid container.
#[wasm_bindgen(js_name = "prepareSvg")]
pub fn prepare_svg(markup: &str) -> String {
    render::prepare_svg_for_display(markup)
}

/// Render packed bytes as SVG, `cell` display pixels per grid pixel.
#[wasm_bindgen(js_name = "renderSvg")]
pub fn render_svg(bytes: &[u8], cell: usize) -> Result<String, JsError> {
    let grid = codec::decode(bytes).map_err(js_err)?;
    Ok(render::render_svg(&grid, cell))
}

// ── Amounts and gating ──

#[wasm_bindgen(js_name = "formatEther")]
pub fn format_ether(wei: &str) -> Result<String, JsError> {
    Ok(amount::format_ether(parse_wei(wei)?))
}

/// Parse an ether amount into a decimal wei string.
#[wasm_bindgen(js_name = "parseEther")]
pub fn parse_ether(text: &str) -> Result<String, JsError> {
    Ok(amount::parse_ether(text).map_err(js_err)?.to_string())
}

#[wasm_bindgen(js_name = "canMint")]
pub fn can_mint(edition_price: &str, total_supply: u64, max_supply: u64) -> Result<bool, JsError> {
    Ok(token::can_mint(parse_wei(edition_price)?, total_supply, max_supply))
}

#[wasm_bindgen(js_name = "mintStatus")]
pub fn mint_status(info: WasmTokenInfo) -> Result<WasmMintStatus, JsError> {
    let info = info.into_core()?;
    let status = info.mint_status();
    Ok(WasmMintStatus {
        can_mint: status.is_ok(),
        message: status.err().map(|b| b.message().to_string()),
        supply_label: info.supply_label(),
        price_label: info.price_label(),
    })
}

/// `0x1234...abcd` form of an address.
#[wasm_bindgen(js_name = "shortAddress")]
pub fn short_address(address: &str) -> Result<String, JsError> {
    Ok(address.parse::<Address>().map_err(js_err)?.short())
}

// ── Call plans ──

fn contract_config(chain_id: u64, address: &str) -> Result<ContractConfig, JsError> {
    Ok(ContractConfig {
        chain_id,
        address: address.parse().map_err(js_err)?,
    })
}

/// Call plan for `mintNew`, attaching the platform fee.
#[wasm_bindgen(js_name = "mintNewCall")]
pub fn mint_new_call(
    chain_id: u64,
    address: &str,
    packed: &[u8],
    price_wei: &str,
    max_supply: u64,
    platform_fee_wei: &str,
) -> Result<JsValue, JsError> {
    let call = MintCall::mint_new(
        contract_config(chain_id, address)?,
        PackedImage::from_bytes(packed).map_err(js_err)?,
        parse_wei(price_wei)?,
        max_supply,
        parse_wei(platform_fee_wei)?,
    );
    serde_wasm_bindgen::to_value(&call.plan()).map_err(js_err)
}

/// Call plan for `mintEdition`, attaching edition price plus platform fee.
#[wasm_bindgen(js_name = "mintEditionCall")]
pub fn mint_edition_call(
    chain_id: u64,
    address: &str,
    token_id: u64,
    info: WasmTokenInfo,
    platform_fee_wei: &str,
) -> Result<JsValue, JsError> {
    let info = info.into_core()?;
    let call = MintCall::mint_edition(
        contract_config(chain_id, address)?,
        token_id,
        &info,
        parse_wei(platform_fee_wei)?,
    )
    .map_err(js_err)?;
    serde_wasm_bindgen::to_value(&call.plan()).map_err(js_err)
}

// ── Editor wrapper ──

/// 16x16 paint-by-click editor for use from JavaScript/TypeScript.
#[wasm_bindgen]
pub struct Editor {
    inner: CoreEditor,
}

#[wasm_bindgen]
impl Editor {
    /// Create an editor, optionally seeded with 128 packed bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(initial: Option<Vec<u8>>) -> Result<Editor, JsError> {
        let inner = match initial {
            Some(bytes) => CoreEditor::from_packed(&PackedImage::from_bytes(&bytes).map_err(js_err)?),
            None => CoreEditor::new(),
        };
        Ok(Editor { inner })
    }

    #[wasm_bindgen(js_name = "selectColor")]
    pub fn select_color(&mut self, index: u8) -> Result<(), JsError> {
        self.inner.select_color(index).map_err(js_err)
    }

    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> u8 {
        self.inner.selected()
    }

    /// Paint one pixel; returns the new packed bytes.
    pub fn paint(&mut self, index: usize) -> Result<Vec<u8>, JsError> {
        let packed = self.inner.paint(index).map_err(js_err)?;
        Ok(packed.as_bytes().to_vec())
    }

    /// Reset to all black; returns the new packed bytes.
    pub fn clear(&mut self) -> Vec<u8> {
        self.inner.clear().as_bytes().to_vec()
    }

    /// Current palette indices, row-major.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.grid().as_slice().to_vec()
    }

    pub fn packed(&self) -> Vec<u8> {
        self.inner.packed().as_bytes().to_vec()
    }

    #[wasm_bindgen(js_name = "packedHex")]
    pub fn packed_hex(&self) -> String {
        self.inner.packed().to_hex()
    }
}

// ── Submission tracker ──

/// Mint submission state driven by wallet callbacks.
#[wasm_bindgen]
#[derive(Default)]
pub struct MintTracker {
    inner: MintSubmission,
}

#[wasm_bindgen]
impl MintTracker {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MintTracker {
        MintTracker::default()
    }

    pub fn submitted(&mut self) -> WasmMintState {
        self.apply(WalletEvent::Submitted)
    }

    #[wasm_bindgen(js_name = "hashReceived")]
    pub fn hash_received(&mut self, tx: &str) -> Result<WasmMintState, JsError> {
        let tx: TxHash = tx.parse().map_err(js_err)?;
        Ok(self.apply(WalletEvent::HashReceived(tx)))
    }

    pub fn confirmed(&mut self) -> WasmMintState {
        self.apply(WalletEvent::Confirmed)
    }

    pub fn rejected(&mut self, message: String) -> WasmMintState {
        self.apply(WalletEvent::Rejected(message))
    }

    pub fn failed(&mut self, message: String) -> WasmMintState {
        self.apply(WalletEvent::Failed(message))
    }

    pub fn reset(&mut self) -> WasmMintState {
        self.inner.reset();
        self.snapshot()
    }

    pub fn state(&self) -> WasmMintState {
        self.snapshot()
    }
}

impl MintTracker {
    fn apply(&mut self, event: WalletEvent) -> WasmMintState {
        self.inner.handle(event);
        self.snapshot()
    }

    fn snapshot(&self) -> WasmMintState {
        let (state, tx) = match self.inner.state() {
            MintState::Idle => ("idle", None),
            MintState::Pending => ("pending", None),
            MintState::Confirming { tx } => ("confirming", Some(tx.to_string())),
            MintState::Success { tx } => ("success", Some(tx.to_string())),
            MintState::Failed { .. } => ("failed", None),
        };
        WasmMintState {
            state: state.to_string(),
            busy: self.inner.is_busy(),
            tx,
            message: self.inner.status_message(),
        }
    }
}
