//! The contract's read/write surface and mint call plans.
//!
//! Transport is the caller's business: a wallet or RPC library implements
//! [`ContractReader`] and [`ContractWriter`] against a [`ContractConfig`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::amount::{self, Wei};
use crate::codec::PackedImage;
use crate::error::{CallError, CodecError, TransactionError};
use crate::metadata;
use crate::token::{Address, TokenId, TokenInfo, TokenView};

/// Which contract on which chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    pub chain_id: u64,
    pub address: Address,
}

/// A 32-byte transaction hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    /// First ten characters, e.g. `0x1a2b3c4d...`.
    pub fn short(&self) -> String {
        format!("{}...", &self.to_string()[..10])
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for TxHash {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| CodecError::Hex(e.to_string()))?;
        Ok(TxHash(bytes))
    }
}

/// View calls on the pixel art contract.
pub trait ContractReader {
    type Error: fmt::Display;

    fn platform_fee(&self) -> Result<Wei, Self::Error>;
    fn uri(&self, id: TokenId) -> Result<String, Self::Error>;
    fn edition_price(&self, id: TokenId) -> Result<Wei, Self::Error>;
    fn total_supply(&self, id: TokenId) -> Result<u64, Self::Error>;
    fn max_supply(&self, id: TokenId) -> Result<u64, Self::Error>;
    fn creator(&self, id: TokenId) -> Result<Address, Self::Error>;
    fn next_id(&self) -> Result<TokenId, Self::Error>;
}

/// Transaction submission through an external wallet.
pub trait ContractWriter {
    /// Hand the call to the wallet; resolves once a hash is known.
    fn send(&mut self, call: &MintCall) -> Result<TxHash, TransactionError>;

    /// Block until the transaction is included.
    fn wait_for_receipt(&mut self, tx: &TxHash) -> Result<(), TransactionError>;
}

/// Gather everything shown for one token.
///
/// Each read is independent; a failed read leaves its field empty and an
/// unparseable URI yields empty metadata.
pub fn load_token<R: ContractReader>(reader: &R, id: TokenId) -> TokenView {
    fn ok<T, E: fmt::Display>(what: &str, id: TokenId, r: Result<T, E>) -> Option<T> {
        r.map_err(|err| tracing::warn!(id, %err, "failed to read {what}"))
            .ok()
    }

    let metadata = ok("uri", id, reader.uri(id))
        .map(|uri| metadata::decode_token_uri_or_default(&uri))
        .unwrap_or_default();
    let info = TokenInfo {
        edition_price: ok("editionPrices", id, reader.edition_price(id)),
        total_supply: ok("totalSupplies", id, reader.total_supply(id)),
        max_supply: ok("maxSupplies", id, reader.max_supply(id)),
        creator: ok("creators", id, reader.creator(id)),
    };
    TokenView { id, metadata, info }
}

/// Load every minted token, in id order.
pub fn load_gallery<R: ContractReader>(reader: &R) -> Result<Vec<TokenView>, R::Error> {
    let next_id = reader.next_id()?;
    tracing::debug!(next_id, "loading gallery");
    Ok(crate::token::gallery_ids(next_id)
        .map(|id| load_token(reader, id))
        .collect())
}

/// Arguments of a contract write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintArgs {
    MintNew {
        image: PackedImage,
        price: Wei,
        max_supply: u64,
    },
    MintEdition {
        token_id: TokenId,
    },
}

/// A contract write ready to hand to the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintCall {
    pub contract: ContractConfig,
    pub args: MintArgs,
    /// Value attached to the transaction.
    pub value: Wei,
}

impl MintCall {
    /// `mintNew(image, price, maxSupply)` paying the platform fee.
    pub fn mint_new(
        contract: ContractConfig,
        image: PackedImage,
        price: Wei,
        max_supply: u64,
        platform_fee: Wei,
    ) -> MintCall {
        MintCall {
            contract,
            args: MintArgs::MintNew {
                image,
                price,
                max_supply,
            },
            value: platform_fee,
        }
    }

    /// `mintEdition(tokenId)` paying edition price plus platform fee.
    ///
    /// Refuses tokens that are not for sale or sold out.
    pub fn mint_edition(
        contract: ContractConfig,
        token_id: TokenId,
        info: &TokenInfo,
        platform_fee: Wei,
    ) -> Result<MintCall, CallError> {
        info.mint_status().map_err(CallError::Blocked)?;
        let price = info.edition_price.unwrap_or_default();
        Ok(MintCall {
            contract,
            args: MintArgs::MintEdition { token_id },
            value: amount::total_cost(price, platform_fee)?,
        })
    }

    pub fn function_name(&self) -> &'static str {
        match self.args {
            MintArgs::MintNew { .. } => "mintNew",
            MintArgs::MintEdition { .. } => "mintEdition",
        }
    }

    /// Arguments in ABI order, rendered as strings.
    pub fn encoded_args(&self) -> Vec<String> {
        match &self.args {
            MintArgs::MintNew {
                image,
                price,
                max_supply,
            } => vec![image.to_hex(), price.to_string(), max_supply.to_string()],
            MintArgs::MintEdition { token_id } => vec![token_id.to_string()],
        }
    }

    /// A serializable description of the call.
    pub fn plan(&self) -> CallPlan {
        CallPlan {
            chain_id: self.contract.chain_id,
            address: self.contract.address,
            function: self.function_name(),
            args: self.encoded_args(),
            value: self.value.to_string(),
            value_ether: amount::format_ether(self.value),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPlan {
    pub chain_id: u64,
    pub address: Address,
    pub function: &'static str,
    pub args: Vec<String>,
    /// Attached value in wei, as a decimal string.
    pub value: String,
    pub value_ether: String,
}

/// A captured contract state, readable offline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractSnapshot {
    pub platform_fee: Wei,
    pub next_id: TokenId,
    #[serde(default)]
    pub tokens: BTreeMap<TokenId, TokenSnapshot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub uri: String,
    pub edition_price: Wei,
    pub total_supply: u64,
    pub max_supply: u64,
    pub creator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("token {0} does not exist")]
pub struct UnknownToken(pub TokenId);

impl ContractSnapshot {
    fn token(&self, id: TokenId) -> Result<&TokenSnapshot, UnknownToken> {
        self.tokens.get(&id).ok_or(UnknownToken(id))
    }
}

impl ContractReader for ContractSnapshot {
    type Error = UnknownToken;

    fn platform_fee(&self) -> Result<Wei, UnknownToken> {
        Ok(self.platform_fee)
    }

    fn uri(&self, id: TokenId) -> Result<String, UnknownToken> {
        Ok(self.token(id)?.uri.clone())
    }

    fn edition_price(&self, id: TokenId) -> Result<Wei, UnknownToken> {
        Ok(self.token(id)?.edition_price)
    }

    fn total_supply(&self, id: TokenId) -> Result<u64, UnknownToken> {
        Ok(self.token(id)?.total_supply)
    }

    fn max_supply(&self, id: TokenId) -> Result<u64, UnknownToken> {
        Ok(self.token(id)?.max_supply)
    }

    fn creator(&self, id: TokenId) -> Result<Address, UnknownToken> {
        Ok(self.token(id)?.creator)
    }

    fn next_id(&self) -> Result<TokenId, UnknownToken> {
        Ok(self.next_id)
    }
}
