//! Per-token values read from the contract, and the display and gating
//! rules built on them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::amount::{self, Wei};
use crate::error::ConfigError;
use crate::metadata::TokenMetadata;

/// Token identifier as used by the contract.
pub type TokenId = u64;

/// A 20-byte account or contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// `0x1234...abcd`, as shown next to token cards.
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidAddress(s.to_string());
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(invalid)?;
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| invalid())?;
        Ok(Address(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Contract reads for one token. `None` means the read has not resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub edition_price: Option<Wei>,
    pub total_supply: Option<u64>,
    pub max_supply: Option<u64>,
    pub creator: Option<Address>,
}

/// Whether another edition may be minted.
///
/// A price of zero means the token is not for sale; a max supply of zero
/// means unlimited editions.
pub fn can_mint(edition_price: Wei, total_supply: u64, max_supply: u64) -> bool {
    edition_price != 0 && (max_supply == 0 || total_supply < max_supply)
}

/// Why an edition cannot be minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MintBlock {
    NotForSale,
    SupplyExhausted,
    /// Price or supply has not been read yet.
    Unknown,
}

impl MintBlock {
    pub fn message(&self) -> &'static str {
        match self {
            MintBlock::NotForSale => "This NFT is not available for minting.",
            MintBlock::SupplyExhausted => {
                "Maximum supply reached. No more editions can be minted."
            }
            MintBlock::Unknown => "Unable to mint this edition.",
        }
    }
}

impl TokenInfo {
    /// `Ok(())` when an edition may be minted, otherwise the blocking reason.
    pub fn mint_status(&self) -> Result<(), MintBlock> {
        let price = self.edition_price.ok_or(MintBlock::Unknown)?;
        if price == 0 {
            return Err(MintBlock::NotForSale);
        }
        let (total, max) = self
            .total_supply
            .zip(self.max_supply)
            .ok_or(MintBlock::Unknown)?;
        if can_mint(price, total, max) {
            Ok(())
        } else {
            Err(MintBlock::SupplyExhausted)
        }
    }

    pub fn is_for_sale(&self) -> bool {
        matches!(self.edition_price, Some(p) if p != 0)
    }

    /// `"3 / ∞"` or `"3 / 10"`, once both supplies are known.
    pub fn supply_label(&self) -> Option<String> {
        let (total, max) = self.total_supply.zip(self.max_supply)?;
        Some(if max == 0 {
            format!("{total} / ∞")
        } else {
            format!("{total} / {max}")
        })
    }

    /// `"0.01 ETH"`, or `"Not for sale"` for a zero price.
    pub fn price_label(&self) -> Option<String> {
        self.edition_price.map(|p| {
            if p == 0 {
                "Not for sale".to_string()
            } else {
                format!("{} ETH", amount::format_ether(p))
            }
        })
    }
}

/// Metadata name, or `Pixel Art #<id>` when there is none.
pub fn display_name(metadata: &TokenMetadata, id: TokenId) -> String {
    metadata
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("Pixel Art #{id}"))
}

/// Existing token ids given the contract's `nextId()`.
///
/// Ids start at 1; `next_id` itself is not minted yet.
pub fn gallery_ids(next_id: TokenId) -> impl Iterator<Item = TokenId> {
    1..next_id.max(1)
}

/// Everything a token card or detail page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenView {
    pub id: TokenId,
    pub metadata: TokenMetadata,
    pub info: TokenInfo,
}

impl TokenView {
    pub fn title(&self) -> String {
        display_name(&self.metadata, self.id)
    }
}
