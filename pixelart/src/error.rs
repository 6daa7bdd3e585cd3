use thiserror::Error;

use crate::token::MintBlock;

/// Malformed pixel grids, packed buffers and hex payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("pixel grid has {0} entries, expected 256")]
    GridLength(usize),

    #[error("palette index {value} at position {position} is out of range 0..=15")]
    PaletteIndex { position: usize, value: u8 },

    #[error("packed image has {0} bytes, expected 128")]
    PackedLength(usize),

    #[error("pixel ({0}, {1}) is outside the 16x16 canvas")]
    Position(usize, usize),

    #[error("invalid hex payload: {0}")]
    Hex(String),

    #[error("invalid svg markup: {0}")]
    Svg(String),
}

/// Token URIs that cannot be turned into metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("token uri does not start with \"data:application/json;utf8,\"")]
    MissingPrefix,

    #[error("token uri carries invalid json: {0}")]
    InvalidJson(String),
}

/// Failures reported by the external wallet while submitting a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("transaction failed: {0}")]
    Failed(String),

    #[error("a transaction is already pending")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid character '{0}' in amount")]
    InvalidChar(char),

    #[error("amount has more than 18 fractional digits")]
    TooPrecise,

    #[error("amount overflows 128 bits of wei")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    #[error("config parse error: {0}")]
    Parse(String),
}

/// A mint call that cannot be built from the current token state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("{}", .0.message())]
    Blocked(MintBlock),

    #[error(transparent)]
    Amount(#[from] AmountError),
}
