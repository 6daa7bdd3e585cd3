pub mod error;
pub mod palette;
pub mod codec;
pub mod metadata;
pub mod render;
pub mod editor;
pub mod amount;
pub mod token;
pub mod contract;
pub mod submission;
pub mod config;

pub use codec::{decode, encode, PackedImage, PixelGrid};
pub use metadata::{decode_token_uri, TokenMetadata};
