//! Hexel - palette-indexed pixel grid codec
//!
//! This library provides functionality to:
//! - Decode a base64 payload of `[[palette...], [indices...]]` into a grid of
//!   colors, validating every stage
//! - Encode a grid of colors back into that payload with first-seen palette
//!   deduplication
//! - Convert grids to and from raster images, and preview them in a terminal

pub mod cli;
pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod image_io;
pub mod palette;
pub mod structure;
pub mod terminal;
pub mod transport;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use codec::{decode, decode_parts, decode_with_palette, encode, encode_parts, EncodedPayload};
pub use color::Color;
pub use error::CodecError;
pub use grid::{GridSize, IndexSequence, PixelGrid};
pub use palette::Palette;
