//! Error taxonomy for the codec pipeline
//!
//! Every stage of decode and encode reports failures through [`CodecError`].
//! Errors are terminal for the call that produced them: no partial grid is
//! ever returned alongside an error.

use thiserror::Error;

/// Error type for decode/encode failures.
///
/// Positions are zero-based offsets into the token list of the stage that
/// failed (palette tokens for colors, index tokens for indices).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The payload is not valid base64 (bad alphabet, padding or length)
    #[error("transport format error: {0}")]
    TransportFormat(String),
    /// The decoded text is not a `[[colors...], [indices...]]` document
    #[error("structure format error: {0}")]
    StructureFormat(String),
    /// A palette entry does not match `#RGB` or `#RRGGBB`
    #[error("invalid color '{token}' at palette position {position}")]
    InvalidColor { token: String, position: usize },
    /// An index entry is not a non-negative integer
    #[error("invalid index '{token}' at position {position}")]
    InvalidIndex { token: String, position: usize },
    /// An index points past the end of the palette
    #[error("index {index} at position {position} is out of range for palette of size {palette_size}")]
    IndexOutOfRange { index: usize, palette_size: usize, position: usize },
    /// The number of cells does not match `width * height`
    #[error("expected {expected} cells for a {width}x{height} grid, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize, width: u32, height: u32 },
}

impl CodecError {
    /// Stable snake_case tag for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            CodecError::TransportFormat(_) => "transport_format",
            CodecError::StructureFormat(_) => "structure_format",
            CodecError::InvalidColor { .. } => "invalid_color",
            CodecError::InvalidIndex { .. } => "invalid_index",
            CodecError::IndexOutOfRange { .. } => "index_out_of_range",
            CodecError::DimensionMismatch { .. } => "dimension_mismatch",
        }
    }
}

impl From<base64::DecodeError> for CodecError {
    fn from(e: base64::DecodeError) -> Self {
        CodecError::TransportFormat(e.to_string())
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::StructureFormat(e.to_string())
    }
}

/// Result alias used throughout the codec.
pub type Result<T> = std::result::Result<T, CodecError>;
