//! Base64 transport layer
//!
//! Wraps the structured payload in standard base64 (RFC 4648 alphabet with
//! canonical `=` padding) so it can be stored in source files, config values
//! and URLs-in-quotes without escaping.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::Result;

/// Decode a transport string into raw payload bytes.
///
/// Surrounding ASCII whitespace is ignored so payload files with a trailing
/// newline decode cleanly. Whitespace inside the payload is rejected.
///
/// # Examples
///
/// ```
/// use hexel::transport::decode_transport;
///
/// assert_eq!(decode_transport("W1tdLFtdXQ==\n").unwrap(), b"[[],[]]");
/// assert!(decode_transport("W1td LFtdXQ==").is_err());
/// ```
///
/// # Errors
///
/// Returns `CodecError::TransportFormat` for characters outside the base64
/// alphabet or invalid padding/length.
pub fn decode_transport(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    let bytes = STANDARD.decode(trimmed)?;
    tracing::trace!(encoded_len = trimmed.len(), decoded_len = bytes.len(), "transport decoded");
    Ok(bytes)
}

/// Encode raw payload bytes as a transport string.
pub fn encode_transport(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
