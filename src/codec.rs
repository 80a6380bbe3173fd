//! Decode and encode pipelines
//!
//! Decode runs transport → structure → dimension check → palette → grid.
//! Encode runs dimension check → deflate → structure → transport. Each stage
//! either hands a fully valid value to the next or stops with a
//! [`CodecError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::grid::{
    check_dimensions, deflate, expand, parse_indices, resolve, GridSize, IndexSequence,
    PixelGrid,
};
use crate::palette::{normalize, Palette};
use crate::structure::{parse_bytes, serialize, RawStructure};
use crate::transport::{decode_transport, encode_transport};

/// A base64 transport string wrapping a palette and index list.
///
/// Parsing with `FromStr` only checks the transport layer; the structure is
/// validated when the payload is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The structure text carried by this payload, with the transport
    /// layer removed.
    pub fn structure_text(&self) -> Result<String> {
        let bytes = decode_transport(&self.0)?;
        String::from_utf8(bytes).map_err(|e| {
            CodecError::StructureFormat(format!("payload is not valid UTF-8: {}", e))
        })
    }
}

impl fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EncodedPayload {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim_matches(|c: char| c.is_ascii_whitespace());
        decode_transport(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for EncodedPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Undo the transport layer and parse the structure.
fn decode_raw(payload: &str) -> Result<RawStructure> {
    let bytes = decode_transport(payload)?;
    parse_bytes(&bytes)
}

/// Decode a payload into a pixel grid of the given size.
///
/// # Examples
///
/// ```
/// use hexel::{decode, GridSize};
///
/// let payload = "W1siIzAwMDAwMCIsIiNmZmZmZmYiXSxbMCwxLDEsMF1d";
/// let grid = decode(payload, GridSize::new(2, 2)).unwrap();
/// assert_eq!(grid.to_hex_strings(), vec!["#000000", "#ffffff", "#ffffff", "#000000"]);
/// ```
///
/// # Errors
///
/// Any stage failure is returned as-is; no partial grid is produced.
pub fn decode(payload: &str, size: GridSize) -> Result<PixelGrid> {
    decode_with_palette(payload, size).map(|(_, grid)| grid)
}

/// Decode a payload into a pixel grid, also returning the palette exactly
/// as the payload lists it (order, duplicates and unused entries kept).
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_with_palette(payload: &str, size: GridSize) -> Result<(Palette, PixelGrid)> {
    let raw = decode_raw(payload)?;
    check_dimensions(raw.index_tokens.len(), size)?;
    let palette = normalize(&raw.palette_tokens)?;
    let grid = expand(&palette, &raw.index_tokens)?;
    tracing::debug!(%size, palette = palette.len(), "payload decoded");
    Ok((palette, grid))
}

/// Decode a payload into its palette and index sequence without expanding
/// it or checking it against any grid size.
///
/// Every index is still bounds-checked against the palette.
pub fn decode_parts(payload: &str) -> Result<(Palette, IndexSequence)> {
    let raw = decode_raw(payload)?;
    let palette = normalize(&raw.palette_tokens)?;
    let indices = parse_indices(&palette, &raw.index_tokens)?;
    Ok((palette, indices))
}

/// Encode a pixel grid of the given size.
///
/// # Examples
///
/// ```
/// use hexel::{decode, encode, GridSize, PixelGrid};
///
/// let grid: PixelGrid = ["#aa0000", "#bb0000", "#aa0000", "#aa0000"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let size = GridSize::new(2, 2);
/// let payload = encode(&grid, size).unwrap();
/// assert_eq!(decode(payload.as_str(), size).unwrap(), grid);
/// ```
///
/// # Errors
///
/// Returns `CodecError::DimensionMismatch` if the grid does not fill `size`.
pub fn encode(grid: &PixelGrid, size: GridSize) -> Result<EncodedPayload> {
    check_dimensions(grid.len(), size)?;
    let (palette, indices) = deflate(grid);
    let payload = encode_parts(&palette, &indices)?;
    tracing::debug!(%size, palette = palette.len(), "grid encoded");
    Ok(payload)
}

/// Encode an already deflated palette and index sequence.
///
/// This is the inverse of [`decode_parts`]; the palette is written in the
/// order given.
///
/// # Errors
///
/// Returns `CodecError::IndexOutOfRange` if an index does not address the
/// palette.
pub fn encode_parts(palette: &Palette, indices: &IndexSequence) -> Result<EncodedPayload> {
    resolve(palette, indices)?;
    let text = serialize(&palette.to_hex_strings(), indices.as_slice())?;
    let payload = encode_transport(text.as_bytes());
    tracing::debug!(json_len = text.len(), payload_len = payload.len(), "parts encoded");
    Ok(EncodedPayload(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    const TWO_BY_TWO: &str = "W1siIzAwMDAwMCIsIiNmZmZmZmYiXSxbMCwxLDEsMF1d";
    const OUT_OF_RANGE: &str = "W1siI2ZmMDAwMCJdLFswLDFdXQ==";

    fn payload_of(text: &str) -> String {
        encode_transport(text.as_bytes())
    }

    #[test]
    fn test_decode_two_by_two() {
        let grid = decode(TWO_BY_TWO, GridSize::new(2, 2)).unwrap();
        assert_eq!(grid.to_hex_strings(), vec!["#000000", "#ffffff", "#ffffff", "#000000"]);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let a = decode(TWO_BY_TWO, GridSize::new(2, 2)).unwrap();
        let b = decode(TWO_BY_TWO, GridSize::new(2, 2)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_out_of_range() {
        let err = decode(OUT_OF_RANGE, GridSize::new(2, 1)).unwrap_err();
        assert_eq!(err, CodecError::IndexOutOfRange { index: 1, palette_size: 1, position: 1 });
    }

    #[test]
    fn test_decode_dimension_mismatch() {
        let err = decode(TWO_BY_TWO, GridSize::new(3, 3)).unwrap_err();
        assert_eq!(
            err,
            CodecError::DimensionMismatch { expected: 9, actual: 4, width: 3, height: 3 }
        );
    }

    #[test]
    fn test_dimension_checked_before_palette() {
        let payload = payload_of(r##"[["nope"],[0,0,0]]"##);
        let err = decode(&payload, GridSize::new(2, 2)).unwrap_err();
        assert!(matches!(err, CodecError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_decode_stage_errors() {
        let size = GridSize::new(1, 1);
        assert!(matches!(decode("!!!", size), Err(CodecError::TransportFormat(_))));
        assert!(matches!(
            decode(&payload_of("[[\"#000\"]]"), size),
            Err(CodecError::StructureFormat(_))
        ));
        assert!(matches!(
            decode(&payload_of("[[\"#00\"],[0]]"), size),
            Err(CodecError::InvalidColor { position: 0, .. })
        ));
        assert!(matches!(
            decode(&payload_of("[[\"#000\"],[-1]]"), size),
            Err(CodecError::InvalidIndex { position: 0, .. })
        ));
    }

    #[test]
    fn test_empty_palette_non_empty_indices() {
        let err = decode(&payload_of("[[],[0]]"), GridSize::new(1, 1)).unwrap_err();
        assert!(matches!(err, CodecError::IndexOutOfRange { palette_size: 0, .. }));
    }

    #[test]
    fn test_encode_matches_compact_format() {
        let grid: PixelGrid =
            [0xaa, 0xbb, 0xaa].iter().map(|&r| Color::new(r, 0, 0)).collect();
        let payload = encode(&grid, GridSize::new(3, 1)).unwrap();
        let text = decode_transport(payload.as_str()).unwrap();
        assert_eq!(text, br##"[["#aa0000","#bb0000"],[0,1,0]]"##);
    }

    #[test]
    fn test_encode_dimension_mismatch() {
        let grid: PixelGrid = vec![Color::new(0, 0, 0); 3].into_iter().collect();
        assert!(matches!(
            encode(&grid, GridSize::new(2, 2)),
            Err(CodecError::DimensionMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_decode_with_palette_keeps_payload_order() {
        let payload = payload_of(r##"[["#ffffff","#000000","#ffffff","#123456"],[1,0]]"##);
        let (palette, grid) = decode_with_palette(&payload, GridSize::new(2, 1)).unwrap();
        assert_eq!(palette.to_hex_strings(), vec!["#ffffff", "#000000", "#ffffff", "#123456"]);
        assert_eq!(grid.to_hex_strings(), vec!["#000000", "#ffffff"]);
    }

    #[test]
    fn test_encode_parts_inverts_decode_parts() {
        let (palette, indices) = decode_parts(TWO_BY_TWO).unwrap();
        assert_eq!(encode_parts(&palette, &indices).unwrap().as_str(), TWO_BY_TWO);
    }

    #[test]
    fn test_encode_parts_rejects_dangling_index() {
        let palette: Palette = [Color::new(0, 0, 0)].into_iter().collect();
        let err = encode_parts(&palette, &IndexSequence::new(vec![0, 2])).unwrap_err();
        assert_eq!(err, CodecError::IndexOutOfRange { index: 2, palette_size: 1, position: 1 });
    }

    #[test]
    fn test_decode_parts() {
        let (palette, indices) = decode_parts(TWO_BY_TWO).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(indices.as_slice(), &[0, 1, 1, 0]);
        assert!(decode_parts(OUT_OF_RANGE).is_err());
    }

    #[test]
    fn test_payload_from_str() {
        let payload: EncodedPayload = format!("{}\n", TWO_BY_TWO).parse().unwrap();
        assert_eq!(payload.as_str(), TWO_BY_TWO);
        assert!("not base64!".parse::<EncodedPayload>().is_err());
    }

    #[test]
    fn test_structure_text() {
        let payload: EncodedPayload = TWO_BY_TWO.parse().unwrap();
        assert_eq!(payload.structure_text().unwrap(), r##"[["#000000","#ffffff"],[0,1,1,0]]"##);
    }
}
