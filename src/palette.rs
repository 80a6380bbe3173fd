//! Palette normalization
//!
//! Turns raw palette tokens into canonical [`Color`] values. Order is kept
//! exactly as given since it defines the index space; duplicates are legal.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::color::{parse_hex_color, Color};
use crate::error::{CodecError, Result};

/// An ordered, index-addressable list of colors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    /// Canonical `#rrggbb` strings, in palette order.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_string).collect()
    }
}

impl Index<usize> for Palette {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.colors[index]
    }
}

impl FromIterator<Color> for Palette {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self { colors: iter.into_iter().collect() }
    }
}

/// Normalize raw palette tokens into a [`Palette`].
///
/// Each token has surrounding whitespace trimmed and surrounding quote
/// characters (`"` or `'`) stripped before it is checked against the
/// `#RGB` / `#RRGGBB` grammar.
///
/// # Examples
///
/// ```
/// use hexel::palette::normalize;
///
/// let palette = normalize(&["#FFF", "'#000000'"]).unwrap();
/// assert_eq!(palette.to_hex_strings(), vec!["#ffffff", "#000000"]);
/// ```
///
/// # Errors
///
/// Returns `CodecError::InvalidColor` naming the first offending token and
/// its position. Malformed entries are never coerced.
pub fn normalize<S: AsRef<str>>(tokens: &[S]) -> Result<Palette> {
    let colors = tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            let token = token.as_ref();
            parse_hex_color(strip_artifacts(token))
                .map_err(|_| CodecError::InvalidColor { token: token.to_string(), position })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(colors = colors.len(), "palette normalized");
    Ok(Palette::new(colors))
}

/// Remove whitespace and quoting left around a token by lenient producers.
fn strip_artifacts(token: &str) -> &str {
    token.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_canonical() {
        let palette = normalize(&["#1D1E23", "#f74070", "#abc"]).unwrap();
        assert_eq!(palette.to_hex_strings(), vec!["#1d1e23", "#f74070", "#aabbcc"]);
    }

    #[test]
    fn test_strips_quotes_and_whitespace() {
        let palette = normalize(&["\"#ff0000\"", " '#00ff00' ", "  #0000ff\n"]).unwrap();
        assert_eq!(palette.to_hex_strings(), vec!["#ff0000", "#00ff00", "#0000ff"]);
    }

    #[test]
    fn test_reports_token_and_position() {
        let err = normalize(&["#000000", "#ffffff", "red"]).unwrap_err();
        assert_eq!(err, CodecError::InvalidColor { token: "red".to_string(), position: 2 });
    }

    #[test]
    fn test_reports_original_token_not_stripped() {
        let err = normalize(&["\"#12\""]).unwrap_err();
        assert_eq!(err, CodecError::InvalidColor { token: "\"#12\"".to_string(), position: 0 });
    }

    #[test]
    fn test_inner_quotes_not_coerced() {
        assert!(normalize(&["#ff\"00\"00"]).is_err());
    }

    #[test]
    fn test_rejects_alpha_and_named() {
        assert!(normalize(&["#ff000080"]).is_err());
        assert!(normalize(&["transparent"]).is_err());
        assert!(normalize(&[""]).is_err());
    }

    #[test]
    fn test_duplicates_kept() {
        let palette = normalize(&["#000", "#000000"]).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette[0], palette[1]);
    }

    #[test]
    fn test_empty_palette() {
        let palette = normalize::<&str>(&[]).unwrap();
        assert!(palette.is_empty());
        assert_eq!(palette.get(0), None);
    }
}
