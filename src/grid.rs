//! Grid expansion and deflation
//!
//! A [`PixelGrid`] is the fully resolved image: one [`Color`] per cell in
//! row-major order. [`expand`] builds it from a palette plus index tokens,
//! [`deflate`] goes the other way with stable first-seen deduplication.

use std::collections::HashMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{CodecError, Result};
use crate::palette::Palette;

/// Grid dimensions in cells.
///
/// Payloads never carry their own dimensions, so every decode is checked
/// against a size supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells, or `None` if `width * height` overflows `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(16, 16)
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Per-cell palette indices in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexSequence {
    indices: Vec<usize>,
}

impl IndexSequence {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

/// Resolved colors, one per cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelGrid {
    cells: Vec<Color>,
}

impl PixelGrid {
    pub fn new(cells: Vec<Color>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.cells.iter()
    }

    /// Cell at column `x`, row `y` for a grid `width` cells wide.
    pub fn get(&self, x: u32, y: u32, width: u32) -> Option<Color> {
        if x >= width {
            return None;
        }
        let offset = (y as usize).checked_mul(width as usize)?.checked_add(x as usize)?;
        self.cells.get(offset).copied()
    }

    /// Iterate rows of `width` cells. A zero width yields no rows.
    pub fn rows(&self, width: u32) -> impl Iterator<Item = &[Color]> {
        // chunks() panics on a zero size
        let chunk = if width == 0 { self.cells.len().max(1) } else { width as usize };
        self.cells.chunks(chunk).filter(move |_| width != 0)
    }

    /// Canonical `#rrggbb` strings, one per cell.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.cells.iter().map(Color::to_string).collect()
    }
}

impl Index<usize> for PixelGrid {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.cells[index]
    }
}

impl FromIterator<Color> for PixelGrid {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

/// Check that `actual` cells fill a grid of `size` exactly.
///
/// # Errors
///
/// Returns `CodecError::DimensionMismatch` when the counts differ, or when
/// `width * height` cannot be represented at all.
pub fn check_dimensions(actual: usize, size: GridSize) -> Result<()> {
    let mismatch = |expected| CodecError::DimensionMismatch {
        expected,
        actual,
        width: size.width,
        height: size.height,
    };
    match size.cell_count() {
        Some(expected) if expected == actual => Ok(()),
        Some(expected) => Err(mismatch(expected)),
        None => Err(mismatch(usize::MAX)),
    }
}

/// Parse one index token as a non-negative integer.
///
/// A plain run of digits too large for `usize` is still an integer; it
/// saturates to `usize::MAX` so the lookup reports it as out of range.
fn parse_index(token: &str, position: usize) -> Result<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::InvalidIndex { token: token.to_string(), position });
    }
    Ok(token.parse::<usize>().unwrap_or(usize::MAX))
}

/// Look up one index, failing instead of clamping or wrapping.
fn lookup(palette: &Palette, index: usize, position: usize) -> Result<Color> {
    palette.get(index).ok_or(CodecError::IndexOutOfRange {
        index,
        palette_size: palette.len(),
        position,
    })
}

/// Expand raw index tokens against a palette.
///
/// Tokens are handled in order and the first failure wins, so the error
/// always names the earliest bad cell.
///
/// # Examples
///
/// ```
/// use hexel::grid::expand;
/// use hexel::palette::normalize;
///
/// let palette = normalize(&["#000000", "#ffffff"]).unwrap();
/// let grid = expand(&palette, &["0", "1", "1", "0"]).unwrap();
/// assert_eq!(grid.to_hex_strings(), vec!["#000000", "#ffffff", "#ffffff", "#000000"]);
/// ```
///
/// # Errors
///
/// - `CodecError::InvalidIndex` if a token is not a non-negative integer
/// - `CodecError::IndexOutOfRange` if an index is `>= palette.len()`
pub fn expand<S: AsRef<str>>(palette: &Palette, index_tokens: &[S]) -> Result<PixelGrid> {
    let cells = index_tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            let index = parse_index(token.as_ref(), position)?;
            lookup(palette, index, position)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(cells = cells.len(), palette = palette.len(), "grid expanded");
    Ok(PixelGrid::new(cells))
}

/// Parse and bounds-check index tokens without resolving them to colors.
///
/// # Errors
///
/// Same as [`expand`].
pub fn parse_indices<S: AsRef<str>>(palette: &Palette, index_tokens: &[S]) -> Result<IndexSequence> {
    index_tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            let index = parse_index(token.as_ref(), position)?;
            lookup(palette, index, position).map(|_| index)
        })
        .collect::<Result<Vec<_>>>()
        .map(IndexSequence::new)
}

/// Resolve an already-typed index sequence against a palette.
///
/// # Errors
///
/// Returns `CodecError::IndexOutOfRange` for the first index past the end of
/// the palette.
pub fn resolve(palette: &Palette, indices: &IndexSequence) -> Result<PixelGrid> {
    indices
        .as_slice()
        .iter()
        .enumerate()
        .map(|(position, &index)| lookup(palette, index, position))
        .collect()
}

/// Deflate a grid into a deduplicated palette and per-cell indices.
///
/// Colors are numbered in first-seen order, so the same grid always yields
/// the same palette.
///
/// # Examples
///
/// ```
/// use hexel::grid::{deflate, PixelGrid};
///
/// let grid: PixelGrid = ["#aa0000", "#bb0000", "#aa0000"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let (palette, indices) = deflate(&grid);
/// assert_eq!(palette.to_hex_strings(), vec!["#aa0000", "#bb0000"]);
/// assert_eq!(indices.as_slice(), &[0, 1, 0]);
/// ```
pub fn deflate(grid: &PixelGrid) -> (Palette, IndexSequence) {
    let mut seen: HashMap<Color, usize> = HashMap::new();
    let mut colors = Vec::new();
    let mut indices = Vec::with_capacity(grid.len());

    for &color in grid.iter() {
        let index = *seen.entry(color).or_insert_with(|| {
            colors.push(color);
            colors.len() - 1
        });
        indices.push(index);
    }

    tracing::debug!(cells = indices.len(), palette = colors.len(), "grid deflated");
    (Palette::new(colors), IndexSequence::new(indices))
}
