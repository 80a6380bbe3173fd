//! Terminal rendering utilities for colored grid display
//!
//! Provides ANSI escape sequence generation for previewing a decoded grid
//! with true-color backgrounds in terminal emulators that support 24-bit
//! color.

use crate::color::Color;
use crate::error::CodecError;
use crate::grid::{check_dimensions, GridSize, PixelGrid};
use crate::palette::Palette;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Convert a color to an ANSI 24-bit background escape sequence.
///
/// # Examples
///
/// ```
/// use hexel::color::Color;
/// use hexel::terminal::color_to_ansi_bg;
///
/// assert_eq!(color_to_ansi_bg(Color::new(255, 0, 0)), "\x1b[48;2;255;0;0m");
/// ```
pub fn color_to_ansi_bg(color: Color) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

/// Render a grid as rows of colored cells.
///
/// Each cell is `cell_width` spaces on its background color, followed by a
/// reset so colors never bleed past the line end.
///
/// # Errors
///
/// Returns `CodecError::DimensionMismatch` if the grid does not fill `size`.
pub fn render_ansi_grid(
    grid: &PixelGrid,
    size: GridSize,
    cell_width: usize,
) -> Result<String, CodecError> {
    check_dimensions(grid.len(), size)?;

    let pad = " ".repeat(cell_width);
    let mut output = String::new();
    for row in grid.rows(size.width) {
        for &color in row {
            output.push_str(&color_to_ansi_bg(color));
            output.push_str(&pad);
            output.push_str(ANSI_RESET);
        }
        output.push('\n');
    }
    Ok(output)
}

/// Render a palette as a legend, one swatch per line with its index.
pub fn render_palette_legend(palette: &Palette) -> String {
    let mut legend = String::from("Palette:\n");
    for (index, &color) in palette.iter().enumerate() {
        legend.push_str(&format!(
            "  {:>3} {}  {}  {}\n",
            index,
            color_to_ansi_bg(color),
            ANSI_RESET,
            color
        ));
    }
    legend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_two_by_two() {
        let grid: PixelGrid = ["#000", "#fff", "#fff", "#000"]
            .iter()
            .map(|s| s.parse::<Color>().unwrap())
            .collect();
        let out = render_ansi_grid(&grid, GridSize::new(2, 2), 2).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "\x1b[48;2;0;0;0m  \x1b[0m\x1b[48;2;255;255;255m  \x1b[0m"
        );
    }

    #[test]
    fn test_render_rejects_wrong_size() {
        let grid: PixelGrid = vec![Color::new(0, 0, 0); 3].into_iter().collect();
        assert!(render_ansi_grid(&grid, GridSize::new(2, 2), 1).is_err());
    }

    #[test]
    fn test_legend_lists_every_entry() {
        let palette = Palette::new(vec![Color::new(0, 0, 0), Color::new(0xaa, 0, 0)]);
        let legend = render_palette_legend(&palette);
        assert!(legend.contains("#000000"));
        assert!(legend.contains("#aa0000"));
        assert_eq!(legend.lines().count(), 3);
    }
}
