//! Preview command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::codec::decode_with_palette;
use crate::config::HexelConfig;
use crate::terminal::{render_ansi_grid, render_palette_legend};

use super::decode::report_codec_error;
use super::{read_payload, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the preview command
pub fn run_preview(input: &Path, config: &HexelConfig) -> ExitCode {
    let payload = match read_payload(input) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let size = config.grid.size();
    let (palette, grid) = match decode_with_palette(&payload, size) {
        Ok(decoded) => decoded,
        Err(e) => return report_codec_error(&e, false),
    };

    match render_ansi_grid(&grid, size, config.preview.cell_width) {
        Ok(rendered) => print!("{}", rendered),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if config.preview.legend {
        println!();
        print!("{}", render_palette_legend(&palette));
    }

    ExitCode::from(EXIT_SUCCESS)
}
