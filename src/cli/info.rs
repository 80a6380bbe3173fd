//! Info command implementation

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use crate::codec::{decode_parts, EncodedPayload};
use crate::config::HexelConfig;
use crate::grid::check_dimensions;

use super::decode::report_codec_error;
use super::{read_payload, EXIT_ERROR, EXIT_SUCCESS};

/// Statistics reported by `hexel info`
#[derive(Debug, Serialize)]
struct PayloadInfo {
    payload_len: usize,
    json_len: usize,
    palette_size: usize,
    cells: usize,
    /// Whether the cell count matches the configured grid
    fits_grid: bool,
    grid: String,
    palette: Vec<String>,
}

/// Execute the info command
pub fn run_info(input: &Path, config: &HexelConfig, json: bool) -> ExitCode {
    let text = match read_payload(input) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let result = text.parse::<EncodedPayload>().and_then(|payload| {
        let structure = payload.structure_text()?;
        let (palette, indices) = decode_parts(payload.as_str())?;
        Ok((payload, structure, palette, indices))
    });
    let (payload, structure, palette, indices) = match result {
        Ok(parts) => parts,
        Err(e) => return report_codec_error(&e, json),
    };

    let size = config.grid.size();
    let info = PayloadInfo {
        payload_len: payload.as_str().len(),
        json_len: structure.len(),
        palette_size: palette.len(),
        cells: indices.len(),
        fits_grid: check_dimensions(indices.len(), size).is_ok(),
        grid: size.to_string(),
        palette: palette.to_hex_strings(),
    };

    if json {
        match serde_json::to_string_pretty(&info) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("Payload:  {} chars", info.payload_len);
    println!("JSON:     {} chars", info.json_len);
    println!("Palette:  {} colors", info.palette_size);
    println!(
        "Cells:    {} ({} configured {} grid)",
        info.cells,
        if info.fits_grid { "fits" } else { "does not fit" },
        info.grid
    );
    for (index, color) in info.palette.iter().enumerate() {
        println!("  {:>3} {}", index, color);
    }

    ExitCode::from(EXIT_SUCCESS)
}
