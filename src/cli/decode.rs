//! Decode command implementation

use std::path::Path;
use std::process::ExitCode;

use serde_json::json;

use crate::codec::decode;
use crate::config::HexelConfig;
use crate::error::CodecError;
use crate::image_io::{grid_to_image, save_png, scale_image};

use super::{read_payload, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the decode command
pub fn run_decode(input: &Path, config: &HexelConfig, output: Option<&Path>, json: bool) -> ExitCode {
    let payload = match read_payload(input) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let size = config.grid.size();
    let grid = match decode(&payload, size) {
        Ok(g) => g,
        Err(e) => return report_codec_error(&e, json),
    };

    if let Some(path) = output {
        let scaled = grid_to_image(&grid, size)
            .and_then(|img| scale_image(img, config.output.scale));
        let image = match scaled {
            Ok(img) => img,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
        if let Err(e) = save_png(&image, path) {
            eprintln!("Error: Failed to save '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        eprintln!("Saved: {}", path.display());
    }

    if json {
        println!("{}", json!(grid.to_hex_strings()));
    } else if output.is_none() {
        for row in grid.rows(size.width) {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            println!("{}", line.join(" "));
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Print a codec error and return the matching exit code.
///
/// With `--json` the error also goes to stdout as an object so scripted
/// callers can branch on `kind`.
pub(super) fn report_codec_error(err: &CodecError, json: bool) -> ExitCode {
    if json {
        println!("{}", json!({ "error": { "kind": err.kind(), "message": err.to_string() } }));
    }
    eprintln!("Error: {}", err);
    ExitCode::from(EXIT_ERROR)
}
