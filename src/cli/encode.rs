//! Encode command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::codec::encode_parts;
use crate::grid::deflate;
use crate::image_io::{grid_from_image, load_image};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the encode command
pub fn run_encode(input: &Path, output: Option<&Path>, json_out: Option<&Path>) -> ExitCode {
    let image = match load_image(input) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: Cannot open image '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let (grid, size) = grid_from_image(&image);
    let (palette, indices) = deflate(&grid);
    let payload = match encode_parts(&palette, &indices) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let text = match payload.structure_text() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Some(path) = json_out {
        if let Err(e) = std::fs::write(path, &text) {
            eprintln!("Error: Cannot write '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, format!("{}\n", payload)) {
                eprintln!("Error: Cannot write '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        None => println!("{}", payload),
    }

    eprintln!("Encoded {} grid", size);
    eprintln!("  colors:       {}", palette.len());
    eprintln!("  json length:  {}", text.len());
    eprintln!("  payload size: {}", payload.as_str().len());
    if let Some(path) = output {
        eprintln!("  wrote {}", path.display());
    }
    if let Some(path) = json_out {
        eprintln!("  wrote {}", path.display());
    }

    ExitCode::from(EXIT_SUCCESS)
}
