//! WASM API module for browser/JS interop
//!
//! Provides WebAssembly bindings so a web page can decode a payload into
//! per-cell colors (or raw RGBA) and encode a color list back.

use wasm_bindgen::prelude::*;

use crate::codec::{decode, encode};
use crate::color::{parse_hex_color, Color};
use crate::grid::{GridSize, PixelGrid};
use crate::image_io::{grid_to_image, png_bytes, scale_image};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Result of decoding a payload to RGBA pixels.
#[wasm_bindgen]
pub struct DecodeResult {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl DecodeResult {
    /// Width of the grid in cells
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid in cells
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data (4 bytes per cell, alpha always 255)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

/// Decode a payload into `#rrggbb` strings, one per cell, row-major.
#[wasm_bindgen(js_name = decodeColors)]
pub fn decode_colors(payload: &str, width: u32, height: u32) -> Result<Vec<String>, JsError> {
    let grid = decode(payload, GridSize::new(width, height))?;
    Ok(grid.to_hex_strings())
}

/// Decode a payload into RGBA pixel data.
#[wasm_bindgen(js_name = decodeRgba)]
pub fn decode_rgba(payload: &str, width: u32, height: u32) -> Result<DecodeResult, JsError> {
    let size = GridSize::new(width, height);
    let grid = decode(payload, size)?;
    let image = grid_to_image(&grid, size)?;
    Ok(DecodeResult { width, height, pixels: image.into_raw() })
}

/// Decode a payload straight to PNG bytes, each cell `scale` pixels square.
#[wasm_bindgen(js_name = decodePng)]
pub fn decode_png(
    payload: &str,
    width: u32,
    height: u32,
    scale: u32,
) -> Result<Vec<u8>, JsError> {
    let size = GridSize::new(width, height);
    let grid = decode(payload, size)?;
    let image = scale_image(grid_to_image(&grid, size)?, scale)?;
    Ok(png_bytes(&image)?)
}

/// Encode per-cell color strings into a payload.
#[wasm_bindgen(js_name = encodeColors)]
pub fn encode_colors(colors: Vec<String>, width: u32, height: u32) -> Result<String, JsError> {
    let cells = colors
        .iter()
        .enumerate()
        .map(|(i, s)| {
            parse_hex_color(s).map_err(|e| JsError::new(&format!("cell {}: {}", i, e)))
        })
        .collect::<Result<Vec<Color>, JsError>>()?;
    let payload = encode(&PixelGrid::new(cells), GridSize::new(width, height))?;
    Ok(payload.into_string())
}
