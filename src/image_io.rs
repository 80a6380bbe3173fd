//! Conversion between pixel grids and raster images, plus PNG output

use image::imageops::FilterType;
use image::RgbaImage;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::color::Color;
use crate::error::CodecError;
use crate::grid::{check_dimensions, GridSize, PixelGrid};

/// Error type for image operations
#[derive(Debug, Error)]
pub enum ImageIoError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Grid does not fit the requested dimensions
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Scaled dimensions do not fit in a `u32`
    #[error("Cannot scale {width}x{height} image by {factor}: dimensions overflow")]
    ScaleOverflow { width: u32, height: u32, factor: u32 },
}

/// Scan an image row by row into a pixel grid.
///
/// The payload format has no alpha channel, so alpha is dropped.
pub fn grid_from_image(image: &RgbaImage) -> (PixelGrid, GridSize) {
    let (width, height) = image.dimensions();
    let grid = image.pixels().map(|&p| Color::from_rgba(p)).collect();
    (grid, GridSize::new(width, height))
}

/// Render a pixel grid as an opaque RGBA image.
///
/// # Errors
///
/// Returns `ImageIoError::Codec` if the grid does not fill `size`.
pub fn grid_to_image(grid: &PixelGrid, size: GridSize) -> Result<RgbaImage, ImageIoError> {
    check_dimensions(grid.len(), size)?;
    let mut image = RgbaImage::new(size.width, size.height);
    for (pixel, color) in image.pixels_mut().zip(grid.iter()) {
        *pixel = color.to_rgba();
    }
    Ok(image)
}

/// Load any image format supported by the `image` crate as RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, ImageIoError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Save an RGBA image to a PNG file.
///
/// # Arguments
///
/// * `image` - The image to save
/// * `path` - The output file path; missing parent directories are created
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ImageIoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Encode an RGBA image as PNG bytes in memory.
pub fn png_bytes(image: &RgbaImage) -> Result<Vec<u8>, ImageIoError> {
    use image::ImageEncoder;

    let mut bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut bytes);
    encoder.write_image(image.as_raw(), image.width(), image.height(), image::ColorType::Rgba8)?;
    Ok(bytes)
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This keeps each cell a crisp square.
///
/// # Errors
///
/// Returns `ImageIoError::ScaleOverflow` if a scaled side exceeds `u32::MAX`.
pub fn scale_image(image: RgbaImage, factor: u32) -> Result<RgbaImage, ImageIoError> {
    if factor <= 1 {
        return Ok(image);
    }
    let (width, height) = image.dimensions();
    match (width.checked_mul(factor), height.checked_mul(factor)) {
        (Some(w), Some(h)) => Ok(image::imageops::resize(&image, w, h, FilterType::Nearest)),
        _ => Err(ImageIoError::ScaleOverflow { width, height, factor }),
    }
}
