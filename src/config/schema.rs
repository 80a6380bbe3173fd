//! Configuration schema types for `hexel.toml`
//!
//! Every section is optional; a missing file or section falls back to the
//! defaults below.

use serde::{Deserialize, Serialize};

use crate::grid::GridSize;

/// Largest accepted output scale factor
pub const MAX_SCALE: u32 = 64;

/// Grid dimensions agreed between encoder and decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cells per row
    #[serde(default = "default_dimension")]
    pub width: u32,
    /// Number of rows
    #[serde(default = "default_dimension")]
    pub height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { width: default_dimension(), height: default_dimension() }
    }
}

impl GridConfig {
    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }
}

fn default_dimension() -> u32 {
    16
}

/// PNG output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Integer upscale factor for PNG output
    #[serde(default = "default_scale")]
    pub scale: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { scale: default_scale() }
    }
}

fn default_scale() -> u32 {
    1
}

/// Terminal preview settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Characters per cell; 2 gives roughly square cells in most fonts
    #[serde(default = "default_cell_width")]
    pub cell_width: usize,
    /// Print the palette legend under the preview
    #[serde(default)]
    pub legend: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { cell_width: default_cell_width(), legend: false }
    }
}

fn default_cell_width() -> usize {
    2
}

/// Complete hexel.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HexelConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "grid.width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hexel.toml: '{}' {}", self.field, self.message)
    }
}

impl HexelConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.grid.width == 0 {
            errors.push(ConfigValidationError {
                field: "grid.width".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if self.grid.height == 0 {
            errors.push(ConfigValidationError {
                field: "grid.height".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.output.scale == 0 || self.output.scale > MAX_SCALE {
            errors.push(ConfigValidationError {
                field: "output.scale".to_string(),
                message: format!("must be between 1 and {}", MAX_SCALE),
            });
        }

        if self.preview.cell_width == 0 {
            errors.push(ConfigValidationError {
                field: "preview.cell_width".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }
}
