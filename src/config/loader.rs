//! Configuration loading and discovery for `hexel.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::HexelConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for on disk
pub const CONFIG_FILE_NAME: &str = "hexel.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse hexel.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override grid width
    pub width: Option<u32>,
    /// Override grid height
    pub height: Option<u32>,
    /// Override PNG scale factor
    pub scale: Option<u32>,
    /// Override preview cell width
    pub cell_width: Option<usize>,
    /// Override preview legend
    pub legend: Option<bool>,
}

/// Find hexel.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for hexel.toml
/// 2. Check XDG_CONFIG_HOME/hexel/hexel.toml (or ~/.config/hexel/hexel.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find hexel.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("hexel").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find hexel.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a hexel.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// `find_config()` to locate one. If no config file is found, returns the
/// default configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/hexel.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<HexelConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            tracing::debug!("no hexel.toml found, using defaults");
            Ok(HexelConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<HexelConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path)?;
    let config: HexelConfig = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Turn validation problems into a `ConfigError`.
pub fn validate_config(config: &HexelConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. Callers should
/// re-run `validate_config` afterwards since overrides are unchecked.
pub fn merge_cli_overrides(config: &mut HexelConfig, overrides: &CliOverrides) {
    if let Some(width) = overrides.width {
        config.grid.width = width;
    }
    if let Some(height) = overrides.height {
        config.grid.height = height;
    }
    if let Some(scale) = overrides.scale {
        config.output.scale = scale;
    }
    if let Some(cell_width) = overrides.cell_width {
        config.preview.cell_width = cell_width;
    }
    if let Some(legend) = overrides.legend {
        config.preview.legend = legend;
    }
}
