//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod decode;
mod encode;
mod info;
mod preview;

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, validate_config, CliOverrides, HexelConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "HEXEL_LOG";

/// Hexel - encode pixel grids as base64 palette payloads and decode them back
#[derive(Parser)]
#[command(name = "hexel")]
#[command(about = "Hexel - encode pixel grids as base64 palette payloads and decode them back")]
#[command(version)]
pub struct Cli {
    /// Path to hexel.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode an image file into a base64 payload
    Encode {
        /// Input image (PNG, JPEG, GIF, ...)
        input: PathBuf,

        /// Write the payload to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the unencoded JSON structure to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Decode a payload into a PNG, a JSON color list, or text rows
    Decode {
        /// Payload file, or '-' to read stdin
        input: PathBuf,

        /// Grid width in cells (default: from hexel.toml, else 16)
        #[arg(short = 'W', long)]
        width: Option<u32>,

        /// Grid height in cells (default: from hexel.toml, else 16)
        #[arg(short = 'H', long)]
        height: Option<u32>,

        /// Write a PNG image to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale PNG output by integer factor (1-64)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: Option<u32>,

        /// Print the decoded colors as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Preview a payload in the terminal using 24-bit color
    Preview {
        /// Payload file, or '-' to read stdin
        input: PathBuf,

        /// Grid width in cells (default: from hexel.toml, else 16)
        #[arg(short = 'W', long)]
        width: Option<u32>,

        /// Grid height in cells (default: from hexel.toml, else 16)
        #[arg(short = 'H', long)]
        height: Option<u32>,

        /// Characters per cell
        #[arg(long)]
        cell_width: Option<usize>,

        /// Print the palette legend below the grid
        #[arg(long)]
        legend: bool,
    },

    /// Show palette and size statistics for a payload
    Info {
        /// Payload file, or '-' to read stdin
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Encode { input, output, json } => {
            encode::run_encode(&input, output.as_deref(), json.as_deref())
        }
        Commands::Decode { input, width, height, output, scale, json } => {
            let overrides = CliOverrides { width, height, scale, ..Default::default() };
            match resolve_config(config_path, &overrides) {
                Ok(config) => decode::run_decode(&input, &config, output.as_deref(), json),
                Err(code) => code,
            }
        }
        Commands::Preview { input, width, height, cell_width, legend } => {
            let overrides = CliOverrides {
                width,
                height,
                cell_width,
                legend: legend.then_some(true),
                ..Default::default()
            };
            match resolve_config(config_path, &overrides) {
                Ok(config) => preview::run_preview(&input, &config),
                Err(code) => code,
            }
        }
        Commands::Info { input, json } => match resolve_config(config_path, &CliOverrides::default()) {
            Ok(config) => info::run_info(&input, &config, json),
            Err(code) => code,
        },
    }
}

/// Install the stderr tracing subscriber.
///
/// `HEXEL_LOG`, then `RUST_LOG`, take precedence over the `-v` count.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when run() is embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load config, apply CLI overrides and validate the result.
fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<HexelConfig, ExitCode> {
    let mut config = load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    merge_cli_overrides(&mut config, overrides);
    validate_config(&config).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    Ok(config)
}

/// Read a payload from a file, or from stdin when the path is `-`.
pub(crate) fn read_payload(input: &Path) -> Result<String, ExitCode> {
    let result = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(input)
    };

    result.map_err(|e| {
        eprintln!("Error: Cannot read payload '{}': {}", input.display(), e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}
