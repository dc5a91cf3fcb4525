//! Command-line argument definitions for the SOS processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{CompressionAlgorithm, OutputFormat};
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::models::DialectSelector;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the SOS response processor
///
/// Converts Sensor Observation Service GetObservation responses (O&M 1.0,
/// O&M 2.0 and the social sensing dialect) into Parquet or CSV tables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sos-processor",
    version,
    about = "Convert SOS O&M observation responses into Parquet or CSV tables",
    long_about = "Parses Sensor Observation Service GetObservation responses in O&M 1.0, \
                  O&M 2.0 (bare or SOAP-enveloped) or the social sensing dialect, infers one \
                  record schema per document and writes one table per input file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert response files to Parquet or CSV
    Convert(ConvertArgs),
    /// Show the detected dialect and inferred schema of one response
    Inspect(InspectArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Input files, directories or glob patterns
    ///
    /// Directories are searched recursively for `.xml` files.
    #[arg(value_name = "INPUTS", required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Output directory, created if missing
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Output directory for converted tables"
    )]
    pub output_dir: PathBuf,

    /// Dialect to parse every input as
    #[arg(
        short = 'd',
        long = "dialect",
        value_name = "VERSION",
        default_value = "auto",
        help = "Dialect selector: auto, 1.0.0, 2.0.0 or UCD_SOCIAL"
    )]
    pub dialect: DialectSelector,

    /// Output file format
    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        default_value = "parquet",
        help = "Output format: parquet or csv"
    )]
    pub format: OutputFormat,

    /// Parquet compression algorithm
    #[arg(
        long = "compression",
        value_name = "ALGORITHM",
        default_value = "snappy",
        help = "Parquet compression: snappy, zstd, lz4 or none"
    )]
    pub compression: CompressionAlgorithm,

    /// Number of files converted concurrently
    ///
    /// Defaults to the number of CPU cores.
    #[arg(short = 'w', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Keep converting after a file fails
    #[arg(long = "continue-on-error", help = "Report failed files instead of aborting")]
    pub continue_on_error: bool,

    /// Fail when a later observation lacks an optional column present on the first
    #[arg(long = "strict", help = "Reject inconsistent optional fields")]
    pub strict: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Response file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Dialect to parse the file as
    #[arg(
        short = 'd',
        long = "dialect",
        value_name = "VERSION",
        default_value = "auto"
    )]
    pub dialect: DialectSelector,

    /// Print the result as JSON
    #[arg(long = "json")]
    pub json: bool,
}

impl Args {
    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
