//! Configuration management and validation.
//!
//! Provides the parser settings shared by every parse call and the batch
//! processor settings (workers, output format, compression, error policy)
//! used by the command line front end.

use crate::error::{ProcessingError, ProcessingResult};
use crate::models::DialectSelector;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Settings applied to every parse call of an `SosParser`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Fail when an optional column chosen from the first observation is
    /// missing on a later one, instead of recording a null
    pub strict_optional_fields: bool,
}

impl ParserConfig {
    pub fn with_strict_optional_fields(mut self, strict: bool) -> Self {
        self.strict_optional_fields = strict;
        self
    }
}

/// Output file formats for converted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Parquet,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Parquet => "parquet",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "parquet" => Ok(OutputFormat::Parquet),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(ProcessingError::configuration(format!(
                "unknown output format '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            other => Err(ProcessingError::configuration(format!(
                "unknown compression '{}'",
                other
            ))),
        }
    }
}

/// Global configuration for batch SOS processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Number of files parsed concurrently
    pub workers: usize,

    /// Dialect requested for every input (auto-detect by default)
    pub dialect: DialectSelector,

    /// Output file format
    pub output_format: OutputFormat,

    /// Parquet compression (ignored for CSV)
    pub compression: CompressionAlgorithm,

    /// Keep going after a file fails and report it in the stats
    pub continue_on_error: bool,

    /// Settings forwarded to the parser
    pub parser: ParserConfig,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            dialect: DialectSelector::Auto,
            output_format: OutputFormat::Parquet,
            compression: CompressionAlgorithm::Snappy,
            continue_on_error: false,
            parser: ParserConfig::default(),
        }
    }
}

impl ProcessorConfig {
    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_dialect(mut self, dialect: DialectSelector) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Enable strict handling of optional fields
    pub fn with_strict_optional_fields(mut self, strict: bool) -> Self {
        self.parser = self.parser.with_strict_optional_fields(strict);
        self
    }

    /// Check settings before a batch starts
    pub fn validate(&self) -> ProcessingResult<()> {
        if self.workers == 0 {
            return Err(ProcessingError::configuration(
                "worker count must be at least 1",
            ));
        }

        debug!(
            "Processor config: {} workers, {} output, {:?} compression, dialect {}",
            self.workers, self.output_format, self.compression, self.dialect
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ProcessorConfig::default();
        assert!(config.workers >= 1);
        assert_eq!(config.dialect, DialectSelector::Auto);
        assert!(!config.parser.strict_optional_fields);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = ProcessorConfig::default().with_workers(0);
        assert!(matches!(
            config.validate(),
            Err(ProcessingError::Configuration { .. })
        ));
    }

    #[test]
    fn test_builders_layer_over_defaults() {
        let config = ProcessorConfig::default()
            .with_workers(2)
            .with_output_format(OutputFormat::Csv)
            .with_compression(CompressionAlgorithm::Zstd)
            .with_continue_on_error(true)
            .with_strict_optional_fields(true);

        assert_eq!(config.workers, 2);
        assert_eq!(config.output_format.extension(), "csv");
        assert!(matches!(
            config.compression.to_polars_compression(),
            ParquetCompression::Zstd(None)
        ));
        assert!(config.continue_on_error);
        assert!(config.parser.strict_optional_fields);
    }

    #[test]
    fn test_parse_format_and_compression_names() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!(
            "none".parse::<CompressionAlgorithm>().unwrap(),
            CompressionAlgorithm::Uncompressed
        );
        assert!("xlsx".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_config_serializes_selector_strings() {
        let config = ProcessorConfig::default()
            .with_workers(3)
            .with_dialect(DialectSelector::Version2);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"2.0.0\""));

        let back: ProcessorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.workers, 3);
        assert_eq!(back.dialect, DialectSelector::Version2);
    }
}
