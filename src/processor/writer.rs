//! Output writing module for parsed SOS collections
//!
//! Converts each collection to a DataFrame and writes it next to its peers
//! in the output directory as Parquet or CSV, one output per input file.

use crate::config::{CompressionAlgorithm, OutputFormat, ProcessorConfig};
use crate::error::{ProcessingError, ProcessingResult};
use crate::models::ParsedCollection;
use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Collection writer for one output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
    format: OutputFormat,
    compression: CompressionAlgorithm,
}

impl OutputWriter {
    /// Create a new writer using the config's format and compression
    pub fn new(output_dir: PathBuf, config: &ProcessorConfig) -> Self {
        Self {
            output_dir,
            format: config.output_format,
            compression: config.compression,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<output dir>/<input stem>.<ext>`
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "collection".to_string());
        self.output_dir
            .join(format!("{}.{}", stem, self.format.extension()))
    }

    /// Write one collection, returning the output path and row count
    pub fn write(
        &self,
        input: &Path,
        collection: &ParsedCollection,
    ) -> ProcessingResult<(PathBuf, usize)> {
        let output_path = self.output_path_for(input);
        let mut df = collection.to_dataframe()?;

        match self.format {
            OutputFormat::Parquet => self.write_parquet(&mut df, &output_path)?,
            OutputFormat::Csv => self.write_csv(&mut df, &output_path)?,
        }

        debug!(
            "Wrote {} rows x {} columns to {}",
            df.height(),
            df.width(),
            output_path.display()
        );
        Ok((output_path, df.height()))
    }

    fn write_parquet(&self, df: &mut DataFrame, output_path: &Path) -> ProcessingResult<()> {
        let file = File::create(output_path)?;
        ParquetWriter::new(file)
            .with_compression(self.compression.to_polars_compression())
            .finish(df)
            .map_err(|e| ProcessingError::Write {
                path: output_path.to_path_buf(),
                reason: format!("Failed to write parquet: {}", e),
            })?;
        Ok(())
    }

    fn write_csv(&self, df: &mut DataFrame, output_path: &Path) -> ProcessingResult<()> {
        let mut file = File::create(output_path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .map_err(|e| ProcessingError::Write {
                path: output_path.to_path_buf(),
                reason: format!("Failed to write csv: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SosParser;
    use crate::processor::tests::{OM2_RESPONSE, SOCIAL_RESPONSE};
    use polars::prelude::{CsvReadOptions, ParquetReader, SerReader};
    use tempfile::TempDir;

    #[test]
    fn test_output_path_uses_input_stem() {
        let writer = OutputWriter::new(PathBuf::from("/out"), &ProcessorConfig::default());
        assert_eq!(
            writer.output_path_for(Path::new("/data/station-1.xml")),
            PathBuf::from("/out/station-1.parquet")
        );

        let csv = OutputWriter::new(
            PathBuf::from("/out"),
            &ProcessorConfig::default().with_output_format(OutputFormat::Csv),
        );
        assert_eq!(
            csv.output_path_for(Path::new("response.v2.xml")),
            PathBuf::from("/out/response.v2.csv")
        );
    }

    #[test]
    fn test_parquet_round_trip_keeps_columns() {
        let temp_dir = TempDir::new().unwrap();
        let collection = SosParser::new().parse(OM2_RESPONSE.as_bytes()).unwrap();
        let writer = OutputWriter::new(temp_dir.path().to_path_buf(), &ProcessorConfig::default());

        let (path, rows) = writer.write(Path::new("om2.xml"), &collection).unwrap();
        assert_eq!(rows, 2);

        let df = ParquetReader::new(File::open(&path).unwrap())
            .finish()
            .unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), collection.schema.len());
        assert_eq!(df.get_column_names_str()[0], "observedProperty");
    }

    #[test]
    fn test_csv_output_with_timestamps() {
        let temp_dir = TempDir::new().unwrap();
        let collection = SosParser::for_version("UCD_SOCIAL")
            .unwrap()
            .parse(SOCIAL_RESPONSE.as_bytes())
            .unwrap();
        let config = ProcessorConfig::default().with_output_format(OutputFormat::Csv);
        let writer = OutputWriter::new(temp_dir.path().to_path_buf(), &config);

        let (path, rows) = writer.write(Path::new("social.xml"), &collection).unwrap();
        assert_eq!(rows, 1);

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path))
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 7);
    }

    #[test]
    fn test_missing_output_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let collection = SosParser::new().parse(OM2_RESPONSE.as_bytes()).unwrap();
        let writer = OutputWriter::new(temp_dir.path().join("missing"), &ProcessorConfig::default());

        let result = writer.write(Path::new("om2.xml"), &collection);
        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }
}
