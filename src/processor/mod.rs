//! Batch processing engine.
//!
//! Orchestrates the conversion of many SOS response files: discovery of the
//! inputs, concurrent parsing on the blocking pool, and one output file per
//! input written by [`writer::OutputWriter`].

pub mod discovery;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::FileDiscovery, writer::OutputWriter};

use crate::config::ProcessorConfig;
use crate::error::{ProcessingError, ProcessingResult};
use crate::models::ProcessingStats;
use crate::parser::SosParser;

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;
use tokio::task;
use tracing::{debug, error, info};

/// Outcome of one successfully converted file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub records: usize,
}

/// Main processor for batch SOS conversion
#[derive(Debug)]
pub struct BatchProcessor {
    config: ProcessorConfig,
    parser: Arc<SosParser>,
    writer: Arc<OutputWriter>,
}

impl BatchProcessor {
    /// Create a new batch processor writing into `output_dir`
    pub fn new(output_dir: PathBuf, config: ProcessorConfig) -> ProcessingResult<Self> {
        config.validate()?;
        let parser = SosParser::with_config(config.parser.clone()).with_selector(config.dialect);
        let writer = OutputWriter::new(output_dir, &config);

        Ok(Self {
            config,
            parser: Arc::new(parser),
            writer: Arc::new(writer),
        })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Discover the inputs and convert every file
    pub async fn process_inputs(&self, inputs: &[String]) -> ProcessingResult<ProcessingStats> {
        println!("\n{}", "Discovering XML files...".bright_yellow());
        let files = FileDiscovery::new(inputs.iter().cloned()).discover_xml_files()?;
        println!(
            "  {} {} input files",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold()
        );

        self.process_files(&files).await
    }

    /// Convert the given files
    ///
    /// Fails before converting anything when two inputs map to the same
    /// output file.
    pub async fn process_files(&self, files: &[PathBuf]) -> ProcessingResult<ProcessingStats> {
        let start_time = Instant::now();
        self.check_output_collisions(files)?;
        println!(
            "{}",
            "Starting SOS response conversion".bright_green().bold()
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.writer.output_dir().display()
        );

        fs::create_dir_all(self.writer.output_dir()).await?;

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .map_err(|e| ProcessingError::configuration(e.to_string()))?
                .progress_chars("#>-"),
        );
        pb.set_message("Converting files");

        let concurrent_limit = self.config.workers.min(files.len()).max(1);
        debug!(
            "Processing {} files with {} workers",
            files.len(),
            concurrent_limit
        );

        let mut results = stream::iter(files)
            .map(|file_path| {
                let pb = pb.clone();
                async move {
                    if let Some(file_name) = file_path.file_name() {
                        pb.set_message(format!("Processing: {}", file_name.to_string_lossy()));
                    }
                    let result = self.process_file(file_path).await;
                    pb.inc(1);
                    (file_path.clone(), result)
                }
            })
            .buffer_unordered(concurrent_limit);

        let mut stats = ProcessingStats::default();
        while let Some((file_path, result)) = results.next().await {
            match result {
                Ok(outcome) => {
                    debug!(
                        "Converted {} -> {} ({} records)",
                        outcome.input.display(),
                        outcome.output.display(),
                        outcome.records
                    );
                    stats.files_processed += 1;
                    stats.total_records += outcome.records;
                    stats.outputs.push(outcome.output);
                }
                Err(e) => {
                    error!("Failed to process {}: {}", file_path.display(), e);
                    if !self.config.continue_on_error {
                        pb.abandon_with_message("Aborted");
                        return Err(e);
                    }
                    stats.files_failed += 1;
                    stats.failures.push((file_path, e.to_string()));
                }
            }
        }
        pb.finish_with_message("Conversion complete");

        stats.outputs.sort();
        stats.failures.sort();
        stats.processing_time_ms = start_time.elapsed().as_millis();
        info!(
            "Converted {} files ({} failed), {} records",
            stats.files_processed, stats.files_failed, stats.total_records
        );

        Ok(stats)
    }

    /// Every input must have its own output path
    fn check_output_collisions(&self, files: &[PathBuf]) -> ProcessingResult<()> {
        let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::with_capacity(files.len());
        for file in files {
            let output = self.writer.output_path_for(file);
            if let Some(first) = claimed.get(&output) {
                return Err(ProcessingError::OutputCollision {
                    output,
                    first: (*first).clone(),
                    second: file.clone(),
                });
            }
            claimed.insert(output, file);
        }
        Ok(())
    }

    /// Read, parse and write one file
    pub async fn process_file(&self, file_path: &Path) -> ProcessingResult<FileOutcome> {
        let bytes = fs::read(file_path).await?;
        let parser = self.parser.clone();
        let writer = self.writer.clone();
        let input = file_path.to_path_buf();

        task::spawn_blocking(move || -> ProcessingResult<FileOutcome> {
            let collection = parser
                .parse(&bytes)
                .map_err(|e| ProcessingError::parse(&input, e))?;
            let (output, records) = writer.write(&input, &collection)?;
            Ok(FileOutcome {
                input,
                output,
                records,
            })
        })
        .await
        .map_err(|e| ProcessingError::interrupted(format!("conversion task failed: {}", e)))?
    }
}

/// Print a processing summary
pub fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
        for (path, reason) in &stats.failures {
            println!("    {} {}", path.display().to_string().red(), reason);
        }
    }
    println!(
        "  {} {}",
        "Total records:".bright_cyan(),
        stats.total_records.to_string().bright_white().bold()
    );
}
