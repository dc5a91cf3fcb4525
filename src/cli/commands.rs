//! Command implementations for the SOS processor CLI
//!
//! This module contains the command execution logic for `convert` and
//! `inspect` and the logging setup shared by both.

use crate::cli::args::{Args, Commands, ConvertArgs, InspectArgs};
use crate::config::ProcessorConfig;
use crate::models::ParsedCollection;
use crate::parser::SosParser;
use crate::processor::{BatchProcessor, print_summary};
use crate::schema::report_schema;
use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, info};

/// Main command runner
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    match args.command {
        Some(Commands::Convert(convert_args)) => convert(convert_args).await,
        Some(Commands::Inspect(inspect_args)) => inspect(inspect_args).await,
        None => Ok(()),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sos_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialise logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Build the batch configuration from the convert arguments
pub fn processor_config(args: &ConvertArgs) -> ProcessorConfig {
    let mut config = ProcessorConfig::default()
        .with_dialect(args.dialect)
        .with_output_format(args.format)
        .with_compression(args.compression)
        .with_continue_on_error(args.continue_on_error)
        .with_strict_optional_fields(args.strict);
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    config
}

async fn convert(args: ConvertArgs) -> Result<()> {
    let config = processor_config(&args);
    info!(
        "Converting {} input(s) to {} in {}",
        args.inputs.len(),
        config.output_format,
        args.output_dir.display()
    );

    let processor = BatchProcessor::new(args.output_dir.clone(), config)
        .context("Invalid processor configuration")?;
    let stats = processor
        .process_inputs(&args.inputs)
        .await
        .context("Conversion failed")?;

    print_summary(&stats);
    if stats.files_failed > 0 {
        println!(
            "\n{}",
            format!("{} file(s) could not be converted", stats.files_failed).bright_yellow()
        );
    }
    Ok(())
}

async fn inspect(args: InspectArgs) -> Result<()> {
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let parser = SosParser::new().with_selector(args.dialect);
    let collection = tokio::task::spawn_blocking(move || parser.parse(&bytes))
        .await
        .context("Inspection task failed")?
        .with_context(|| format!("Failed to parse {}", args.file.display()))?;

    if args.json {
        let summary = inspection_json(&args, &collection);
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else {
        println!(
            "{} {}",
            "Dialect:".bright_cyan(),
            collection.dialect.to_string().bright_white().bold()
        );
        report_schema(&collection.schema);
        println!(
            "\n{} {}",
            "Records:".bright_cyan(),
            collection.len().to_string().bright_white().bold()
        );
    }
    Ok(())
}

fn inspection_json(args: &InspectArgs, collection: &ParsedCollection) -> serde_json::Value {
    serde_json::json!({
        "file": args.file.display().to_string(),
        "dialect": collection.dialect,
        "schema": collection.schema,
        "records": collection.len(),
    })
}
