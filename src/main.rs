use clap::Parser;
use sos_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                match signal {
                    Ok(()) => Err(sos_processor::ProcessingError::interrupted(
                        "Processing interrupted by user",
                    )
                    .into()),
                    Err(e) => Err(anyhow::Error::new(e).context("Failed to listen for CTRL+C")),
                }
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("SOS Processor - Sensor Observation Service response converter");
    println!("=============================================================");
    println!();
    println!("Convert SOS GetObservation responses (O&M 1.0, O&M 2.0 and the social");
    println!("sensing dialect) into Parquet or CSV tables.");
    println!();
    println!("USAGE:");
    println!("    sos-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert response files to Parquet or CSV");
    println!("    inspect     Show the detected dialect and schema of one response");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Only report errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert every response in a directory to Parquet:");
    println!("    sos-processor convert responses/ --output tables");
    println!();
    println!("    # Parse social sensing responses and write CSV:");
    println!("    sos-processor convert 'social/*.xml' --dialect UCD_SOCIAL --format csv");
    println!();
    println!("    # Show the schema inferred for one response:");
    println!("    sos-processor inspect response.xml");
    println!();
    println!("For detailed help on any command, use:");
    println!("    sos-processor <COMMAND> --help");
}
