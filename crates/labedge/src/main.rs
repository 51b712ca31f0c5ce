//! labedge CLI - Lab chroma channels and their edge maps.
//!
//! Converts an image to Lab, writes the Lab image, the a and b channel
//! visualizations and a Sobel gradient map of each.
//!
//! # Usage
//!
//! ```bash
//! # Five JPEGs in the current directory
//! labedge skyline.jpg
//!
//! # Somewhere else, with a JSON summary on stdout
//! labedge skyline.jpg --output-dir ./edges --report -
//! ```

use clap::Parser;
use labedge_core::LabEdgeError;
use std::process::ExitCode;

mod cli;
mod logging;

/// Exit status for a missing input argument.
const USAGE_EXIT: u8 = 1;

/// labedge - Lab chroma channel extraction and Sobel edge maps.
#[derive(Parser, Debug)]
#[command(name = "labedge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,

    #[command(flatten)]
    run: cli::run::RunArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(input) = cli.run.input.clone() else {
        println!("Not enough input arguments");
        println!("Usage: labedge [OPTIONS] <INPUT>");
        return ExitCode::from(USAGE_EXIT);
    };

    let config = match cli::run::load_config(cli.run.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("labedge v{}", labedge_core::VERSION);

    match cli::run::execute(&input, &cli.run, config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(LabEdgeError::Pipeline(err)) = e.downcast_ref::<LabEdgeError>() {
                if err.is_input_error() {
                    tracing::warn!("Input could not be read; no output files were written");
                } else if err.wrote_nothing() {
                    tracing::warn!("Processing failed; no output files were written");
                }
            }
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
