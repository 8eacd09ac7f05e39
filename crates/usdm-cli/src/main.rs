//! # usdm CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use usdm_cli::convert::{run_convert, ConvertArgs};
use usdm_cli::validate::{run_validate, ValidateArgs};

/// USDM schema tools.
///
/// Converts YAML documents to JSON and validates USDM JSON files against the
/// versioned USDM API schemas.
#[derive(Parser, Debug)]
#[command(
    name = "usdm",
    version,
    about,
    long_about = None,
    after_help = "Examples:\n  \
        usdm validate my_usdm.json --schema-version v3\n  \
        usdm validate my_usdm.json --schema-file schema/USDM_API_v4.0.0.json --schema-name Wrapper-Input\n  \
        usdm convert schema/USDM_API_v3.11.0.yaml -o schema/USDM_API_v3.11.0.json"
)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML config file mapping schema versions to schema files.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a YAML file to JSON format.
    Convert(ConvertArgs),

    /// Validate a JSON file against a USDM schema (v4 default).
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout carries converted JSON and validation reports.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "usdm starting");

    let result = match cli.command {
        Commands::Convert(args) => run_convert(&args),
        Commands::Validate(args) => usdm_cli::load_catalog(cli.config.as_deref())
            .and_then(|catalog| run_validate(&args, &catalog)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
