//! # Convert Subcommand
//!
//! `usdm convert <yaml_file> [-o <path>]`: YAML to 2-space indented JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use usdm_core::ConvertOutput;

/// Arguments for the `usdm convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input YAML file (e.g., schema/USDM_API_v3.11.0.yaml).
    #[arg(value_name = "YAML_FILE")]
    pub yaml_file: PathBuf,

    /// Path to the output JSON file. If not provided, prints to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the convert subcommand.
///
/// Returns exit code 0; read, parse and write failures are errors.
pub fn run_convert(args: &ConvertArgs) -> Result<u8> {
    let output = usdm_core::convert_yaml_file(&args.yaml_file, args.output.as_deref())
        .with_context(|| format!("failed to convert {}", args.yaml_file.display()))?;

    if let ConvertOutput::Stdout(json) = output {
        println!("{json}");
    }
    Ok(0)
}
