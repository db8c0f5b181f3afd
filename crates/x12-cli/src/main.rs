//! # x12-cli
//!
//! Command line interface for the X12 parsing pipeline.
//!
//! Parses and validates ASC X12 files, emitting JSON in either a raw
//! segment format or the bound transactional model format.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use x12_engine::{model_to_json, segments_to_json, ModelReader, SegmentReader};
use x12_ir::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliExitCode {
    Success = 0,
    Warnings = 1,
    Errors = 2,
}

impl CliExitCode {
    fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

#[derive(Parser)]
#[command(name = "x12")]
#[command(about = "Parses and validates ASC X12 messages")]
#[command(version)]
struct Cli {
    /// The path to a ASC X12 file
    file: String,

    /// Return raw X12 segments
    #[arg(short, long, conflicts_with = "model")]
    segment: bool,

    /// Return X12 transaction models (default)
    #[arg(short, long)]
    model: bool,

    /// Exclude fields that are absent on the wire from model output
    #[arg(short = 'x', long)]
    exclude: bool,

    /// Pretty print output
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run() {
        Ok(code) => code.as_exit_code(),
        Err(error) => {
            eprintln!("Error: {error:#}");
            CliExitCode::Errors.as_exit_code()
        }
    }
}

fn run() -> anyhow::Result<CliExitCode> {
    let cli = Cli::parse();

    let (output, exit_code) = if cli.segment {
        (segment_output(&cli.file)?, CliExitCode::Success)
    } else {
        model_output(&cli.file, cli.exclude)?
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(exit_code)
}

fn segment_output(file: &str) -> anyhow::Result<serde_json::Value> {
    let mut reader = SegmentReader::new(file)
        .with_context(|| format!("failed to open X12 input '{file}'"))?;

    let tokens = reader
        .segments()
        .collect::<Result<Vec<_>, _>>()
        .context("failed to tokenize X12 input")?;

    Ok(serde_json::Value::Array(segments_to_json(&tokens)))
}

fn model_output(file: &str, exclude: bool) -> anyhow::Result<(serde_json::Value, CliExitCode)> {
    let mut reader = ModelReader::new(file)
        .with_context(|| format!("failed to open X12 input '{file}'"))?;

    let mut output = Vec::new();
    let mut exit_code = CliExitCode::Success;

    for model in reader.models() {
        let model = model.context("failed to parse X12 transaction")?;

        for diagnostic in &model.diagnostics {
            eprintln!("{diagnostic}");
            match diagnostic.severity {
                Severity::Error => exit_code = CliExitCode::Errors,
                Severity::Warning if exit_code == CliExitCode::Success => {
                    exit_code = CliExitCode::Warnings;
                }
                Severity::Warning => {}
            }
        }

        output.push(model_to_json(&model, exclude));
    }

    Ok((serde_json::Value::Array(output), exit_code))
}
