//! Command-line parsing for `ml-mcp`.
//!
//! Parsing lives here; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_SERVER_NAME;
use crate::domain::{DEFAULT_RANDOM_STATE, DEFAULT_TEST_SIZE};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ml-mcp",
    version,
    about = "Logistic-regression training tool served over MCP (stdio)"
)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. `info`, `debug`).
    #[arg(long, global = true, env = "ML_MCP_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the MCP server on stdin/stdout (the default).
    Serve(ServeArgs),
    /// Train once from the command line and print the result.
    Train(TrainArgs),
    /// Write a synthetic, labelled CSV to try the tool on.
    Sample(SampleArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    /// Server name reported to clients.
    #[arg(long, env = "ML_MCP_NAME", default_value = DEFAULT_SERVER_NAME)]
    pub name: String,
}

#[derive(Debug, Args, Clone)]
pub struct TrainArgs {
    /// CSV file with a header row.
    #[arg(short = 'd', long, value_name = "CSV")]
    pub data: PathBuf,

    /// Label column.
    #[arg(short = 't', long)]
    pub target: String,

    /// Held-out fraction in (0, 1).
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE)]
    pub test_size: f64,

    /// Seed for the train/test shuffle.
    #[arg(long, default_value_t = DEFAULT_RANDOM_STATE, allow_negative_numbers = true)]
    pub random_state: i64,

    /// Print the raw tool response as JSON instead of the report.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,

    #[arg(long, default_value_t = 100)]
    pub rows: usize,

    #[arg(long, default_value_t = 2)]
    pub features: usize,

    #[arg(long, default_value_t = 2)]
    pub classes: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Standard deviation of each class blob.
    #[arg(long, default_value_t = 1.0)]
    pub spread: f64,
}
