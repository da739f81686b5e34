//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - serves MCP on stdio, or runs a one-off training / sample export

use clap::Parser;

use crate::cli::{Cli, Command, SampleArgs, ServeArgs, TrainArgs};
use crate::config::ServerConfig;
use crate::data::{SampleConfig, generate_sample};
use crate::domain::TrainRequest;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ml-mcp` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // MCP clients launch the bare binary, so `ml-mcp` must mean `ml-mcp serve`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    crate::logging::init(&cli.log_level)?;

    match cli.command {
        Command::Serve(args) => handle_serve(args),
        Command::Train(args) => handle_train(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    let config = ServerConfig::default().with_name(args.name);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::new(1, format!("Failed to start async runtime: {e}")))?;
    runtime.block_on(crate::mcp::serve_stdio(config))
}

fn handle_train(args: TrainArgs) -> Result<(), AppError> {
    let request = train_request_from_args(&args);

    if args.json {
        let response = pipeline::train_classifier_from_csv(&request);
        let text = serde_json::to_string_pretty(&response)
            .map_err(|e| AppError::new(1, format!("Failed to encode response: {e}")))?;
        println!("{text}");
        return match response.error_message() {
            Some(msg) => Err(AppError::new(1, msg)),
            None => Ok(()),
        };
    }

    let run = pipeline::run_training(&request).map_err(|e| AppError::new(1, e.to_string()))?;
    print!("{}", crate::report::format_run_summary(&run, &request));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        rows: args.rows,
        features: args.features,
        classes: args.classes,
        seed: args.seed,
        spread: args.spread,
    };
    let sample = generate_sample(&config)?;
    crate::io::write_sample_csv(&args.out, &sample)?;

    tracing::info!(path = %args.out.display(), rows = config.rows, "sample written");
    println!(
        "Wrote {} rows ({} features, {} classes) to {}",
        config.rows,
        config.features,
        config.classes,
        args.out.display()
    );
    Ok(())
}

pub fn train_request_from_args(args: &TrainArgs) -> TrainRequest {
    TrainRequest::new(&args.data, &args.target)
        .with_test_size(args.test_size)
        .with_random_state(args.random_state)
}

/// Rewrite argv so `ml-mcp` defaults to `ml-mcp serve`.
///
/// Rules:
/// - `ml-mcp`                      -> `ml-mcp serve`
/// - `ml-mcp --name X ...`         -> `ml-mcp serve --name X ...`
/// - `ml-mcp --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("serve".to_string());
        return argv;
    };

    if matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    ) {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "serve".to_string());
    }
    argv
}
