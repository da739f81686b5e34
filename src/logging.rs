//! Tracing setup.
//!
//! stdout carries the MCP stream, so every log line goes to stderr without
//! ANSI colours.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Installs the global subscriber. `RUST_LOG` wins over `fallback`.
pub fn init(fallback: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| AppError::new(2, format!("Invalid log level '{fallback}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::new(1, format!("Failed to install logger: {e}")))
}
