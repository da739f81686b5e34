//! Human-readable reporting for the CLI.

pub mod format;

pub use format::format_run_summary;
