//! `classic-ml-mcp` library crate.
//!
//! The binary (`ml-mcp`) is a thin wrapper around this library so that:
//!
//! - the training pipeline is testable without spawning processes
//! - the MCP server can be driven over in-memory duplex streams
//! - the CLI and the MCP tool share one implementation

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod mcp;
pub mod models;
pub mod report;
