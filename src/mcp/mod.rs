//! Model Context Protocol surface.
//!
//! - `handler`: the `rmcp` server handler and the training tool
//! - `server`: the line-delimited stdio transport

pub mod handler;
pub mod server;

pub use handler::TrainingServer;
pub use server::{Inbound, screen_line, serve_lines, serve_stdio};
