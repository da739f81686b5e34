//! Input/output helpers.
//!
//! - CSV ingest into a `Table` (`ingest`)
//! - synthetic dataset export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
