//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the tool request (`TrainRequest`) and its defaults
//! - the tool response (`TrainResponse`), a success/error union

pub mod types;

pub use types::*;
