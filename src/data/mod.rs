//! Dataset plumbing that is not CSV parsing.
//!
//! - seeded train/test splitting (`split`)
//! - synthetic Gaussian-blob datasets for demos and tests (`sample`)

pub mod sample;
pub mod split;

pub use sample::*;
pub use split::*;
