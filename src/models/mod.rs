//! Fitted model representation.
//!
//! The model is a plain value (weights + classes) so the fitter can build it and
//! the pipeline can score with it without sharing any solver state.

pub mod model;

pub use model::*;
