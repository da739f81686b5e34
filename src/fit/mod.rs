//! Model fitting.
//!
//! Responsibilities:
//!
//! - turn table cells into a design matrix and class indices (`encode`)
//! - fit the regularised logistic regression (`fitter`)
//! - score predictions (`metrics`)

pub mod encode;
pub mod fitter;
pub mod metrics;

pub use encode::*;
pub use fitter::*;
pub use metrics::*;
