//! Error types.
//!
//! - `AppError`: process-level failure (exit code + message) returned by `app::run`.
//! - `TrainError`: everything that can go wrong while training on a CSV.
//!
//! `TrainError` display strings are user-facing: the tool boundary turns them
//! into `{ "error": "<message>" }` verbatim.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

/// Failures of the load → split → fit → score pipeline.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("Failed to open CSV '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read CSV '{}': {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("No columns to parse from file")]
    EmptyFile,

    #[error("Error tokenizing data. Expected {expected} fields in line {line}, saw {saw}")]
    Tokenize {
        expected: usize,
        line: u64,
        saw: usize,
    },

    #[error("Target column '{0}' not found in data.")]
    MissingTarget(String),

    #[error(
        "test_size={test_size} should be either positive and smaller than the number of samples {n_samples} or a float in the (0, 1) range"
    )]
    InvalidTestSize { test_size: f64, n_samples: usize },

    #[error(
        "With n_samples={n_samples}, test_size={test_size} and train_size=None, the resulting train set will be empty. Adjust any of the aforementioned parameters."
    )]
    EmptyTrainSet { n_samples: usize, test_size: f64 },

    #[error("Seed must be between 0 and 2**32 - 1")]
    InvalidSeed(i64),

    #[error("Found array with 0 feature(s) (shape=({0}, 0)) while a minimum of 1 is required.")]
    NoFeatures(usize),

    #[error("could not convert string to float: '{0}'")]
    NotNumeric(String),

    #[error("Input X contains NaN.")]
    FeatureNaN,

    #[error("Input X contains infinity or a value too large for dtype('float64').")]
    FeatureInfinite,

    #[error("Input y contains NaN.")]
    LabelNaN,

    #[error("Input y contains infinity or a value too large for dtype('float64').")]
    LabelInfinite,

    #[error(
        "Unknown label type: continuous. Maybe you are trying to fit to a classifier, which expects discrete classes on a regression target with continuous values."
    )]
    ContinuousLabels,

    #[error(
        "This solver needs samples of at least 2 classes in the data, but the data contains only one class: {0}"
    )]
    SingleClass(String),

    #[error("Logistic regression solver failed: {0}")]
    Solver(String),

    #[error("Found empty input for accuracy")]
    EmptyMetricInput,

    #[error("Found input variables with inconsistent numbers of samples: [{truth}, {predicted}]")]
    InconsistentLength { truth: usize, predicted: usize },
}
