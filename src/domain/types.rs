//! Request/response types for the training tool.
//!
//! Both are `serde` types because they cross the wire unchanged: the request is
//! decoded from MCP tool arguments and the response is encoded as the tool result.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TrainError;

/// Held-out fraction used when the caller does not pass `test_size`.
pub const DEFAULT_TEST_SIZE: f64 = 0.3;
/// Split seed used when the caller does not pass `random_state`.
pub const DEFAULT_RANDOM_STATE: i64 = 42;
/// Optimisation iteration budget for every fit.
pub const MAX_ITER: usize = 200;

fn default_test_size() -> f64 {
    DEFAULT_TEST_SIZE
}

fn default_random_state() -> i64 {
    DEFAULT_RANDOM_STATE
}

/// Arguments of `train_classifier_from_csv`.
///
/// The doc comments on the fields double as the tool's input schema descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrainRequest {
    /// Path to the CSV file (first row is the header).
    pub data_path: PathBuf,
    /// Name of the label column.
    pub target_column: String,
    /// Held-out fraction, strictly inside `(0, 1)`.
    #[serde(default = "default_test_size")]
    pub test_size: f64,
    /// Seed of the train/test shuffle, in `[0, 2**32 - 1]`.
    #[serde(default = "default_random_state")]
    pub random_state: i64,
}

impl TrainRequest {
    pub fn new(data_path: impl Into<PathBuf>, target_column: impl Into<String>) -> Self {
        Self {
            data_path: data_path.into(),
            target_column: target_column.into(),
            test_size: DEFAULT_TEST_SIZE,
            random_state: DEFAULT_RANDOM_STATE,
        }
    }

    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    pub fn with_random_state(mut self, random_state: i64) -> Self {
        self.random_state = random_state;
        self
    }
}

/// Tool result: either the fitted summary or an error message.
///
/// Untagged on the wire, so callers tell the variants apart by key presence
/// (`accuracy`/`coefficients`/`intercept` vs `error`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrainResponse {
    Success {
        accuracy: f64,
        coefficients: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    Failure {
        error: String,
    },
}

impl TrainResponse {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            TrainResponse::Failure { error } => Some(error),
            TrainResponse::Success { .. } => None,
        }
    }
}

impl From<TrainError> for TrainResponse {
    fn from(err: TrainError) -> Self {
        TrainResponse::Failure {
            error: err.to_string(),
        }
    }
}
