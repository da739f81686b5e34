//! L2-regularised logistic regression via `linfa-logistic`.
//!
//! Two classes fit `LogisticRegression` (one weight row, one intercept).
//! More classes fit `MultiLogisticRegression` (one softmax row per class).
//! Both minimise the log-loss plus `alpha/2 · ‖W‖²` with L-BFGS; intercepts
//! are not penalised. `alpha = 1/C`, so the default `alpha = 1.0` is `C = 1`.
//!
//! Targets are class indices, so the estimator's positive class is always
//! `classes[1]` and its multinomial columns follow class order.

use linfa::prelude::*;
use linfa_logistic::{LogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, Array2};

use crate::domain::MAX_ITER;
use crate::error::TrainError;
use crate::fit::encode::Classes;
use crate::models::{Estimator, LogisticModel};

/// Solver settings.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// L-BFGS iteration cap.
    pub max_iter: u64,
    /// L2 penalty strength (inverse of `C`).
    pub alpha: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iter: MAX_ITER as u64,
            alpha: 1.0,
        }
    }
}

/// Fit a logistic-regression model on `x` with class indices `y`.
pub fn fit_logistic(
    x: &Array2<f64>,
    y: &[usize],
    classes: Classes,
    opts: &FitOptions,
) -> Result<LogisticModel, TrainError> {
    if x.nrows() == 0 {
        return Err(TrainError::Solver("no training rows".to_string()));
    }
    if x.nrows() != y.len() {
        return Err(TrainError::InconsistentLength {
            truth: y.len(),
            predicted: x.nrows(),
        });
    }
    if classes.len() < 2 {
        return Err(TrainError::Solver("at least two classes are required".to_string()));
    }

    let dataset = Dataset::new(x.clone(), Array1::from_vec(y.to_vec()));
    let estimator = if classes.is_binary() {
        let fitted = LogisticRegression::new()
            .alpha(opts.alpha)
            .max_iterations(opts.max_iter)
            .fit(&dataset)
            .map_err(|e| TrainError::Solver(e.to_string()))?;
        Estimator::Binary(fitted)
    } else {
        let fitted = MultiLogisticRegression::new()
            .alpha(opts.alpha)
            .max_iterations(opts.max_iter)
            .fit(&dataset)
            .map_err(|e| TrainError::Solver(e.to_string()))?;
        Estimator::Multinomial(fitted)
    };

    tracing::debug!(
        n_samples = x.nrows(),
        n_features = x.ncols(),
        n_classes = classes.len(),
        "logistic regression fitted"
    );
    Ok(LogisticModel::new(classes, estimator))
}
