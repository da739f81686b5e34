//! Fitted logistic-regression model.
//!
//! Output layout follows the usual linear-classifier convention:
//! - binary: one coefficient row scoring `classes[1]` against `classes[0]`
//! - K > 2 classes: K rows, one per class in sorted class order

use std::fmt;

use linfa::prelude::*;
use linfa_logistic::{FittedLogisticRegression, MultiFittedLogisticRegression};
use ndarray::Array2;

use crate::fit::encode::{ClassLabel, Classes};

/// The fitted `linfa` estimator, trained on class indices.
pub enum Estimator {
    Binary(FittedLogisticRegression<f64, usize>),
    Multinomial(MultiFittedLogisticRegression<f64, usize>),
}

pub struct LogisticModel {
    pub classes: Classes,
    estimator: Estimator,
}

impl LogisticModel {
    pub fn new(classes: Classes, estimator: Estimator) -> Self {
        Self { classes, estimator }
    }

    /// Predicted class index per row.
    pub fn predict(&self, x: &Array2<f64>) -> Vec<usize> {
        match &self.estimator {
            Estimator::Binary(m) => m.predict(x).to_vec(),
            Estimator::Multinomial(m) => m.predict(x).to_vec(),
        }
    }

    /// Predicted class label per row.
    pub fn predict_labels(&self, x: &Array2<f64>) -> Vec<ClassLabel> {
        self.predict(x)
            .into_iter()
            .filter_map(|idx| self.classes.label(idx).cloned())
            .collect()
    }

    /// Coefficients as nested rows (one per class, or one for binary).
    pub fn coefficients(&self) -> Vec<Vec<f64>> {
        match &self.estimator {
            Estimator::Binary(m) => vec![(m.params() * binary_sign(m)).to_vec()],
            Estimator::Multinomial(m) => {
                // `params` is features × classes, columns in `m.classes()` order.
                let params = m.params();
                let mut rows = vec![Vec::new(); self.classes.len()];
                for (col, &class) in m.classes().iter().enumerate() {
                    if let Some(row) = rows.get_mut(class) {
                        *row = params.column(col).to_vec();
                    }
                }
                rows
            }
        }
    }

    pub fn intercepts(&self) -> Vec<f64> {
        match &self.estimator {
            Estimator::Binary(m) => vec![m.intercept() * binary_sign(m)],
            Estimator::Multinomial(m) => {
                let intercept = m.intercept();
                let mut out = vec![0.0; self.classes.len()];
                for (col, &class) in m.classes().iter().enumerate() {
                    if let Some(slot) = out.get_mut(class) {
                        *slot = intercept[col];
                    }
                }
                out
            }
        }
    }
}

/// `+1` when the estimator's positive class is `classes[1]`, else `-1`.
fn binary_sign(m: &FittedLogisticRegression<f64, usize>) -> f64 {
    if m.labels().pos.class == 1 { 1.0 } else { -1.0 }
}

impl fmt::Debug for LogisticModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogisticModel")
            .field("classes", &self.classes)
            .field("coefficients", &self.coefficients())
            .field("intercept", &self.intercepts())
            .finish()
    }
}
