//! Classification metrics.

use crate::error::TrainError;

/// Fraction of positions where `predicted` equals `truth`.
pub fn accuracy<T: PartialEq>(truth: &[T], predicted: &[T]) -> Result<f64, TrainError> {
    if truth.len() != predicted.len() {
        return Err(TrainError::InconsistentLength {
            truth: truth.len(),
            predicted: predicted.len(),
        });
    }
    if truth.is_empty() {
        return Err(TrainError::EmptyMetricInput);
    }

    let correct = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / truth.len() as f64)
}
