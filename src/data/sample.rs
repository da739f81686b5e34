//! Synthetic classification data (Gaussian blobs).
//!
//! Each class gets a random centre in `[-CENTRE_BOX, CENTRE_BOX]^d`; rows are
//! assigned to classes round-robin and jittered with isotropic Gaussian noise.
//! Everything is driven by one seeded RNG, so a seed reproduces the file.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::AppError;

/// Half-width of the box class centres are drawn from.
const CENTRE_BOX: f64 = 4.0;

/// Shape and noise of a generated dataset.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub rows: usize,
    pub features: usize,
    pub classes: usize,
    pub seed: u64,
    /// Standard deviation of the per-feature noise.
    pub spread: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            features: 2,
            classes: 2,
            seed: 42,
            spread: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampleData {
    pub feature_names: Vec<String>,
    pub label_name: String,
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
}

pub fn generate_sample(config: &SampleConfig) -> Result<SampleData, AppError> {
    if config.rows == 0 {
        return Err(AppError::new(2, "Sample row count must be > 0."));
    }
    if config.features == 0 {
        return Err(AppError::new(2, "Sample feature count must be > 0."));
    }
    if config.classes < 2 {
        return Err(AppError::new(2, "Sample class count must be >= 2."));
    }
    if !(config.spread.is_finite() && config.spread > 0.0) {
        return Err(AppError::new(2, "Sample spread must be finite and > 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.spread)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let centres: Vec<Vec<f64>> = (0..config.classes)
        .map(|_| {
            (0..config.features)
                .map(|_| rng.gen_range(-CENTRE_BOX..=CENTRE_BOX))
                .collect()
        })
        .collect();

    let mut features = Vec::with_capacity(config.rows);
    let mut labels = Vec::with_capacity(config.rows);
    for i in 0..config.rows {
        let class = i % config.classes;
        let row = centres[class]
            .iter()
            .map(|c| c + noise.sample(&mut rng))
            .collect();
        features.push(row);
        labels.push(class);
    }

    Ok(SampleData {
        feature_names: (1..=config.features).map(|j| format!("x{j}")).collect(),
        label_name: "label".to_string(),
        features,
        labels,
    })
}
