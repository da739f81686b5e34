//! Seeded train/test splitting.
//!
//! Semantics match a shuffle-split with a float `test_size`:
//! `n_test = ceil(test_size * n)`, `n_train = n - n_test`, and a permutation of
//! `0..n` drawn from a seeded RNG assigns the first `n_test` indices to the test
//! set. The same `(n, test_size, random_state)` always yields the same split.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::TrainError;

/// Row indices of the two partitions, in permutation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Resolve `(n_train, n_test)` for `n_samples` rows.
pub fn split_sizes(n_samples: usize, test_size: f64) -> Result<(usize, usize), TrainError> {
    if !(test_size.is_finite() && test_size > 0.0 && test_size < 1.0) {
        return Err(TrainError::InvalidTestSize {
            test_size,
            n_samples,
        });
    }

    let n_test = (test_size * n_samples as f64).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_train == 0 {
        return Err(TrainError::EmptyTrainSet {
            n_samples,
            test_size,
        });
    }
    Ok((n_train, n_test))
}

/// Seeds are restricted to the 32-bit unsigned range.
pub fn validate_seed(random_state: i64) -> Result<u64, TrainError> {
    if (0..=i64::from(u32::MAX)).contains(&random_state) {
        Ok(random_state as u64)
    } else {
        Err(TrainError::InvalidSeed(random_state))
    }
}

/// Split `0..n_samples` into train/test indices.
pub fn train_test_split(
    n_samples: usize,
    test_size: f64,
    random_state: i64,
) -> Result<SplitIndices, TrainError> {
    let (n_train, n_test) = split_sizes(n_samples, test_size)?;
    let seed = validate_seed(random_state)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut permutation: Vec<usize> = (0..n_samples).collect();
    permutation.shuffle(&mut rng);

    let test = permutation[..n_test].to_vec();
    let train = permutation[n_test..n_test + n_train].to_vec();

    tracing::debug!(n_samples, n_train, n_test, seed, "split rows");
    Ok(SplitIndices { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_round_test_share_up() {
        assert_eq!(split_sizes(100, 0.2).unwrap(), (80, 20));
        assert_eq!(split_sizes(10, 0.25).unwrap(), (7, 3));
        assert_eq!(split_sizes(3, 0.5).unwrap(), (1, 2));
    }

    #[test]
    fn out_of_range_test_size_is_rejected() {
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                split_sizes(10, bad),
                Err(TrainError::InvalidTestSize { .. })
            ));
        }
        let msg = split_sizes(10, 1.5).unwrap_err().to_string();
        assert_eq!(
            msg,
            "test_size=1.5 should be either positive and smaller than the number of samples 10 or a float in the (0, 1) range"
        );
    }

    #[test]
    fn empty_train_set_is_rejected() {
        let err = split_sizes(1, 0.3).unwrap_err();
        assert!(matches!(err, TrainError::EmptyTrainSet { n_samples: 1, .. }));
        assert!(split_sizes(0, 0.3).is_err());
    }

    #[test]
    fn seed_range_is_u32() {
        assert_eq!(validate_seed(0).unwrap(), 0);
        assert_eq!(validate_seed(4_294_967_295).unwrap(), 4_294_967_295);
        assert!(validate_seed(-1).is_err());
        assert!(validate_seed(4_294_967_296).is_err());
    }

    #[test]
    fn split_is_disjoint_and_covering() {
        let split = train_test_split(50, 0.3, 7).unwrap();
        assert_eq!(split.test.len(), 15);
        assert_eq!(split.train.len(), 35);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn split_is_reproducible_per_seed() {
        let a = train_test_split(40, 0.25, 42).unwrap();
        let b = train_test_split(40, 0.25, 42).unwrap();
        let c = train_test_split(40, 0.25, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
