//! Seeded train/evaluation split

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle `items` with `seed` and split off `ceil(test_fraction * n)` of
/// them for evaluation.
///
/// Returns `(train, test)`.
///
/// # Errors
///
/// Returns `Err` if `test_fraction` is outside `(0, 1)` or either partition
/// would be empty.
pub fn train_test_split<T: Clone>(
    items: &[T],
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(Error::TrainingInput(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let n = items.len();
    let n_test = (test_fraction * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(Error::TrainingInput(format!(
            "{n} samples cannot be split into non-empty training and evaluation sets"
        )));
    }

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let test = order[..n_test].iter().map(|&i| items[i].clone()).collect();
    let train = order[n_test..].iter().map(|&i| items[i].clone()).collect();
    Ok((train, test))
}
