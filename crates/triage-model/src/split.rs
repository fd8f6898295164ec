//! Seeded train/test splitting of row indices.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices for one train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    /// Rows the pipeline is fitted on.
    pub train: Vec<usize>,
    /// Held-out rows used only for evaluation.
    pub test: Vec<usize>,
}

impl SplitIndices {
    /// Total number of rows across both partitions.
    pub fn total(&self) -> usize {
        self.train.len() + self.test.len()
    }
}

/// Shuffle `num_rows` row indices with the given seed and carve off the
/// held-out fraction.
///
/// The held-out count is `ceil(num_rows * test_size)`, taken from the front
/// of the shuffled order. Any `test_size` above zero therefore holds out at
/// least one row; a fraction close enough to one can leave the training
/// partition empty, which callers must reject before fitting.
pub fn split_rows(num_rows: usize, test_size: f64, seed: u64) -> SplitIndices {
    let mut indices: Vec<usize> = (0..num_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let num_test = ((num_rows as f64) * test_size).ceil() as usize;
    let num_test = num_test.min(num_rows);
    let (test, train) = indices.split_at(num_test);

    SplitIndices {
        train: train.to_vec(),
        test: test.to_vec(),
    }
}
