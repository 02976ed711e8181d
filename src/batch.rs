use crate::collapse::{Outcome, RunConfig, RunResult};
use crate::error::LifeError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// A batch of independent runs over the same parameters.
#[derive(Clone, Copy, Debug)]
pub struct BatchConfig {
    pub runs: usize,
    /// Base seed; run `i` uses `base + i`. `None` draws fresh entropy per
    /// run, making every board different and the batch unreproducible.
    pub seed: Option<u64>,
    pub run: RunConfig,
}

/// One finished run in the form the results log stores.
#[derive(Clone, Debug, PartialEq)]
pub struct RunRecord {
    pub rows: usize,
    pub cols: usize,
    pub prob: f64,
    pub generations: u64,
    pub outcome: Outcome,
    /// Seed board, `'1'`/`'0'` row-major.
    pub init_board: String,
}

impl RunRecord {
    pub fn new(config: &RunConfig, result: &RunResult) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            prob: config.prob,
            generations: result.generations,
            outcome: result.outcome,
            init_board: result.initial.to_digits(),
        }
    }
}

/// Runs the whole batch across the rayon thread pool.
///
/// Runs share no state, so they fan out with no coordination; results come
/// back in run-index order because the parallel map preserves it, though
/// nothing downstream relies on that.
pub fn run_batch(config: &BatchConfig) -> Result<Vec<RunRecord>, LifeError> {
    (0..config.runs)
        .into_par_iter()
        .map(|i| {
            let mut rng = match config.seed {
                Some(base) => ChaCha8Rng::seed_from_u64(base.wrapping_add(i as u64)),
                None => ChaCha8Rng::from_entropy(),
            };
            let result = config.run.run(&mut rng)?;
            Ok(RunRecord::new(&config.run, &result))
        })
        .collect()
}
