use thiserror::Error;

/// Failures the simulation core can report before any work is done.
///
/// The update rule itself is total: once a grid exists, stepping it
/// cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("initial live probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
}
