#![warn(clippy::all)]

//! Conway's Game of Life on a torus, run from random seeds until the
//! population collapses: dies out, or revisits a state it has already
//! been in (a still life or an oscillator of any period).
//!
//! The core is [`Grid::step`] and the [`Run`] collapse detector; the rest
//! of the crate is the driver around them: parallel batches, a CSV
//! results log, and a terminal animation for single runs.

mod batch;
mod collapse;
mod error;
mod grid;
mod render;
mod results;

pub use batch::{run_batch, BatchConfig, RunRecord};
pub use collapse::{
    run_until_collapse, Outcome, Run, RunConfig, RunResult, DEFAULT_MAX_GENERATIONS,
};
pub use error::LifeError;
pub use grid::Grid;
pub use render::run_animated;
pub use results::append_records;
