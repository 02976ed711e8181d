use crate::error::LifeError;
use crate::grid::Grid;
use ahash::AHashSet;
use rand::Rng;
use std::fmt;

/// Generation cap applied when the caller does not pick one.
///
/// The state space is finite, so a repeat is guaranteed eventually, but
/// nothing bounds how long "eventually" is on a large board. Runs that
/// reach the cap are reported as [`Outcome::DidNotCollapse`] rather than
/// looping on.
pub const DEFAULT_MAX_GENERATIONS: u64 = 1_000_000;

/// Parameters of a single simulation run.
#[derive(Clone, Copy, Debug)]
pub struct RunConfig {
    pub rows: usize,
    pub cols: usize,
    /// Probability that a cell starts alive.
    pub prob: f64,
    pub max_generations: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            prob: 0.2,
            max_generations: DEFAULT_MAX_GENERATIONS,
        }
    }
}

impl RunConfig {
    /// Seeds a random board and drives it to a terminal state.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RunResult, LifeError> {
        let initial = Grid::random(self.rows, self.cols, self.prob, rng)?;
        let mut run = Run::new(initial, self.max_generations);
        while run.advance().is_none() {}
        Ok(run.into_result())
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Zero live cells remain.
    Extinction,
    /// The board returned to a previously seen state: a still life,
    /// an oscillator, or any longer loop.
    Cycle,
    /// The generation cap was reached first.
    DidNotCollapse,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Extinction => "extinction",
            Outcome::Cycle => "cycle",
            Outcome::DidNotCollapse => "did-not-collapse",
        })
    }
}

/// Terminal report of one run: how many generations it lived, how it
/// ended, and the untouched seed board for reproducibility.
#[derive(Clone, Debug)]
pub struct RunResult {
    pub generations: u64,
    pub outcome: Outcome,
    pub initial: Grid,
}

/// One run in progress, advanced a generation at a time.
///
/// Keeps a grow-only set of fingerprints of every state seen so far, so a
/// repeat of *any* earlier state terminates the run, not just a repeat of
/// the immediately preceding one. Consumers that want to observe the board
/// between generations (the animation frontend does) call [`Run::advance`]
/// themselves and read [`Run::board`] after each step; the run neither
/// knows nor cares how often it is polled.
pub struct Run {
    board: Grid,
    initial: Grid,
    seen: AHashSet<u64>,
    generations: u64,
    max_generations: u64,
    outcome: Option<Outcome>,
}

impl Run {
    pub fn new(initial: Grid, max_generations: u64) -> Self {
        let mut seen = AHashSet::new();
        seen.insert(initial.fingerprint());
        Self {
            board: initial.clone(),
            initial,
            seen,
            generations: 0,
            max_generations,
            outcome: None,
        }
    }

    /// Current board state.
    pub fn board(&self) -> &Grid {
        &self.board
    }

    /// Generations elapsed so far.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Advances one generation. Returns the terminal outcome once the run
    /// has ended, `None` while it is still going; calling again after
    /// termination is a no-op.
    pub fn advance(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }

        self.board = self.board.step();
        self.generations += 1;

        if self.board.is_dead() {
            self.outcome = Some(Outcome::Extinction);
        } else if !self.seen.insert(self.board.fingerprint()) {
            self.outcome = Some(Outcome::Cycle);
        } else if self.generations >= self.max_generations {
            self.outcome = Some(Outcome::DidNotCollapse);
        }
        self.outcome
    }

    /// Final report. A run abandoned before termination (an animation the
    /// user quit) is reported as not having collapsed.
    pub fn into_result(self) -> RunResult {
        RunResult {
            generations: self.generations,
            outcome: self.outcome.unwrap_or(Outcome::DidNotCollapse),
            initial: self.initial,
        }
    }
}

/// Runs one random board to collapse with the default generation cap.
///
/// This is the convenience entry point matching the batch driver's needs;
/// [`RunConfig::run`] exposes the cap.
pub fn run_until_collapse<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    prob: f64,
    rng: &mut R,
) -> Result<RunResult, LifeError> {
    RunConfig {
        rows,
        cols,
        prob,
        ..RunConfig::default()
    }
    .run(rng)
}
