use crate::collapse::{RunConfig, RunResult};
use crate::grid::Grid;
use crate::Run;
use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode},
    execute, queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::Rng;
use std::io::{self, Write};
use std::time::Duration;

/// Runs a single random board to collapse, drawing every generation to an
/// alternate terminal screen at `pause` intervals.
///
/// The animation is a plain consumer of [`Run`]: it advances the run, reads
/// the board snapshot, draws it, and waits. `q` or Esc abandons the run,
/// which then reports as not having collapsed.
pub fn run_animated<R: Rng + ?Sized>(
    config: &RunConfig,
    pause: Duration,
    rng: &mut R,
) -> Result<RunResult> {
    let initial = Grid::random(config.rows, config.cols, config.prob, rng)?;
    let mut run = Run::new(initial, config.max_generations);

    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen, Hide).context("failed to enter alternate screen")?;

    let outcome = animate(&mut stdout, &mut run, pause);

    if let Err(err) = execute!(stdout, Show, LeaveAlternateScreen) {
        tracing::warn!(%err, "failed to leave alternate screen");
    }
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(%err, "failed to disable raw mode");
    }

    outcome?;
    Ok(run.into_result())
}

fn animate(stdout: &mut io::Stdout, run: &mut Run, pause: Duration) -> Result<()> {
    queue!(stdout, Clear(ClearType::All))?;
    draw_frame(stdout, run)?;
    loop {
        if quit_requested(pause)? {
            return Ok(());
        }
        if run.advance().is_some() {
            draw_frame(stdout, run)?;
            return Ok(());
        }
        draw_frame(stdout, run)?;
    }
}

fn draw_frame(stdout: &mut io::Stdout, run: &Run) -> Result<()> {
    let board = run.board();
    queue!(
        stdout,
        MoveTo(0, 0),
        Print(format!(
            "generation {:<8} population {:<8} (q to quit)",
            run.generations(),
            board.population()
        ))
    )?;
    for r in 0..board.rows() {
        let line: String = (0..board.cols())
            .map(|c| if board.get(r, c) { '█' } else { '·' })
            .collect();
        queue!(stdout, MoveTo(0, r as u16 + 1), Print(line))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Waits out the frame pause, returning true if the user asked to quit.
fn quit_requested(pause: Duration) -> Result<bool> {
    if event::poll(pause)? {
        if let Event::Key(key) = event::read()? {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
