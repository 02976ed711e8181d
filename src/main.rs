#![warn(clippy::all)]

use anyhow::Result;
use clap::Parser;
use life_collapse::{
    append_records, run_animated, run_batch, BatchConfig, RunConfig, RunRecord,
    DEFAULT_MAX_GENERATIONS,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "life-collapse",
    version,
    about = "Run random Game of Life boards until they collapse"
)]
struct Cli {
    /// Board rows
    #[arg(long, default_value_t = 50)]
    rows: usize,

    /// Board columns
    #[arg(long, default_value_t = 50)]
    cols: usize,

    /// Probability that a cell starts alive
    #[arg(long, default_value_t = 0.2)]
    prob: f64,

    /// Number of independent boards to run; more than one switches to a
    /// parallel batch without animation
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Worker threads for batch runs (0 = one per core)
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Seconds between animation frames
    #[arg(long, default_value_t = 0.1)]
    pause: f64,

    /// Base random seed; omit for fresh entropy every run
    #[arg(long)]
    seed: Option<u64>,

    /// Generation cap before a run is reported as not collapsed
    #[arg(long, default_value_t = DEFAULT_MAX_GENERATIONS)]
    max_generations: u64,

    /// Results log
    #[arg(long, default_value = "data/results.csv")]
    out: PathBuf,

    /// Single run without animation
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let run = RunConfig {
        rows: cli.rows,
        cols: cli.cols,
        prob: cli.prob,
        max_generations: cli.max_generations,
    };

    let records = if cli.runs == 1 && !cli.headless {
        let mut rng = seed_rng(cli.seed);
        let result = run_animated(&run, Duration::from_secs_f64(cli.pause), &mut rng)?;
        vec![RunRecord::new(&run, &result)]
    } else if cli.runs == 1 {
        let mut rng = seed_rng(cli.seed);
        let result = run.run(&mut rng)?;
        vec![RunRecord::new(&run, &result)]
    } else {
        if cli.workers > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(cli.workers)
                .build_global()?;
        }
        run_batch(&BatchConfig {
            runs: cli.runs,
            seed: cli.seed,
            run,
        })?
    };

    for record in &records {
        println!(
            "prob={}  cycles={}  outcome={}",
            record.prob, record.generations, record.outcome
        );
    }
    append_records(&cli.out, &records)?;
    info!(
        runs = records.len(),
        path = %cli.out.display(),
        "appended results"
    );
    Ok(())
}

fn seed_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
