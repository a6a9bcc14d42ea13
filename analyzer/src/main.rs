//! Analyzer - one-shot Connect 4 position analysis
//!
//! Plays a move list from the empty board, runs the chosen engine on the
//! resulting position and prints:
//! 1. The board
//! 2. Every open column's value on a 0 to 100 scale
//! 3. The tied best moves and one suggestion drawn from them

use anyhow::Result;
use clap::Parser;
use engine_core::Analysis;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

mod config;
mod engines;
mod report;

use crate::config::Config;
use crate::report::Report;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let mut board = config.board()?;
    if board.is_terminal() {
        print!("{}", report::render_finished(&board));
        return Ok(());
    }

    let kind = config.engine_kind()?;
    let mut analysis = Analysis::new(engines::build(kind, &config));
    info!(engine = %kind, moves = board.moves(), "Analysing position");
    analysis.explore(&mut board)?;

    let mut rng = match config.fixed_seed() {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let report = Report {
        engine: analysis.engine().name(),
        values: analysis.normalized_key_values(&mut board)?,
        best: analysis.best_moves(&mut board)?,
        suggestion: analysis.suggest(&mut board, &mut rng)?,
    };
    print!("{}", report.render(&board));

    Ok(())
}
