//! Configuration for the analyzer
//!
//! Defaults come from config.toml (with `CONNECT4_*` environment overrides)
//! through `engine-config`. CLI arguments take highest priority.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_connect4::{Board, COLS};
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

use crate::engines::EngineKind;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

/// Deadline for the timed engines when none is configured.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(1000);

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_depth() -> u8 {
    CENTRAL_CONFIG.alphabeta.max_depth
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}

#[derive(Parser, Debug, Clone)]
#[command(name = "analyzer")]
#[command(about = "Analyse a Connect 4 position with one of the search engines")]
#[command(
    long_about = "Plays the given moves from the empty board, runs one engine on the
resulting position and prints every open column's value on a 0 to 100 scale,
the best moves and a suggested move.

Engines: iterative, idtime (alpha-beta), montecarlo, confidence, ucttime (MCTS).

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Columns played so far, comma separated (e.g. 3,3,4)
    #[arg(long, default_value = "")]
    pub moves: String,

    /// Engine to analyse with
    #[arg(long, default_value = "iterative")]
    pub engine: String,

    /// Deepest alpha-beta pass
    #[arg(long, default_value_t = default_depth())]
    pub depth: u8,

    /// MCTS iterations per analysis
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Time budget in milliseconds for idtime and ucttime
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Share cache entries between mirror-image positions
    #[arg(long)]
    pub symmetry: Option<bool>,

    /// Random seed for MCTS and the suggestion (0 for entropy)
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.engine_kind()?;
        self.board()?;

        if self.depth == 0 {
            return Err(anyhow!("depth must be greater than 0"));
        }

        if self.iterations == 0 {
            return Err(anyhow!("iterations must be greater than 0"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            ));
        }

        if self.time_limit_ms == Some(0) {
            return Err(anyhow!("time_limit_ms must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn engine_kind(&self) -> Result<EngineKind> {
        self.engine.parse()
    }

    /// Parsed move list; every entry must be a column index.
    pub fn columns(&self) -> Result<Vec<u8>> {
        self.moves
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                let column: u8 = s
                    .parse()
                    .with_context(|| format!("invalid column '{}' in moves", s))?;
                if column as usize >= COLS {
                    return Err(anyhow!("column {} out of range 0..{}", column, COLS));
                }
                Ok(column)
            })
            .collect()
    }

    /// Position after playing `moves` from the empty board.
    pub fn board(&self) -> Result<Board> {
        let columns = self.columns()?;
        Board::from_moves(&columns).with_context(|| format!("cannot play moves '{}'", self.moves))
    }

    pub fn fixed_seed(&self) -> Option<u64> {
        (self.seed != 0).then_some(self.seed)
    }

    /// Time budget for the timed engines.
    pub fn time_limit(&self, kind: EngineKind) -> Duration {
        let configured = match kind {
            EngineKind::IdTime => CENTRAL_CONFIG.alphabeta.time_limit(),
            _ => CENTRAL_CONFIG.mcts.time_limit(),
        };
        self.time_limit_ms
            .map(Duration::from_millis)
            .or(configured)
            .unwrap_or(DEFAULT_TIME_LIMIT)
    }

    pub fn symmetry(&self, kind: EngineKind) -> bool {
        self.symmetry.unwrap_or(if kind.is_alphabeta() {
            CENTRAL_CONFIG.alphabeta.symmetry
        } else {
            CENTRAL_CONFIG.mcts.symmetry
        })
    }

    pub fn principal_variation(&self) -> bool {
        CENTRAL_CONFIG.alphabeta.principal_variation
    }
}
