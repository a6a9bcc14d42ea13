//! Engine selection by name.

use std::fmt;
use std::str::FromStr;

use alphabeta::{AlphaBetaConfig, AlphaBetaEngine, SymmetricAlphaBeta};
use anyhow::{anyhow, Error};
use engine_core::Search;
use mcts::{MctsConfig, MonteCarloEngine, Policy, SymmetricMonteCarlo};
use tracing::info;

use crate::config::Config;

/// The engines the analyzer can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Iterative-deepening alpha-beta to a fixed depth
    Iterative,
    /// Iterative-deepening alpha-beta until a deadline
    IdTime,
    /// Monte Carlo with uniform selection
    MonteCarlo,
    /// Monte Carlo with UCB1 selection
    Confidence,
    /// UCB1 Monte Carlo until a deadline
    UctTime,
}

impl EngineKind {
    pub const ALL: [EngineKind; 5] = [
        EngineKind::Iterative,
        EngineKind::IdTime,
        EngineKind::MonteCarlo,
        EngineKind::Confidence,
        EngineKind::UctTime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Iterative => "iterative",
            EngineKind::IdTime => "idtime",
            EngineKind::MonteCarlo => "montecarlo",
            EngineKind::Confidence => "confidence",
            EngineKind::UctTime => "ucttime",
        }
    }

    pub fn is_alphabeta(self) -> bool {
        matches!(self, EngineKind::Iterative | EngineKind::IdTime)
    }

    fn is_timed(self) -> bool {
        matches!(self, EngineKind::IdTime | EngineKind::UctTime)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngineKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = EngineKind::ALL.iter().map(|k| k.name()).collect();
                anyhow!("unknown engine '{}', expected one of {}", s, names.join(", "))
            })
    }
}

fn alphabeta_config(kind: EngineKind, config: &Config) -> AlphaBetaConfig {
    let base = if kind.is_timed() {
        AlphaBetaConfig::timed(config.time_limit(kind))
    } else {
        AlphaBetaConfig::default().with_depth(config.depth)
    };
    base.with_principal_variation(config.principal_variation())
}

fn mcts_config(kind: EngineKind, config: &Config) -> MctsConfig {
    let base = match kind {
        EngineKind::MonteCarlo => MctsConfig::uniform().with_iterations(config.iterations),
        EngineKind::UctTime => MctsConfig::timed(config.time_limit(kind))
            .with_policy(Policy::Ucb1 {
                exploration: config.exploration,
            }),
        _ => MctsConfig::default()
            .with_iterations(config.iterations)
            .with_exploration(config.exploration),
    };
    base.with_seed(config.fixed_seed())
}

/// Build the engine `kind` with the settings of `config`.
pub fn build(kind: EngineKind, config: &Config) -> Box<dyn Search> {
    let symmetry = config.symmetry(kind);
    info!(engine = %kind, symmetry, "Building engine");

    match (kind.is_alphabeta(), symmetry) {
        (true, false) => {
            let engine: AlphaBetaEngine = AlphaBetaEngine::new(alphabeta_config(kind, config));
            Box::new(engine)
        }
        (true, true) => Box::new(SymmetricAlphaBeta::new(alphabeta_config(kind, config))),
        (false, false) => {
            let engine: MonteCarloEngine = MonteCarloEngine::new(mcts_config(kind, config));
            Box::new(engine)
        }
        (false, true) => Box::new(SymmetricMonteCarlo::new(mcts_config(kind, config))),
    }
}
