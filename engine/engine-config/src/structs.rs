//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use std::time::Duration;

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_max_depth() -> u8 {
    defaults::max_depth()
}
fn d_ab_time_limit() -> u64 {
    defaults::alphabeta_time_limit_ms()
}
fn d_principal_variation() -> bool {
    defaults::principal_variation()
}
fn d_ab_symmetry() -> bool {
    defaults::alphabeta_symmetry()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_mcts_time_limit() -> u64 {
    defaults::mcts_time_limit_ms()
}
fn d_mcts_symmetry() -> bool {
    defaults::mcts_symmetry()
}

/// Zero milliseconds disables the deadline.
fn deadline(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub alphabeta: AlphaBetaConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
}

/// Settings shared by every engine
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// 0 seeds from system entropy
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl CommonConfig {
    /// Fixed seed, if one is configured.
    pub fn fixed_seed(&self) -> Option<u64> {
        (self.seed != 0).then_some(self.seed)
    }
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

/// Alpha-beta search configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AlphaBetaConfig {
    #[serde(default = "d_max_depth")]
    pub max_depth: u8,
    #[serde(default = "d_ab_time_limit")]
    pub time_limit_ms: u64,
    #[serde(default = "d_principal_variation")]
    pub principal_variation: bool,
    #[serde(default = "d_ab_symmetry")]
    pub symmetry: bool,
}

impl AlphaBetaConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        deadline(self.time_limit_ms)
    }
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::max_depth(),
            time_limit_ms: defaults::alphabeta_time_limit_ms(),
            principal_variation: defaults::principal_variation(),
            symmetry: defaults::alphabeta_symmetry(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    /// UCB1 exploration constant
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_mcts_time_limit")]
    pub time_limit_ms: u64,
    #[serde(default = "d_mcts_symmetry")]
    pub symmetry: bool,
}

impl MctsConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        deadline(self.time_limit_ms)
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            exploration: defaults::exploration(),
            time_limit_ms: defaults::mcts_time_limit_ms(),
            symmetry: defaults::mcts_symmetry(),
        }
    }
}
