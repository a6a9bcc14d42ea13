//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by CONNECT4_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("CONNECT4_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from CONNECT4_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "CONNECT4_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// An unreadable or malformed file falls back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u8, u64, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: CONNECT4_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "CONNECT4_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "CONNECT4_COMMON_SEED", parse);

    // Alpha-beta
    env_override!(
        config,
        alphabeta.max_depth,
        "CONNECT4_ALPHABETA_MAX_DEPTH",
        parse
    );
    env_override!(
        config,
        alphabeta.time_limit_ms,
        "CONNECT4_ALPHABETA_TIME_LIMIT_MS",
        parse
    );
    env_override!(
        config,
        alphabeta.principal_variation,
        "CONNECT4_ALPHABETA_PRINCIPAL_VARIATION",
        parse
    );
    env_override!(
        config,
        alphabeta.symmetry,
        "CONNECT4_ALPHABETA_SYMMETRY",
        parse
    );

    // MCTS
    env_override!(
        config,
        mcts.iterations,
        "CONNECT4_MCTS_ITERATIONS",
        parse
    );
    env_override!(
        config,
        mcts.exploration,
        "CONNECT4_MCTS_EXPLORATION",
        parse
    );
    env_override!(
        config,
        mcts.time_limit_ms,
        "CONNECT4_MCTS_TIME_LIMIT_MS",
        parse
    );
    env_override!(config, mcts.symmetry, "CONNECT4_MCTS_SYMMETRY", parse);

    config
}
