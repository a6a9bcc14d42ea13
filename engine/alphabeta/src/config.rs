//! Alpha-beta configuration parameters.

use std::time::Duration;

/// Configuration for iterative-deepening alpha-beta search.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaBetaConfig {
    /// Deepest pass to run, in plies. Capped by the number of empty cells.
    pub max_depth: u8,

    /// Wall-clock budget for one `explore` call.
    /// The first pass always completes; `None` searches every depth.
    pub time_limit: Option<Duration>,

    /// Try the previous pass's best move first at principal nodes.
    /// Changes node counts, never the chosen moves.
    pub principal_variation: bool,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            time_limit: None,
            principal_variation: true,
        }
    }
}

impl AlphaBetaConfig {
    /// Deadline-driven search that deepens until time runs out.
    pub fn timed(limit: Duration) -> Self {
        Self {
            max_depth: games_connect4::BOARD_SIZE as u8,
            time_limit: Some(limit),
            principal_variation: true,
        }
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_depth: 4,
            time_limit: None,
            principal_variation: true,
        }
    }

    /// Builder pattern: set maximum depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder pattern: set or clear the time limit.
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Builder pattern: toggle principal-variation move ordering.
    pub fn with_principal_variation(mut self, enabled: bool) -> Self {
        self.principal_variation = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AlphaBetaConfig::default();
        assert_eq!(config.max_depth, 8);
        assert!(config.time_limit.is_none());
        assert!(config.principal_variation);
    }

    #[test]
    fn test_builder_pattern() {
        let config = AlphaBetaConfig::default()
            .with_depth(3)
            .with_time_limit(Some(Duration::from_millis(250)))
            .with_principal_variation(false);

        assert_eq!(config.max_depth, 3);
        assert_eq!(config.time_limit, Some(Duration::from_millis(250)));
        assert!(!config.principal_variation);
    }

    #[test]
    fn test_timed_config() {
        let config = AlphaBetaConfig::timed(Duration::from_secs(1));
        assert_eq!(config.max_depth, 42);
        assert_eq!(config.time_limit, Some(Duration::from_secs(1)));
    }
}
