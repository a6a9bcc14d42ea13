//! MCTS configuration parameters.

use std::time::Duration;

use crate::policy::Policy;

/// Default UCB1 exploration constant (sqrt 2).
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Iterations (select, expand, simulate, backpropagate) per `explore` call.
    pub iterations: u32,

    /// How selection picks a child of a fully expanded node.
    pub policy: Policy,

    /// Wall-clock budget for one `explore` call. Searching stops at the
    /// deadline or after `iterations`, whichever comes first.
    pub time_limit: Option<Duration>,

    /// Seed for selection and rollouts. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 5000,
            policy: Policy::Ucb1 {
                exploration: DEFAULT_EXPLORATION,
            },
            time_limit: None,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Plain Monte Carlo: uniform selection, best win rate wins.
    pub fn uniform() -> Self {
        Self {
            policy: Policy::Uniform,
            ..Self::default()
        }
    }

    /// UCB1 search that runs until the deadline.
    pub fn timed(limit: Duration) -> Self {
        Self {
            iterations: u32::MAX,
            time_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Create a fast, reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 500,
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the selection policy.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Builder pattern: switch to UCB1 with the given exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.policy = Policy::Ucb1 { exploration: c };
        self
    }

    /// Builder pattern: set or clear the time limit.
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Builder pattern: set the random seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
