//! Monte Carlo Tree Search (MCTS) for Connect 4.
//!
//! The search grows a tree of position records inside an `engine-core`
//! table, one record per distinct position. Each iteration consists of four
//! phases:
//!
//! 1. **Selection**: descend through fully expanded nodes, either uniformly
//!    at random or by UCB1 (Upper Confidence Bound)
//! 2. **Expansion**: add one untried child of the first node that still has one
//! 3. **Simulation**: play uniformly random moves to the end of the game
//! 4. **Backpropagation**: count a visit on every node of the path and credit
//!    the side that moved into it with 1 for a win, 0.5 for a draw
//!
//! With a [`SymmetryTable`](engine_core::SymmetryTable) a position and its
//! mirror image share one node, so expansion skips moves whose reflection has
//! already been tried.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Search;
//! use games_connect4::Board;
//! use mcts::{MctsConfig, MonteCarloEngine};
//!
//! let mut board = Board::from_moves(&[0, 1, 0, 1, 0, 1]).unwrap();
//! let mut engine: MonteCarloEngine = MonteCarloEngine::new(MctsConfig::for_testing());
//!
//! engine.explore(&mut board).unwrap();
//! assert_eq!(engine.best_moves(&mut board).unwrap(), vec![0]);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: iterations per `explore` call (default: 5000)
//! - `policy`: [`Policy::Uniform`] or [`Policy::Ucb1`] (default: UCB1, c = sqrt 2)
//! - `time_limit`: optional wall-clock budget per `explore` call
//! - `seed`: fixed seed for reproducible searches

pub mod config;
pub mod node;
pub mod policy;
pub mod search;

pub use config::{MctsConfig, DEFAULT_EXPLORATION};
pub use node::NodeRecord;
pub use policy::Policy;
pub use search::{MonteCarloEngine, SearchStats};

/// Monte Carlo engine whose nodes are shared between mirror-image positions.
pub type SymmetricMonteCarlo = MonteCarloEngine<engine_core::SymmetryTable<NodeRecord>>;
