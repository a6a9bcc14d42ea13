//! Iterative-deepening alpha-beta search for Connect 4.
//!
//! The engine runs negamax with alpha-beta pruning at increasing depths,
//! reusing a transposition table between passes for move ordering and
//! principal-variation lookups. With a time limit set it keeps deepening
//! until the deadline, keeping the result of the last completed pass.
//!
//! # Usage
//!
//! ```rust
//! use alphabeta::{AlphaBetaConfig, AlphaBetaEngine};
//! use engine_core::Search;
//! use games_connect4::Board;
//!
//! let mut board = Board::from_moves(&[0, 1, 0, 1, 0, 1]).unwrap();
//! let mut engine: AlphaBetaEngine = AlphaBetaEngine::new(AlphaBetaConfig::for_testing());
//!
//! engine.explore(&mut board).unwrap();
//! assert_eq!(engine.best_moves(&mut board).unwrap(), vec![0]);
//! ```
//!
//! # Cache variants
//!
//! `AlphaBetaEngine` is generic over its [`Table`](engine_core::Table). The
//! default keys entries on the exact position; [`SymmetricAlphaBeta`] folds
//! each position together with its mirror image.

pub mod config;
pub mod entry;
pub mod search;

pub use config::AlphaBetaConfig;
pub use entry::{Bound, CacheEntry};
pub use search::{AlphaBetaEngine, SearchStats, INFINITY, WIN};

/// Alpha-beta engine whose cache shares entries between mirror images.
pub type SymmetricAlphaBeta = AlphaBetaEngine<engine_core::SymmetryTable<CacheEntry>>;

#[cfg(test)]
mod tests;
