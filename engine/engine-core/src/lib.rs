//! Shared search infrastructure for the Connect 4 engines
//!
//! This crate provides the pieces both engines build on:
//! - `Table`: ply-partitioned fingerprint cache, plain or symmetry-folding
//! - `Search`: the query interface every engine implements
//! - `Analysis`: drives one engine over the positions of a live game

pub mod analysis;
pub mod search;
pub mod table;

// Re-export main types for convenience
pub use analysis::Analysis;
pub use search::{argmax_all, with_child, Search, SearchError};
pub use table::{Probe, SymmetryTable, Table, TableError, TranspositionTable, PLIES};
