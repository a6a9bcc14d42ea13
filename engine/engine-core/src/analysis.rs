//! Move analysis over a live game.
//!
//! `Analysis` drives one engine across the moves of a game: before each
//! search it retires cache plies the game has already passed, then exposes
//! the engine's move queries and a random pick among the tied best moves.

use std::time::Instant;

use games_connect4::Board;
use rand::Rng;
use tracing::debug;

use crate::search::{Search, SearchError};

/// Engine wrapper used by callers that analyse successive positions of one game.
#[derive(Debug)]
pub struct Analysis<S> {
    engine: S,
}

impl<S: Search> Analysis<S> {
    pub fn new(engine: S) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &S {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut S {
        &mut self.engine
    }

    pub fn into_inner(self) -> S {
        self.engine
    }

    /// Retire stale plies and search the position.
    pub fn explore(&mut self, board: &mut Board) -> Result<(), SearchError> {
        if board.is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        let start = Instant::now();
        self.engine.retire_before(board.moves());
        self.engine.explore(board)?;

        debug!(
            engine = self.engine.name(),
            ply = board.moves(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Explored position"
        );
        Ok(())
    }

    pub fn best_moves(&self, board: &mut Board) -> Result<Vec<u8>, SearchError> {
        self.engine.best_moves(board)
    }

    pub fn key_values(&self, board: &mut Board) -> Result<Vec<(u8, f64)>, SearchError> {
        self.engine.key_values(board)
    }

    pub fn normalized_key_values(&self, board: &mut Board) -> Result<Vec<(u8, f64)>, SearchError> {
        self.engine.normalized_key_values(board)
    }

    /// Pick uniformly among the tied best moves.
    pub fn suggest<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        rng: &mut R,
    ) -> Result<u8, SearchError> {
        let best = self.engine.best_moves(board)?;
        if best.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        Ok(best[rng.gen_range(0..best.len())])
    }
}
