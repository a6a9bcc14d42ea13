//! Interface shared by the search engines.

use games_connect4::{Board, BoardError};
use thiserror::Error;

use crate::table::TableError;

/// Errors surfaced by a search engine or its queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("No legal moves available")]
    NoLegalMoves,
}

/// A search engine that analyses a position in place.
///
/// `explore` may push and pop moves on the board, but always returns it in
/// the state it was given. The query methods read what `explore` cached for
/// the current position and its children, so they must follow an `explore`
/// call on the same position.
pub trait Search {
    /// Short engine name for logs and command-line selection.
    fn name(&self) -> &'static str;

    /// Analyse the position, filling the engine's cache.
    fn explore(&mut self, board: &mut Board) -> Result<(), SearchError>;

    /// Every move tied for the best value. Never empty on success.
    fn best_moves(&self, board: &mut Board) -> Result<Vec<u8>, SearchError>;

    /// Raw engine value of every open column, from the side to move.
    fn key_values(&self, board: &mut Board) -> Result<Vec<(u8, f64)>, SearchError>;

    /// Confidence in `column` on a 0 to 100 scale.
    fn normalized_value(&self, board: &mut Board, column: u8) -> Result<f64, SearchError>;

    /// Drop cached positions with fewer than `ply` discs.
    fn retire_before(&mut self, ply: usize);

    fn normalized_key_values(&self, board: &mut Board) -> Result<Vec<(u8, f64)>, SearchError> {
        board
            .open_columns()
            .into_iter()
            .map(|column| Ok((column, self.normalized_value(board, column)?)))
            .collect()
    }
}

impl<S: Search + ?Sized> Search for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn explore(&mut self, board: &mut Board) -> Result<(), SearchError> {
        (**self).explore(board)
    }

    fn best_moves(&self, board: &mut Board) -> Result<Vec<u8>, SearchError> {
        (**self).best_moves(board)
    }

    fn key_values(&self, board: &mut Board) -> Result<Vec<(u8, f64)>, SearchError> {
        (**self).key_values(board)
    }

    fn normalized_value(&self, board: &mut Board, column: u8) -> Result<f64, SearchError> {
        (**self).normalized_value(board, column)
    }

    fn retire_before(&mut self, ply: usize) {
        (**self).retire_before(ply)
    }

    fn normalized_key_values(&self, board: &mut Board) -> Result<Vec<(u8, f64)>, SearchError> {
        (**self).normalized_key_values(board)
    }
}

/// Push `column`, run `f` on the child position, and pop again.
///
/// The move is undone even when `f` fails.
pub fn with_child<T>(
    board: &mut Board,
    column: u8,
    f: impl FnOnce(&mut Board) -> Result<T, SearchError>,
) -> Result<T, SearchError> {
    board.push(column)?;
    let result = f(board);
    board.pop()?;
    result
}

/// Select every item whose score equals the maximum.
pub fn argmax_all<T: Copy>(items: impl IntoIterator<Item = (T, f64)>) -> Vec<T> {
    let mut best = f64::NEG_INFINITY;
    let mut out = Vec::new();
    for (item, score) in items {
        if score > best {
            best = score;
            out.clear();
            out.push(item);
        } else if score == best {
            out.push(item);
        }
    }
    out
}
