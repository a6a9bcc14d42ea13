//! Child selection and move ranking policies.

use engine_core::{with_child, SearchError, Table};
use games_connect4::Board;
use rand::Rng;

use crate::node::NodeRecord;

/// Bandit policy used to descend through fully expanded nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    /// Uniformly random legal move; moves are ranked by win rate.
    Uniform,
    /// Upper confidence bound; moves are ranked by visit count.
    Ucb1 { exploration: f64 },
}

impl Policy {
    /// Choose the child to descend into from a fully expanded node.
    pub fn select<T, R>(&self, board: &mut Board, table: &T, rng: &mut R) -> Result<u8, SearchError>
    where
        T: Table<NodeRecord>,
        R: Rng + ?Sized,
    {
        let open = board.open_columns();
        if open.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        match *self {
            Policy::Uniform => Ok(open[rng.gen_range(0..open.len())]),
            Policy::Ucb1 { exploration } => {
                let parent = table.entry(board)?.entry.visits;
                let ln_parent = (parent.max(1) as f64).ln();

                let mut best = open[0];
                let mut best_score = f64::NEG_INFINITY;
                for column in open {
                    let score = with_child(board, column, |child| {
                        Ok(table
                            .get(child)
                            .map_or(f64::INFINITY, |p| p.entry.ucb1(ln_parent, exploration)))
                    })?;
                    if score > best_score {
                        best_score = score;
                        best = column;
                    }
                }
                Ok(best)
            }
        }
    }

    /// Raw value used to rank root moves.
    pub fn key_value(&self, child: &NodeRecord) -> f64 {
        match self {
            Policy::Uniform => child.win_rate(),
            Policy::Ucb1 { .. } => child.visits as f64,
        }
    }

    /// Confidence in a root move on a 0 to 100 scale.
    pub fn normalized(&self, child: &NodeRecord, parent: &NodeRecord) -> f64 {
        match self {
            Policy::Uniform => 100.0 * child.win_rate(),
            Policy::Ucb1 { .. } => {
                if parent.visits == 0 {
                    0.0
                } else {
                    100.0 * child.visits as f64 / parent.visits as f64
                }
            }
        }
    }
}
