//! MCTS node statistics.
//!
//! One record per position, stored in the engine's table. Win credit is
//! counted for the side that moved into the position, so a parent compares
//! its children by their win rate directly.

use games_connect4::Board;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    /// Cumulative win credit (1 per win, 0.5 per draw)
    pub wins: f64,

    /// Number of iterations routed through this node
    pub visits: u32,

    /// Whether every move has been tried at least once
    pub expanded: bool,

    /// Moves not yet tried, in the orientation of the stored position
    pub untried: Vec<u8>,
}

impl NodeRecord {
    /// Fresh zero-visit record for the current position.
    pub fn new(board: &Board) -> Self {
        let untried = if board.is_terminal() {
            Vec::new()
        } else {
            board.open_columns()
        };
        Self {
            wins: 0.0,
            visits: 0,
            expanded: untried.is_empty(),
            untried,
        }
    }

    /// Win rate, 0 when never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCB1 score: `win_rate + c * sqrt(ln(N) / n)`.
    ///
    /// Takes `ln(parent_visits)` precomputed since it is shared by siblings.
    /// Unvisited nodes score infinity so each is tried once first.
    #[inline]
    pub fn ucb1(&self, ln_parent_visits: f64, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        self.win_rate() + exploration * (ln_parent_visits / self.visits as f64).sqrt()
    }
}
