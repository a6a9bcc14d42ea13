//! Cached alpha-beta results.

use games_connect4::{mirror_column, COLS};

/// What a cached score proves about the true value of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Searched inside the window; the score is the value.
    Exact,
    /// Failed high; the value is at least the score.
    Lower,
    /// Failed low; the value is at most the score.
    Upper,
    /// Static evaluation at the horizon; never answers a search query.
    Estimate,
}

/// Per-position record kept in the transposition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// Score from the perspective of the side to move.
    pub score: i32,
    pub bound: Bound,
    /// Remaining depth the score was searched to.
    pub depth: u8,
    /// Bitmask of the best columns found (bit `c` for column `c`).
    pub best: u8,
    /// Cached `Board::evaluate` of this position, used for move ordering.
    pub static_eval: Option<i32>,
}

impl CacheEntry {
    /// Depth recorded for terminal positions; satisfies every query.
    pub const TERMINAL_DEPTH: u8 = u8::MAX;

    pub fn estimate(eval: i32) -> Self {
        Self {
            score: eval,
            bound: Bound::Estimate,
            depth: 0,
            best: 0,
            static_eval: Some(eval),
        }
    }

    pub fn terminal(score: i32, static_eval: Option<i32>) -> Self {
        Self {
            score,
            bound: Bound::Exact,
            depth: Self::TERMINAL_DEPTH,
            best: 0,
            static_eval,
        }
    }

    /// Whether this entry settles a search of `depth` plies in `(alpha, beta)`.
    #[inline]
    pub fn answers(&self, depth: u8, alpha: i32, beta: i32) -> bool {
        if self.depth < depth {
            return false;
        }
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => self.score >= beta,
            Bound::Upper => self.score <= alpha,
            Bound::Estimate => false,
        }
    }

    /// Best columns, reflected when the entry was found through the mirror.
    pub fn best_columns(&self, mirrored: bool) -> Vec<u8> {
        let mask = if mirrored {
            mirror_mask(self.best)
        } else {
            self.best
        };
        mask_columns(mask)
    }
}

#[inline]
pub fn column_bit(column: u8) -> u8 {
    1 << column
}

/// Reflect a column bitmask over the center column.
pub fn mirror_mask(mask: u8) -> u8 {
    mask_columns(mask)
        .into_iter()
        .fold(0, |acc, column| acc | column_bit(mirror_column(column)))
}

/// Columns set in `mask`, ascending.
pub fn mask_columns(mask: u8) -> Vec<u8> {
    (0..COLS as u8)
        .filter(|&column| mask & column_bit(column) != 0)
        .collect()
}
