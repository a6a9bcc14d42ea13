//! Connect 4 position representation for the search engines
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! The [`Board`] is a mutable cursor: searches `push` a move, recurse, and
//! `pop` it again. Every `push` is undone exactly by the matching `pop`,
//! including both position fingerprints.
//!
//! ```rust
//! use games_connect4::{Board, Outcome, Player};
//!
//! let mut board = Board::new();
//! for column in [0, 1, 0, 1, 0, 1, 0] {
//!     board.push(column).unwrap();
//! }
//! assert_eq!(board.winner(), Some(Outcome::Win(Player::One)));
//!
//! board.pop().unwrap();
//! assert!(!board.is_terminal());
//! ```

mod board;
mod error;
mod hash;
mod playout;
pub mod slices;

pub use board::{Board, Outcome, Player};
pub use error::BoardError;
pub use hash::{Fingerprint, PositionHasher};
pub use playout::{random_playout, RandomPlayout};

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// No line of four can exist before this many discs are on the board.
pub const MIN_WIN_MOVES: usize = 7;

/// Convert column and row to board index
#[inline]
pub const fn pos(col: usize, row: usize) -> usize {
    row * COLS + col
}

/// Reflect a column over the vertical center line.
#[inline]
pub const fn mirror_column(column: u8) -> u8 {
    (COLS as u8 - 1) - column
}
