//! Mutable Connect 4 position with exact undo.

use std::fmt;

use crate::error::BoardError;
use crate::hash::{Fingerprint, PositionHasher};
use crate::slices::{completes_four, SLICES};
use crate::{pos, BOARD_SIZE, COLS, MIN_WIN_MOVES, ROWS};

/// Heuristic weight of a slice holding 0..=4 discs of a single side.
const SLICE_WEIGHTS: [i32; 5] = [0, 1, 10, 100, 1000];

/// A side in the game. Player one moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// The opposing side.
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Draw,
    Win(Player),
}

impl Outcome {
    /// Winner id: 0 for a draw, otherwise the winning player's number.
    pub fn code(self) -> u8 {
        match self {
            Outcome::Draw => 0,
            Outcome::Win(player) => player as u8,
        }
    }
}

/// Connect 4 position
///
/// Cells hold 0 (empty), 1 (player one) or 2 (player two). The side to move
/// is derived from the number of discs played, never stored. Both
/// fingerprints are maintained with additive deltas on every push and pop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Row-major cells, row 0 at the bottom
    cells: [u8; BOARD_SIZE],
    /// Discs per column; the open slots of a column are rows `height..ROWS`
    heights: [u8; COLS],
    /// Played cell indices in order
    history: Vec<u8>,
    /// Terminal classification, `None` while the game is in progress
    outcome: Option<Outcome>,
    fingerprint: Fingerprint,
    mirror: Fingerprint,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
            heights: [0; COLS],
            history: Vec::with_capacity(BOARD_SIZE),
            outcome: None,
            fingerprint: 0,
            mirror: 0,
        }
    }

    /// Play a sequence of columns from the empty board.
    pub fn from_moves(columns: &[u8]) -> Result<Self, BoardError> {
        let mut board = Self::new();
        for &column in columns {
            board.push(column)?;
        }
        Ok(board)
    }

    /// Number of discs played.
    #[inline]
    pub fn moves(&self) -> usize {
        self.history.len()
    }

    /// Side whose turn it is.
    #[inline]
    pub fn side_to_move(&self) -> Player {
        if self.moves() % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    /// Side that played the last disc (player two on the empty board).
    #[inline]
    pub fn last_mover(&self) -> Player {
        self.side_to_move().other()
    }

    /// Cell index of the last disc, if any.
    pub fn last_cell(&self) -> Option<usize> {
        self.history.last().map(|&cell| cell as usize)
    }

    /// Whether a disc can still be dropped into `column`.
    #[inline]
    pub fn is_open(&self, column: u8) -> bool {
        (column as usize) < COLS && (self.heights[column as usize] as usize) < ROWS
    }

    /// Columns with at least one open slot, in ascending order.
    pub fn open_columns(&self) -> Vec<u8> {
        (0..COLS as u8).filter(|&col| self.is_open(col)).collect()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Terminal classification: `None` while in progress.
    #[inline]
    pub fn winner(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Fingerprint of the horizontally reflected position.
    #[inline]
    pub fn mirror_fingerprint(&self) -> Fingerprint {
        self.mirror
    }

    #[inline]
    pub fn cells(&self) -> &[u8; BOARD_SIZE] {
        &self.cells
    }

    #[inline]
    pub fn heights(&self) -> &[u8; COLS] {
        &self.heights
    }

    /// Cell value at (col, row).
    #[inline]
    pub fn cell(&self, col: usize, row: usize) -> u8 {
        self.cells[pos(col, row)]
    }

    /// Drop a disc for the side to move into `column`.
    pub fn push(&mut self, column: u8) -> Result<(), BoardError> {
        if self.outcome.is_some() {
            return Err(BoardError::GameOver);
        }
        if !self.is_open(column) {
            return Err(BoardError::InvalidMove { column });
        }

        let col = column as usize;
        let cell = pos(col, self.heights[col] as usize);
        let side = self.side_to_move();

        self.cells[cell] = side as u8;
        self.heights[col] += 1;
        self.fingerprint += PositionHasher::weight(cell, side);
        self.mirror += PositionHasher::weight(PositionHasher::mirror_cell(cell), side);
        self.history.push(cell as u8);
        self.outcome = self.detect_outcome(cell, side);

        Ok(())
    }

    /// Undo the last move and return its column.
    pub fn pop(&mut self) -> Result<u8, BoardError> {
        let cell = self.history.pop().ok_or(BoardError::EmptyHistory)? as usize;
        // Parity after the pop is the side that made the undone move
        let side = self.side_to_move();
        let col = cell % COLS;

        self.cells[cell] = 0;
        self.heights[col] -= 1;
        self.fingerprint -= PositionHasher::weight(cell, side);
        self.mirror -= PositionHasher::weight(PositionHasher::mirror_cell(cell), side);
        self.outcome = None;

        Ok(col as u8)
    }

    /// Classify the position after `side` played `cell`.
    fn detect_outcome(&self, cell: usize, side: Player) -> Option<Outcome> {
        if self.moves() < MIN_WIN_MOVES {
            return None;
        }
        if completes_four(&self.cells, cell, side as u8) {
            return Some(Outcome::Win(side));
        }
        if self.moves() == BOARD_SIZE {
            return Some(Outcome::Draw);
        }
        None
    }

    /// Static evaluation from the perspective of the side to move.
    ///
    /// Every slice held by a single side scores 1, 10, 100 (or 1000 when
    /// complete) by disc count; contested slices score nothing.
    pub fn evaluate(&self) -> i32 {
        let mut score = 0;
        for slice in SLICES.iter() {
            let mut counts = [0usize; 3];
            for &cell in slice {
                counts[self.cells[cell] as usize] += 1;
            }
            match (counts[1], counts[2]) {
                (n, 0) => score += SLICE_WEIGHTS[n],
                (0, n) => score -= SLICE_WEIGHTS[n],
                _ => {}
            }
        }
        match self.side_to_move() {
            Player::One => score,
            Player::Two => -score,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Bordered grid with the open columns numbered on top:
    /// ```text
    /// ///////////////////
    /// // 0 1 2   4 5 6 //
    /// // . . . x . . . //
    /// ///////////////////
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "/".repeat(COLS * 2 + 5);
        writeln!(f, "{border}")?;
        write!(f, "//")?;
        for col in 0..COLS as u8 {
            if self.is_open(col) {
                write!(f, " {col}")?;
            } else {
                write!(f, "  ")?;
            }
        }
        writeln!(f, " //")?;
        for row in (0..ROWS).rev() {
            write!(f, "//")?;
            for col in 0..COLS {
                let piece = match self.cell(col, row) {
                    1 => 'x',
                    2 => 'o',
                    _ => '.',
                };
                write!(f, " {piece}")?;
            }
            writeln!(f, " //")?;
        }
        write!(f, "{border}")
    }
}
