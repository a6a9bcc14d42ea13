//! Process-wide line tables.
//!
//! A *line* is a maximal run of collinear cells (a full row, column or
//! diagonal of length four or more). A *slice* is any window of four
//! consecutive cells on a line. The *radial index* maps each cell to the
//! segments of every line through it: the cells behind it (nearest first)
//! and up to three cells ahead of it. Win detection only has to walk the
//! radial segments of the cell that was just played.

use once_cell::sync::Lazy;

use crate::{pos, BOARD_SIZE, COLS, ROWS};

/// Cells on one line through a played cell, split at that cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Cells before the anchor on the line, nearest first.
    pub behind: Vec<usize>,
    /// Up to three cells after the anchor on the line.
    pub ahead: Vec<usize>,
}

/// Directions as (column step, row step): horizontal, vertical, diagonal /, diagonal \
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[inline]
fn on_board(col: isize, row: isize) -> bool {
    col >= 0 && col < COLS as isize && row >= 0 && row < ROWS as isize
}

/// Every maximal line of at least four cells.
pub static LINES: Lazy<Vec<Vec<usize>>> = Lazy::new(|| {
    let mut lines = Vec::new();
    for (dc, dr) in DIRECTIONS {
        for row in 0..ROWS as isize {
            for col in 0..COLS as isize {
                // Only start from cells with no predecessor in this direction
                if on_board(col - dc, row - dr) {
                    continue;
                }
                let mut line = Vec::new();
                let (mut c, mut r) = (col, row);
                while on_board(c, r) {
                    line.push(pos(c as usize, r as usize));
                    c += dc;
                    r += dr;
                }
                if line.len() >= 4 {
                    lines.push(line);
                }
            }
        }
    }
    lines
});

/// Every window of four consecutive cells on a line (69 in total).
pub static SLICES: Lazy<Vec<[usize; 4]>> = Lazy::new(|| {
    LINES
        .iter()
        .flat_map(|line| line.windows(4).map(|w| [w[0], w[1], w[2], w[3]]))
        .collect()
});

/// Per-cell radial segments of every line through the cell.
pub static RADIAL: Lazy<Vec<Vec<Segment>>> = Lazy::new(|| {
    let mut radial = vec![Vec::new(); BOARD_SIZE];
    for line in LINES.iter() {
        for (i, &cell) in line.iter().enumerate() {
            let behind = line[..i].iter().rev().copied().collect();
            let ahead = line[i + 1..].iter().take(3).copied().collect();
            radial[cell].push(Segment { behind, ahead });
        }
    }
    radial
});

/// Whether the disc of `side` at `cell` completes four in a row.
///
/// Counts the contiguous run of `side` discs on each side of the cell along
/// every line through it; three neighbours plus the disc itself make four.
pub fn completes_four(cells: &[u8; BOARD_SIZE], cell: usize, side: u8) -> bool {
    RADIAL[cell].iter().any(|segment| {
        let run = |cells_on_side: &[usize]| {
            cells_on_side
                .iter()
                .take_while(|&&i| cells[i] == side)
                .count()
        };
        run(&segment.behind) + run(&segment.ahead) >= 3
    })
}
