//! Base-3 position fingerprints.
//!
//! Every cell owns a disjoint weight range: an empty cell contributes 0, a
//! disc of player one contributes `3^k` and a disc of player two `2 * 3^k`.
//! Summing over the board yields the board read as a base-3 number, so two
//! positions share a fingerprint exactly when their cells are identical.
//! The weights are built by repeated addition, never by exponentiation.

use crate::{Player, BOARD_SIZE, COLS};

/// Fingerprint of a full cell configuration. `3^42` needs 67 bits.
pub type Fingerprint = u128;

const fn build_weights() -> [[Fingerprint; 3]; BOARD_SIZE] {
    let mut table = [[0; 3]; BOARD_SIZE];
    let mut unit: Fingerprint = 1;
    let mut cell = 0;
    while cell < BOARD_SIZE {
        table[cell][1] = unit;
        table[cell][2] = unit + unit;
        unit = unit + unit + unit;
        cell += 1;
    }
    table
}

static WEIGHTS: [[Fingerprint; 3]; BOARD_SIZE] = build_weights();

/// Stateless weight table used to maintain fingerprints incrementally.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionHasher;

impl PositionHasher {
    /// Weight added when `player` occupies `cell`.
    #[inline]
    pub fn weight(cell: usize, player: Player) -> Fingerprint {
        WEIGHTS[cell][player as usize]
    }

    /// Cell index reflected over the vertical center line.
    #[inline]
    pub fn mirror_cell(cell: usize) -> usize {
        let (row, col) = (cell / COLS, cell % COLS);
        row * COLS + (COLS - 1 - col)
    }

    /// Fingerprint of a cell configuration computed from scratch.
    pub fn hash_cells(cells: &[u8; BOARD_SIZE]) -> Fingerprint {
        cells
            .iter()
            .enumerate()
            .map(|(cell, &value)| WEIGHTS[cell][value as usize])
            .sum()
    }

    /// Fingerprint of the horizontally reflected configuration.
    pub fn hash_mirrored(cells: &[u8; BOARD_SIZE]) -> Fingerprint {
        cells
            .iter()
            .enumerate()
            .map(|(cell, &value)| WEIGHTS[Self::mirror_cell(cell)][value as usize])
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_are_base_three() {
        assert_eq!(PositionHasher::weight(0, Player::One), 1);
        assert_eq!(PositionHasher::weight(0, Player::Two), 2);
        assert_eq!(PositionHasher::weight(1, Player::One), 3);
        assert_eq!(PositionHasher::weight(2, Player::Two), 18);
    }

    #[test]
    fn test_full_board_fits() {
        let cells = [2u8; BOARD_SIZE];
        // All twos in base 3 is 3^42 - 1
        let mut expected: Fingerprint = 1;
        for _ in 0..BOARD_SIZE {
            expected *= 3;
        }
        assert_eq!(PositionHasher::hash_cells(&cells), expected - 1);
    }

    #[test]
    fn test_mirror_cell() {
        assert_eq!(PositionHasher::mirror_cell(0), 6);
        assert_eq!(PositionHasher::mirror_cell(3), 3);
        assert_eq!(PositionHasher::mirror_cell(8), 12);
        for cell in 0..BOARD_SIZE {
            let twice = PositionHasher::mirror_cell(PositionHasher::mirror_cell(cell));
            assert_eq!(twice, cell);
        }
    }
}
