//! Uniform random rollouts.

use rand::Rng;

use crate::board::{Board, Outcome, Player};
use crate::slices::completes_four;
use crate::{pos, BOARD_SIZE, COLS, MIN_WIN_MOVES, ROWS};

/// Snapshot of a position that can be played out to the end.
///
/// The snapshot owns its cells, so a rollout never touches the board it was
/// taken from.
#[derive(Debug, Clone)]
pub struct RandomPlayout {
    cells: [u8; BOARD_SIZE],
    heights: [u8; COLS],
    moves: usize,
    outcome: Option<Outcome>,
}

impl RandomPlayout {
    pub fn new(board: &Board) -> Self {
        Self {
            cells: *board.cells(),
            heights: *board.heights(),
            moves: board.moves(),
            outcome: board.winner(),
        }
    }

    /// Play uniformly random legal moves until the game ends.
    pub fn run<R: Rng + ?Sized>(mut self, rng: &mut R) -> Outcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }

        let mut open: Vec<usize> = (0..COLS)
            .filter(|&col| (self.heights[col] as usize) < ROWS)
            .collect();

        while self.moves < BOARD_SIZE {
            let idx = rng.gen_range(0..open.len());
            let col = open[idx];
            let cell = pos(col, self.heights[col] as usize);
            let side = if self.moves % 2 == 0 {
                Player::One
            } else {
                Player::Two
            };

            self.cells[cell] = side as u8;
            self.heights[col] += 1;
            self.moves += 1;
            if self.heights[col] as usize == ROWS {
                open.swap_remove(idx);
            }

            if self.moves >= MIN_WIN_MOVES && completes_four(&self.cells, cell, side as u8) {
                return Outcome::Win(side);
            }
        }

        Outcome::Draw
    }
}

/// Roll out `board` to a terminal outcome without modifying it.
pub fn random_playout<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Outcome {
    RandomPlayout::new(board).run(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_terminal_snapshot_returns_outcome() {
        let board = Board::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        assert_eq!(
            random_playout(&board, &mut rng),
            Outcome::Win(Player::One)
        );
    }

    #[test]
    fn test_playout_leaves_board_untouched() {
        let board = Board::from_moves(&[3, 3, 2]).unwrap();
        let before = board.clone();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..50 {
            random_playout(&board, &mut rng);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_single_open_slot_is_forced() {
        // 41 discs, no winner; the last disc draws
        let moves = [
            4, 3, 6, 0, 1, 4, 5, 5, 1, 1, 5, 0, 1, 6, 0, 1, 5, 5, 1, 0, 4, 6, 3, 2, 6, 6, 0, 4,
            6, 5, 2, 0, 4, 2, 4, 2, 2, 2, 3, 3, 3,
        ];
        let board = Board::from_moves(&moves).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        assert_eq!(random_playout(&board, &mut rng), Outcome::Draw);
    }

    #[test]
    fn test_both_sides_win_sometimes() {
        let board = Board::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut wins = [0usize; 3];
        for _ in 0..2000 {
            wins[random_playout(&board, &mut rng).code() as usize] += 1;
        }
        assert!(wins[1] > 0);
        assert!(wins[2] > 0);
        // The first player has the edge under random play
        assert!(wins[1] > wins[2]);
    }
}
