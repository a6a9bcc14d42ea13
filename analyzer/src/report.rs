//! Plain-text analysis report.

use std::fmt::Write;

use games_connect4::{Board, Outcome, Player};

/// Everything the analyzer prints for one position.
#[derive(Debug, Clone)]
pub struct Report {
    pub engine: &'static str,
    /// `(column, value)` on the 0 to 100 scale
    pub values: Vec<(u8, f64)>,
    pub best: Vec<u8>,
    pub suggestion: u8,
}

fn player_name(player: Player) -> &'static str {
    match player {
        Player::One => "x",
        Player::Two => "o",
    }
}

/// Board followed by the result of a finished game.
pub fn render_finished(board: &Board) -> String {
    let mut out = board.to_string();
    match board.winner() {
        Some(Outcome::Win(player)) => {
            let _ = writeln!(out, "Game over: {} wins", player_name(player));
        }
        Some(Outcome::Draw) => {
            let _ = writeln!(out, "Game over: draw");
        }
        None => {}
    }
    out
}

impl Report {
    pub fn render(&self, board: &Board) -> String {
        let mut out = board.to_string();
        let _ = writeln!(
            out,
            "{} to move, analysed by {}",
            player_name(board.side_to_move()),
            self.engine
        );
        for (column, value) in &self.values {
            let marker = if self.best.contains(column) { " *" } else { "" };
            let _ = writeln!(out, "  column {}: {:6.2}{}", column, value, marker);
        }
        let best: Vec<String> = self.best.iter().map(u8::to_string).collect();
        let _ = writeln!(out, "Best moves: {}", best.join(", "));
        let _ = writeln!(out, "Suggested move: {}", self.suggestion);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_marks_best_moves() {
        let board = Board::from_moves(&[3]).unwrap();
        let report = Report {
            engine: "iterative",
            values: vec![(2, 48.5), (3, 51.25), (4, 48.5)],
            best: vec![3],
            suggestion: 3,
        };

        let text = report.render(&board);
        assert!(text.starts_with(&board.to_string()));
        assert!(text.contains("o to move, analysed by iterative"));
        assert!(text.contains("  column 3:  51.25 *\n"));
        assert!(text.contains("  column 2:  48.50\n"));
        assert!(text.contains("Best moves: 3\n"));
        assert!(text.ends_with("Suggested move: 3\n"));
    }

    #[test]
    fn finished_game_names_the_winner() {
        let board = Board::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert!(render_finished(&board).ends_with("Game over: x wins\n"));
    }
}
