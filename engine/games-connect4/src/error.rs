use thiserror::Error;

/// Errors raised when the push/pop contract is violated by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Invalid move: column {column} is full or out of range")]
    InvalidMove { column: u8 },

    #[error("Game is already over")]
    GameOver,

    #[error("No move to undo")]
    EmptyHistory,
}
