//! Error types for the checkers crate.
//!
//! Clicks on the board never produce errors; these are returned by the
//! programmatic entry points (`try_move`, config loading, logging setup).

use crate::checkers::{CheckersResult, Color, Square};

/// Errors that can occur outside of interactive play
#[derive(Debug, thiserror::Error)]
pub enum CheckersError {
    /// No legal move connects the two squares for the side to move
    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// The other side is to move
    #[error("Not your turn: {} to move", .to_move.name())]
    NotYourTurn { to_move: Color },

    /// The game has already been decided
    #[error("Game is over: {} won", .result.winner().name())]
    GameOver { result: CheckersResult },

    /// A piece placed off the board or on a light square
    #[error("Invalid square {square}: pieces stand on dark squares only")]
    InvalidSquare { square: Square },

    /// Invalid configuration value
    #[error("Config error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for checkers operations
pub type Result<T> = std::result::Result<T, CheckersError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CheckersError::IllegalMove {
            from: Square::new(5, 0),
            to: Square::new(3, 2),
        };
        assert_eq!(err.to_string(), "Illegal move: (5,0) to (3,2)");

        let err = CheckersError::NotYourTurn {
            to_move: Color::Black,
        };
        assert_eq!(err.to_string(), "Not your turn: Black to move");

        let err = CheckersError::GameOver {
            result: CheckersResult::RedWins,
        };
        assert_eq!(err.to_string(), "Game is over: Red won");

        let err = CheckersError::InvalidSquare {
            square: Square::new(4, 4),
        };
        assert_eq!(
            err.to_string(),
            "Invalid square (4,4): pieces stand on dark squares only"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: CheckersError = parse.unwrap_err().into();
        assert!(matches!(err, CheckersError::Json(_)));
    }
}
