//! Checkers against the computer: Red (human) vs Black (AI).

pub mod ai;
#[cfg(feature = "async-ai")]
pub mod ai_task;
pub mod logic;
pub mod movegen;
pub mod types;

pub use ai::{choose_move, score_move, AiRequest};
#[cfg(feature = "async-ai")]
pub use ai_task::{spawn_ai_move, AiTask};
pub use logic::{CheckersInput, GameSnapshot, MoveOutcome, NextActor, AI_COLOR, HUMAN_COLOR};
pub use movegen::{apply_to_board, legal_moves, side_moves, LegalMoves};
pub use types::*;
