//! Checkers session logic: human clicks, move application, turn passing and
//! AI pacing.

use super::ai::AiRequest;
use super::movegen::{
    apply_to_board, has_any_move, legal_moves, selectable_moves, side_has_jump, side_moves,
};
use super::types::{
    Board, CheckersGame, CheckersResult, Color, CursorDirection, Difficulty, Move, MoveRecord,
    Square,
};
use crate::error::{CheckersError, Result};
use rand::Rng;
use serde::Serialize;

/// Side played from the keyboard
pub const HUMAN_COLOR: Color = Color::Red;
/// Side played by the computer
pub const AI_COLOR: Color = Color::Black;

/// Input actions for the checkers game (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckersInput {
    Up,
    Down,
    Left,
    Right,
    Select, // Enter - click the cell under the cursor
    NewGame,
    SetDifficulty(Difficulty),
    Other,
}

/// Who acts next after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NextActor {
    Human,
    Computer,
    Finished(CheckersResult),
}

/// What applying a move did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board_after: Board,
    pub was_capture: bool,
    pub was_promotion: bool,
    /// The same piece must jump again; the turn has not passed
    pub continues_chain: bool,
    pub next: NextActor,
}

/// Everything a render surface shows, as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current_player: Color,
    pub difficulty: Difficulty,
    pub selected: Option<Square>,
    pub highlighted: Vec<Square>,
    pub must_jump: bool,
    pub ai_thinking: bool,
    pub game_over: bool,
    pub result: Option<CheckersResult>,
    pub move_history: Vec<MoveRecord>,
    pub red_pieces: usize,
    pub black_pieces: usize,
    pub total_moves: usize,
    pub total_captures: u32,
}

impl CheckersGame {
    /// Start over on a fresh board, keeping difficulty and AI pacing.
    /// Any pending AI move is dropped.
    pub fn reset(&mut self) {
        let think_target = self.ai_think_target;
        *self = Self::new(self.difficulty);
        self.ai_think_target = think_target;
        tracing::info!(difficulty = self.difficulty.name(), "New game");
    }

    /// Takes effect from the AI's next decision.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        tracing::info!(difficulty = difficulty.name(), "Difficulty changed");
    }

    /// Process a key input. Returns true if the input was handled.
    /// Board clicks are ignored while the AI is thinking.
    pub fn process_input(&mut self, input: CheckersInput) -> bool {
        match input {
            CheckersInput::Up => self.move_cursor(CursorDirection::Up),
            CheckersInput::Down => self.move_cursor(CursorDirection::Down),
            CheckersInput::Left => self.move_cursor(CursorDirection::Left),
            CheckersInput::Right => self.move_cursor(CursorDirection::Right),
            CheckersInput::Select => {
                if self.ai_thinking || self.is_over() {
                    return false;
                }
                self.click_cell(self.cursor);
            }
            CheckersInput::NewGame => self.reset(),
            CheckersInput::SetDifficulty(difficulty) => self.set_difficulty(difficulty),
            CheckersInput::Other => return false,
        }
        true
    }

    /// Handle a click on `square` by the human player.
    ///
    /// Clicking a highlighted destination plays it. Otherwise the click
    /// selects another own piece that can move, or clears the selection.
    /// Mid-chain, only the chain piece's destinations react.
    /// When several jump paths end on the clicked square, the first one
    /// generated is played.
    pub fn click_cell(&mut self, square: Square) -> Option<MoveOutcome> {
        if self.is_over() || self.current_player != HUMAN_COLOR {
            return None;
        }

        if let Some(mv) = self.valid_moves.iter().find(|mv| mv.to == square).cloned() {
            return Some(self.apply_move(&mv));
        }

        if self.chain_square.is_some() {
            return None;
        }

        if self.selected != Some(square) && self.select(square) {
            return None;
        }
        self.clear_selection();
        None
    }

    /// Select the human piece on `square` if it has a move this turn.
    fn select(&mut self, square: Square) -> bool {
        if self.board.get(square).map(|piece| piece.color) != Some(HUMAN_COLOR) {
            return false;
        }

        let moves = selectable_moves(square, &self.board);
        if moves.is_empty() {
            return false;
        }
        self.selected = Some(square);
        self.valid_moves = moves;
        true
    }

    /// Play the human move `from` -> `to`, validating it first.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome> {
        if let Some(result) = self.game_result {
            return Err(CheckersError::GameOver { result });
        }
        if self.current_player != HUMAN_COLOR {
            return Err(CheckersError::NotYourTurn {
                to_move: self.current_player,
            });
        }

        let candidates = match self.chain_square {
            Some(chain) if chain == from => self.valid_moves.clone(),
            Some(_) => Vec::new(),
            None if self.board.get(from).is_some_and(|p| p.color == HUMAN_COLOR) => {
                selectable_moves(from, &self.board)
            }
            None => Vec::new(),
        };

        let mv = candidates
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(CheckersError::IllegalMove { from, to })?;
        Ok(self.apply_move(&mv))
    }

    /// Apply a legal move for the side to move.
    ///
    /// Captured pieces are removed and a man reaching its far row is crowned.
    /// If the moved piece can jump again the turn stays with the mover;
    /// otherwise the turn passes and the game is checked for an end.
    pub fn apply_move(&mut self, mv: &Move) -> MoveOutcome {
        let player = self.current_player;
        let Some((board_after, applied)) = apply_to_board(&self.board, mv) else {
            tracing::warn!(%mv, "Ignoring move from an empty square");
            return self.outcome(false, false, false);
        };

        self.board = board_after;
        self.total_captures += applied.captured as u32;
        self.move_history.push(MoveRecord {
            player,
            from: mv.from,
            to: mv.to,
            captured: applied.captured,
            promoted: applied.promoted,
        });
        self.last_move = Some(mv.clone());
        tracing::debug!(
            player = player.name(),
            %mv,
            captured = applied.captured,
            promoted = applied.promoted,
            "Applied move"
        );

        let continuation = if mv.is_jump() {
            legal_moves(mv.to, &self.board)
        } else {
            Default::default()
        };
        let continues_chain = continuation.must_jump;

        if continues_chain {
            self.chain_square = Some(mv.to);
            self.selected = Some(mv.to);
            self.valid_moves = continuation.moves;
            self.must_jump = true;
        } else {
            self.end_turn();
        }

        self.outcome(mv.is_jump(), applied.promoted, continues_chain)
    }

    fn outcome(&self, was_capture: bool, was_promotion: bool, continues_chain: bool) -> MoveOutcome {
        MoveOutcome {
            board_after: self.board,
            was_capture,
            was_promotion,
            continues_chain,
            next: self.next_actor(),
        }
    }

    fn next_actor(&self) -> NextActor {
        match self.game_result {
            Some(result) => NextActor::Finished(result),
            None if self.current_player == HUMAN_COLOR => NextActor::Human,
            None => NextActor::Computer,
        }
    }

    /// End the current turn and switch players
    fn end_turn(&mut self) {
        self.current_player = self.current_player.opponent();
        self.clear_selection();
        self.chain_square = None;
        self.must_jump = side_has_jump(self.current_player, &self.board);

        self.check_win_condition();

        // Start AI thinking if it's AI's turn and game is not over
        if self.current_player == AI_COLOR && !self.is_over() {
            self.ai_thinking = true;
            self.ai_think_ticks = 0;
            self.ai_pending_move = None;
        }
    }

    /// The side to move loses when it has no pieces or no legal move.
    pub fn check_win_condition(&mut self) {
        if self.game_result.is_some() {
            return;
        }

        let to_move = self.current_player;
        if self.board.count(to_move) > 0 && has_any_move(to_move, &self.board) {
            return;
        }

        let result = CheckersResult::won_by(to_move.opponent());
        self.game_result = Some(result);
        self.ai_thinking = false;
        self.ai_pending_move = None;
        tracing::info!(
            winner = result.winner().name(),
            moves = self.total_moves(),
            captures = self.total_captures,
            "Game over"
        );
    }

    /// What the AI needs to decide its next move, or None when it is not the
    /// AI's turn.
    pub fn ai_request(&self) -> Option<AiRequest> {
        if self.is_over() || self.current_player != AI_COLOR {
            return None;
        }
        Some(AiRequest {
            board: self.board,
            side: self.current_player,
            difficulty: self.difficulty,
            chain_square: self.chain_square,
        })
    }

    /// Apply a move computed outside the session (e.g. by an async task).
    /// Returns None and changes nothing if the move no longer fits the
    /// position, such as after a new game was started.
    pub fn apply_ai_move(&mut self, mv: &Move) -> Option<MoveOutcome> {
        let request = self.ai_request()?;
        let legal = match request.chain_square {
            Some(square) => legal_moves(square, &self.board).moves,
            None => side_moves(request.side, &self.board),
        };
        if !legal.contains(mv) {
            tracing::warn!(%mv, "Discarding stale AI move");
            return None;
        }

        let outcome = self.apply_move(mv);
        if !outcome.continues_chain {
            self.ai_thinking = false;
        }
        self.ai_think_ticks = 0;
        self.ai_pending_move = None;
        Some(outcome)
    }

    /// Process AI thinking tick, returns true if AI made a move
    pub fn process_ai_thinking<R: Rng>(&mut self, rng: &mut R) -> bool {
        if !self.ai_thinking {
            return false;
        }

        self.ai_think_ticks += 1;

        // Compute AI move on first tick
        if self.ai_pending_move.is_none() {
            self.ai_pending_move = self.ai_request().and_then(|request| request.choose(rng));
            if self.ai_pending_move.is_none() {
                self.ai_thinking = false;
                self.check_win_condition();
                return false;
            }
        }

        // Apply move after delay
        if self.ai_think_ticks >= self.ai_think_target {
            if let Some(mv) = self.ai_pending_move.take() {
                let outcome = self.apply_move(&mv);

                // Keep thinking for the next leg of a capture chain
                if outcome.continues_chain {
                    self.ai_think_ticks = 0;
                    return true;
                }
            }

            self.ai_thinking = false;
            self.ai_think_ticks = 0;
            return true;
        }

        false
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            current_player: self.current_player,
            difficulty: self.difficulty,
            selected: self.selected,
            highlighted: self.highlighted_squares(),
            must_jump: self.must_jump,
            ai_thinking: self.ai_thinking,
            game_over: self.is_over(),
            result: self.game_result,
            move_history: self.move_history.clone(),
            red_pieces: self.pieces_remaining(Color::Red),
            black_pieces: self.pieces_remaining(Color::Black),
            total_moves: self.total_moves(),
            total_captures: self.total_captures,
        }
    }
}
