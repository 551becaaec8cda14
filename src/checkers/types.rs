//! Checkers data structures: pieces, squares, board, moves and session state.
//!
//! Board layout (row, col). Black starts at the top and moves down,
//! Red starts at the bottom and moves up:
//! ```text
//!     0 1 2 3 4 5 6 7
//!  0  . b . b . b . b
//!  1  b . b . b . b .
//!  2  . b . b . b . b
//!  3  . . . . . . . .
//!  4  . . . . . . . .
//!  5  r . r . r . r .
//!  6  . r . r . r . r
//!  7  r . r . r . r .
//! ```
//! The starting position uses dark squares (`(row + col)` odd) only, and
//! diagonal steps never change a square's color, so play stays on them.

use super::movegen::side_has_jump;
use crate::error::{CheckersError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of the board
pub const BOARD_SIZE: usize = 8;

/// Pieces each side starts with
pub const PIECES_PER_SIDE: usize = 12;

/// Side color. Red is the human side and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Row on which a man of this color is crowned.
    pub fn promotion_row(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Black => (BOARD_SIZE - 1) as u8,
        }
    }

    /// Back row this color starts from.
    pub fn home_row(self) -> u8 {
        self.opponent().promotion_row()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Black => "Black",
        }
    }
}

/// All four diagonal directions: (row_delta, col_delta)
const ALL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const RED_DIRECTIONS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];
const BLACK_DIRECTIONS: [(i8, i8); 2] = [(1, -1), (1, 1)];

/// A checkers piece. Kings move and jump in every diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    /// An uncrowned piece.
    pub fn man(color: Color) -> Self {
        Self { color, king: false }
    }

    pub fn crowned(color: Color) -> Self {
        Self { color, king: true }
    }

    /// Diagonal directions this piece may move or jump in.
    pub fn directions(&self) -> &'static [(i8, i8)] {
        if self.king {
            &ALL_DIRECTIONS
        } else {
            match self.color {
                Color::Red => &RED_DIRECTIONS,
                Color::Black => &BLACK_DIRECTIONS,
            }
        }
    }

    /// Whether landing on `square` crowns this piece.
    pub fn promotes_at(&self, square: Square) -> bool {
        !self.king && square.row == self.color.promotion_row()
    }
}

/// A board coordinate, `0..8` on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The square `steps` diagonal steps away, if it is on the board.
    pub fn offset(self, dr: i8, dc: i8, steps: i8) -> Option<Square> {
        let row = self.row as i16 + dr as i16 * steps as i16;
        let col = self.col as i16 + dc as i16 * steps as i16;
        let size = BOARD_SIZE as i16;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    pub fn in_bounds(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// The 8x8 board. A plain value: search code copies it instead of undoing moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// The standard starting position: Black on rows 0-2, Red on rows 5-7.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE as u8 {
            let color = match row {
                0..=2 => Color::Black,
                5..=7 => Color::Red,
                _ => continue,
            };
            for col in 0..BOARD_SIZE as u8 {
                let square = Square::new(row, col);
                if square.is_dark() {
                    board.set(square, Some(Piece::man(color)));
                }
            }
        }
        board
    }

    /// Build a board from explicit placements (custom positions, tests).
    /// Every square must be a dark square on the board.
    pub fn with_pieces(pieces: &[(Square, Piece)]) -> Result<Self> {
        let mut board = Self::empty();
        for &(square, piece) in pieces {
            if !square.in_bounds() || !square.is_dark() {
                return Err(CheckersError::InvalidSquare { square });
            }
            board.set(square, Some(piece));
        }
        Ok(board)
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        if !square.in_bounds() {
            return None;
        }
        self.cells[square.row as usize][square.col as usize]
    }

    /// Callers pass on-board dark squares only.
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row as usize][square.col as usize] = piece;
    }

    /// Remove and return the piece on `square`.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.get(square)?;
        self.set(square, None);
        Some(piece)
    }

    pub fn is_empty_at(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// All occupied squares with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Square::new(row as u8, col as u8), piece))
            })
        })
    }

    /// Squares holding a piece of `color`, row-major.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, piece)| piece.color == color)
            .map(|(square, _)| square)
    }

    pub fn count(&self, color: Color) -> usize {
        self.squares_of(color).count()
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.color == color && piece.king)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// One leg of a jump: where the piece landed and whom it jumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpLeg {
    pub to: Square,
    pub jumped: Square,
}

/// A move for one piece.
///
/// For a multi-jump, `to`/`jumped` describe the final leg and `chain` holds
/// the earlier legs in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Captured square of the final leg (None for a simple move)
    pub jumped: Option<Square>,
    /// Earlier legs of a multi-jump
    pub chain: Vec<JumpLeg>,
}

impl Move {
    pub fn simple(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            jumped: None,
            chain: Vec::new(),
        }
    }

    pub fn jump(from: Square, to: Square, jumped: Square, chain: Vec<JumpLeg>) -> Self {
        Self {
            from,
            to,
            jumped: Some(jumped),
            chain,
        }
    }

    pub fn is_jump(&self) -> bool {
        self.jumped.is_some()
    }

    /// Every jump leg in order, final leg included.
    pub fn legs(&self) -> Vec<JumpLeg> {
        let mut legs = self.chain.clone();
        if let Some(jumped) = self.jumped {
            legs.push(JumpLeg {
                to: self.to,
                jumped,
            });
        }
        legs
    }

    /// Squares of every captured piece, in capture order.
    pub fn captured(&self) -> Vec<Square> {
        self.legs().into_iter().map(|leg| leg.jumped).collect()
    }

    pub fn capture_count(&self) -> usize {
        self.chain.len() + usize::from(self.jumped.is_some())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)?;
        if self.is_jump() {
            for leg in self.legs() {
                write!(f, "x{}", leg.to)?;
            }
            Ok(())
        } else {
            write!(f, "-{}", self.to)
        }
    }
}

/// AI difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Random moves, preferring captures
    Easy,
    /// Scored moves, one reply of lookahead
    #[default]
    Normal,
    /// Scored moves, two plies of lookahead
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Parse a case-insensitive difficulty name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }

    /// Lookahead depth used when scoring moves (Easy does not score).
    pub fn search_depth(&self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Normal => 1,
            Self::Hard => 2,
        }
    }
}

/// Result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckersResult {
    RedWins,
    BlackWins,
}

impl CheckersResult {
    pub fn won_by(color: Color) -> Self {
        match color {
            Color::Red => Self::RedWins,
            Color::Black => Self::BlackWins,
        }
    }

    pub fn winner(&self) -> Color {
        match self {
            Self::RedWins => Color::Red,
            Self::BlackWins => Color::Black,
        }
    }
}

/// Where the turn state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnPhase {
    AwaitingHumanSelection,
    AwaitingHumanDestination,
    AwaitingMultiJumpContinuation,
    ComputerThinking,
    GameOver(CheckersResult),
}

/// One applied move in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub player: Color,
    pub from: Square,
    pub to: Square,
    pub captured: usize,
    pub promoted: bool,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.captured > 0 { "x" } else { "-" };
        write!(f, "{}: {}{}{}", self.player.name(), self.from, sep, self.to)?;
        if self.captured > 1 {
            write!(f, " ({} captured)", self.captured)?;
        }
        if self.promoted {
            write!(f, " K")?;
        }
        Ok(())
    }
}

/// Direction for cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Active checkers session (transient, not saved). Human plays Red.
#[derive(Debug, Clone)]
pub struct CheckersGame {
    pub board: Board,
    /// Whose turn it is
    pub current_player: Color,
    /// AI difficulty level
    pub difficulty: Difficulty,
    /// Render-surface cursor
    pub cursor: Square,
    /// Piece chosen by the human
    pub selected: Option<Square>,
    /// Legal moves of the selected piece (highlighted destinations)
    pub valid_moves: Vec<Move>,
    /// Whether the side to move is forced to capture
    pub must_jump: bool,
    /// Piece that must continue a jump chain before the turn passes
    pub chain_square: Option<Square>,
    /// Game result (None if game is ongoing)
    pub game_result: Option<CheckersResult>,
    /// Applied moves, oldest first
    pub move_history: Vec<MoveRecord>,
    pub total_captures: u32,
    /// Whether AI is currently thinking
    pub ai_thinking: bool,
    /// Ticks spent thinking
    pub ai_think_ticks: u32,
    /// Target ticks for AI "thinking" delay
    pub ai_think_target: u32,
    /// The move the AI has decided on (waiting to execute)
    pub ai_pending_move: Option<Move>,
    /// Last move made (for highlighting)
    pub last_move: Option<Move>,
}

/// Default AI pacing: 6 ticks of 100ms.
pub const DEFAULT_AI_THINK_TICKS: u32 = 6;

impl CheckersGame {
    /// Create a new game with the given difficulty
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_board(difficulty, Board::new(), Color::Red)
    }

    /// Create a game from a custom position.
    /// Black to move starts the AI thinking on the next tick. A side to move
    /// without pieces or moves has already lost.
    pub fn with_board(difficulty: Difficulty, board: Board, current_player: Color) -> Self {
        let mut game = Self {
            board,
            current_player,
            difficulty,
            cursor: Square::new(5, 0),
            selected: None,
            valid_moves: Vec::new(),
            must_jump: side_has_jump(current_player, &board),
            chain_square: None,
            game_result: None,
            move_history: Vec::new(),
            total_captures: 0,
            ai_thinking: current_player == Color::Black,
            ai_think_ticks: 0,
            ai_think_target: DEFAULT_AI_THINK_TICKS,
            ai_pending_move: None,
            last_move: None,
        };
        game.check_win_condition();
        game
    }

    /// Move the cursor one square, clamped to the board.
    pub fn move_cursor(&mut self, direction: CursorDirection) {
        let (dr, dc) = match direction {
            CursorDirection::Up => (-1, 0),
            CursorDirection::Down => (1, 0),
            CursorDirection::Left => (0, -1),
            CursorDirection::Right => (0, 1),
        };
        if let Some(square) = self.cursor.offset(dr, dc, 1) {
            self.cursor = square;
        }
    }

    /// Clear the current selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }

    pub fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    pub fn pieces_remaining(&self, color: Color) -> usize {
        self.board.count(color)
    }

    pub fn total_moves(&self) -> usize {
        self.move_history.len()
    }

    /// Current state of the turn state machine.
    pub fn phase(&self) -> TurnPhase {
        if let Some(result) = self.game_result {
            TurnPhase::GameOver(result)
        } else if self.current_player == Color::Black {
            TurnPhase::ComputerThinking
        } else if self.chain_square.is_some() {
            TurnPhase::AwaitingMultiJumpContinuation
        } else if self.selected.is_some() {
            TurnPhase::AwaitingHumanDestination
        } else {
            TurnPhase::AwaitingHumanSelection
        }
    }

    /// Destinations of the selected piece, each once, in move order.
    /// Two jump paths can land on the same square.
    pub fn highlighted_squares(&self) -> Vec<Square> {
        let mut squares: Vec<Square> = Vec::with_capacity(self.valid_moves.len());
        for mv in &self.valid_moves {
            if !squares.contains(&mv.to) {
                squares.push(mv.to);
            }
        }
        squares
    }
}
