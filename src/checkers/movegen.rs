//! Legal move generation: simple moves, jump chains and mandatory capture.

use super::types::{Board, Color, JumpLeg, Move, Piece, Square};
use std::collections::HashSet;

/// Moves available to a single piece.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegalMoves {
    pub moves: Vec<Move>,
    /// True when the piece can capture; `moves` then holds jumps only
    pub must_jump: bool,
}

/// Summary of a move played on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The moving piece after the move (crowned if promoted)
    pub piece: Piece,
    pub captured: usize,
    pub promoted: bool,
}

/// Get the legal moves of the piece on `square`.
///
/// If the piece has any jump, only jumps are returned. Every landing square of
/// a jump sequence is a separate move; later landings carry the earlier legs
/// in `chain`. Empty squares yield no moves.
pub fn legal_moves(square: Square, board: &Board) -> LegalMoves {
    let Some(piece) = board.get(square) else {
        return LegalMoves::default();
    };

    let jumps = jump_moves(square, piece, board);
    if !jumps.is_empty() {
        return LegalMoves {
            moves: jumps,
            must_jump: true,
        };
    }

    LegalMoves {
        moves: simple_moves(square, piece, board),
        must_jump: false,
    }
}

/// Get the moves the piece on `square` may play this turn, honouring the
/// side-wide capture rule: a piece without a jump gets nothing while any
/// other piece of its color can jump.
pub fn selectable_moves(square: Square, board: &Board) -> Vec<Move> {
    let Some(piece) = board.get(square) else {
        return Vec::new();
    };

    let legal = legal_moves(square, board);
    if !legal.must_jump && side_has_jump(piece.color, board) {
        return Vec::new();
    }
    legal.moves
}

/// All legal moves for `color`. Jumps only, if any piece can jump.
pub fn side_moves(color: Color, board: &Board) -> Vec<Move> {
    let mut jumps = Vec::new();
    let mut simple = Vec::new();

    for square in board.squares_of(color) {
        let legal = legal_moves(square, board);
        if legal.must_jump {
            jumps.extend(legal.moves);
        } else if jumps.is_empty() {
            simple.extend(legal.moves);
        }
    }

    if jumps.is_empty() {
        simple
    } else {
        jumps
    }
}

/// Whether any piece of `color` has a jump.
pub fn side_has_jump(color: Color, board: &Board) -> bool {
    board
        .squares_of(color)
        .any(|square| piece_has_jump(square, board))
}

/// Whether `color` has at least one legal move of either kind.
pub fn has_any_move(color: Color, board: &Board) -> bool {
    board.squares_of(color).any(|square| {
        piece_has_jump(square, board) || piece_has_step(square, board)
    })
}

/// Whether the piece on `square` has at least one single jump.
pub fn piece_has_jump(square: Square, board: &Board) -> bool {
    let Some(piece) = board.get(square) else {
        return false;
    };
    piece
        .directions()
        .iter()
        .any(|&(dr, dc)| single_jump(square, piece, board, dr, dc).is_some())
}

fn piece_has_step(square: Square, board: &Board) -> bool {
    let Some(piece) = board.get(square) else {
        return false;
    };
    piece.directions().iter().any(|&(dr, dc)| {
        square
            .offset(dr, dc, 1)
            .is_some_and(|to| board.is_empty_at(to))
    })
}

/// Non-capturing moves to empty adjacent diagonals.
fn simple_moves(from: Square, piece: Piece, board: &Board) -> Vec<Move> {
    piece
        .directions()
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc, 1))
        .filter(|&to| board.is_empty_at(to))
        .map(|to| Move::simple(from, to))
        .collect()
}

/// The (jumped, landing) squares of a single jump in one direction.
fn single_jump(
    at: Square,
    piece: Piece,
    board: &Board,
    dr: i8,
    dc: i8,
) -> Option<(Square, Square)> {
    let over = at.offset(dr, dc, 1)?;
    let landing = at.offset(dr, dc, 2)?;
    let victim = board.get(over)?;
    if victim.color != piece.color && board.is_empty_at(landing) {
        Some((over, landing))
    } else {
        None
    }
}

/// All jump sequences of `piece` starting at `from`.
fn jump_moves(from: Square, piece: Piece, board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut chain = Vec::new();
    let mut visited = HashSet::from([from]);
    explore_jumps(
        from,
        from,
        piece,
        board,
        &mut chain,
        &mut visited,
        &mut moves,
    );
    moves
}

/// Depth-first jump search. Each level works on its own board copy with the
/// captured piece removed and the mover relocated (and crowned on its far row).
/// `visited` holds the landing squares of the current path.
fn explore_jumps(
    origin: Square,
    at: Square,
    piece: Piece,
    board: &Board,
    chain: &mut Vec<JumpLeg>,
    visited: &mut HashSet<Square>,
    out: &mut Vec<Move>,
) {
    for &(dr, dc) in piece.directions() {
        let Some((over, landing)) = single_jump(at, piece, board, dr, dc) else {
            continue;
        };
        if visited.contains(&landing) {
            continue;
        }

        out.push(Move::jump(origin, landing, over, chain.clone()));

        let landed = if piece.promotes_at(landing) {
            Piece::crowned(piece.color)
        } else {
            piece
        };
        let mut next = *board;
        next.set(over, None);
        next.set(at, None);
        next.set(landing, Some(landed));

        visited.insert(landing);
        chain.push(JumpLeg {
            to: landing,
            jumped: over,
        });
        explore_jumps(origin, landing, landed, &next, chain, visited, out);
        chain.pop();
        visited.remove(&landing);
    }
}

/// Play `mv` on a copy of `board`: relocate the piece, remove every captured
/// piece and crown it on any landing on its far row.
/// Returns None if there is no piece on `mv.from`.
pub fn apply_to_board(board: &Board, mv: &Move) -> Option<(Board, AppliedMove)> {
    let mut next = *board;
    let mut piece = next.take(mv.from)?;
    let mut captured = 0;
    let mut promoted = false;

    for leg in mv.legs() {
        if next.take(leg.jumped).is_some() {
            captured += 1;
        }
        if piece.promotes_at(leg.to) {
            piece.king = true;
            promoted = true;
        }
    }
    if piece.promotes_at(mv.to) {
        piece.king = true;
        promoted = true;
    }
    next.set(mv.to, Some(piece));

    Some((
        next,
        AppliedMove {
            piece,
            captured,
            promoted,
        },
    ))
}
