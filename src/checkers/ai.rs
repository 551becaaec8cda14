//! Computer opponent: static evaluation, shallow lookahead and move choice.
//!
//! Scoring is deterministic. Randomness only enters in [`choose_move`], through
//! the caller's RNG, as a uniform pick on Easy and a small tie-breaking jitter
//! on Normal and Hard.

use super::movegen::{apply_to_board, legal_moves, side_moves, AppliedMove};
use super::types::{Board, Color, Difficulty, Move, Square};
use rand::seq::SliceRandom;
use rand::Rng;

const MAN_VALUE: f64 = 3.0;
const KING_VALUE: f64 = 5.0;
const CAPTURE_BONUS: f64 = 15.0;
const PROMOTION_BONUS: f64 = 10.0;
/// Per row advanced from the home row (men only)
const ADVANCE_WEIGHT: f64 = 0.5;
/// Per step closer to the centre than the farthest corner
const CENTER_WEIGHT: f64 = 0.3;
/// Awarded when the opponent is left without a reply
const WIN_BONUS: f64 = 100.0;
/// Opponent replies examined per node. These are the first ones from
/// `side_moves` (row-major by origin, chain prefixes included), not a sample.
pub const MAX_REPLIES: usize = 5;
/// Share of the opponent's best reply subtracted from a move's score
const REPLY_WEIGHT: f64 = 0.7;
/// Upper bound of the random perturbation added before comparing scores
const JITTER: f64 = 0.1;

/// Everything the AI needs to pick a move, detached from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiRequest {
    pub board: Board,
    pub side: Color,
    pub difficulty: Difficulty,
    /// Piece that must continue a jump chain this turn
    pub chain_square: Option<Square>,
}

impl AiRequest {
    /// Pick a move for the request. Mid-chain only the chain piece's jumps
    /// are candidates.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<Move> {
        match self.chain_square {
            Some(square) => pick_move(
                legal_moves(square, &self.board).moves,
                self.side,
                &self.board,
                self.difficulty,
                rng,
            ),
            None => choose_move(self.side, &self.board, self.difficulty, rng),
        }
    }
}

/// Choose a move for `side`. Returns None when the side has no legal move.
pub fn choose_move<R: Rng>(
    side: Color,
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    pick_move(side_moves(side, board), side, board, difficulty, rng)
}

/// Choose among `candidates` (all legal for `side` on `board`).
pub fn pick_move<R: Rng>(
    candidates: Vec<Move>,
    side: Color,
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    if candidates.is_empty() {
        return None;
    }

    if difficulty == Difficulty::Easy {
        let captures: Vec<&Move> = candidates.iter().filter(|m| m.is_jump()).collect();
        let chosen = if captures.is_empty() {
            candidates.choose(rng)
        } else {
            captures.choose(rng).copied()
        };
        return chosen.cloned();
    }

    let depth = difficulty.search_depth();
    let mut best: Option<(f64, &Move)> = None;
    for mv in &candidates {
        let score = score_move(board, mv, side, depth) + rng.gen::<f64>() * JITTER;
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, mv));
        }
    }

    let (score, mv) = best?;
    tracing::debug!(%mv, score, depth, "AI picked move");
    Some(mv.clone())
}

/// Score `mv` for `side`: static evaluation of the resulting position minus a
/// share of the opponent's best reply, `depth` plies deep.
pub fn score_move(board: &Board, mv: &Move, side: Color, depth: u8) -> f64 {
    let Some((after, applied)) = apply_to_board(board, mv) else {
        return f64::NEG_INFINITY;
    };

    let mut score = evaluate(&after, mv, &applied, side);
    if depth == 0 {
        return score;
    }

    let opponent = side.opponent();
    let replies = side_moves(opponent, &after);
    if replies.is_empty() {
        return score + WIN_BONUS;
    }

    let best_reply = replies
        .iter()
        .take(MAX_REPLIES)
        .map(|reply| score_move(&after, reply, opponent, depth - 1))
        .fold(f64::NEG_INFINITY, f64::max);
    score -= REPLY_WEIGHT * best_reply;
    score
}

/// Static score of `board` (the position after `mv`) from `side`'s view.
pub fn evaluate(board: &Board, mv: &Move, applied: &AppliedMove, side: Color) -> f64 {
    let mut score = material(board, side) - material(board, side.opponent());

    if mv.is_jump() {
        score += CAPTURE_BONUS;
    }
    if applied.promoted {
        score += PROMOTION_BONUS;
    }
    if !applied.piece.king {
        let advanced = (mv.to.row as i16 - side.home_row() as i16).abs();
        score += ADVANCE_WEIGHT * advanced as f64;
    }
    score += CENTER_WEIGHT * (7.0 - center_distance(mv.to));

    score
}

fn material(board: &Board, color: Color) -> f64 {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .map(|(_, piece)| if piece.king { KING_VALUE } else { MAN_VALUE })
        .sum()
}

/// Manhattan distance from the board centre (3.5, 3.5); 1.0 to 7.0.
fn center_distance(square: Square) -> f64 {
    (square.row as f64 - 3.5).abs() + (square.col as f64 - 3.5).abs()
}
