//! End-to-end checkers behavior through the public API.

use checkers::checkers::{
    legal_moves, side_moves, AiRequest, Board, CheckersGame, CheckersResult, Color, Difficulty,
    JumpLeg, Move, NextActor, Piece, Square, TurnPhase, PIECES_PER_SIDE,
};
use checkers::CheckersError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

fn red(row: u8, col: u8) -> (Square, Piece) {
    (sq(row, col), Piece::man(Color::Red))
}

fn black(row: u8, col: u8) -> (Square, Piece) {
    (sq(row, col), Piece::man(Color::Black))
}

fn assert_board_invariants(board: &Board) {
    assert!(board.count(Color::Red) <= PIECES_PER_SIDE);
    assert!(board.count(Color::Black) <= PIECES_PER_SIDE);
    for (square, piece) in board.pieces() {
        assert!(square.is_dark(), "{:?} piece on light square {}", piece, square);
        // A man never stands on its own promotion row
        if !piece.king {
            assert_ne!(square.row, piece.color.promotion_row());
        }
    }
}

/// Play both sides with the AI until the game ends or `max_moves` pass,
/// checking invariants after every move.
fn self_play(seed: u64, difficulty: Difficulty, max_moves: usize) -> CheckersGame {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut game = CheckersGame::new(difficulty);

    for _ in 0..max_moves {
        if game.is_over() {
            break;
        }

        let request = AiRequest {
            board: game.board,
            side: game.current_player,
            difficulty,
            chain_square: game.chain_square,
        };
        let mv = request
            .choose(&mut rng)
            .expect("a side that has not lost has a move");

        let mover = game.current_player;
        let side_had_jump = side_moves(mover, &game.board).iter().any(|m| m.is_jump());
        let opponent_before = game.board.count(mover.opponent());
        let mover_before = game.board.count(mover);

        let outcome = game.apply_move(&mv);

        assert_eq!(side_had_jump, mv.is_jump(), "capture skipped: {}", mv);
        assert_eq!(
            opponent_before - game.board.count(mover.opponent()),
            mv.capture_count()
        );
        assert_eq!(mover_before, game.board.count(mover));
        if outcome.continues_chain {
            assert_eq!(game.current_player, mover);
            assert_eq!(game.chain_square, Some(mv.to));
        } else if !game.is_over() {
            assert_eq!(game.current_player, mover.opponent());
        }
        assert_board_invariants(&game.board);
    }

    game
}

// ============ Move generation scenarios ============
// The jump scenarios are laid out on dark squares, so they read as the
// column mirror (col -> 7 - col) of the textbook (3,3)x(2,2) diagrams.

#[test]
fn test_corner_piece_single_forward_move() {
    let board = Board::new();
    let legal = legal_moves(sq(5, 0), &board);

    assert!(!legal.must_jump);
    assert_eq!(legal.moves, vec![Move::simple(sq(5, 0), sq(4, 1))]);
}

#[test]
fn test_single_jump_scenario() {
    let board = Board::with_pieces(&[red(3, 4), black(2, 5)]).unwrap();
    let legal = legal_moves(sq(3, 4), &board);

    assert!(legal.must_jump);
    assert_eq!(legal.moves.len(), 1);
    assert_eq!(legal.moves[0].to, sq(1, 6));
    assert_eq!(legal.moves[0].jumped, Some(sq(2, 5)));
    assert!(legal.moves[0].chain.is_empty());
}

#[test]
fn test_double_jump_scenario() {
    let board = Board::with_pieces(&[red(5, 2), black(4, 3), black(2, 5)]).unwrap();
    let legal = legal_moves(sq(5, 2), &board);

    assert!(legal.must_jump);
    let full = legal
        .moves
        .iter()
        .find(|mv| mv.to == sq(1, 6))
        .expect("double jump reaches (1,6)");
    assert_eq!(full.jumped, Some(sq(2, 5)));
    assert_eq!(
        full.chain,
        vec![JumpLeg {
            to: sq(3, 4),
            jumped: sq(4, 3)
        }]
    );
    assert_eq!(full.captured(), vec![sq(4, 3), sq(2, 5)]);
}

#[test]
fn test_jumps_mandatory_side_wide() {
    let board = Board::with_pieces(&[red(5, 2), black(4, 3), red(6, 7), black(0, 1)]).unwrap();
    let moves = side_moves(Color::Red, &board);

    assert!(!moves.is_empty());
    assert!(moves.iter().all(|mv| mv.is_jump()));
}

// ============ Session play ============

#[test]
fn test_double_jump_ends_game_when_last_pieces_taken() {
    let board = Board::with_pieces(&[red(5, 2), black(4, 3), black(2, 5)]).unwrap();
    let mut game = CheckersGame::with_board(Difficulty::Normal, board, Color::Red);

    let first = game.try_move(sq(5, 2), sq(3, 4)).unwrap();
    assert!(first.continues_chain);
    assert_eq!(game.phase(), TurnPhase::AwaitingMultiJumpContinuation);

    // Only the chain piece may move now
    assert!(matches!(
        game.try_move(sq(5, 2), sq(4, 3)),
        Err(CheckersError::IllegalMove { .. })
    ));

    let second = game.try_move(sq(3, 4), sq(1, 6)).unwrap();
    assert_eq!(second.next, NextActor::Finished(CheckersResult::RedWins));
    assert_eq!(game.pieces_remaining(Color::Black), 0);
    assert_eq!(game.total_captures, 2);
}

#[test]
fn test_promotion_mid_chain_continues_as_king() {
    // Red (2,1) jumps (1,2) to (0,3), is crowned, then jumps (1,4) backwards
    let board = Board::with_pieces(&[red(2, 1), black(1, 2), black(1, 4), black(5, 6)]).unwrap();
    let mut game = CheckersGame::with_board(Difficulty::Normal, board, Color::Red);

    let outcome = game.try_move(sq(2, 1), sq(0, 3)).unwrap();
    assert!(outcome.was_promotion);
    assert!(outcome.continues_chain);
    assert_eq!(game.board.get(sq(0, 3)), Some(Piece::crowned(Color::Red)));

    let outcome = game.try_move(sq(0, 3), sq(2, 5)).unwrap();
    assert!(!outcome.continues_chain);
    assert_eq!(game.board.get(sq(2, 5)), Some(Piece::crowned(Color::Red)));
    assert_eq!(game.current_player, Color::Black);
}

#[test]
fn test_human_against_ai_turns_alternate() {
    let mut game = CheckersGame::new(Difficulty::Hard);
    game.ai_think_target = 2;
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..10 {
        if game.is_over() {
            break;
        }
        assert_eq!(game.current_player, Color::Red);

        // Human plays its first legal move, finishing any chain
        while game.current_player == Color::Red && !game.is_over() {
            let mv = match game.chain_square {
                Some(square) => legal_moves(square, &game.board).moves[0].clone(),
                None => side_moves(Color::Red, &game.board)[0].clone(),
            };
            game.try_move(mv.from, mv.to).unwrap();
        }

        let mut ticks = 0;
        while game.ai_thinking {
            game.process_ai_thinking(&mut rng);
            ticks += 1;
            assert!(ticks < 50, "AI turn did not finish");
        }
        assert_board_invariants(&game.board);
    }

    let red_moves = game
        .move_history
        .iter()
        .filter(|r| r.player == Color::Red)
        .count();
    assert!(red_moves >= 1);
    assert!(game.move_history.iter().any(|r| r.player == Color::Black));
}

// ============ Terminal detection ============

#[test]
fn test_terminal_detection_both_colors() {
    let board = Board::with_pieces(&[red(3, 4), black(2, 5)]).unwrap();
    let mut game = CheckersGame::with_board(Difficulty::Normal, board, Color::Red);
    game.try_move(sq(3, 4), sq(1, 6)).unwrap();
    assert_eq!(game.game_result, Some(CheckersResult::RedWins));

    // Black jumps the last red piece
    let board = Board::with_pieces(&[black(4, 3), red(5, 2)]).unwrap();
    let mut game = CheckersGame::with_board(Difficulty::Easy, board, Color::Black);
    game.ai_think_target = 1;
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert!(game.process_ai_thinking(&mut rng));
    assert_eq!(game.game_result, Some(CheckersResult::BlackWins));

    // Red to move with every piece blocked
    let board = Board::with_pieces(&[red(7, 0), black(6, 1), black(5, 2)]).unwrap();
    let game = CheckersGame::with_board(Difficulty::Normal, board, Color::Red);
    assert_eq!(game.game_result, Some(CheckersResult::BlackWins));
}

// ============ Self-play invariants ============

#[test]
fn test_random_self_play_keeps_invariants() {
    for seed in 0..20 {
        self_play(seed, Difficulty::Easy, 300);
    }
}

#[test]
fn test_scored_self_play_keeps_invariants() {
    for seed in 0..3 {
        self_play(seed, Difficulty::Normal, 200);
    }
}

#[test]
fn test_self_play_is_reproducible() {
    let first = self_play(77, Difficulty::Easy, 120);
    let second = self_play(77, Difficulty::Easy, 120);

    assert_eq!(first.board, second.board);
    assert_eq!(first.move_history, second.move_history);
}
