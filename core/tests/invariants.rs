//! Property-based tests for the Move Applier/Unapplier pair and the
//! incremental evaluation, using the same `proptest` harness the closest
//! sibling chess engine in the retrieval pack uses for its own make/unmake
//! round-trip tests. This crate has no `rand` dependency to draw on, so
//! "random" move selection here comes from proptest-generated `u32` seeds
//! indexing into the pseudo-legal move list, rather than from an RNG.

use eniac_chess_core::{
    apply, load_fen, move_score_delta, unapply, ApplyError, Board, Color, GeneratorCursor, Move,
    Undo,
};
use proptest::prelude::*;

const OPENING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The `seed`-th pseudo-legal move for `side` on `board`, wrapping around the
/// move count so any `u32` seed picks some move whenever one exists.
fn nth_pseudo_legal_move(board: &Board, side: Color, seed: u32) -> Option<Move> {
    let mut moves = Vec::new();
    let mut cursor = GeneratorCursor::new();
    while let Some(mv) = cursor.next(board, side) {
        moves.push(mv);
    }
    if moves.is_empty() {
        return None;
    }
    Some(moves[seed as usize % moves.len()])
}

proptest! {
    /// Applying and then unapplying a line of pseudo-legal moves, in strict
    /// stack order, always restores the board cell for cell — including
    /// through a king capture, which this generator happily produces since
    /// it never filters for check.
    #[test]
    fn apply_unapply_round_trips_over_random_lines(seeds in prop::collection::vec(any::<u32>(), 1..8)) {
        let mut board = load_fen(OPENING_FEN).unwrap();
        let before = *board.memory();
        let mut undo_stack: Vec<Undo> = Vec::new();

        for seed in seeds {
            let side = board.side_to_move();
            let Some(mv) = nth_pseudo_legal_move(&board, side, seed) else {
                break;
            };
            match apply(&mut board, mv) {
                Ok(undo) => undo_stack.push(undo),
                // A long-enough random line can walk the running score past
                // 0..=99 (e.g. several king captures in a row); that's a
                // legitimate stopping point for this test, not a failure.
                Err(ApplyError::Memory(_)) => break,
                Err(other) => prop_assert!(false, "generator produced a move apply() rejected: {other}"),
            }
        }

        while let Some(undo) = undo_stack.pop() {
            unapply(&mut board, &undo).unwrap();
        }

        prop_assert_eq!(*board.memory(), before);
    }

    /// Each step of a random line changes the running score by exactly the
    /// delta [`move_score_delta`] predicts from the pre-move board, the
    /// same quantity the Move Applier folds in during [`apply`].
    #[test]
    fn score_delta_matches_move_score_delta(seeds in prop::collection::vec(any::<u32>(), 1..8)) {
        let mut board = load_fen(OPENING_FEN).unwrap();

        for seed in seeds {
            let side = board.side_to_move();
            let Some(mv) = nth_pseudo_legal_move(&board, side, seed) else {
                break;
            };
            let captured_kind = board.square_contents(mv.to).kind();
            let expected_delta = move_score_delta(mv.to, side, captured_kind);
            let score_before = i32::from(board.memory().score());

            match apply(&mut board, mv) {
                Ok(_undo) => {
                    let score_after = i32::from(board.memory().score());
                    prop_assert_eq!(score_after - score_before, expected_delta);
                }
                Err(ApplyError::Memory(_)) => break,
                Err(other) => prop_assert!(false, "generator produced a move apply() rejected: {other}"),
            }
        }
    }
}
