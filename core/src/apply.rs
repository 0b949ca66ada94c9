/*
  Fiddler, a UCI-compatible chess engine.
  Copyright (C) 2022 The Fiddler Authors (see AUTHORS.md file)

  Fiddler is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Fiddler is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! The Move Applier and its strict inverse, the Unapplier.
//!
//! Both operate in place on a [`Board`]: there is no board-cloning path
//! anywhere in this crate, because cloning on every candidate move is
//! exactly the allocation the 75-word design forbids. Applying a move
//! returns an [`Undo`] token; unapplying consumes one. A caller that applies
//! N moves and unapplies them in reverse order is guaranteed to end up with
//! a board identical, cell for cell, to the one it started with.

use crate::board::Board;
use crate::color::Color;
use crate::eval::move_score_delta;
use crate::memory::{MemoryError, CAPTURED_PIECE, FROM_SQ, PROMO, SIDE_AND_FROM_PIECE, TO_SQ};
use crate::moves::Move;
use crate::piece::{packed_code, PieceKind, SquareContents, TrackedSlot};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ApplyError {
    #[error("no piece belonging to the side to move stands on the move's from-square")]
    NoMoverAtFromSquare,
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Everything the Unapplier needs to undo one [`Move`], captured at the
/// moment it was applied. Callers are expected to thread these through the
/// same stack discipline the search driver uses for its own bookkeeping:
/// apply, recurse, unapply with the token you just got back.
pub struct Undo {
    mv: Move,
    mover: Color,
    from_kind: PieceKind,
    captured: SquareContents,
    from_slot: Option<TrackedSlot>,
    captured_slot: Option<TrackedSlot>,
    score_delta: i32,
    prev_scratch: [u8; 5],
}

impl Undo {
    /// The move this token undoes.
    #[must_use]
    pub const fn mv(&self) -> Move {
        self.mv
    }

    /// The kind of piece captured by the move this token undoes, or `None`
    /// if the destination square was empty. The Search Driver consults this
    /// to implement king-capture pruning: a `Some(PieceKind::King)` here
    /// means the branch just taken is terminal and must not be recursed
    /// into further (spec.md §4.5's sole mechanism for enforcing check
    /// legality).
    #[must_use]
    pub fn captured_kind(&self) -> Option<PieceKind> {
        self.captured.kind()
    }
}

/// Apply `mv` for the side currently to move, mutating `board` and
/// returning the token needed to undo it.
///
/// # Errors
///
/// Returns [`ApplyError::NoMoverAtFromSquare`] if the side to move has no
/// piece on `mv.from` — this can only happen if the caller passes a move
/// that the generator didn't produce from this exact board. Returns
/// [`ApplyError::Memory`] if the resulting score would fall outside
/// `0..=99`; this engine treats that as fatal rather than saturating.
pub fn apply(board: &mut Board, mv: Move) -> Result<Undo, ApplyError> {
    let mover = board.side_to_move();
    let from_contents = board.square_contents(mv.from);
    let from_kind = match from_contents {
        SquareContents::Piece(c, k) if c == mover => k,
        _ => return Err(ApplyError::NoMoverAtFromSquare),
    };
    let captured = board.square_contents(mv.to);
    let captured_kind = captured.kind();

    let from_slot = tracked_slot_of(board, mover, from_kind, mv.from.yx());
    let captured_slot = match captured {
        SquareContents::Piece(c, k) => tracked_slot_of(board, c, k, mv.to.yx()),
        _ => None,
    };

    let prev_scratch = [
        board.memory().get_unchecked(SIDE_AND_FROM_PIECE),
        board.memory().get_unchecked(CAPTURED_PIECE),
        board.memory().get_unchecked(FROM_SQ),
        board.memory().get_unchecked(TO_SQ),
        board.memory().get_unchecked(PROMO),
    ];

    let new_kind = if mv.promotion { PieceKind::Queen } else { from_kind };
    board.write_square(mv.to, SquareContents::Piece(mover, new_kind))?;
    board.write_square(mv.from, SquareContents::Empty)?;

    if let Some(slot) = from_slot {
        board.set_tracked_slot(slot, mv.to.yx());
    }
    if let Some(slot) = captured_slot {
        board.set_tracked_slot(slot, 0);
    }

    let score_delta = move_score_delta(mv.to, mover, captured_kind);
    board.memory_mut().apply_score_delta(score_delta)?;

    let next_side = !mover;
    let mem = board.memory_mut();
    mem.set_unchecked(
        SIDE_AND_FROM_PIECE,
        next_side.to_digit() * 10 + packed_code(from_contents),
    );
    mem.set_unchecked(CAPTURED_PIECE, packed_code(captured));
    mem.set_unchecked(FROM_SQ, mv.from.yx());
    mem.set_unchecked(TO_SQ, mv.to.yx());
    mem.set_unchecked(PROMO, u8::from(mv.promotion));

    Ok(Undo {
        mv,
        mover,
        from_kind,
        captured,
        from_slot,
        captured_slot,
        score_delta,
        prev_scratch,
    })
}

/// Undo exactly the move `undo` recorded, restoring `board` to the state it
/// was in before [`apply`] ran.
///
/// Restoration order matters: the from-square is rewritten from
/// `from_kind` *before* the to-square is rewritten from the captured
/// contents, so a promotion-capture unwinds its promotion before its
/// capture rather than the other way around.
///
/// # Errors
///
/// Returns [`ApplyError::Memory`] only if the underlying memory writes are
/// out of range, which cannot happen for a token produced by [`apply`] on
/// this same board.
pub fn unapply(board: &mut Board, undo: &Undo) -> Result<(), ApplyError> {
    board.write_square(undo.mv.from, SquareContents::Piece(undo.mover, undo.from_kind))?;
    board.write_square(undo.mv.to, undo.captured)?;

    if let Some(slot) = undo.from_slot {
        board.set_tracked_slot(slot, undo.mv.from.yx());
    }
    if let Some(slot) = undo.captured_slot {
        board.set_tracked_slot(slot, undo.mv.to.yx());
    }

    board.set_side_to_move(undo.mover);
    board.memory_mut().apply_score_delta(-undo.score_delta)?;

    let mem = board.memory_mut();
    mem.set_unchecked(SIDE_AND_FROM_PIECE, undo.prev_scratch[0]);
    mem.set_unchecked(CAPTURED_PIECE, undo.prev_scratch[1]);
    mem.set_unchecked(FROM_SQ, undo.prev_scratch[2]);
    mem.set_unchecked(TO_SQ, undo.prev_scratch[3]);
    mem.set_unchecked(PROMO, undo.prev_scratch[4]);

    Ok(())
}

fn tracked_slot_of(board: &Board, color: Color, kind: PieceKind, yx: u8) -> Option<TrackedSlot> {
    match (color, kind) {
        (Color::White, PieceKind::King) => Some(TrackedSlot::WhiteKing),
        (Color::Black, PieceKind::King) => Some(TrackedSlot::BlackKing),
        (Color::White, PieceKind::Rook) => {
            if board.tracked_slot(TrackedSlot::WhiteRook1) == yx {
                Some(TrackedSlot::WhiteRook1)
            } else if board.tracked_slot(TrackedSlot::WhiteRook2) == yx {
                Some(TrackedSlot::WhiteRook2)
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;
    use crate::test_support::standard_opening_board;

    #[test]
    fn apply_unapply_round_trips_exactly() {
        let mut board = standard_opening_board();
        let before = *board.memory();
        let mv = Move::new(
            Square::from_yx(25).unwrap(),
            Square::from_yx(45).unwrap(),
            false,
        );
        let undo = apply(&mut board, mv).unwrap();
        assert_ne!(*board.memory(), before);
        unapply(&mut board, &undo).unwrap();
        assert_eq!(*board.memory(), before);
    }

    #[test]
    fn capture_updates_score_by_expected_delta() {
        let mut board = Board::new(crate::memory::Memory::new());
        board
            .write_square(
                Square::from_yx(25).unwrap(),
                SquareContents::Piece(Color::White, PieceKind::Pawn),
            )
            .unwrap();
        board
            .write_square(
                Square::from_yx(36).unwrap(),
                SquareContents::Piece(Color::Black, PieceKind::Pawn),
            )
            .unwrap();
        board
            .write_square(
                Square::from_yx(11).unwrap(),
                SquareContents::Piece(Color::White, PieceKind::King),
            )
            .unwrap();
        board.set_tracked_slot(TrackedSlot::WhiteKing, 11);
        board
            .write_square(
                Square::from_yx(81).unwrap(),
                SquareContents::Piece(Color::Black, PieceKind::King),
            )
            .unwrap();
        board.set_tracked_slot(TrackedSlot::BlackKing, 81);
        board.memory_mut().set(crate::memory::SCORE, 50).unwrap();

        let before = *board.memory();
        let mv = Move::new(Square::from_yx(25).unwrap(), Square::from_yx(36).unwrap(), false);
        let undo = apply(&mut board, mv).unwrap();
        assert_eq!(board.memory().score(), 54);
        unapply(&mut board, &undo).unwrap();
        assert_eq!(*board.memory(), before);
    }

    #[test]
    fn rook_capture_retires_its_tracker() {
        let mut board = Board::new(crate::memory::Memory::new());
        board
            .write_square(
                Square::from_yx(11).unwrap(),
                SquareContents::Piece(Color::White, PieceKind::Rook),
            )
            .unwrap();
        board.set_tracked_slot(TrackedSlot::WhiteRook1, 11);
        board
            .write_square(
                Square::from_yx(81).unwrap(),
                SquareContents::Piece(Color::Black, PieceKind::Rook),
            )
            .unwrap();
        board.set_side_to_move(Color::Black);

        let mv = Move::new(Square::from_yx(81).unwrap(), Square::from_yx(11).unwrap(), false);
        let undo = apply(&mut board, mv).unwrap();
        assert_eq!(board.tracked_slot(TrackedSlot::WhiteRook1), 0);
        unapply(&mut board, &undo).unwrap();
        assert_eq!(board.tracked_slot(TrackedSlot::WhiteRook1), 11);
    }
}
