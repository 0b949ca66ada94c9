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

//! The board: the packed-square read/write path and the piece trackers that
//! disambiguate code `1`.
//!
//! Every other module reaches the board only through [`Board::square_contents`]
//! and [`Board::write_square`] — the code-1 disambiguation (king vs. white
//! rook vs. untracked black rook) is resolved in exactly these two places and
//! nowhere else, per the design note in spec.md §9.

use crate::color::Color;
use crate::memory::{
    Memory, MemoryError, BEST_MOVE_FROM_SQ, BEST_MOVE_TO_SQ, BLACK_KING_SQ, BOARD_START,
    SIDE_AND_FROM_PIECE, WHITE_KING_SQ, WHITE_ROOK_1_SQ, WHITE_ROOK_2_SQ,
};
use crate::piece::{from_unambiguous_code, packed_code, PieceKind, SquareContents, TrackedSlot};
use crate::square::Square;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// A board: a [`Memory`] plus the read/write methods that understand its
/// packed layout. Holding the memory by value (it's a plain `[u8; 75]`
/// underneath) keeps this `Copy`, which the search driver relies on when it
/// needs to explore a line without disturbing a caller's board — though the
/// hot path always mutates in place via apply/unapply rather than cloning.
pub struct Board {
    memory: Memory,
}

impl Board {
    #[must_use]
    pub const fn new(memory: Memory) -> Board {
        Board { memory }
    }

    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        Color::from_digit(self.memory.get_unchecked(SIDE_AND_FROM_PIECE) / 10)
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        let low_digit = self.memory.get_unchecked(SIDE_AND_FROM_PIECE) % 10;
        self.memory
            .set_unchecked(SIDE_AND_FROM_PIECE, color.to_digit() * 10 + low_digit);
    }

    /// The raw packed code (`0..=9`) stored for `square`, without resolving
    /// the code-1 ambiguity. Two squares share one memory word; this picks
    /// out the right digit.
    fn raw_code(&self, square: Square) -> u8 {
        let index = square_index(square);
        let word = self.memory.get_unchecked(BOARD_START + index / 2);
        if index % 2 == 0 {
            word / 10
        } else {
            word % 10
        }
    }

    fn set_raw_code(&mut self, square: Square, code: u8) {
        debug_assert!(code <= 9);
        let index = square_index(square);
        let cell = BOARD_START + index / 2;
        let word = self.memory.get_unchecked(cell);
        let new_word = if index % 2 == 0 {
            code * 10 + word % 10
        } else {
            (word / 10) * 10 + code
        };
        self.memory.set_unchecked(cell, new_word);
    }

    /// Resolve whatever occupies `square` into its fully-disambiguated
    /// identity. This is the one place in the crate that interprets a
    /// packed code `1` by cross-referencing the king/rook tracker cells.
    #[must_use]
    pub fn square_contents(&self, square: Square) -> SquareContents {
        let code = self.raw_code(square);
        match code {
            0 => SquareContents::Empty,
            1 => {
                let yx = square.yx();
                if yx == self.memory.get_unchecked(WHITE_KING_SQ) {
                    SquareContents::Piece(Color::White, PieceKind::King)
                } else if yx == self.memory.get_unchecked(BLACK_KING_SQ) {
                    SquareContents::Piece(Color::Black, PieceKind::King)
                } else if yx == self.memory.get_unchecked(WHITE_ROOK_1_SQ)
                    || yx == self.memory.get_unchecked(WHITE_ROOK_2_SQ)
                {
                    SquareContents::Piece(Color::White, PieceKind::Rook)
                } else {
                    SquareContents::BlackRook
                }
            }
            c => {
                let (color, kind) =
                    from_unambiguous_code(c).expect("board code 2..=9 is always unambiguous");
                SquareContents::Piece(color, kind)
            }
        }
    }

    /// Write `contents` to `square`, updating whichever tracker cell the
    /// written piece requires. Writing `Empty` or a non-tracked piece leaves
    /// the tracker cells untouched; writing a king or white rook updates the
    /// matching cell to `square`. Moving a tracked piece is therefore two
    /// calls: clear its old square (which does *not* clear the tracker —
    /// callers must point the tracker slot elsewhere, or the move is not
    /// actually complete) and write the new one.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying memory write is out of range — this
    /// can't happen for any square constructed through [`Square`], so this
    /// is effectively infallible in practice; it's surfaced because
    /// [`Memory::set`] is fallible.
    pub fn write_square(&mut self, square: Square, contents: SquareContents) -> Result<(), MemoryError> {
        // King or white rook packs down to code 1 same as an untracked
        // black rook; the caller is responsible for also calling
        // `set_tracked_slot` so the ambiguity resolves correctly on the
        // next read.
        self.set_raw_code(square, packed_code(contents));
        Ok(())
    }

    /// Point a tracker slot at `square`. Must be called alongside
    /// [`Board::write_square`] whenever a king or white rook moves, is
    /// captured (point it off-board via a sentinel the generator will never
    /// produce, such as `0`), or is placed during position setup.
    pub fn set_tracked_slot(&mut self, slot: TrackedSlot, square_yx: u8) {
        let cell = match slot {
            TrackedSlot::WhiteKing => WHITE_KING_SQ,
            TrackedSlot::BlackKing => BLACK_KING_SQ,
            TrackedSlot::WhiteRook1 => WHITE_ROOK_1_SQ,
            TrackedSlot::WhiteRook2 => WHITE_ROOK_2_SQ,
        };
        self.memory.set_unchecked(cell, square_yx);
    }

    #[must_use]
    pub fn tracked_slot(&self, slot: TrackedSlot) -> u8 {
        let cell = match slot {
            TrackedSlot::WhiteKing => WHITE_KING_SQ,
            TrackedSlot::BlackKing => BLACK_KING_SQ,
            TrackedSlot::WhiteRook1 => WHITE_ROOK_1_SQ,
            TrackedSlot::WhiteRook2 => WHITE_ROOK_2_SQ,
        };
        self.memory.get_unchecked(cell)
    }

    /// Find the king square for `color`, reading directly from its tracker
    /// cell rather than scanning the board.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let cell = match color {
            Color::White => WHITE_KING_SQ,
            Color::Black => BLACK_KING_SQ,
        };
        Square::from_yx(self.memory.get_unchecked(cell))
    }

    /// Record `from -> to` as the root's current best move, in cells 46/47
    /// outside the search stack (spec.md §3's "at ply 0 the frame
    /// additionally records `best_move_from_sq` and `best_move_to_sq`").
    /// Only the Search Driver calls this, and only at the root.
    pub fn set_root_best_move(&mut self, from: Square, to: Square) {
        self.memory.set_unchecked(BEST_MOVE_FROM_SQ, from.yx());
        self.memory.set_unchecked(BEST_MOVE_TO_SQ, to.yx());
    }

    /// Clear the root best-move cells, e.g. when the root has no pseudo-legal
    /// move and the search is about to report resignation.
    pub fn clear_root_best_move(&mut self) {
        self.memory.set_unchecked(BEST_MOVE_FROM_SQ, 0);
        self.memory.set_unchecked(BEST_MOVE_TO_SQ, 0);
    }

    /// Read back the root best move cells, if both hold a valid on-board
    /// square.
    #[must_use]
    pub fn root_best_move(&self) -> Option<(Square, Square)> {
        let from = Square::from_yx(self.memory.get_unchecked(BEST_MOVE_FROM_SQ))?;
        let to = Square::from_yx(self.memory.get_unchecked(BEST_MOVE_TO_SQ))?;
        Some((from, to))
    }
}

/// A linear index `0..64` for `square`, used only to find which of the two
/// digits in a packed board word belongs to it. This is unrelated to `yx`:
/// it exists purely so adjacent board squares land in the same word.
fn square_index(square: Square) -> usize {
    let rank = square.rank() as usize - 1;
    let file = square.file() as usize - 1;
    rank * 8 + file
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(rank: u8, file: u8) -> Square {
        Square::new(rank, file).unwrap()
    }

    #[test]
    fn empty_square_reads_back_empty() {
        let board = Board::new(Memory::new());
        assert_eq!(board.square_contents(sq(4, 4)), SquareContents::Empty);
    }

    #[test]
    fn unambiguous_piece_round_trips() {
        let mut board = Board::new(Memory::new());
        board
            .write_square(sq(2, 5), SquareContents::Piece(Color::White, PieceKind::Pawn))
            .unwrap();
        assert_eq!(
            board.square_contents(sq(2, 5)),
            SquareContents::Piece(Color::White, PieceKind::Pawn)
        );
        // Neighboring square packed into the same word is unaffected.
        assert_eq!(board.square_contents(sq(2, 4)), SquareContents::Empty);
    }

    #[test]
    fn king_resolves_via_tracker() {
        let mut board = Board::new(Memory::new());
        let e1 = sq(1, 5);
        board
            .write_square(e1, SquareContents::Piece(Color::White, PieceKind::King))
            .unwrap();
        board.set_tracked_slot(TrackedSlot::WhiteKing, e1.yx());
        assert_eq!(
            board.square_contents(e1),
            SquareContents::Piece(Color::White, PieceKind::King)
        );
        assert_eq!(board.king_square(Color::White), Some(e1));
    }

    #[test]
    fn code_one_without_tracker_match_is_black_rook() {
        let mut board = Board::new(Memory::new());
        let a8 = sq(8, 1);
        board.write_square(a8, SquareContents::BlackRook).unwrap();
        assert_eq!(board.square_contents(a8), SquareContents::BlackRook);
    }

    #[test]
    fn root_best_move_round_trips() {
        let mut board = Board::new(Memory::new());
        assert_eq!(board.root_best_move(), None);
        let from = sq(2, 5);
        let to = sq(4, 5);
        board.set_root_best_move(from, to);
        assert_eq!(board.root_best_move(), Some((from, to)));
        board.clear_root_best_move();
        assert_eq!(board.root_best_move(), None);
    }

    #[test]
    fn white_rook_distinguished_from_black_rook_via_tracker() {
        let mut board = Board::new(Memory::new());
        let a1 = sq(1, 1);
        let a8 = sq(8, 1);
        board
            .write_square(a1, SquareContents::Piece(Color::White, PieceKind::Rook))
            .unwrap();
        board.set_tracked_slot(TrackedSlot::WhiteRook1, a1.yx());
        board.write_square(a8, SquareContents::BlackRook).unwrap();

        assert_eq!(
            board.square_contents(a1),
            SquareContents::Piece(Color::White, PieceKind::Rook)
        );
        assert_eq!(board.square_contents(a8), SquareContents::BlackRook);
    }
}
