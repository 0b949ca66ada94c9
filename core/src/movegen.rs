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

//! The move generator: a resumable state machine over the board, not a
//! language-level iterator.
//!
//! [`GeneratorCursor`] is a plain `Copy` struct occupying the same five
//! cells the rest of the engine's state lives in (offsets 40..=44 of
//! [`crate::memory`]). The search driver pushes and pops it across
//! recursive calls exactly the way it pushes and pops the other per-ply
//! bookkeeping — there is no hidden generator frame living outside the
//! 75-word memory, because there is no generator frame at all beyond this
//! struct and the board it reads from.
//!
//! Each call to [`GeneratorCursor::next`] performs at most a bounded amount
//! of work and returns the next pseudo-legal move, or `None` once every
//! piece belonging to the side to move has been exhausted. Calling `next`
//! again after it returns `None` continues to return `None`: the cursor
//! does not wrap around.

use crate::board::Board;
use crate::color::Color;
use crate::moves::Move;
use crate::piece::{PieceKind, SquareContents};
use crate::square::Square;

/// Knight jumps, in the fixed order this engine enumerates them. The order
/// is load-bearing: callers that assert an exact move sequence (as the
/// tests in this module do) depend on it.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
];

/// King (and, single-step, queen-adjacent) directions: orthogonal first,
/// then diagonal.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
/// Queen rays: the rook directions followed by the bishop directions, same
/// order as [`KING_OFFSETS`] but sliding instead of single-step.
pub const QUEEN_DIRS: [(i8, i8); 8] = KING_OFFSETS;

/// Sentinel `scan_yx` value meaning "the board scan has been exhausted; do
/// not look for further pieces." Real squares only ever hold `11..=88`.
const SCAN_DONE: u8 = 99;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// The generator's entire state: which square the board scan last examined,
/// which piece (if any) is currently being enumerated, where a sliding ray
/// last landed, and an index into whichever direction/phase table the
/// current piece kind uses.
pub struct GeneratorCursor {
    scan_yx: u8,
    from_sq: u8,
    to_sq: u8,
    dir_index: u8,
}

impl GeneratorCursor {
    /// A cursor positioned before the first square of the board scan.
    #[must_use]
    pub const fn new() -> GeneratorCursor {
        GeneratorCursor {
            scan_yx: 0,
            from_sq: 0,
            to_sq: 0,
            dir_index: 0,
        }
    }

    /// Whether the scan has produced every pseudo-legal move there is to
    /// produce. Once true, it stays true.
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        self.scan_yx == SCAN_DONE && self.from_sq == 0
    }

    /// Produce the next pseudo-legal move for `side`, or `None` once
    /// exhausted.
    ///
    /// `board` must not be mutated between calls that are meant to resume
    /// the same enumeration — the cursor records positions on the board,
    /// not independent state, so generation invocations are side-effect
    /// free on anything but the cursor itself.
    pub fn next(&mut self, board: &Board, side: Color) -> Option<Move> {
        loop {
            if self.from_sq == 0 {
                if !self.advance_to_next_piece(board, side) {
                    return None;
                }
            }
            let from = Square::from_yx(self.from_sq).expect("cursor holds a valid square");
            let kind = match board.square_contents(from) {
                SquareContents::Piece(c, k) if c == side => k,
                _ => {
                    // The piece that used to occupy this square is gone
                    // (shouldn't happen mid-enumeration on an unmutated
                    // board, but resuming after the board legitimately
                    // changed under us should not panic).
                    self.from_sq = 0;
                    continue;
                }
            };
            let result = match kind {
                PieceKind::Pawn => self.step_pawn(board, from, side),
                PieceKind::Knight => self.step_stepper(board, from, side, &KNIGHT_OFFSETS),
                PieceKind::King => self.step_stepper(board, from, side, &KING_OFFSETS),
                PieceKind::Bishop => self.step_slider(board, from, side, &BISHOP_DIRS),
                PieceKind::Rook => self.step_slider(board, from, side, &ROOK_DIRS),
                PieceKind::Queen => self.step_slider(board, from, side, &QUEEN_DIRS),
            };
            if result.is_some() {
                return result;
            }
        }
    }

    fn advance_to_next_piece(&mut self, board: &Board, side: Color) -> bool {
        loop {
            let candidate = if self.scan_yx == 0 {
                Some(11)
            } else {
                next_yx_in_scan_order(self.scan_yx)
            };
            let Some(yx) = candidate else {
                self.scan_yx = SCAN_DONE;
                return false;
            };
            self.scan_yx = yx;
            if let Some(sq) = Square::from_yx(yx) {
                if let SquareContents::Piece(c, _) = board.square_contents(sq) {
                    if c == side {
                        self.from_sq = yx;
                        self.to_sq = 0;
                        self.dir_index = 0;
                        return true;
                    }
                }
            }
        }
    }

    /// Single-step pieces: knight and king. Tries each offset in order,
    /// returning the first one that lands on an empty or enemy-occupied
    /// square; exhausts (and signals the piece is done) once every offset
    /// has been tried.
    fn step_stepper(
        &mut self,
        board: &Board,
        from: Square,
        side: Color,
        offsets: &[(i8, i8)],
    ) -> Option<Move> {
        while (self.dir_index as usize) < offsets.len() {
            let (d_rank, d_file) = offsets[self.dir_index as usize];
            self.dir_index += 1;
            let to = from.offset(d_rank, d_file);
            if !to.is_on_board() {
                continue;
            }
            match board.square_contents(to) {
                SquareContents::Empty => return Some(Move::new(from, to, false)),
                occupied if occupied.color() != Some(side) => {
                    return Some(Move::new(from, to, false))
                }
                _ => {}
            }
        }
        self.from_sq = 0;
        None
    }

    /// Sliding pieces: bishop, rook, queen. Walks each ray one square at a
    /// time, resuming from `to_sq` across calls so that a ray already in
    /// progress doesn't restart from the piece's own square.
    fn step_slider(
        &mut self,
        board: &Board,
        from: Square,
        side: Color,
        dirs: &[(i8, i8)],
    ) -> Option<Move> {
        loop {
            if self.dir_index as usize >= dirs.len() {
                self.from_sq = 0;
                return None;
            }
            let (d_rank, d_file) = dirs[self.dir_index as usize];
            let base = if self.to_sq == 0 {
                from
            } else {
                Square::from_yx_unchecked(self.to_sq)
            };
            let to = base.offset(d_rank, d_file);
            if !to.is_on_board() {
                self.dir_index += 1;
                self.to_sq = 0;
                continue;
            }
            match board.square_contents(to) {
                SquareContents::Empty => {
                    self.to_sq = to.yx();
                    return Some(Move::new(from, to, false));
                }
                occupied => {
                    self.dir_index += 1;
                    self.to_sq = 0;
                    if occupied.color() != Some(side) {
                        return Some(Move::new(from, to, false));
                    }
                }
            }
        }
    }

    /// Pawns: a fixed four-phase scan (single push, double push, capture
    /// left, capture right), never offered as a generic offset table
    /// because push and capture use different emptiness rules.
    fn step_pawn(&mut self, board: &Board, from: Square, side: Color) -> Option<Move> {
        loop {
            let phase = self.dir_index;
            self.dir_index += 1;
            match phase {
                0 => {
                    let to = from.offset(side.pawn_rank_step(), 0);
                    if to.is_on_board() && board.square_contents(to).is_empty() {
                        return Some(Move::new(from, to, promotes(to, side)));
                    }
                }
                1 => {
                    if from.rank() == side.pawn_home_rank() {
                        let one = from.offset(side.pawn_rank_step(), 0);
                        let two = from.offset(side.pawn_rank_step() * 2, 0);
                        if one.is_on_board()
                            && two.is_on_board()
                            && board.square_contents(one).is_empty()
                            && board.square_contents(two).is_empty()
                        {
                            return Some(Move::new(from, two, false));
                        }
                    }
                }
                2 | 3 => {
                    let d_file = if phase == 2 { -1 } else { 1 };
                    let to = from.offset(side.pawn_rank_step(), d_file);
                    if to.is_on_board() {
                        let occupied = board.square_contents(to);
                        if !occupied.is_empty() && occupied.color() != Some(side) {
                            return Some(Move::new(from, to, promotes(to, side)));
                        }
                    }
                }
                _ => {
                    self.from_sq = 0;
                    return None;
                }
            }
        }
    }
}

fn promotes(to: Square, side: Color) -> bool {
    to.rank() == side.promotion_rank()
}

/// Rank-major successor of `yx` in the board scan: increments file, carries
/// into rank, and returns `None` once past rank 8.
fn next_yx_in_scan_order(yx: u8) -> Option<u8> {
    let mut rank = yx / 10;
    let mut file = yx % 10;
    file += 1;
    if file > 8 {
        file = 1;
        rank += 1;
    }
    if rank > 8 {
        None
    } else {
        Some(rank * 10 + file)
    }
}
