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

//! Piece kinds and the packed single-digit codes they're stored as on the
//! board (see [`crate::memory`] for the packing scheme).

use crate::color::Color;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The kind of a piece, independent of color or location.
pub enum PieceKind {
    King,
    Rook,
    Pawn,
    Knight,
    Bishop,
    Queen,
}

impl PieceKind {
    /// Whether this kind slides along a ray (bishop/rook/queen) as opposed to
    /// taking a single fixed step (king/knight) or following pawn rules.
    #[must_use]
    pub const fn slides(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = match self {
            PieceKind::King => 'K',
            PieceKind::Rook => 'R',
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
        };
        write!(f, "{c}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A tracker slot that disambiguates a packed code-1 square.
///
/// Kings and white rooks are redundantly stored both as code `1` in the
/// packed board and as an absolute `yx` in one of these dedicated cells,
/// because a single packed digit cannot by itself tell a king from a rook.
/// Black rooks carry code `1` too but are *not* individually tracked: any
/// code-1 square that isn't the black king square is a black rook, so there
/// can be arbitrarily many of them (see spec.md §3's asymmetry note).
pub enum TrackedSlot {
    WhiteKing,
    BlackKing,
    WhiteRook1,
    WhiteRook2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The fully-resolved identity of whatever occupies a square: constructed
/// once by [`crate::board::Board::square_contents`] and pattern-matched
/// everywhere else, rather than re-deriving the code-1 disambiguation at
/// every call site.
pub enum SquareContents {
    Empty,
    Piece(Color, PieceKind),
    /// A black rook: a code-1 square that is not the black king's square.
    /// Black rooks are not individually position-tracked, so this variant
    /// carries no slot.
    BlackRook,
}

impl SquareContents {
    /// The color of the occupant, or `None` if the square is empty.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            SquareContents::Empty => None,
            SquareContents::Piece(c, _) => Some(c),
            SquareContents::BlackRook => Some(Color::Black),
        }
    }

    /// The kind of the occupant, or `None` if the square is empty.
    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            SquareContents::Empty => None,
            SquareContents::Piece(_, k) => Some(k),
            SquareContents::BlackRook => Some(PieceKind::Rook),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, SquareContents::Empty)
    }
}

/// Pack `(color, kind)` into the single-digit board code, for kinds which
/// the packed board can represent unambiguously (every kind except king and
/// rook, which both share code `1` and must be disambiguated via the
/// tracker cells instead — see [`TrackedSlot`]).
#[must_use]
pub const fn unambiguous_code(color: Color, kind: PieceKind) -> Option<u8> {
    match (color, kind) {
        (Color::White, PieceKind::Pawn) => Some(2),
        (Color::White, PieceKind::Knight) => Some(3),
        (Color::White, PieceKind::Bishop) => Some(4),
        (Color::White, PieceKind::Queen) => Some(5),
        (Color::Black, PieceKind::Pawn) => Some(6),
        (Color::Black, PieceKind::Knight) => Some(7),
        (Color::Black, PieceKind::Bishop) => Some(8),
        (Color::Black, PieceKind::Queen) => Some(9),
        _ => None,
    }
}

/// Inverse of [`unambiguous_code`] for codes `2..=9`. Returns `None` for `0`
/// (empty) and `1` (ambiguous; resolve via the board's tracker cells
/// instead).
#[must_use]
pub const fn from_unambiguous_code(code: u8) -> Option<(Color, PieceKind)> {
    match code {
        2 => Some((Color::White, PieceKind::Pawn)),
        3 => Some((Color::White, PieceKind::Knight)),
        4 => Some((Color::White, PieceKind::Bishop)),
        5 => Some((Color::White, PieceKind::Queen)),
        6 => Some((Color::Black, PieceKind::Pawn)),
        7 => Some((Color::Black, PieceKind::Knight)),
        8 => Some((Color::Black, PieceKind::Bishop)),
        9 => Some((Color::Black, PieceKind::Queen)),
        _ => None,
    }
}

/// The raw packed board code (`0..=9`) for `contents`: `0` for empty, `1`
/// for any king, white rook, or untracked black rook, and the unambiguous
/// code from [`unambiguous_code`] for everything else. This is what
/// actually lives in a packed board word; resolving the `1`s back into a
/// [`SquareContents`] requires the tracker cells, which only
/// [`crate::board::Board`] has access to.
#[must_use]
pub const fn packed_code(contents: SquareContents) -> u8 {
    match contents {
        SquareContents::Empty => 0,
        SquareContents::BlackRook => 1,
        SquareContents::Piece(color, kind) => match unambiguous_code(color, kind) {
            Some(code) => code,
            None => 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip() {
        for code in 2..=9u8 {
            let (color, kind) = from_unambiguous_code(code).unwrap();
            assert_eq!(unambiguous_code(color, kind), Some(code));
        }
    }
}
