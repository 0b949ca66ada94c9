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

//! Squares, encoded the way the original machine encodes them: `yx = 10*rank +
//! file`, with rank and file running 1..=8. This is deliberately not the
//! usual 0-indexed convention — see the module-level docs in [`crate::memory`]
//! for why.

use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A square on the board, stored as the packed decimal `yx` the rest of the
/// engine uses everywhere.
///
/// # Examples
///
/// ```
/// use eniac_chess_core::Square;
///
/// let e2 = Square::new(2, 5).unwrap();
/// assert_eq!(e2.rank(), 2);
/// assert_eq!(e2.file(), 5);
/// assert_eq!(e2.yx(), 25);
/// ```
pub struct Square(u8);

impl Square {
    /// Construct a square from 1-indexed `rank` and `file`. Returns `None` if
    /// either coordinate falls outside `1..=8`.
    #[must_use]
    pub fn new(rank: u8, file: u8) -> Option<Square> {
        if (1..=8).contains(&rank) && (1..=8).contains(&file) {
            Some(Square(10 * rank + file))
        } else {
            None
        }
    }

    /// Wrap a raw `yx` value. Returns `None` if the value is off-board: the
    /// rank or file digit is `0` or `9`, which is exactly the invariant the
    /// move generator exploits to detect board edges without a separate
    /// bounds array.
    #[must_use]
    pub const fn from_yx(yx: u8) -> Option<Square> {
        let rank = yx / 10;
        let file = yx % 10;
        if rank >= 1 && rank <= 8 && file >= 1 && file <= 8 {
            Some(Square(yx))
        } else {
            None
        }
    }

    /// Wrap a raw `yx` value without checking that it lands on the board.
    /// Used internally by the move generator, which walks `yx` values one
    /// step at a time and must be able to represent the off-board sentinel
    /// before checking it.
    #[must_use]
    pub(crate) const fn from_yx_unchecked(yx: u8) -> Square {
        Square(yx)
    }

    /// The packed `yx` representation: `10*rank + file`.
    #[must_use]
    pub const fn yx(self) -> u8 {
        self.0
    }

    /// Is this square's `yx` on the board? A square can be constructed
    /// off-board via [`Square::from_yx_unchecked`] as an intermediate value
    /// while the generator walks a ray; this checks whether it landed
    /// somewhere real.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        let rank = self.0 / 10;
        let file = self.0 % 10;
        rank >= 1 && rank <= 8 && file >= 1 && file <= 8
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 / 10
    }

    #[must_use]
    pub const fn file(self) -> u8 {
        self.0 % 10
    }

    /// Offset this square by `(d_rank, d_file)`, without checking that the
    /// result is on the board. Callers must check [`Square::is_on_board`]
    /// before using the result for anything but another offset.
    #[must_use]
    pub(crate) const fn offset(self, d_rank: i8, d_file: i8) -> Square {
        let rank = self.0 as i8 / 10 + d_rank;
        let file = self.0 as i8 % 10 + d_file;
        // Ranks/files can wander outside 0..=9 only by one step per offset
        // call, and the generator never chains more than one offset before
        // checking `is_on_board`, so wrapping in `u8` is safe: a negative
        // result becomes a large value, which `is_on_board` rejects as
        // off-board just the same as a literal 9.
        Square((rank * 10 + file) as u8)
    }

    /// Parse an algebraic square name such as `"e2"` into a [`Square`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if `s` is not exactly two characters, the file is not
    /// `a`..=`h`, or the rank is not `1`..=`8`.
    pub fn from_algebraic(s: &str) -> Result<Square, &'static str> {
        let mut chars = s.chars();
        let file_chr = chars.next().ok_or("square name must be 2 characters")?;
        let rank_chr = chars.next().ok_or("square name must be 2 characters")?;
        if chars.next().is_some() {
            return Err("square name must be 2 characters");
        }
        let file = match file_chr {
            'a'..='h' => file_chr as u8 - b'a' + 1,
            _ => return Err("illegal file for square"),
        };
        let rank = rank_chr.to_digit(10).ok_or("expected digit for rank")?;
        if !(1..=8).contains(&rank) {
            return Err("rank out of range");
        }
        Ok(Square::new(rank as u8, file).expect("range already checked"))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file_name = match self.file() {
            1 => 'a',
            2 => 'b',
            3 => 'c',
            4 => 'd',
            5 => 'e',
            6 => 'f',
            7 => 'g',
            8 => 'h',
            _ => '?',
        };
        write!(f, "{file_name}{}", self.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yx_matches_rank_file() {
        let sq = Square::new(3, 5).unwrap();
        assert_eq!(sq.yx(), 35);
    }

    #[test]
    fn off_board_rejected() {
        assert!(Square::new(9, 1).is_none());
        assert!(Square::new(1, 0).is_none());
        assert!(Square::from_yx(90).is_none());
        assert!(Square::from_yx(0).is_none());
    }

    #[test]
    fn offset_wraps_off_board_detectably() {
        let a1 = Square::new(1, 1).unwrap();
        let off = a1.offset(-1, 0);
        assert!(!off.is_on_board());
    }

    #[test]
    fn algebraic_round_trip() {
        let sq = Square::from_algebraic("e2").unwrap();
        assert_eq!(sq.yx(), 25);
        assert_eq!(sq.to_string(), "e2");
    }

    #[test]
    fn algebraic_rejects_garbage() {
        assert!(Square::from_algebraic("z9").is_err());
        assert!(Square::from_algebraic("e").is_err());
    }
}
