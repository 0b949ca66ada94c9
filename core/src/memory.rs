//! The 75-word decimal memory every other module in this crate addresses by
//! offset.
//!
//! The entire mutable state of the engine — board, piece lists, side to
//! move, the move generator's enumeration cursor, the running score, and
//! (conceptually) the search stack — lives in one `[u8; 75]`, where every
//! cell holds a two-digit decimal value `0..=99`. This mirrors the memory
//! budget of the historical decimal computer this design is inherited from:
//! no heap allocation happens anywhere on the hot path, and every piece of
//! state a reimplementer might otherwise reach for a `Vec` or a `HashMap` to
//! hold instead has a fixed, pre-reserved home in this array.
//!
//! Offsets, following the layout this engine is specified against:
//!
//! | Offset   | Name                      |
//! |----------|---------------------------|
//! | 0..=31   | packed board, two squares per word |
//! | 32       | white king square (`yx`) |
//! | 33       | black king square (`yx`) |
//! | 34       | white rook #1 square (`yx`, or 0) |
//! | 35       | side to move (high digit) / from-piece scratch (low digit) |
//! | 36       | captured piece code, for undo |
//! | 37       | from-square of the current move |
//! | 38       | to-square of the current move |
//! | 39       | promotion marker |
//! | 40..=44  | move generator enumeration cursor |
//! | 45       | white rook #2 square (`yx`, or 0) |
//! | 46       | root best-move from-square (outside the search stack) |
//! | 47       | root best-move to-square (outside the search stack) |
//! | 55       | running score, biased by +50 |
//! | 56..=74  | search stack (reserved; see DESIGN.md) |
//!
//! Cells 48..=54 are unused reserved space. Any cell not otherwise mentioned
//! is zero.

use thiserror::Error;

/// Total number of two-digit decimal words in the engine's memory.
pub const MEMORY_SIZE: usize = 75;

pub const BOARD_START: usize = 0;
pub const BOARD_LEN: usize = 32;
pub const WHITE_KING_SQ: usize = 32;
pub const BLACK_KING_SQ: usize = 33;
pub const WHITE_ROOK_1_SQ: usize = 34;
pub const SIDE_AND_FROM_PIECE: usize = 35;
pub const CAPTURED_PIECE: usize = 36;
pub const FROM_SQ: usize = 37;
pub const TO_SQ: usize = 38;
pub const PROMO: usize = 39;
pub const CURSOR_START: usize = 40;
pub const CURSOR_LEN: usize = 5;
pub const WHITE_ROOK_2_SQ: usize = 45;
pub const BEST_MOVE_FROM_SQ: usize = 46;
pub const BEST_MOVE_TO_SQ: usize = 47;
pub const SCORE: usize = 55;
pub const SEARCH_STACK_START: usize = 56;
pub const SEARCH_STACK_LEN: usize = 19;

/// The bias added to every score so that the 0..99 cell range can express
/// both positive and negative evaluations. `score - SCORE_BIAS` is the
/// side-independent evaluation from White's perspective.
pub const SCORE_BIAS: i32 = 50;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Errors which indicate the 75-word memory invariant has been violated.
/// These are fatal: the engine has no local recovery from them.
pub enum MemoryError {
    #[error("cell index {0} is out of range for the 75-word memory")]
    CellOutOfRange(usize),
    #[error("value {0} is not a valid two-digit decimal word (0..=99)")]
    InvalidWord(u16),
    #[error("score delta would move the running score outside 0..=99 (got {0})")]
    ScoreOutOfRange(i32),
}

#[derive(Clone, Copy, PartialEq, Eq)]
/// The flat 75-word decimal memory. Every other component in this crate
/// borrows this by reference and addresses it by offset; there is no
/// process-wide static state anywhere in the engine.
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    /// A freshly zeroed memory. Every cell is `0`, matching the convention
    /// that an unmentioned cell is zero.
    #[must_use]
    pub const fn new() -> Memory {
        Memory {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Read a raw cell value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `offset` is outside `0..75`.
    pub fn get(&self, offset: usize) -> Result<u8, MemoryError> {
        self.cells
            .get(offset)
            .copied()
            .ok_or(MemoryError::CellOutOfRange(offset))
    }

    /// Write a raw cell value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `offset` is outside `0..75` or `value` is not a
    /// valid two-digit decimal word.
    pub fn set(&mut self, offset: usize, value: u8) -> Result<(), MemoryError> {
        if value > 99 {
            return Err(MemoryError::InvalidWord(value as u16));
        }
        if offset >= MEMORY_SIZE {
            return Err(MemoryError::CellOutOfRange(offset));
        }
        self.cells[offset] = value;
        Ok(())
    }

    /// Read a cell, panicking on an out-of-range offset. Used internally for
    /// offsets this crate knows statically to be valid (the named constants
    /// above), to keep call sites free of `unwrap`.
    #[must_use]
    pub(crate) fn get_unchecked(&self, offset: usize) -> u8 {
        self.cells[offset]
    }

    pub(crate) fn set_unchecked(&mut self, offset: usize, value: u8) {
        debug_assert!(value <= 99, "word {value} out of range for offset {offset}");
        self.cells[offset] = value;
    }

    /// The running score (raw, biased cell value).
    #[must_use]
    pub fn score(&self) -> u8 {
        self.get_unchecked(SCORE)
    }

    /// Apply a signed delta to the running score. Overflowing `0..=99` is
    /// treated as a fatal invariant violation and returned as an error
    /// rather than silently clamped — a score that would leave that range
    /// means the evaluation or the move that produced it is wrong, not
    /// that the result should be quietly truncated.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `self.score() + delta` would fall outside `0..=99`.
    pub fn apply_score_delta(&mut self, delta: i32) -> Result<(), MemoryError> {
        let new_score = i32::from(self.get_unchecked(SCORE)) + delta;
        if !(0..=99).contains(&new_score) {
            return Err(MemoryError::ScoreOutOfRange(new_score));
        }
        self.set_unchecked(SCORE, new_score as u8);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Memory {
        Memory::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("score", &self.score())
            .field("side_to_move_digit", &(self.get_unchecked(SIDE_AND_FROM_PIECE) / 10))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_memory_is_zeroed() {
        let m = Memory::new();
        for i in 0..MEMORY_SIZE {
            assert_eq!(m.get(i).unwrap(), 0);
        }
    }

    #[test]
    fn out_of_range_cell_errors() {
        let m = Memory::new();
        assert_eq!(m.get(75), Err(MemoryError::CellOutOfRange(75)));
    }

    #[test]
    fn invalid_word_rejected() {
        let mut m = Memory::new();
        assert_eq!(m.set(0, 100), Err(MemoryError::InvalidWord(100)));
    }

    #[test]
    fn score_delta_clamps_to_fatal_error() {
        let mut m = Memory::new();
        m.set(SCORE, 50).unwrap();
        assert!(m.apply_score_delta(49).is_ok());
        assert_eq!(m.score(), 99);
        assert_eq!(
            m.apply_score_delta(1),
            Err(MemoryError::ScoreOutOfRange(100))
        );
    }
}
