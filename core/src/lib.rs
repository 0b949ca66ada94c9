//! Board representation, move generation, move application, and evaluation
//! for a chess engine whose entire mutable state fits in a 75-word decimal
//! memory.
//!
//! This crate has no heap allocation on its hot paths: [`Board`] is `Copy`,
//! move generation is a resumable state machine rather than an iterator
//! that allocates, and [`apply`]/[`unapply`] mutate a board in place and
//! hand back a small `Copy` undo token instead of cloning anything.

mod apply;
mod board;
mod color;
mod eval;
mod memory;
mod moves;
mod movegen;
mod piece;
mod position;
mod square;

#[cfg(test)]
mod test_support;

pub use apply::{apply, unapply, ApplyError, Undo};
pub use board::Board;
pub use color::Color;
pub use eval::{capture_bonus, center_bonus, is_central, move_score_delta, piece_value};
pub use memory::{Memory, MemoryError, MEMORY_SIZE, SCORE_BIAS, SEARCH_STACK_LEN};
pub use movegen::GeneratorCursor;
pub use moves::Move;
pub use position::{
    load_fen, load_position_records, load_records, parse_records, LoadError, PositionRecord,
};
pub use piece::{
    from_unambiguous_code, packed_code, unambiguous_code, PieceKind, SquareContents, TrackedSlot,
};
pub use square::Square;
