//! Incremental evaluation: pure functions that turn a move into a signed
//! score delta, so the Move Applier can fold evaluation into the same pass
//! that mutates the board rather than rescanning it afterward.
//!
//! The running score kept in [`crate::memory`] is always from White's
//! perspective, biased by [`crate::memory::SCORE_BIAS`] so it fits in the
//! `0..=99` cell range. A positive delta favors White; a negative delta
//! favors Black.

use crate::color::Color;
use crate::piece::PieceKind;
use crate::square::Square;

/// Material value of a piece kind. The king's value only ever shows up in
/// the evaluation if a king is captured, which is this engine's sole
/// mechanism for enforcing check legality: a line that lets the opponent
/// capture your king scores as a near-decisive material swing, and the
/// fixed-depth search avoids it the same way it avoids hanging a queen.
#[must_use]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 3,
        PieceKind::Knight => 9,
        PieceKind::Bishop => 9,
        PieceKind::Rook => 15,
        PieceKind::Queen => 24,
        PieceKind::King => 25,
    }
}

/// Whether `square` falls in the central four-by-four block (files c..=f,
/// ranks 3..=6) that earns the center bonus.
#[must_use]
pub fn is_central(square: Square) -> bool {
    (3..=6).contains(&square.rank()) && (3..=6).contains(&square.file())
}

/// The signed score contribution of a piece belonging to `color` landing on
/// `to`: `+1` for White moving into the center, `-1` for Black, `0`
/// otherwise.
#[must_use]
pub fn center_bonus(to: Square, color: Color) -> i32 {
    if !is_central(to) {
        return 0;
    }
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// The signed score contribution of removing a piece of `captured_kind`
/// belonging to the non-moving side, from `mover`'s perspective.
#[must_use]
pub fn capture_bonus(captured_kind: PieceKind, mover: Color) -> i32 {
    let value = piece_value(captured_kind);
    match mover {
        Color::White => value,
        Color::Black => -value,
    }
}

/// The full score delta a move contributes: capture value (if any) plus the
/// center bonus for the destination square. This is what the Move Applier
/// folds into the running score; unapplying a move subtracts the same
/// value back out.
#[must_use]
pub fn move_score_delta(to: Square, mover: Color, captured_kind: Option<PieceKind>) -> i32 {
    let capture = captured_kind.map_or(0, |kind| capture_bonus(kind, mover));
    capture + center_bonus(to, mover)
}
