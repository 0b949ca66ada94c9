//! Board fixtures shared by this crate's unit tests.

#![cfg(test)]

use crate::board::Board;
use crate::color::Color;
use crate::memory::Memory;
use crate::piece::{PieceKind, SquareContents, TrackedSlot};
use crate::square::Square;

/// The standard chess starting position, side to move White.
pub(crate) fn standard_opening_board() -> Board {
    let mut board = Board::new(Memory::new());

    let back_rank = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    for (file_idx, kind) in back_rank.iter().enumerate() {
        let file = file_idx as u8 + 1;
        place(&mut board, 1, file, Color::White, *kind);
        place(&mut board, 8, file, Color::Black, *kind);
        place(&mut board, 2, file, Color::White, PieceKind::Pawn);
        place(&mut board, 7, file, Color::Black, PieceKind::Pawn);
    }

    board.set_tracked_slot(TrackedSlot::WhiteKing, Square::new(1, 5).unwrap().yx());
    board.set_tracked_slot(TrackedSlot::BlackKing, Square::new(8, 5).unwrap().yx());
    board.set_tracked_slot(TrackedSlot::WhiteRook1, Square::new(1, 1).unwrap().yx());
    board.set_tracked_slot(TrackedSlot::WhiteRook2, Square::new(1, 8).unwrap().yx());

    board.set_side_to_move(Color::White);
    board
}

fn place(board: &mut Board, rank: u8, file: u8, color: Color, kind: PieceKind) {
    let sq = Square::new(rank, file).unwrap();
    board
        .write_square(sq, SquareContents::Piece(color, kind))
        .unwrap();
}
