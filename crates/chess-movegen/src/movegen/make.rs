//! In-place move execution.

use crate::Position;
use chess_core::{CastleSide, Color, Move, Piece, Square};

/// Plays `m` on `position`, updating every field in place.
///
/// `m` must come from the move generator for this exact position; nothing
/// is validated. A move whose `from` square holds none of the mover's pieces
/// trips a debug assertion and is otherwise ignored.
pub fn make_move(position: &mut Position, m: Move) {
    let us = position.side_to_move;
    let them = us.opposite();
    let from = m.from();
    let to = m.to();

    let Some(piece) = position.piece_on(us, from) else {
        debug_assert!(false, "no {} piece on {} for {:?}", us, from, m);
        return;
    };

    position.board_mut(piece, us).clear(from);

    if m.is_castling() {
        if let Some(side) = CastleSide::from_king_target(us, to) {
            let rook = position.board_mut(Piece::Rook, us);
            rook.clear(side.rook_from(us));
            rook.set(side.rook_to(us));
        }
    }

    if m.is_en_passant() {
        let victim = Square::from_index_masked((to.index() as i8 - us.pawn_push()) as u8);
        position.board_mut(Piece::Pawn, them).clear(victim);
    } else if m.is_capture() {
        if let Some(captured) = position.piece_on(them, to) {
            position.board_mut(captured, them).clear(to);
        }
    }

    let landing = m.promotion_piece().unwrap_or(piece);
    position.board_mut(landing, us).set(to);

    position.refresh_occupancy();

    if piece == Piece::King {
        position.castling.remove_color(us);
    }
    if piece == Piece::Rook {
        if let Some((color, side)) = CastleSide::from_rook_corner(from) {
            if color == us {
                position.castling.remove(color, side);
            }
        }
    }
    if m.is_capture() && !m.is_en_passant() {
        if let Some((color, side)) = CastleSide::from_rook_corner(to) {
            position.castling.remove(color, side);
        }
    }

    position.en_passant = if piece == Piece::Pawn && from.index().abs_diff(to.index()) == 16 {
        Some(Square::from_index_masked((from.index() + to.index()) / 2))
    } else {
        None
    };

    if piece == Piece::Pawn || m.is_capture() {
        position.halfmove_clock = 0;
    } else {
        position.halfmove_clock = position.halfmove_clock.saturating_add(1);
    }
    if us == Color::Black {
        position.fullmove_number = position.fullmove_number.saturating_add(1);
    }

    position.side_to_move = them;

    debug_assert!(
        position.validate().is_ok(),
        "{:?} broke the position: {:?}",
        m,
        position.validate()
    );
}
