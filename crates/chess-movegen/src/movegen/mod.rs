//! Move generation.
//!
//! Moves are generated pseudo-legally per piece type and then filtered by
//! playing each one on a copy of the position and rejecting those that leave
//! the mover's king attacked.

mod attacks;
mod make;
pub mod perft;

use crate::{Bitboard, Position};
use chess_core::{CastleSide, Color, Move, Piece, Square};

pub use attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
    sliding_attacks, BISHOP_DIRECTIONS, ROOK_DIRECTIONS,
};
pub use make::make_move;

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates over the moves in generation order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds `m`.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the given position.
pub fn generate_legal_moves(position: &Position) -> MoveList {
    let mut moves = generate_pseudo_legal_moves(position);

    let us = position.side_to_move;
    moves.retain(|&m| {
        let mut next = *position;
        make_move(&mut next, m);
        !is_king_attacked(&next, us)
    });

    moves
}

/// Generates every move that obeys piece movement rules, including moves
/// that leave the mover's own king attacked.
///
/// Castling is the exception: it is only produced when the king's start,
/// transit and destination squares are all safe.
pub fn generate_pseudo_legal_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();

    generate_pawn_moves(position, &mut moves);
    generate_piece_moves(position, Piece::Knight, &mut moves);
    generate_piece_moves(position, Piece::Bishop, &mut moves);
    generate_piece_moves(position, Piece::Rook, &mut moves);
    generate_piece_moves(position, Piece::Queen, &mut moves);
    generate_piece_moves(position, Piece::King, &mut moves);
    generate_castling_moves(position, &mut moves);

    moves
}

/// Resolves UCI coordinate notation (`e2e4`, `e7e8q`) to a legal move.
pub fn find_legal_move(position: &Position, uci: &str) -> Option<Move> {
    let (from, to, promotion) = Move::parse_uci(uci)?;
    generate_legal_moves(position)
        .iter()
        .copied()
        .find(|m| m.from() == from && m.to() == to && m.promotion_piece() == promotion)
}

/// Generates pseudo-legal pawn moves.
fn generate_pawn_moves(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move;
    let them = us.opposite();
    let their_pieces = position.occupancy(them);
    let empty = position.empty_squares();
    let pawns = position.pieces_of(Piece::Pawn, us);
    let push = us.pawn_push();

    let forward = |bb: Bitboard| match us {
        Color::White => bb.north(),
        Color::Black => bb.south(),
    };

    let single_pushes = forward(pawns) & empty;
    for to in single_pushes {
        let from = Square::from_index_masked((to.index() as i8 - push) as u8);
        push_pawn_move(moves, us, from, to, false);
    }

    let home = Bitboard::rank(us.pawn_home_rank());
    let double_pushes = forward(forward(pawns & home) & empty) & empty;
    for to in double_pushes {
        let from = Square::from_index_masked((to.index() as i8 - 2 * push) as u8);
        moves.push(Move::quiet(from, to));
    }

    for from in pawns {
        for to in pawn_attacks(from, us) & their_pieces {
            push_pawn_move(moves, us, from, to, true);
        }
    }

    if let Some(ep_square) = position.en_passant {
        for from in pawn_attacks(ep_square, them) & pawns {
            moves.push(Move::en_passant(from, ep_square));
        }
    }
}

/// Pushes a pawn move, expanding it into the four promotions on the last rank.
#[inline]
fn push_pawn_move(moves: &mut MoveList, us: Color, from: Square, to: Square, is_capture: bool) {
    if to.rank() == us.promotion_rank() {
        for piece in Piece::PROMOTIONS {
            moves.push(Move::promotion(from, to, piece, is_capture));
        }
    } else if is_capture {
        moves.push(Move::capture(from, to));
    } else {
        moves.push(Move::quiet(from, to));
    }
}

/// Generates pseudo-legal moves for knights, sliders and the king (castling excluded).
fn generate_piece_moves(position: &Position, piece: Piece, moves: &mut MoveList) {
    let us = position.side_to_move;
    let our_pieces = position.occupancy(us);
    let their_pieces = position.occupancy(us.opposite());
    let occupied = position.occupied();

    for from in position.pieces_of(piece, us) {
        let targets = match piece {
            Piece::Knight => knight_attacks(from),
            Piece::Bishop => bishop_attacks(from, occupied),
            Piece::Rook => rook_attacks(from, occupied),
            Piece::Queen => queen_attacks(from, occupied),
            Piece::King => king_attacks(from),
            Piece::Pawn => Bitboard::EMPTY,
        } & !our_pieces;

        for to in targets {
            if their_pieces.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }
}

/// Generates castling moves whose king path is clear and safe.
fn generate_castling_moves(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move;
    let them = us.opposite();
    let occupied = position.occupied();
    let king_from = CastleSide::king_from(us);

    if !position.pieces_of(Piece::King, us).contains(king_from) {
        return;
    }

    for side in CastleSide::ALL {
        if !position.castling.has(us, side) {
            continue;
        }
        if side.between(us).iter().any(|&sq| occupied.contains(sq)) {
            continue;
        }
        if side
            .king_path(us)
            .iter()
            .any(|&sq| is_square_attacked(position, sq, them))
        {
            continue;
        }
        moves.push(Move::castle(king_from, side.king_to(us)));
    }
}

/// Returns true if the given square is attacked by the given color.
pub fn is_square_attacked(position: &Position, sq: Square, by_color: Color) -> bool {
    let occupied = position.occupied();

    // A pawn of `by_color` attacks `sq` from where an opposite pawn on `sq` would attack.
    let enemy_pawns = position.pieces_of(Piece::Pawn, by_color);
    if (pawn_attacks(sq, by_color.opposite()) & enemy_pawns).is_not_empty() {
        return true;
    }

    let enemy_knights = position.pieces_of(Piece::Knight, by_color);
    if (knight_attacks(sq) & enemy_knights).is_not_empty() {
        return true;
    }

    let enemy_king = position.pieces_of(Piece::King, by_color);
    if (king_attacks(sq) & enemy_king).is_not_empty() {
        return true;
    }

    let queens = position.pieces_of(Piece::Queen, by_color);

    let diagonal = position.pieces_of(Piece::Bishop, by_color) | queens;
    if (bishop_attacks(sq, occupied) & diagonal).is_not_empty() {
        return true;
    }

    let orthogonal = position.pieces_of(Piece::Rook, by_color) | queens;
    (rook_attacks(sq, occupied) & orthogonal).is_not_empty()
}

/// Returns true if the king of the given color is attacked by the opponent.
///
/// A side without a king is never in check.
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    match position.king_square(king_color) {
        Some(king_sq) => is_square_attacked(position, king_sq, king_color.opposite()),
        None => false,
    }
}
