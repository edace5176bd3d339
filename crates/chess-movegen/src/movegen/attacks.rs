//! Attack table generation and lookup for all piece types.
//!
//! Knight, king and pawn attacks come from tables built at compile time.
//! Sliding pieces walk their rays on demand against the current occupancy.

use crate::Bitboard;
use chess_core::{Color, Square};

/// Diagonal square-index deltas: north-east, north-west, south-west, south-east.
pub const BISHOP_DIRECTIONS: [i8; 4] = [9, 7, -9, -7];

/// Orthogonal square-index deltas: north, south, east, west.
pub const ROOK_DIRECTIONS: [i8; 4] = [8, -8, 1, -1];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const WHITE_PAWN_OFFSETS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const BLACK_PAWN_OFFSETS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];

/// Precomputed knight attack tables.
const KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_OFFSETS);

/// Precomputed king attack tables.
const KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_OFFSETS);

/// Precomputed pawn attack tables [color][square].
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&WHITE_PAWN_OFFSETS),
    leaper_table(&BLACK_PAWN_OFFSETS),
];

/// Returns knight attacks from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Returns king attacks from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Returns the squares a `color` pawn on `sq` attacks.
///
/// Read backwards, `pawn_attacks(sq, color.opposite())` is the set of squares
/// from which a `color` pawn would attack `sq`.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// Returns bishop attacks from `sq` given the board occupancy.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    sliding_attacks(sq, occupied, &BISHOP_DIRECTIONS)
}

/// Returns rook attacks from `sq` given the board occupancy.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    sliding_attacks(sq, occupied, &ROOK_DIRECTIONS)
}

/// Returns queen attacks (bishop | rook) from `sq` given the board occupancy.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

/// Casts a ray from `sq` along each square-index delta in `directions`.
///
/// Each ray includes the first occupied square it meets (of either color)
/// and stops there, or stops before leaving the board. A ray never wraps
/// from one edge file to the other. Masking out friendly pieces is left to
/// the caller.
pub fn sliding_attacks(sq: Square, occupied: Bitboard, directions: &[i8]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &delta in directions {
        let (rank_step, file_step) = split_delta(delta);
        let mut current = sq;
        while let Some(next) = current.step(rank_step, file_step) {
            attacks.set(next);
            if occupied.contains(next) {
                break;
            }
            current = next;
        }
    }
    attacks
}

/// Splits a square-index delta into (rank, file) steps, taking the file step
/// in -4..=3 so that 7 reads as one rank up and one file left.
#[inline]
const fn split_delta(delta: i8) -> (i8, i8) {
    let file_step = (delta + 4).rem_euclid(8) - 4;
    ((delta - file_step) / 8, file_step)
}

/// Builds a leaper table from (rank, file) offsets, dropping targets off the board.
const fn leaper_table(offsets: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut index = 0u8;
    while index < 64 {
        let sq = Square::from_index_masked(index);
        let mut bits = 0u64;
        let mut i = 0;
        while i < offsets.len() {
            let (rank_step, file_step) = offsets[i];
            if let Some(target) = sq.step(rank_step, file_step) {
                bits |= 1u64 << target.index();
            }
            i += 1;
        }
        table[index as usize] = Bitboard(bits);
        index += 1;
    }
    table
}
