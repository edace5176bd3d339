//! Bitboard move generator with perft validation.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit board representation with efficient operations
//! - [`Position`] - Full game state including piece positions, castling rights, etc.
//! - Attack tables for every piece type and an attacked-square query
//! - Legal move generation and in-place move execution
//! - [`perft`] node counting, with divide, statistics and a threaded variant
//!
//! # Architecture
//!
//! Each piece type/color combination has a 64-bit integer where each bit
//! represents a square. Leaper attacks are looked up in tables built at
//! compile time; slider attacks are ray-cast against the current occupancy.
//! Legal moves are produced by generating pseudo-legal moves, playing each on
//! a copy of the position and discarding those that leave the king attacked.
//!
//! # Example
//!
//! ```
//! use chess_movegen::{generate_legal_moves, make_move, perft, Position};
//!
//! let mut position = Position::startpos();
//! assert_eq!(perft(&position, 2), 400);
//!
//! let moves = generate_legal_moves(&position);
//! assert_eq!(moves.len(), 20);
//!
//! make_move(&mut position, moves[0]);
//! assert_eq!(generate_legal_moves(&position).len(), 20);
//! ```

mod bitboard;
pub mod movegen;
mod position;

pub use bitboard::{Bitboard, BitboardIter};
pub use movegen::perft::{perft, perft_divide, perft_parallel, perft_stats, PerftStats};
pub use movegen::{
    bishop_attacks, find_legal_move, generate_legal_moves, generate_pseudo_legal_moves,
    is_king_attacked, is_square_attacked, king_attacks, knight_attacks, make_move, pawn_attacks,
    queen_attacks, rook_attacks, sliding_attacks, MoveList, BISHOP_DIRECTIONS, ROOK_DIRECTIONS,
};
pub use position::{Position, PositionError};
