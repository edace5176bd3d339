//! Core types for chess.
//!
//! This crate provides the fundamental value types shared by the move
//! generator and its front ends:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move representation
//! - [`CastlingRights`] and [`CastleSide`] for castling bookkeeping
//! - [`Fen`] parsing and serialization

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::Move;
pub use piece::Piece;
pub use square::{File, Rank, Square};
