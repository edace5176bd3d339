//! Move representation.

use crate::{Piece, Square};
use std::fmt;

const FROM_MASK: u32 = 0x3F;
const TO_SHIFT: u32 = 6;
const PROMOTION_SHIFT: u32 = 12;
const PROMOTION_MASK: u32 = 0x7;
const CAPTURE: u32 = 1 << 15;
const EN_PASSANT: u32 = 1 << 16;
const CASTLING: u32 = 1 << 17;

/// A chess move.
///
/// Carries the source and destination squares, an optional promotion piece
/// and three flags (capture, en passant, castling). A move is only meaningful
/// for the position it was generated from.
///
/// Encoded as 6 bits from, 6 bits to, 3 bits promotion piece (0 = none,
/// otherwise the [`Piece`] index) and one bit per flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// Creates a move from all of its parts.
    #[inline]
    pub const fn with_flags(
        from: Square,
        to: Square,
        promotion: Option<Piece>,
        is_capture: bool,
        is_en_passant: bool,
        is_castling: bool,
    ) -> Self {
        let mut encoded = (from.index() as u32) | ((to.index() as u32) << TO_SHIFT);
        if let Some(piece) = promotion {
            encoded |= (piece.index() as u32) << PROMOTION_SHIFT;
        }
        if is_capture {
            encoded |= CAPTURE;
        }
        if is_en_passant {
            encoded |= EN_PASSANT;
        }
        if is_castling {
            encoded |= CASTLING;
        }
        Move(encoded)
    }

    /// Creates a quiet move (no capture, no special action).
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self::with_flags(from, to, None, false, false, false)
    }

    /// Creates a plain capture.
    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Self::with_flags(from, to, None, true, false, false)
    }

    /// Creates an en passant capture; `to` is the en passant target square.
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self::with_flags(from, to, None, true, true, false)
    }

    /// Creates a castling move, described by the king's travel.
    #[inline]
    pub const fn castle(king_from: Square, king_to: Square) -> Self {
        Self::with_flags(king_from, king_to, None, false, false, true)
    }

    /// Creates a pawn promotion, optionally capturing.
    #[inline]
    pub const fn promotion(from: Square, to: Square, piece: Piece, is_capture: bool) -> Self {
        Self::with_flags(from, to, Some(piece), is_capture, false, false)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_masked((self.0 & FROM_MASK) as u8)
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_masked(((self.0 >> TO_SHIFT) & FROM_MASK) as u8)
    }

    /// Returns the promotion piece, if this is a promotion.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match (self.0 >> PROMOTION_SHIFT) & PROMOTION_MASK {
            0 => None,
            index => Piece::from_index(index as u8),
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> PROMOTION_SHIFT) & PROMOTION_MASK != 0
    }

    /// Returns true if the move removes an opponent piece, en passant included.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE != 0
    }

    /// Returns true if this is an en passant capture.
    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.0 & EN_PASSANT != 0
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        self.0 & CASTLING != 0
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion_piece() {
            Some(piece) => format!("{}{}{}", self.from(), self.to(), piece.to_lower_char()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }

    /// Splits UCI coordinate notation into squares and promotion piece.
    ///
    /// Flags cannot be recovered from text alone; resolve the result against
    /// the legal moves of a position to obtain a [`Move`].
    pub fn parse_uci(s: &str) -> Option<(Square, Square, Option<Piece>)> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(Piece::from_promotion_char(c)?),
            None => None,
        };
        Some((from, to, promotion))
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move(0);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}", self.to_uci())?;
        if self.is_castling() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        } else if self.is_capture() {
            write!(f, " x")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
