//! Castling rights and the fixed geometry of the four castling moves.

use crate::{Color, Square};
use std::fmt;

/// The wing a castling move happens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// O-O, king to the g-file.
    King,
    /// O-O-O, king to the c-file.
    Queen,
}

impl CastleSide {
    /// Both wings, king side first.
    pub const ALL: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// Square the king starts from.
    #[inline]
    pub const fn king_from(color: Color) -> Square {
        match color {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    /// Square the king lands on.
    #[inline]
    pub const fn king_to(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastleSide::King) => Square::G1,
            (Color::White, CastleSide::Queen) => Square::C1,
            (Color::Black, CastleSide::King) => Square::G8,
            (Color::Black, CastleSide::Queen) => Square::C8,
        }
    }

    /// Corner the rook starts from.
    #[inline]
    pub const fn rook_from(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastleSide::King) => Square::H1,
            (Color::White, CastleSide::Queen) => Square::A1,
            (Color::Black, CastleSide::King) => Square::H8,
            (Color::Black, CastleSide::Queen) => Square::A8,
        }
    }

    /// Square the rook lands on, next to the king's destination.
    #[inline]
    pub const fn rook_to(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastleSide::King) => Square::F1,
            (Color::White, CastleSide::Queen) => Square::D1,
            (Color::Black, CastleSide::King) => Square::F8,
            (Color::Black, CastleSide::Queen) => Square::D8,
        }
    }

    /// Squares strictly between king and rook, all of which must be empty.
    pub const fn between(self, color: Color) -> &'static [Square] {
        match (color, self) {
            (Color::White, CastleSide::King) => &[Square::F1, Square::G1],
            (Color::White, CastleSide::Queen) => &[Square::B1, Square::C1, Square::D1],
            (Color::Black, CastleSide::King) => &[Square::F8, Square::G8],
            (Color::Black, CastleSide::Queen) => &[Square::B8, Square::C8, Square::D8],
        }
    }

    /// Squares the king stands on, crosses or lands on. None may be attacked.
    pub const fn king_path(self, color: Color) -> [Square; 3] {
        match (color, self) {
            (Color::White, CastleSide::King) => [Square::E1, Square::F1, Square::G1],
            (Color::White, CastleSide::Queen) => [Square::E1, Square::D1, Square::C1],
            (Color::Black, CastleSide::King) => [Square::E8, Square::F8, Square::G8],
            (Color::Black, CastleSide::Queen) => [Square::E8, Square::D8, Square::C8],
        }
    }

    /// The castling side whose king destination is `to`, if any.
    #[inline]
    pub fn from_king_target(color: Color, to: Square) -> Option<CastleSide> {
        Self::ALL.into_iter().find(|side| side.king_to(color) == to)
    }

    /// The (color, side) whose rook starts on `corner`, if any.
    #[inline]
    pub fn from_rook_corner(corner: Square) -> Option<(Color, CastleSide)> {
        match corner {
            Square::H1 => Some((Color::White, CastleSide::King)),
            Square::A1 => Some((Color::White, CastleSide::Queen)),
            Square::H8 => Some((Color::Black, CastleSide::King)),
            Square::A8 => Some((Color::Black, CastleSide::Queen)),
            _ => None,
        }
    }
}

/// Castling rights flags.
///
/// Four independent bits: white king side, white queen side, black king
/// side, black queen side. Moves only ever clear bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    #[inline]
    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::King) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queen) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::King) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queen) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` still holds the right on `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.has(color, CastleSide::King)
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.has(color, CastleSide::Queen)
    }

    /// Grants a single right.
    #[inline]
    pub fn insert(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::flag(color, side);
    }

    /// Clears a single right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::King);
        self.remove(color, CastleSide::Queen);
    }

    /// Returns true if `other` holds no right that `self` lacks.
    #[inline]
    pub const fn is_subset_of(self, other: CastlingRights) -> bool {
        self.0 & !other.0 == 0
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Parses the FEN castling field: `-` or letters from `KQkq`, each at most once.
    pub fn from_fen(field: &str) -> Option<Self> {
        if field == "-" {
            return Some(Self::NONE);
        }
        if field.is_empty() {
            return None;
        }
        let mut rights = Self::NONE;
        for c in field.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::King),
                'Q' => (Color::White, CastleSide::Queen),
                'k' => (Color::Black, CastleSide::King),
                'q' => (Color::Black, CastleSide::Queen),
                _ => return None,
            };
            if rights.has(color, side) {
                return None;
            }
            rights.insert(color, side);
        }
        Some(rights)
    }
}

impl fmt::Display for CastlingRights {
    /// Writes the FEN castling field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("-");
        }
        for (color, side, c) in [
            (Color::White, CastleSide::King, 'K'),
            (Color::White, CastleSide::Queen, 'Q'),
            (Color::Black, CastleSide::King, 'k'),
            (Color::Black, CastleSide::Queen, 'q'),
        ] {
            if self.has(color, side) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
