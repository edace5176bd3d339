//! Chess position representation.

use chess_core::{CastlingRights, Color, Fen, FenError, Move, Piece, Rank, Square};
use std::fmt;
use thiserror::Error;

use crate::movegen::{is_king_attacked, make_move};
use crate::Bitboard;

/// Index of the all-pieces summary in [`Position::occupancy`]-style arrays.
const BOTH: usize = 2;

/// A broken [`Position`] invariant, reported by [`Position::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("square {square} is set on more than one piece board")]
    OverlappingPieces { square: Square },

    #[error("{0} occupancy does not match its piece boards")]
    StaleOccupancy(&'static str),

    #[error("en passant square {0} is not on rank 3 or rank 6")]
    InvalidEnPassant(Square),
}

/// Complete chess position state.
///
/// Twelve piece boards (white pawn..king, then black pawn..king) are the
/// single source of truth; the three occupancy boards are derived from them
/// and recomputed after every change. The type is plain data and `Copy`, so
/// exploring a branch is a matter of copying the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// One bitboard per (color, piece), indexed by [`Piece::board_index`].
    pieces: [Bitboard; 12],

    /// White, black and all pieces.
    occupancy: [Bitboard; 3],

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates an empty position.
    pub const fn empty() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 12],
            occupancy: [Bitboard::EMPTY; 3],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let mut position = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for color in Color::ALL {
            let home = Bitboard::rank(color.back_rank());
            for (sq, piece) in home.into_iter().zip(back_rank) {
                position.board_mut(piece, color).set(sq);
            }
            *position.board_mut(Piece::Pawn, color) = Bitboard::rank(color.pawn_home_rank());
        }
        position.castling = CastlingRights::ALL;
        position.refresh_occupancy();
        position
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Fen::parse(fen).map(|record| Self::from_fen_record(&record))
    }

    /// Builds a position from an already parsed FEN record.
    pub fn from_fen_record(record: &Fen) -> Self {
        let mut position = Position::empty();
        for (sq, placed) in Square::all().zip(record.board.iter()) {
            if let Some((piece, color)) = *placed {
                position.board_mut(piece, color).set(sq);
            }
        }
        position.refresh_occupancy();
        position.side_to_move = record.side_to_move;
        position.castling = record.castling;
        position.en_passant = record.en_passant;
        position.halfmove_clock = record.halfmove_clock;
        position.fullmove_number = record.fullmove_number;
        position
    }

    /// Converts the position to a FEN record.
    pub fn to_fen_record(&self) -> Fen {
        let mut board = [None; 64];
        for (slot, sq) in board.iter_mut().zip(Square::all()) {
            *slot = self.piece_at(sq);
        }
        Fen {
            board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_fen_record().to_fen()
    }

    /// Renders the board as text, rank 8 at the top, `.` for empty squares.
    pub fn diagram(&self) -> String {
        let mut out = String::with_capacity(8 * 18 + 18);
        for rank in Rank::ALL.iter().rev() {
            out.push(rank.to_char());
            for file in chess_core::File::ALL {
                out.push(' ');
                out.push(match self.piece_at(Square::new(file, *rank)) {
                    Some((piece, color)) => piece.to_fen_char(color),
                    None => '.',
                });
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }

    /// Returns the piece and color at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let color = if self.occupancy(Color::White).contains(sq) {
            Color::White
        } else if self.occupancy(Color::Black).contains(sq) {
            Color::Black
        } else {
            return None;
        };
        self.piece_on(color, sq).map(|piece| (piece, color))
    }

    /// Returns which of `color`'s pieces stands on `sq`, scanning its six boards.
    #[inline]
    pub fn piece_on(&self, color: Color, sq: Square) -> Option<Piece> {
        Piece::ALL
            .into_iter()
            .find(|&piece| self.pieces_of(piece, color).contains(sq))
    }

    /// Returns a bitboard of pieces of the given type and color.
    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[piece.board_index(color)]
    }

    /// Returns a bitboard of all pieces of one color.
    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy[color.index()]
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupancy[BOTH]
    }

    /// Returns a bitboard of all empty squares.
    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Square of `color`'s king, or `None` if it has none.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(Piece::King, color).lsb()
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        is_king_attacked(self, self.side_to_move)
    }

    /// Returns the position after `mv`, leaving `self` untouched.
    #[must_use]
    pub fn play(&self, mv: Move) -> Position {
        let mut next = *self;
        make_move(&mut next, mv);
        next
    }

    #[inline]
    pub(crate) fn board_mut(&mut self, piece: Piece, color: Color) -> &mut Bitboard {
        &mut self.pieces[piece.board_index(color)]
    }

    /// Recomputes the three occupancy boards from the piece boards.
    #[inline]
    pub(crate) fn refresh_occupancy(&mut self) {
        let (white, black) = self.pieces.split_at(6);
        let white = white.iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        let black = black.iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        self.occupancy = [white, black, white | black];
    }

    /// Checks the structural invariants: piece boards pairwise disjoint,
    /// occupancy equal to the union of the piece boards, and an en passant
    /// square (if any) behind a pawn the opponent could just have pushed.
    pub fn validate(&self) -> Result<(), PositionError> {
        let mut seen = Bitboard::EMPTY;
        for &board in &self.pieces {
            if let Some(square) = (seen & board).lsb() {
                return Err(PositionError::OverlappingPieces { square });
            }
            seen |= board;
        }

        let mut expected = *self;
        expected.refresh_occupancy();
        for (index, name) in ["white", "black", "combined"].into_iter().enumerate() {
            if expected.occupancy[index] != self.occupancy[index] {
                return Err(PositionError::StaleOccupancy(name));
            }
        }

        match self.en_passant {
            Some(sq) if sq.rank() != self.side_to_move.en_passant_rank() => {
                Err(PositionError::InvalidEnPassant(sq))
            }
            _ => Ok(()),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagram())
    }
}
