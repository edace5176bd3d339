//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{CastlingRights, Color, Piece, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: expected 8 ranks, got {0}")]
    InvalidRankCount(usize),

    #[error("invalid piece placement: unexpected character '{ch}' in rank {rank}")]
    InvalidPiece { ch: char, rank: u8 },

    #[error("invalid piece placement: rank {rank} has {squares} squares, expected 8")]
    InvalidRankLength { rank: u8, squares: u32 },

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A fully parsed FEN record.
///
/// Every field is already typed and validated; a position type only has to
/// copy the placement into its own representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece on each square, indexed a1 = 0 .. h8 = 63.
    pub board: [Option<(Piece, Color)>; 64],
    /// Side to move.
    pub side_to_move: Color,
    /// Castling availability.
    pub castling: CastlingRights,
    /// En passant target square, always on rank 3 or rank 6.
    pub en_passant: Option<Square>,
    /// Halfmove clock (for 50-move rule).
    pub halfmove_clock: u32,
    /// Fullmove number.
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let board = Self::parse_placement(parts[0])?;

        let side_to_move = Color::from_fen(parts[1])
            .ok_or_else(|| FenError::InvalidActiveColor(parts[1].to_string()))?;

        let castling = CastlingRights::from_fen(parts[2])
            .ok_or_else(|| FenError::InvalidCastlingRights(parts[2].to_string()))?;

        let en_passant = Self::parse_en_passant(parts[3], side_to_move)?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(Fen {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(placement: &str) -> Result<[Option<(Piece, Color)>; 64], FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount(ranks.len()));
        }

        let mut board = [None; 64];
        // FEN lists rank 8 first.
        for (rank, text) in (0..8u8).rev().zip(ranks) {
            let rank_number = rank + 1;
            let mut file = 0u32;
            for ch in text.chars() {
                let width = match ch {
                    '1'..='8' => ch as u32 - '0' as u32,
                    _ => {
                        let piece = Piece::from_fen_char(ch)
                            .ok_or(FenError::InvalidPiece { ch, rank: rank_number })?;
                        if file < 8 {
                            board[(rank as u32 * 8 + file) as usize] = Some(piece);
                        }
                        1
                    }
                };
                file += width;
            }
            if file != 8 {
                return Err(FenError::InvalidRankLength {
                    rank: rank_number,
                    squares: file,
                });
            }
        }

        Ok(board)
    }

    fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<Square>, FenError> {
        if field == "-" {
            return Ok(None);
        }
        // The target lies behind a pawn the opponent just double-pushed.
        match Square::from_algebraic(field) {
            Some(sq) if sq.rank() == side_to_move.en_passant_rank() => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
        }
    }

    /// Converts the record back to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_string()
    }

    /// Writes only the piece placement field.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(64);
        for rank in (0..8usize).rev() {
            let mut empty = 0;
            for file in 0..8usize {
                match self.board[rank * 8 + file] {
                    Some((piece, color)) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let en_passant = match self.en_passant {
            Some(sq) => sq.to_algebraic(),
            None => "-".to_string(),
        };
        write!(
            f,
            "{} {} {} {} {} {}",
            self.placement(),
            self.side_to_move.to_fen_char(),
            self.castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Default for Fen {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CastleSide, File, Rank};
    use proptest::prelude::*;

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castling, CastlingRights::ALL);
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.board[0], Some((Piece::Rook, Color::White)));
        assert_eq!(fen.board[4], Some((Piece::King, Color::White)));
        assert_eq!(fen.board[60], Some((Piece::King, Color::Black)));
        assert_eq!(fen.board.iter().filter(|p| p.is_some()).count(), 32);
    }

    #[test]
    fn parse_custom_position() {
        let fen =
            Fen::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.halfmove_clock, 2);
        assert_eq!(fen.fullmove_number, 3);
        let f3 = Square::new(File::F, Rank::R3);
        assert_eq!(fen.board[f3.index() as usize], Some((Piece::Knight, Color::White)));
    }

    #[test]
    fn roundtrip() {
        let original = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = Fen::parse(original).unwrap();
        assert_eq!(parsed.to_fen(), original);
        assert_eq!(original.parse::<Fen>().unwrap(), parsed);
    }

    #[test]
    fn invalid_part_count() {
        assert_eq!(Fen::parse("invalid"), Err(FenError::InvalidPartCount(1)));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - -"),
            Err(FenError::InvalidPartCount(4))
        ));
    }

    #[test]
    fn invalid_active_color() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_rank_count() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidRankCount(7))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidRankCount(9))
        );
    }

    #[test]
    fn invalid_piece_char() {
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiece { ch: 'X', rank: 2 })
        );
        assert!(matches!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPP0PPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiece { ch: '0', .. })
        ));
    }

    #[test]
    fn invalid_rank_length() {
        assert_eq!(
            Fen::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidRankLength { rank: 8, squares: 9 })
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/7/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidRankLength { rank: 4, squares: 7 })
        );
        assert!(matches!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/88/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidRankLength { .. })
        ));
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w KKq - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        for field in ["abc", "x3", "e4", "e9", "3e"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - {} 0 1", field);
            assert!(
                matches!(Fen::parse(&fen), Err(FenError::InvalidEnPassantSquare(_))),
                "{} should be rejected",
                field
            );
        }
    }

    #[test]
    fn invalid_counters() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - -1 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
    }

    #[test]
    fn fen_default() {
        let fen = Fen::default();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn fen_partial_castling() {
        let fen = Fen::parse("8/8/8/8/8/8/8/8 w Kq - 0 1").unwrap();
        assert!(fen.castling.has(Color::White, CastleSide::King));
        assert!(!fen.castling.has(Color::White, CastleSide::Queen));
        assert!(fen.castling.has(Color::Black, CastleSide::Queen));
        assert_eq!(fen.to_fen(), "8/8/8/8/8/8/8/8 w Kq - 0 1");
    }

    #[test]
    fn fen_en_passant_rank_follows_side_to_move() {
        let fen = Fen::parse("8/8/8/8/8/8/8/8 w - d6 0 1").unwrap();
        assert_eq!(fen.en_passant, Square::from_algebraic("d6"));
        let fen = Fen::parse("8/8/8/8/8/8/8/8 b - d3 0 1").unwrap();
        assert_eq!(fen.en_passant, Square::from_algebraic("d3"));

        for fen in ["4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1", "4k3/3p4/8/8/8/8/8/4K3 b - e6 0 1"] {
            assert!(
                matches!(Fen::parse(fen), Err(FenError::InvalidEnPassantSquare(_))),
                "{} should be rejected",
                fen
            );
        }
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(format!("{}", err).contains("3"));

        let err = FenError::InvalidPiece { ch: 'X', rank: 2 };
        assert!(format!("{}", err).contains("'X'"));

        let err = FenError::InvalidCastlingRights("XYZ".to_string());
        assert!(format!("{}", err).contains("XYZ"));

        let err = FenError::InvalidEnPassantSquare("z9".to_string());
        assert!(format!("{}", err).contains("z9"));
    }

    fn arb_board() -> impl Strategy<Value = [Option<(Piece, Color)>; 64]> {
        let cell = prop_oneof![
            3 => Just(None::<(Piece, Color)>),
            1 => (0u8..6, any::<bool>()).prop_map(|(p, black)| {
                let color = if black { Color::Black } else { Color::White };
                Piece::from_index(p).map(|piece| (piece, color))
            }),
        ];
        proptest::collection::vec(cell, 64).prop_map(|cells| {
            let mut board = [None; 64];
            board.copy_from_slice(&cells);
            board
        })
    }

    proptest! {
        #[test]
        fn placement_roundtrips(board in arb_board(), black in any::<bool>(), rights in 0u8..16) {
            let fen = Fen {
                board,
                side_to_move: if black { Color::Black } else { Color::White },
                castling: CastlingRights::new(rights),
                en_passant: None,
                halfmove_clock: 3,
                fullmove_number: 17,
            };
            let text = fen.to_fen();
            prop_assert_eq!(Fen::parse(&text), Ok(fen));
        }
    }
}
