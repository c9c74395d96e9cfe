//! Castling rights stored as a 4-bit field within a `u8`.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Square the king lands on.
    pub const fn king_target(self, color: Color) -> Square {
        let file = match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        };
        Square::new(color.back_rank(), file)
    }

    /// Rook origin and destination squares.
    pub const fn rook_squares(self, color: Color) -> (Square, Square) {
        let rank = color.back_rank();
        match self {
            CastleSide::KingSide => (Square::new(rank, 7), Square::new(rank, 5)),
            CastleSide::QueenSide => (Square::new(rank, 0), Square::new(rank, 3)),
        }
    }

    /// Square the king crosses on its way to [`king_target`](Self::king_target).
    pub const fn transit(self, color: Color) -> Square {
        let file = match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        };
        Square::new(color.back_rank(), file)
    }

    /// Squares strictly between king and rook, all of which must be empty.
    pub fn between(self, color: Color) -> impl Iterator<Item = Square> {
        let rank = color.back_rank();
        let files = match self {
            CastleSide::KingSide => 5..7,
            CastleSide::QueenSide => 1..4,
        };
        files.map(move |file| Square::new(rank, file))
    }
}

/// Castling rights encoded as a 4-bit field: bit 0 = WK, 1 = WQ, 2 = BK, 3 = BQ.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

/// Rights lost when a move starts or ends on each square: king and rook home
/// squares. A capture on a rook's home square revokes that rook's right too.
const REVOKED_BY: [CastleRights; 64] = {
    let mut table = [CastleRights::NONE; 64];
    table[Square::E1.index()] = CastleRights::WHITE_BOTH;
    table[Square::A1.index()] = CastleRights::WHITE_QUEEN;
    table[Square::H1.index()] = CastleRights::WHITE_KING;
    table[Square::E8.index()] = CastleRights::BLACK_BOTH;
    table[Square::A8.index()] = CastleRights::BLACK_QUEEN;
    table[Square::H8.index()] = CastleRights::BLACK_KING;
    table
};

impl CastleRights {
    /// No castling rights.
    pub const NONE: CastleRights = CastleRights(0);
    /// All castling rights.
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// White king-side castling.
    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    /// White queen-side castling.
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    /// Black king-side castling.
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    /// Black queen-side castling.
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    /// Both white castling rights.
    pub const WHITE_BOTH: CastleRights = CastleRights(0b0011);
    /// Both black castling rights.
    pub const BLACK_BOTH: CastleRights = CastleRights(0b1100);

    /// Return the raw bits, usable as a 0..16 table index.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Return `true` if no castling rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Return new rights with all bits from `other` added.
    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// Return new rights with all bits from `other` removed.
    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Check whether a specific color and side can castle.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.contains(Self::flag(color, side))
    }

    /// Return the rights left after a move touching `origin` and `target`.
    #[inline]
    pub const fn after_move(self, origin: Square, target: Square) -> CastleRights {
        self.remove(REVOKED_BY[origin.index()])
            .remove(REVOKED_BY[target.index()])
    }

    /// Return the single-bit flag for a color and side.
    #[inline]
    const fn flag(color: Color, side: CastleSide) -> CastleRights {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => Self::WHITE_KING,
            (Color::White, CastleSide::QueenSide) => Self::WHITE_QUEEN,
            (Color::Black, CastleSide::KingSide) => Self::BLACK_KING,
            (Color::Black, CastleSide::QueenSide) => Self::BLACK_QUEEN,
        }
    }

    /// Parse castling rights from the FEN castling field (e.g. "KQkq", "Kq", "-").
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }
        if s.is_empty() {
            return Err(FenError::InvalidCastling { found: s.to_string() });
        }

        let mut rights = CastleRights::NONE;
        for c in s.chars() {
            let flag = match c {
                'K' => Self::WHITE_KING,
                'Q' => Self::WHITE_QUEEN,
                'k' => Self::BLACK_KING,
                'q' => Self::BLACK_QUEEN,
                _ => return Err(FenError::InvalidCastling { found: s.to_string() }),
            };
            rights = rights.insert(flag);
        }
        Ok(rights)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let letters = [
            (Self::WHITE_KING, 'K'),
            (Self::WHITE_QUEEN, 'Q'),
            (Self::BLACK_KING, 'k'),
            (Self::BLACK_QUEEN, 'q'),
        ];
        for (flag, letter) in letters {
            if self.contains(flag) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleRights, CastleSide};
    use crate::color::Color;
    use crate::square::Square;

    #[test]
    fn fen_roundtrip() {
        for fen in ["KQkq", "Kq", "k", "-", "KQ", "kq"] {
            let rights = CastleRights::from_fen(fen).unwrap();
            assert_eq!(rights.to_string(), fen);
        }
        // Non-canonical order still parses.
        assert_eq!(CastleRights::from_fen("qkQK").unwrap(), CastleRights::ALL);
    }

    #[test]
    fn fen_invalid() {
        assert!(CastleRights::from_fen("KQxq").is_err());
        assert!(CastleRights::from_fen("").is_err());
        assert!(CastleRights::from_fen("1").is_err());
    }

    #[test]
    fn has_color_side() {
        let rights = CastleRights::from_fen("Kq").unwrap();
        assert!(rights.has(Color::White, CastleSide::KingSide));
        assert!(!rights.has(Color::White, CastleSide::QueenSide));
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
        assert!(rights.has(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    fn king_move_revokes_both() {
        let rights = CastleRights::ALL.after_move(Square::E1, Square::E2);
        assert_eq!(rights, CastleRights::BLACK_BOTH);
    }

    #[test]
    fn rook_capture_revokes_victim_side() {
        let rights = CastleRights::ALL.after_move(Square::B7, Square::H8);
        assert_eq!(rights, CastleRights::ALL.remove(CastleRights::BLACK_KING));
    }

    #[test]
    fn unrelated_move_keeps_rights() {
        assert_eq!(CastleRights::ALL.after_move(Square::E2, Square::E4), CastleRights::ALL);
    }

    #[test]
    fn castle_geometry() {
        assert_eq!(CastleSide::KingSide.king_target(Color::White), Square::G1);
        assert_eq!(CastleSide::QueenSide.king_target(Color::Black), Square::C8);
        assert_eq!(
            CastleSide::QueenSide.rook_squares(Color::White),
            (Square::A1, Square::D1)
        );
        assert_eq!(CastleSide::KingSide.transit(Color::Black), Square::F8);
        let between: Vec<_> = CastleSide::QueenSide.between(Color::White).collect();
        assert_eq!(between, vec![Square::B1, Square::C1, Square::D1]);
    }
}
