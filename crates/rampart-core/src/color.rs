//! Side to move.

use std::fmt;
use std::ops::Not;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Total number of colors.
    pub const COUNT: usize = 2;

    /// Both colors, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Return the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the opposite color.
    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Square-index delta of a single pawn push for this side.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }

    /// Rank (0-based) pawns of this side start on.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank (0-based) on which pawns of this side promote.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank (0-based) holding this side's king and rooks initially.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Parse the FEN side-to-move field.
    pub fn from_fen(field: &str) -> Option<Color> {
        match field {
            "w" => Some(Color::White),
            "b" => Some(Color::Black),
            _ => None,
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "w",
            Color::Black => "b",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn flip_and_not() {
        assert_eq!(Color::White.flip(), Color::Black);
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(!!Color::White, Color::White);
    }

    #[test]
    fn pawn_geometry_is_mirrored() {
        assert_eq!(Color::White.forward(), -Color::Black.forward());
        assert_eq!(Color::White.pawn_rank() + Color::Black.pawn_rank(), 7);
        assert_eq!(Color::White.promotion_rank(), Color::Black.back_rank());
        assert_eq!(Color::Black.promotion_rank(), Color::White.back_rank());
    }

    #[test]
    fn fen_field_roundtrip() {
        for color in Color::ALL {
            assert_eq!(Color::from_fen(&color.to_string()), Some(color));
        }
        assert_eq!(Color::from_fen("W"), None);
        assert_eq!(Color::from_fen(""), None);
    }
}
