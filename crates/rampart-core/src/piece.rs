//! Colored chess piece, packed into a single non-zero byte.

use std::fmt;
use std::num::NonZeroU8;

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A colored chess piece.
///
/// Bit layout:
/// - bits 0-2: [`PieceKind`] discriminant (1-6)
/// - bit 3: [`Color`] (0 = White, 1 = Black)
///
/// The code is never zero, so an empty square is simply `Option<Piece>::None`
/// and costs no extra space.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(NonZeroU8);

const COLOR_BIT: u8 = 0b1000;
const KIND_MASK: u8 = 0b0111;

impl Piece {
    /// Number of distinct colored pieces.
    pub const COUNT: usize = 12;

    pub const WHITE_KING: Piece = Piece::new(PieceKind::King, Color::White);
    pub const WHITE_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    pub const WHITE_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::White);
    pub const WHITE_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::White);
    pub const WHITE_ROOK: Piece = Piece::new(PieceKind::Rook, Color::White);
    pub const WHITE_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::White);
    pub const BLACK_KING: Piece = Piece::new(PieceKind::King, Color::Black);
    pub const BLACK_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::Black);
    pub const BLACK_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);
    pub const BLACK_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::Black);
    pub const BLACK_ROOK: Piece = Piece::new(PieceKind::Rook, Color::Black);
    pub const BLACK_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::Black);

    /// All 12 pieces, ordered by [`Piece::index`].
    pub const ALL: [Piece; 12] = [
        Self::WHITE_KING,
        Self::WHITE_PAWN,
        Self::WHITE_KNIGHT,
        Self::WHITE_BISHOP,
        Self::WHITE_ROOK,
        Self::WHITE_QUEEN,
        Self::BLACK_KING,
        Self::BLACK_PAWN,
        Self::BLACK_KNIGHT,
        Self::BLACK_BISHOP,
        Self::BLACK_ROOK,
        Self::BLACK_QUEEN,
    ];

    /// Create a piece from a kind and a color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        let code = (color as u8) << 3 | kind as u8;
        match NonZeroU8::new(code) {
            Some(code) => Piece(code),
            None => unreachable!(),
        }
    }

    /// Parse a FEN character: uppercase is White, lowercase is Black.
    #[inline]
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    /// Return the piece kind.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self.0.get() & KIND_MASK {
            1 => PieceKind::King,
            2 => PieceKind::Pawn,
            3 => PieceKind::Knight,
            4 => PieceKind::Bishop,
            5 => PieceKind::Rook,
            _ => PieceKind::Queen,
        }
    }

    /// Return the color.
    #[inline]
    pub const fn color(self) -> Color {
        if self.0.get() & COLOR_BIT == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Return `true` if this piece is `kind` regardless of color.
    #[inline]
    pub const fn is(self, kind: PieceKind) -> bool {
        self.0.get() & KIND_MASK == kind as u8
    }

    /// Return a contiguous index 0-11: White 0-5 then Black 6-11.
    #[inline]
    pub const fn index(self) -> usize {
        self.color().index() * PieceKind::COUNT + self.kind().index()
    }

    /// Return the raw code (never zero).
    #[inline]
    pub const fn code(self) -> u8 {
        self.0.get()
    }

    /// Return the FEN character for this piece.
    #[inline]
    pub fn fen_char(self) -> char {
        let base = self.kind().fen_char();
        match self.color() {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_prefix = match self.color() {
            Color::White => 'W',
            Color::Black => 'B',
        };
        write!(f, "{}{}", color_prefix, self.kind().fen_char().to_ascii_uppercase())
    }
}
