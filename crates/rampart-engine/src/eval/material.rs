//! Material values and balance.
//!
//! All balances are returned from White's perspective (positive = White ahead).

use rampart_core::{Board, Color, PieceKind};

/// Base material values indexed by [`PieceKind::index()`].
///
/// | Piece  | value |
/// |--------|-------|
/// | King   | 1000  |
/// | Pawn   |  100  |
/// | Knight |  300  |
/// | Bishop |  330  |
/// | Rook   |  500  |
/// | Queen  |  900  |
///
/// The king's value only matters for move ordering; it never enters the balance.
pub const MATERIAL_VALUE: [i32; 6] = [
    1000, // King
    100,  // Pawn
    300,  // Knight
    330,  // Bishop
    500,  // Rook
    900,  // Queen
];

/// Material value of a piece kind.
#[inline]
pub const fn value(kind: PieceKind) -> i32 {
    MATERIAL_VALUE[kind.index()]
}

/// Non-king material tallies for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    /// White's material minus Black's.
    pub balance: i32,
    /// Both sides' material added together.
    pub total: i32,
}

/// Count non-king material for both sides using the piece location index.
pub fn material(board: &Board) -> Material {
    let mut balance = 0;
    let mut total = 0;

    for kind in PieceKind::ALL {
        if kind == PieceKind::King {
            continue;
        }
        let white = board.pieces(kind, Color::White).len() as i32;
        let black = board.pieces(kind, Color::Black).len() as i32;
        balance += value(kind) * (white - black);
        total += value(kind) * (white + black);
    }

    Material { balance, total }
}
