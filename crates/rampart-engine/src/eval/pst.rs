//! Piece-square tables (PST) for all six piece types plus an endgame king.
//!
//! All tables are defined from White's perspective in LERF order:
//! index 0 = A1, index 7 = H1, index 8 = A2, ..., index 63 = H8.
//! Use [`pst_value`] to look up the signed value for either color.

use rampart_core::{Color, PieceKind, Square};

// ---------------------------------------------------------------------------
// Individual piece-square tables
// ---------------------------------------------------------------------------

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    // Rank 1
    -50, -40, -30, -30, -30, -30, -40, -50,
    // Rank 2
    -40, -20,   0,   5,   5,   0, -20, -40,
    // Rank 3
    -30,   5,   5,  10,  10,   5,   5, -30,
    // Rank 4
    -30,   0,  15,  15,  15,  15,   0, -30,
    // Rank 5
    -30,   5,  15,  15,  15,  15,   5, -30,
    // Rank 6
    -30,   0,  10,  15,  15,  10,   0, -30,
    // Rank 7
    -40, -20,   0,   0,   0,   0, -20, -40,
    // Rank 8
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    // Rank 1
    -20, -10, -10, -10, -10, -10, -10, -20,
    // Rank 2
    -10,  10,   0,   0,   0,   0,  10, -10,
    // Rank 3
    -10,  10,  10,  10,  10,  10,  10, -10,
    // Rank 4
    -10,   0,  10,  10,  10,  10,   0, -10,
    // Rank 5
    -10,   5,   5,  10,  10,   5,   5, -10,
    // Rank 6
    -10,   0,   5,  10,  10,   5,   0, -10,
    // Rank 7
    -10,   0,   0,   0,   0,   0,   0, -10,
    // Rank 8
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
    // Rank 1
      0,   0,   2,   5,   5,   2,   0,   0,
    // Rank 2
     -5,   0,   0,   2,   2,   0,   0,  -5,
    // Rank 3
     -5,   0,   0,   0,   0,   0,   0,  -5,
    // Rank 4
     -5,   0,   0,   0,   0,   0,   0,  -5,
    // Rank 5
     -5,   0,   0,   0,   0,   0,   0,  -5,
    // Rank 6
     -5,   0,   0,   0,   0,   0,   0,  -5,
    // Rank 7
      5,  10,  10,  10,  10,  10,  10,   5,
    // Rank 8
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    // Rank 1
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    // Rank 2
    -10,   0,   5,   0,   0,   0,   0, -10,
    // Rank 3
    -10,   5,   5,   5,   5,   5,   0, -10,
    // Rank 4
      0,   0,   5,  10,  10,   5,   0,  -5,
    // Rank 5
     -5,   0,   5,  10,  10,   5,   0,  -5,
    // Rank 6
    -10,   0,   5,   5,   5,   5,   0, -10,
    // Rank 7
    -10,   0,   0,   0,   0,   0,   0, -10,
    // Rank 8
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

/// Pawn PST. Rank 1 and rank 8 entries are zero: pawns never sit there.
#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
    // Rank 1
      0,   0,   0,   0,   0,   0,   0,   0,
    // Rank 2
      5,  10,  10, -20, -20,  10,  10,   5,
    // Rank 3
      5,  -5, -10,   0,   0, -10,  -5,   5,
    // Rank 4
      0,   0,  10,  30,  30,  10,   0,   0,
    // Rank 5
      5,   5,  20,  35,  35,  20,   5,   5,
    // Rank 6
     10,  10,  20,  40,  40,  20,  10,  10,
    // Rank 7
     50,  50,  50,  50,  50,  50,  50,  50,
    // Rank 8
      0,   0,   0,   0,   0,   0,   0,   0,
];

/// King PST while material remains: stay sheltered on the back rank.
#[rustfmt::skip]
const KING_PST: [i32; 64] = [
    // Rank 1
     20,  30,  10,   0,   0,  10,  30,  20,
    // Rank 2
     20,  20, -10, -10, -10, -10,  20,  20,
    // Rank 3
    -10, -20, -20, -20, -20, -20, -20, -10,
    // Rank 4
    -40, -40, -40, -50, -50, -40, -40, -40,
    // Rank 5
    -50, -50, -60, -70, -70, -60, -50, -50,
    // Rank 6
    -50, -60, -80, -90, -90, -80, -60, -50,
    // Rank 7
    -50, -60, -80, -90, -90, -80, -60, -50,
    // Rank 8
    -50, -60, -80, -90, -90, -80, -60, -50,
];

/// King PST once material is thin: walk to the centre.
#[rustfmt::skip]
const KING_ENDGAME_PST: [i32; 64] = [
    // Rank 1
    -50, -30, -30, -30, -30, -30, -30, -50,
    // Rank 2
    -30, -30,   0,   0,   0,   0, -30, -30,
    // Rank 3
    -30, -10,  20,  30,  30,  20, -10, -30,
    // Rank 4
    -30, -10,  30,  40,  40,  30, -10, -30,
    // Rank 5
    -30, -10,  30,  40,  40,  30, -10, -30,
    // Rank 6
    -30, -10,  20,  30,  30,  20, -10, -30,
    // Rank 7
    -30, -20, -10,   0,   0, -10, -20, -30,
    // Rank 8
    -50, -40, -30, -20, -20, -30, -40, -50,
];

/// Middlegame piece-square tables indexed `[piece_kind][square]`.
///
/// Use [`pst_value`] rather than indexing this directly, so that color
/// mirroring is handled correctly.
pub static PST: [[i32; 64]; 6] = [
    KING_PST,
    PAWN_PST,
    KNIGHT_PST,
    BISHOP_PST,
    ROOK_PST,
    QUEEN_PST,
];

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

/// Positional bonus for a piece of `kind` and `color` on `sq`, from that
/// piece's own point of view (positive = good square for its owner).
///
/// For Black pieces the square is mirrored vertically (`sq ^ 56`). The king
/// reads from the endgame table when `endgame` is set.
#[inline]
pub fn relative_value(kind: PieceKind, color: Color, sq: Square, endgame: bool) -> i32 {
    let idx = match color {
        Color::White => sq.index(),
        Color::Black => sq.index() ^ 56,
    };
    if endgame && kind == PieceKind::King {
        KING_ENDGAME_PST[idx]
    } else {
        PST[kind.index()][idx]
    }
}

/// Positional bonus from White's point of view: Black's values are negated.
#[inline]
pub fn pst_value(kind: PieceKind, color: Color, sq: Square, endgame: bool) -> i32 {
    let value = relative_value(kind, color, sq, endgame);
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
