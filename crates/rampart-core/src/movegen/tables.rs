//! Precomputed geometry: ray directions, distance to the board edge along
//! each ray, and the clipped knight and king target lists.

use crate::square::Square;

/// Square-index delta for each ray direction, in the order
/// N, S, W, E, NW, SE, NE, SW.
pub(crate) const DIRECTION_OFFSETS: [i8; 8] = [8, -8, -1, 1, 7, -7, 9, -9];

/// Orthogonal rays (rook moves).
pub(crate) const ORTHOGONAL: std::ops::Range<usize> = 0..4;
/// Diagonal rays (bishop moves).
pub(crate) const DIAGONAL: std::ops::Range<usize> = 4..8;
/// All rays (queen moves).
pub(crate) const ALL_RAYS: std::ops::Range<usize> = 0..8;

/// Number of squares between each square and the board edge along each
/// direction of [`DIRECTION_OFFSETS`].
pub(crate) const DISTANCE_TO_EDGE: [[u8; 8]; 64] = {
    let mut table = [[0u8; 8]; 64];
    let mut index = 0;
    while index < 64 {
        let rank = (index / 8) as u8;
        let file = (index % 8) as u8;
        let north = 7 - rank;
        let south = rank;
        let west = file;
        let east = 7 - file;
        table[index] = [
            north,
            south,
            west,
            east,
            min(north, west),
            min(south, east),
            min(north, east),
            min(south, west),
        ];
        index += 1;
    }
    table
};

const fn min(a: u8, b: u8) -> u8 {
    if a < b { a } else { b }
}

/// Up to eight destination squares reachable by a single jump or step.
#[derive(Clone, Copy)]
pub(crate) struct Targets {
    squares: [Square; 8],
    len: usize,
}

impl Targets {
    #[inline]
    pub(crate) fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }
}

/// (rank delta, file delta) of the eight knight jumps.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Knight destinations per square, with jumps off the board removed.
pub(crate) const KNIGHT_TARGETS: [Targets; 64] = {
    let mut table = [Targets {
        squares: [Square::A1; 8],
        len: 0,
    }; 64];
    let mut index = 0;
    while index < 64 {
        let rank = (index / 8) as i8;
        let file = (index % 8) as i8;
        let mut jump = 0;
        while jump < 8 {
            let (dr, df) = KNIGHT_JUMPS[jump];
            let (r, f) = (rank + dr, file + df);
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                let targets = &mut table[index];
                targets.squares[targets.len] = Square::new(r as u8, f as u8);
                targets.len += 1;
            }
            jump += 1;
        }
        index += 1;
    }
    table
};

/// King destinations per square: one step along every ray that has room.
pub(crate) const KING_TARGETS: [Targets; 64] = {
    let mut table = [Targets {
        squares: [Square::A1; 8],
        len: 0,
    }; 64];
    let mut index = 0;
    while index < 64 {
        let mut dir = 0;
        while dir < 8 {
            if DISTANCE_TO_EDGE[index][dir] > 0 {
                let from = Square::new((index / 8) as u8, (index % 8) as u8);
                let targets = &mut table[index];
                targets.squares[targets.len] = from.offset(DIRECTION_OFFSETS[dir]);
                targets.len += 1;
            }
            dir += 1;
        }
        index += 1;
    }
    table
};
