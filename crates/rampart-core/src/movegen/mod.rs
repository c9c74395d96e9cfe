//! Move generation: pseudo-legal candidates per piece kind, a probe mode for
//! attack detection, and a make/probe/undo legality filter.

mod king;
mod knights;
mod pawns;
mod sink;
mod sliders;
mod tables;

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use self::king::gen_king;
use self::knights::gen_knight;
use self::pawns::gen_pawn;
use self::sink::{Collect, MoveSink, Probe};
use self::sliders::gen_slider;
use self::tables::{ALL_RAYS, DIAGONAL, ORTHOGONAL};

/// Stack-allocated buffer for generated moves. Capacity 256 covers the 218-move
/// maximum of positions whose material [`Board::validate`] accepts.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; 256],
    len: u16,
}

impl MoveList {
    /// Create an empty move list.
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::new(Square::A1, Square::A1); 256],
            len: 0,
        }
    }

    /// Push a move onto the list.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!((self.len as usize) < 256);
        self.moves[self.len as usize] = mv;
        self.len += 1;
    }

    /// Return the number of moves in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Return `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len as usize]
    }

    /// Return a mutable slice of the moves, for in-place reordering.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len as usize]
    }

    /// Iterate over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Return `true` if an equal move is in the list.
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    /// Keep only the moves for which `keep` returns `true`, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&Move) -> bool) {
        let mut kept = 0;
        for i in 0..self.len() {
            let mv = self.moves[i];
            if keep(&mv) {
                self.moves[kept] = mv;
                kept += 1;
            }
        }
        self.len = kept as u16;
    }

    /// Stable sort, highest [`Move::priority`] first.
    pub fn sort_by_priority(&mut self) {
        self.as_mut_slice()
            .sort_by_key(|mv| std::cmp::Reverse(mv.priority()));
    }

    /// Move `mv` to the front, shifting the moves before it back by one.
    /// Returns `false` (and leaves the list alone) if `mv` is absent.
    pub fn move_to_front(&mut self, mv: Move) -> bool {
        match self.as_slice().iter().position(|&m| m == mv) {
            Some(pos) => {
                self.as_mut_slice()[..=pos].rotate_right(1);
                true
            }
            None => false,
        }
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::iter::Take<std::array::IntoIter<Move, 256>>;
    fn into_iter(self) -> Self::IntoIter {
        let len = self.len();
        self.moves.into_iter().take(len)
    }
}

/// Candidate-move generator, selected by piece kind.
enum Mover {
    Knight,
    Slider(std::ops::Range<usize>),
    Pawn,
    King,
}

impl Mover {
    fn for_kind(kind: PieceKind) -> Mover {
        match kind {
            PieceKind::Knight => Mover::Knight,
            PieceKind::Bishop => Mover::Slider(DIAGONAL),
            PieceKind::Rook => Mover::Slider(ORTHOGONAL),
            PieceKind::Queen => Mover::Slider(ALL_RAYS),
            PieceKind::Pawn => Mover::Pawn,
            PieceKind::King => Mover::King,
        }
    }

    fn generate<S: MoveSink>(&self, board: &Board, from: Square, us: Color, sink: &mut S) -> bool {
        match self {
            Mover::Knight => gen_knight(board, from, us, sink),
            Mover::Slider(rays) => gen_slider(board, from, us, rays.clone(), sink),
            Mover::Pawn => gen_pawn(board, from, us, sink),
            Mover::King => gen_king(board, from, us, sink),
        }
    }
}

/// Run every generator for `us` into `sink`, walking the location index.
/// Stops at, and returns `true` on, the first probe hit.
fn generate<S: MoveSink>(board: &Board, us: Color, sink: &mut S) -> bool {
    for kind in PieceKind::ALL {
        let mover = Mover::for_kind(kind);
        for &from in board.pieces(kind, us) {
            if mover.generate(board, from, us, sink) {
                return true;
            }
        }
    }
    false
}

/// Return `true` if any piece of `by` could move to `sq`.
///
/// Pawns count only their capture diagonals and castling never counts.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    generate(board, by, &mut Probe(sq))
}

/// Return `true` if the side to move's king is attacked.
pub fn is_in_check(board: &Board) -> bool {
    let us = board.side_to_move();
    board
        .king_square(us)
        .is_some_and(|king| is_square_attacked(board, king, !us))
}

/// Generate every pseudo-legal move for the side to move. Some may leave the
/// mover's own king in check.
pub fn generate_pseudo_legal_moves(board: &Board) -> MoveList {
    let mut list = MoveList::new();
    generate(board, board.side_to_move(), &mut Collect(&mut list));
    list
}

/// Generate every legal move for the side to move.
///
/// Each pseudo-legal move is made, the opponent probes for the mover's king,
/// and the move is undone. The board is left exactly as it was.
pub fn generate_legal_moves(board: &mut Board) -> MoveList {
    let us = board.side_to_move();
    let mut legal = MoveList::new();
    for mv in generate_pseudo_legal_moves(board) {
        board.make_move(mv);
        let safe = board
            .king_square(us)
            .is_none_or(|king| !is_square_attacked(board, king, !us));
        board.undo();
        if safe {
            legal.push(mv);
        }
    }
    legal
}

/// Reorders a legal move list in place; may also drop moves.
pub type MoveOrdering<'a> = &'a dyn Fn(&Board, &mut MoveList);

/// Generate legal moves, then apply `ordering` and move `principal` (when
/// present in the list) to the front.
pub fn generate_ordered_moves(
    board: &mut Board,
    ordering: Option<MoveOrdering<'_>>,
    principal: Option<Move>,
) -> MoveList {
    let mut moves = generate_legal_moves(board);
    if let Some(order) = ordering {
        order(board, &mut moves);
    }
    if let Some(hint) = principal {
        moves.move_to_front(hint);
    }
    moves
}
