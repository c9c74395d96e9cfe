//! Sliding piece (bishop, rook, queen) move generation.

use std::ops::Range;

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::square::Square;

use super::sink::MoveSink;
use super::tables::{DIRECTION_OFFSETS, DISTANCE_TO_EDGE};

/// Walk each ray in `rays` from `from` until blocked. A friendly blocker ends
/// the ray, an enemy blocker adds one capture and ends it. Returns `true` on a
/// probe hit.
pub(super) fn gen_slider<S: MoveSink>(
    board: &Board,
    from: Square,
    us: Color,
    rays: Range<usize>,
    sink: &mut S,
) -> bool {
    for dir in rays {
        let offset = DIRECTION_OFFSETS[dir];
        let mut to = from;
        for _ in 0..DISTANCE_TO_EDGE[from.index()][dir] {
            to = to.offset(offset);
            if sink.hits(to) {
                return true;
            }
            match board.piece_at(to) {
                None => sink.push(Move::new(from, to)),
                Some(piece) => {
                    if piece.color() != us {
                        sink.push(Move::new(from, to));
                    }
                    break;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::color::Color;
    use crate::movegen::{generate_pseudo_legal_moves, is_square_attacked};
    use crate::square::Square;

    #[test]
    fn lone_rook_has_14_moves() {
        let board: Board = "7k/8/8/8/3R4/8/8/K7 w - - 0 1".parse().unwrap();
        let moves = generate_pseudo_legal_moves(&board);
        assert_eq!(moves.iter().filter(|m| m.origin() == Square::D4).count(), 14);
    }

    #[test]
    fn queen_stops_at_blockers() {
        // Queen d1 boxed in by own pawns except the capture on d2.
        let board: Board = "4k3/8/8/8/8/8/2PpP3/3QK3 w - - 0 1".parse().unwrap();
        let moves = generate_pseudo_legal_moves(&board);
        let queen: Vec<_> = moves.iter().filter(|m| m.origin() == Square::D1).collect();
        // d2 capture, c1, b1, a1.
        assert_eq!(queen.len(), 4);
        assert!(queen.iter().any(|m| m.target() == Square::D2));
    }

    #[test]
    fn blocked_ray_does_not_attack() {
        let board: Board = "4k3/8/8/8/r2P3K/8/8/8 w - - 0 1".parse().unwrap();
        assert!(is_square_attacked(&board, Square::C4, Color::Black));
        assert!(is_square_attacked(&board, Square::D4, Color::Black));
        assert!(!is_square_attacked(&board, Square::H4, Color::Black));
    }
}
