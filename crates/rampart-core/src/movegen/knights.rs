//! Knight move generation.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::square::Square;

use super::sink::MoveSink;
use super::tables::KNIGHT_TARGETS;

/// Generate knight jumps from `from`. Returns `true` on a probe hit.
pub(super) fn gen_knight<S: MoveSink>(board: &Board, from: Square, us: Color, sink: &mut S) -> bool {
    for &to in KNIGHT_TARGETS[from.index()].as_slice() {
        if sink.hits(to) {
            return true;
        }
        if board.piece_at(to).is_none_or(|piece| piece.color() != us) {
            sink.push(Move::new(from, to));
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::movegen::generate_pseudo_legal_moves;
    use crate::square::Square;

    #[test]
    fn corner_knight_with_friendly_blocker() {
        let board: Board = "4k3/8/8/8/8/1P6/8/N3K3 w - - 0 1".parse().unwrap();
        let moves = generate_pseudo_legal_moves(&board);
        let knight: Vec<_> = moves.iter().filter(|m| m.origin() == Square::A1).collect();
        assert_eq!(knight.len(), 1);
        assert_eq!(knight[0].target(), Square::C2);
    }

    #[test]
    fn knight_captures_enemy() {
        let board: Board = "4k3/8/8/3p4/8/4N3/8/4K3 w - - 0 1".parse().unwrap();
        let moves = generate_pseudo_legal_moves(&board);
        assert!(moves.iter().any(|m| m.origin() == Square::E3 && m.target() == Square::D5));
    }
}
