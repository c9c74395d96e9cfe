//! Pawn move generation.

use crate::board::Board;
use crate::chess_move::{Move, MoveFlag};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::sink::MoveSink;

/// Generate pawn moves from `from`. In probe mode only the two capture
/// diagonals count, since pushes never attack. Returns `true` on a probe hit.
pub(super) fn gen_pawn<S: MoveSink>(board: &Board, from: Square, us: Color, sink: &mut S) -> bool {
    let forward = us.forward();

    // Captures. Pawns never stand on either back rank, so the forward
    // diagonals are always on the board; only the files need clipping.
    let diagonals = [(from.file() > 0, forward - 1), (from.file() < 7, forward + 1)];
    for (on_board, delta) in diagonals {
        if !on_board {
            continue;
        }
        let to = from.offset(delta);
        if sink.hits(to) {
            return true;
        }
        if S::PROBE {
            continue;
        }
        match board.piece_at(to) {
            Some(piece) if piece.color() != us => push_advance(from, to, us, sink),
            None if board.en_passant() == Some(to) => {
                sink.push(Move::with_flag(from, to, MoveFlag::EnPassant));
            }
            _ => {}
        }
    }

    if S::PROBE {
        return false;
    }

    let one = from.offset(forward);
    if board.is_empty(one) {
        push_advance(from, one, us, sink);
        if from.rank() == us.pawn_rank() {
            let two = one.offset(forward);
            if board.is_empty(two) {
                sink.push(Move::with_flag(from, two, MoveFlag::DoublePush));
            }
        }
    }
    false
}

/// Push a single-step advance or capture, expanding it into one move per
/// promotion piece when it lands on the last rank.
fn push_advance<S: MoveSink>(from: Square, to: Square, us: Color, sink: &mut S) {
    if to.rank() == us.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            sink.push(Move::new_promotion(from, to, kind));
        }
    } else {
        sink.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::chess_move::MoveFlag;
    use crate::movegen::generate_pseudo_legal_moves;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn pawn_moves(fen: &str, from: Square) -> Vec<crate::Move> {
        let board: Board = fen.parse().unwrap();
        generate_pseudo_legal_moves(&board)
            .iter()
            .copied()
            .filter(|m| m.origin() == from)
            .collect()
    }

    #[test]
    fn single_and_double_push() {
        let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", Square::E2);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|m| m.flag() == MoveFlag::DoublePush && m.target() == Square::E4));
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let moves = pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", Square::E2);
        assert_eq!(moves.len(), 1);
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", Square::E2);
        assert!(moves.is_empty());
    }

    #[test]
    fn black_pawn_moves_down() {
        let moves = pawn_moves("4k3/3p4/2P5/8/8/8/8/4K3 b - - 0 1", Square::D7);
        let targets: Vec<_> = moves.iter().map(|m| m.target()).collect();
        assert_eq!(targets.len(), 3);
        assert!(targets.contains(&Square::C6));
        assert!(targets.contains(&Square::D6));
        assert!(targets.contains(&Square::D5));
    }

    #[test]
    fn edge_file_pawn_does_not_wrap() {
        let moves = pawn_moves("4k3/8/8/8/8/p7/P7/4K3 w - - 0 1", Square::A2);
        assert!(moves.is_empty());
        let moves = pawn_moves("4k3/8/8/8/8/1p5p/7P/4K3 w - - 0 1", Square::H2);
        assert!(moves.is_empty());
    }

    #[test]
    fn promotion_order_is_queen_knight_bishop_rook() {
        let moves = pawn_moves("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", Square::A7);
        let kinds: Vec<_> = moves.iter().filter_map(|m| m.promotion()).collect();
        assert_eq!(
            kinds,
            vec![PieceKind::Queen, PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook]
        );
    }

    #[test]
    fn en_passant_candidate() {
        let moves = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", Square::E5);
        assert!(moves.iter().any(|m| m.is_en_passant() && m.target() == Square::D6));
    }
}
