//! King move and castling generation.

use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::is_square_attacked;
use super::sink::MoveSink;
use super::tables::KING_TARGETS;

/// Generate king steps from `from`, plus castling when collecting. Returns
/// `true` on a probe hit.
pub(super) fn gen_king<S: MoveSink>(board: &Board, from: Square, us: Color, sink: &mut S) -> bool {
    for &to in KING_TARGETS[from.index()].as_slice() {
        if sink.hits(to) {
            return true;
        }
        if board.piece_at(to).is_none_or(|piece| piece.color() != us) {
            sink.push(Move::new(from, to));
        }
    }

    // Castling never captures, so it can't answer a probe.
    if !S::PROBE {
        gen_castles(board, from, us, sink);
    }
    false
}

/// Castle when the right is held, the squares strictly between king and rook
/// are empty, and neither the king's square nor the square it crosses is
/// attacked. The landing square is left to the legality filter.
fn gen_castles<S: MoveSink>(board: &Board, from: Square, us: Color, sink: &mut S) {
    let home = Square::new(us.back_rank(), 4);
    if from != home {
        return;
    }
    let them = !us;

    for side in [CastleSide::KingSide, CastleSide::QueenSide] {
        if !board.castling().has(us, side) {
            continue;
        }
        let (rook_from, _) = side.rook_squares(us);
        if board.piece_at(rook_from) != Some(Piece::new(PieceKind::Rook, us)) {
            continue;
        }
        if !side.between(us).all(|sq| board.is_empty(sq)) {
            continue;
        }
        if is_square_attacked(board, home, them) || is_square_attacked(board, side.transit(us), them) {
            continue;
        }
        sink.push(Move::new_castle(home, side.king_target(us), side));
    }
}
