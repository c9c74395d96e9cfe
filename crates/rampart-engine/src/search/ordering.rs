//! Move ordering for the main search and for quiescence.
//!
//! Both orderers assign [`Move::priority`] and sort highest first. They plug
//! into [`generate_ordered_moves`](rampart_core::generate_ordered_moves).

use rampart_core::{Board, Move, MoveList, PieceKind};

use crate::eval::material::value;
use crate::eval::pst::relative_value;

/// Attacker value used for king captures, so the king is the last resort recapturer.
const KING_ATTACKER_VALUE: i32 = 1500;

/// Base bonus lifting every capture and promotion above quiet moves.
const TACTICAL_BASE: i32 = 1000;

/// Score a move for the main search.
///
/// - Captures: `1000 + victim - attacker`, so winning trades come first.
/// - Promotions: `1000 + value of the new piece`.
/// - Other pawn moves: distance advanced, in squares of index.
/// - Other quiet moves: ten times the piece-square gain.
fn score_move(board: &Board, mv: Move) -> i32 {
    let Some(moving) = board.piece_at(mv.origin()) else {
        return 0;
    };
    let mut score = 0;

    let victim = if mv.is_en_passant() {
        Some(PieceKind::Pawn)
    } else {
        board.piece_at(mv.target()).map(|p| p.kind())
    };
    if let Some(victim) = victim {
        let attacker = match moving.kind() {
            PieceKind::King => KING_ATTACKER_VALUE,
            kind => value(kind),
        };
        score += TACTICAL_BASE + value(victim) - attacker;
    }

    if moving.is(PieceKind::Pawn) {
        match mv.promotion() {
            Some(kind) => score += TACTICAL_BASE + value(kind),
            None => score += (mv.target().index() as i32 - mv.origin().index() as i32).abs(),
        }
    } else {
        let (kind, color) = (moving.kind(), moving.color());
        let gain = relative_value(kind, color, mv.target(), false)
            - relative_value(kind, color, mv.origin(), false);
        score += gain * 10;
    }

    score
}

/// Material won by a capture or promotion, ignoring any recapture.
fn material_gain(board: &Board, mv: Move) -> i32 {
    let mut gain = 0;
    if mv.is_en_passant() {
        gain += value(PieceKind::Pawn);
    } else if let Some(victim) = board.piece_at(mv.target()) {
        gain += value(victim.kind());
    }
    if let Some(kind) = mv.promotion() {
        gain += value(kind) - value(PieceKind::Pawn);
    }
    gain
}

/// Main-search orderer: score every move, best first.
pub fn order_moves(board: &Board, moves: &mut MoveList) {
    for mv in moves.as_mut_slice() {
        mv.set_priority(score_move(board, *mv));
    }
    moves.sort_by_priority();
}

/// Quiescence orderer: drop moves that win no material, then order the rest
/// by material gained.
pub fn order_captures(board: &Board, moves: &mut MoveList) {
    moves.retain(|mv| material_gain(board, *mv) != 0);
    for mv in moves.as_mut_slice() {
        mv.set_priority(material_gain(board, *mv));
    }
    moves.sort_by_priority();
}
