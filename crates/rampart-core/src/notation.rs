//! Human-facing move text: SAN output and coordinate (UCI) input.

use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::error::MoveParseError;
use crate::movegen::{generate_legal_moves, is_in_check};
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Render `mv` in standard algebraic notation, e.g. `Nbd7`, `exd6`, `e8=Q+`, `O-O#`.
///
/// `mv` must be legal in `board`. The board is used to find ambiguous
/// siblings and to test for check and mate; it is restored before returning.
pub fn san(board: &mut Board, mv: Move) -> String {
    let mut out = match mv.castle_side() {
        Some(CastleSide::KingSide) => String::from("O-O"),
        Some(CastleSide::QueenSide) => String::from("O-O-O"),
        None => body(board, mv),
    };

    board.make_move(mv);
    if is_in_check(board) {
        let mated = generate_legal_moves(board).is_empty();
        out.push(if mated { '#' } else { '+' });
    }
    board.undo();
    out
}

fn body(board: &mut Board, mv: Move) -> String {
    let Some(moving) = board.piece_at(mv.origin()) else {
        return mv.to_uci();
    };
    let capture = board.piece_at(mv.target()).is_some() || mv.is_en_passant();
    let mut out = String::new();

    if moving.is(PieceKind::Pawn) {
        if capture {
            out.push(mv.origin().file_char());
            out.push('x');
        }
        out.push_str(&mv.target().to_string());
        if let Some(kind) = mv.promotion() {
            out.push('=');
            out.push(kind.fen_char().to_ascii_uppercase());
        }
        return out;
    }

    out.push(moving.kind().fen_char().to_ascii_uppercase());
    let rivals: Vec<Square> = generate_legal_moves(board)
        .iter()
        .filter(|other| other.target() == mv.target() && other.origin() != mv.origin())
        .filter(|other| board.piece_at(other.origin()) == Some(moving))
        .map(|other| other.origin())
        .collect();
    if !rivals.is_empty() {
        let from = mv.origin();
        if rivals.iter().all(|sq| sq.file() != from.file()) {
            out.push(from.file_char());
        } else if rivals.iter().all(|sq| sq.rank() != from.rank()) {
            out.push(from.rank_char());
        } else {
            out.push_str(&from.to_string());
        }
    }
    if capture {
        out.push('x');
    }
    out.push_str(&mv.target().to_string());
    out
}

impl Move {
    /// Resolve coordinate text such as `e2e4` or `e7e8q` against the legal
    /// moves of `board`, recovering the flag the text leaves implicit.
    pub fn from_uci_str(text: &str, board: &mut Board) -> Result<Move, MoveParseError> {
        let malformed = || MoveParseError::Malformed { text: text.to_string() };

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(malformed());
        }
        let origin = Square::from_algebraic(&text[0..2]).ok_or_else(malformed)?;
        let target = Square::from_algebraic(&text[2..4]).ok_or_else(malformed)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_fen_char(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(malformed()),
            },
        };

        generate_legal_moves(board)
            .into_iter()
            .find(|mv| mv.origin() == origin && mv.target() == target && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::Illegal { text: text.to_string() })
    }
}
