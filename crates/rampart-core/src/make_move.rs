//! Move execution via make/unmake on a single mutable board.

use crate::board::{Board, UndoRecord};
use crate::chess_move::{Move, MoveFlag};
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::zobrist::ZOBRIST;

impl Board {
    /// Apply a move in place, recording what [`undo`](Self::undo) needs.
    ///
    /// The move is trusted: only moves produced by the move generator for
    /// this exact position may be passed. Debug builds assert that the
    /// origin holds a piece of the side to move.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move();
        let origin = mv.origin();
        let target = mv.target();

        let Some(moving) = self.piece_at(origin) else {
            debug_assert!(false, "make_move {mv} from empty square on {self}");
            return;
        };
        debug_assert_eq!(moving.color(), us, "make_move {mv} moves the wrong side");

        let mut record = UndoRecord {
            mv,
            captured: None,
            castling: self.castling(),
            en_passant: self.en_passant(),
            halfmove_clock: self.halfmove_clock(),
            hash: self.hash(),
        };

        if let Some(ep) = self.en_passant() {
            self.toggle_hash(ZOBRIST.en_passant(ep));
        }

        if let Some(victim) = self.lift(target) {
            self.toggle_hash(ZOBRIST.piece(victim, target));
            record.captured = Some(victim);
        }

        self.lift(origin);
        self.toggle_hash(ZOBRIST.piece(moving, origin));
        if mv.promotion().is_none() {
            self.place(moving, target);
            self.toggle_hash(ZOBRIST.piece(moving, target));
        }

        let rights = self.castling().after_move(origin, target);
        if rights != self.castling() {
            self.toggle_hash(ZOBRIST.castling(self.castling()) ^ ZOBRIST.castling(rights));
            self.set_castling(rights);
        }

        match mv.flag() {
            MoveFlag::Promotion(kind) => {
                let promoted = Piece::new(kind, us);
                self.place(promoted, target);
                self.toggle_hash(ZOBRIST.piece(promoted, target));
            }
            MoveFlag::KingCastle | MoveFlag::QueenCastle => {
                if let Some(side) = mv.castle_side() {
                    let (rook_from, rook_to) = side.rook_squares(us);
                    if let Some(rook) = self.lift(rook_from) {
                        self.place(rook, rook_to);
                        self.toggle_hash(ZOBRIST.piece(rook, rook_from) ^ ZOBRIST.piece(rook, rook_to));
                    }
                }
            }
            MoveFlag::EnPassant => {
                let victim_sq = target.offset(-us.forward());
                if let Some(victim) = self.lift(victim_sq) {
                    self.toggle_hash(ZOBRIST.piece(victim, victim_sq));
                    record.captured = Some(victim);
                }
            }
            MoveFlag::None | MoveFlag::DoublePush => {}
        }

        if mv.flag() == MoveFlag::DoublePush {
            let ep = origin.offset(us.forward());
            self.set_en_passant(Some(ep));
            self.toggle_hash(ZOBRIST.en_passant(ep));
        } else {
            self.set_en_passant(None);
        }

        if record.captured.is_some() || moving.is(PieceKind::Pawn) {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(self.halfmove_clock().saturating_add(1));
        }

        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number().saturating_add(1));
        }
        self.set_side_to_move(!us);
        self.toggle_hash(ZOBRIST.side_to_move());

        self.push_history(record);
    }

    /// Take back the most recent move.
    ///
    /// Returns the move undone, or `None` when the history is empty (the
    /// board is back at the position it was constructed from).
    pub fn undo(&mut self) -> Option<Move> {
        let record = self.pop_history()?;
        let mv = record.mv;
        let us = !self.side_to_move();
        let origin = mv.origin();
        let target = mv.target();

        match mv.flag() {
            MoveFlag::Promotion(_) => {
                self.lift(target);
                self.place(Piece::new(PieceKind::Pawn, us), origin);
            }
            MoveFlag::KingCastle | MoveFlag::QueenCastle => {
                if let Some(king) = self.lift(target) {
                    self.place(king, origin);
                }
                if let Some(side) = mv.castle_side() {
                    let (rook_from, rook_to) = side.rook_squares(us);
                    if let Some(rook) = self.lift(rook_to) {
                        self.place(rook, rook_from);
                    }
                }
            }
            MoveFlag::None | MoveFlag::DoublePush | MoveFlag::EnPassant => {
                if let Some(piece) = self.lift(target) {
                    self.place(piece, origin);
                }
            }
        }

        if let Some(victim) = record.captured {
            let victim_sq = if mv.is_en_passant() {
                target.offset(-us.forward())
            } else {
                target
            };
            self.place(victim, victim_sq);
        }

        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number().saturating_sub(1));
        }
        self.set_side_to_move(us);
        self.set_castling(record.castling);
        self.set_en_passant(record.en_passant);
        self.set_halfmove_clock(record.halfmove_clock);
        self.set_hash(record.hash);

        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::castle_rights::{CastleRights, CastleSide};
    use crate::chess_move::{Move, MoveFlag};
    use crate::color::Color;
    use crate::movegen::generate_legal_moves;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;
    use crate::zobrist::ZOBRIST;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    /// Apply `mv`, check the hash against a recomputation, undo, and check
    /// the board is bit-for-bit what it was.
    fn make_undo_check(fen: &str, mv: Move) -> Board {
        let mut b = board(fen);
        let before = b.clone();
        b.make_move(mv);
        assert_eq!(b.hash(), ZOBRIST.hash(&b), "hash drift after {mv}");
        b.validate().unwrap();
        let after = b.clone();
        assert_eq!(b.undo(), Some(mv));
        assert_eq!(b, before, "undo of {mv} did not restore the board");
        after
    }

    #[test]
    fn quiet_move() {
        let b = make_undo_check(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Move::new(Square::G1, Square::F3),
        );
        assert_eq!(b.piece_at(Square::F3), Some(Piece::WHITE_KNIGHT));
        assert_eq!(b.piece_at(Square::G1), None);
        assert_eq!(b.side_to_move(), Color::Black);
        assert_eq!(b.halfmove_clock(), 1);
        assert_eq!(b.fullmove_number(), 1);
    }

    #[test]
    fn double_push_sets_en_passant() {
        let b = make_undo_check(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Move::with_flag(Square::E2, Square::E4, MoveFlag::DoublePush),
        );
        assert_eq!(b.en_passant(), Some(Square::E3));
        assert_eq!(b.halfmove_clock(), 0);
    }

    #[test]
    fn black_move_increments_fullmove() {
        let b = make_undo_check(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            Move::new(Square::G8, Square::F6),
        );
        assert_eq!(b.fullmove_number(), 2);
        assert_eq!(b.en_passant(), None);
    }

    #[test]
    fn capture_resets_clock_and_records_victim() {
        let b = make_undo_check(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 5 2",
            Move::new(Square::E4, Square::D5),
        );
        assert_eq!(b.piece_at(Square::D5), Some(Piece::WHITE_PAWN));
        assert_eq!(b.pieces(PieceKind::Pawn, Color::Black).len(), 7);
        assert_eq!(b.halfmove_clock(), 0);
    }

    #[test]
    fn en_passant_removes_pawn_behind_target() {
        let b = make_undo_check(
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            Move::with_flag(Square::E5, Square::F6, MoveFlag::EnPassant),
        );
        assert_eq!(b.piece_at(Square::F6), Some(Piece::WHITE_PAWN));
        assert_eq!(b.piece_at(Square::F5), None);
        assert_eq!(b.piece_at(Square::D5), Some(Piece::BLACK_PAWN));
    }

    #[test]
    fn black_en_passant() {
        let b = make_undo_check(
            "rnbqkbnr/ppp1pppp/8/8/2Pp4/8/PP1PPPPP/RNBQKBNR b KQkq c3 0 2",
            Move::with_flag(Square::D4, Square::C3, MoveFlag::EnPassant),
        );
        assert_eq!(b.piece_at(Square::C3), Some(Piece::BLACK_PAWN));
        assert_eq!(b.piece_at(Square::C4), None);
    }

    #[test]
    fn castling_all_four() {
        let fen_w = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
        let fen_b = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1";
        let cases = [
            (fen_w, Square::E1, Square::G1, CastleSide::KingSide, Square::F1),
            (fen_w, Square::E1, Square::C1, CastleSide::QueenSide, Square::D1),
            (fen_b, Square::E8, Square::G8, CastleSide::KingSide, Square::F8),
            (fen_b, Square::E8, Square::C8, CastleSide::QueenSide, Square::D8),
        ];
        for (fen, from, to, side, rook_to) in cases {
            let b = make_undo_check(fen, Move::new_castle(from, to, side));
            let us = !b.side_to_move();
            assert_eq!(b.piece_at(to), Some(Piece::new(PieceKind::King, us)));
            assert_eq!(b.piece_at(rook_to), Some(Piece::new(PieceKind::Rook, us)));
            assert_eq!(b.piece_at(from), None);
            let remaining = match us {
                Color::White => CastleRights::BLACK_BOTH,
                Color::Black => CastleRights::WHITE_BOTH,
            };
            assert_eq!(b.castling(), remaining);
        }
    }

    #[test]
    fn rook_move_revokes_one_right() {
        let b = make_undo_check(
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1",
            Move::new(Square::H1, Square::G1),
        );
        assert_eq!(b.castling().to_string(), "Qkq");
    }

    #[test]
    fn capturing_home_rook_revokes_its_right() {
        let b = make_undo_check(
            "r3k2r/pppppppp/8/8/8/8/1PPPPPPP/R3K2R w KQkq - 0 1",
            Move::new(Square::A1, Square::A8),
        );
        assert_eq!(b.castling().to_string(), "Kk");
    }

    #[test]
    fn promotion_and_capture_promotion() {
        let fen = "r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1";
        for kind in PieceKind::PROMOTIONS {
            let b = make_undo_check(fen, Move::new_promotion(Square::B7, Square::B8, kind));
            assert_eq!(b.piece_at(Square::B8), Some(Piece::new(kind, Color::White)));
            assert!(b.pieces(PieceKind::Pawn, Color::White).is_empty());

            let b = make_undo_check(fen, Move::new_promotion(Square::B7, Square::A8, kind));
            assert_eq!(b.piece_at(Square::A8), Some(Piece::new(kind, Color::White)));
            assert!(b.pieces(PieceKind::Rook, Color::Black).is_empty());
        }
    }

    #[test]
    fn undo_on_fresh_board_is_noop() {
        let mut b = Board::starting_position();
        let before = b.clone();
        assert_eq!(b.undo(), None);
        assert_eq!(b, before);
    }

    #[test]
    fn history_depth_tracks_moves() {
        let mut b = Board::starting_position();
        let moves = [
            Move::with_flag(Square::E2, Square::E4, MoveFlag::DoublePush),
            Move::with_flag(Square::E7, Square::E5, MoveFlag::DoublePush),
            Move::new(Square::G1, Square::F3),
        ];
        for (i, mv) in moves.into_iter().enumerate() {
            b.make_move(mv);
            assert_eq!(b.history_len(), i + 1);
            assert_eq!(b.last_move(), Some(mv));
        }
        assert!(b.moves_played().eq(moves));
        while b.undo().is_some() {}
        assert_eq!(b, Board::starting_position());
    }

    #[test]
    fn every_move_changes_hash_and_undo_restores_it() {
        let mut b = board("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
        let original = b.hash();
        for mv in generate_legal_moves(&mut b) {
            b.make_move(mv);
            assert_ne!(b.hash(), original, "{mv} did not change the hash");
            b.undo();
            assert_eq!(b.hash(), original, "undo of {mv} did not restore the hash");
        }
    }

    #[test]
    fn inverse_law_over_all_moves() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ];
        for fen in fens {
            let mut b = board(fen);
            let before = b.clone();
            for mv in generate_legal_moves(&mut b) {
                b.make_move(mv);
                assert_eq!(b.hash(), ZOBRIST.hash(&b), "{fen}: hash drift after {mv}");
                b.validate().unwrap();
                b.undo();
                assert_eq!(b, before, "{fen}: undo of {mv}");
            }
        }
    }
}
