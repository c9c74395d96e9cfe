//! Zobrist hashing keys.
//!
//! Keys are generated at compile time from a fixed seed, so every build and
//! every process hashes a position to the same value. [`ZOBRIST`] is the key
//! set the [`Board`] maintains incrementally; [`ZobristKeys::hash`] is the
//! independent from-scratch computation it must always agree with.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::piece::Piece;
use crate::square::Square;

/// Seed for the default key set.
pub const DEFAULT_SEED: u64 = 0x5a4f_4252_4953_5421; // "ZOBRIST!"

/// The key set used by [`Board`].
pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(DEFAULT_SEED);

/// One random key per (piece, square), per castle-rights state, per
/// en-passant file, plus one for Black to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    piece_square: [[u64; 64]; Piece::COUNT],
    castling: [u64; 16],
    en_passant_file: [u64; 8],
    black_to_move: u64,
}

/// Xorshift64 PRNG. Returns (value, next_state).
const fn xorshift64(mut state: u64) -> (u64, u64) {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    (state, state)
}

impl ZobristKeys {
    /// Generate a key set from `seed`. The seed must be non-zero.
    pub const fn generate(seed: u64) -> ZobristKeys {
        assert!(seed != 0, "xorshift64 is stuck at zero");
        let mut state = seed;

        let mut piece_square = [[0u64; 64]; Piece::COUNT];
        let mut piece = 0;
        while piece < Piece::COUNT {
            let mut sq = 0;
            while sq < 64 {
                let (val, next) = xorshift64(state);
                piece_square[piece][sq] = val;
                state = next;
                sq += 1;
            }
            piece += 1;
        }

        let mut castling = [0u64; 16];
        let mut idx = 0;
        while idx < 16 {
            let (val, next) = xorshift64(state);
            castling[idx] = val;
            state = next;
            idx += 1;
        }

        let mut en_passant_file = [0u64; 8];
        let mut idx = 0;
        while idx < 8 {
            let (val, next) = xorshift64(state);
            en_passant_file[idx] = val;
            state = next;
            idx += 1;
        }

        let (black_to_move, _) = xorshift64(state);

        ZobristKeys {
            piece_square,
            castling,
            en_passant_file,
            black_to_move,
        }
    }

    /// Key for `piece` standing on `sq`.
    #[inline]
    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_square[piece.index()][sq.index()]
    }

    /// Key for a complete castle-rights state.
    #[inline]
    pub fn castling(&self, rights: CastleRights) -> u64 {
        self.castling[rights.bits() as usize]
    }

    /// Key for an en-passant square; only its file matters.
    #[inline]
    pub fn en_passant(&self, sq: Square) -> u64 {
        self.en_passant_file[sq.file() as usize]
    }

    /// Key toggled whenever the side to move changes.
    #[inline]
    pub fn side_to_move(&self) -> u64 {
        self.black_to_move
    }

    /// Compute a board's hash from scratch.
    pub fn hash(&self, board: &Board) -> u64 {
        let mut hash = 0u64;

        for sq in Square::all() {
            if let Some(piece) = board.piece_at(sq) {
                hash ^= self.piece(piece, sq);
            }
        }

        if board.side_to_move() == Color::Black {
            hash ^= self.black_to_move;
        }

        hash ^= self.castling(board.castling());

        if let Some(ep) = board.en_passant() {
            hash ^= self.en_passant(ep);
        }

        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn starting_position_hash_matches_field() {
        let board = Board::starting_position();
        assert_ne!(board.hash(), 0);
        assert_eq!(board.hash(), ZOBRIST.hash(&board));
    }

    #[test]
    fn different_positions_different_hashes() {
        let starting = Board::starting_position();
        let sicilian: Board = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
            .parse()
            .unwrap();
        assert_ne!(starting.hash(), sicilian.hash());
    }

    #[test]
    fn side_to_move_changes_hash() {
        let white: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let black: Board = "4k3/8/8/8/8/8/8/4K3 b - - 0 1".parse().unwrap();
        assert_eq!(white.hash() ^ black.hash(), ZOBRIST.side_to_move());
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(ZobristKeys::generate(DEFAULT_SEED), ZOBRIST);
        assert_ne!(ZobristKeys::generate(7), ZOBRIST);
    }

    #[test]
    fn all_keys_are_unique() {
        let mut all_keys: Vec<u64> = ZOBRIST.piece_square.iter().flatten().copied().collect();
        all_keys.push(ZOBRIST.black_to_move);
        all_keys.extend_from_slice(&ZOBRIST.castling);
        all_keys.extend_from_slice(&ZOBRIST.en_passant_file);

        let count = all_keys.len();
        all_keys.sort_unstable();
        all_keys.dedup();
        assert_eq!(all_keys.len(), count, "some Zobrist keys collide");
    }
}
