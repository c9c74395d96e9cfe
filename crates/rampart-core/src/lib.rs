//! Core chess types: board representation, move generation, and game rules.

mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod make_move;
mod movegen;
mod notation;
mod perft;
mod piece;
mod piece_kind;
mod square;
mod zobrist;

pub use board::{Board, PieceLocations, PrettyBoard};
pub use castle_rights::{CastleRights, CastleSide};
pub use chess_move::{Move, MoveFlag};
pub use color::Color;
pub use error::{BoardError, FenError, MoveParseError};
pub use fen::STARTING_FEN;
pub use movegen::{
    MoveList, MoveOrdering, generate_legal_moves, generate_ordered_moves,
    generate_pseudo_legal_moves, is_in_check, is_square_attacked,
};
pub use notation::san;
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use square::Square;
pub use zobrist::{DEFAULT_SEED, ZOBRIST, ZobristKeys};
