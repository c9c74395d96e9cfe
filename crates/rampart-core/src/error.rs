//! Error types for FEN parsing, board validation and move input.

use crate::color::Color;
use crate::piece::Piece;

/// Errors that occur when parsing a FEN string. Each variant names the
/// offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The FEN string does not have exactly 6 space-separated fields.
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index in FEN order (0 = rank 8).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    #[error("invalid active color: \"{found}\"")]
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// The castling field is not "-" or a set of `KQkq` letters.
    #[error("invalid castling rights: \"{found}\"")]
    InvalidCastling {
        /// The invalid castling string.
        found: String,
    },
    /// The en passant field is not "-" or a square just crossed by an enemy double push.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// A move counter (halfmove clock or fullmove number) is not a valid number.
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The invalid string.
        found: String,
    },
    /// The parsed board fails structural validation.
    #[error("invalid board: {source}")]
    InvalidBoard {
        /// The underlying board validation error.
        #[from]
        source: BoardError,
    },
}

/// Errors from structural validation of a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: Color,
        /// Number of kings found.
        count: usize,
    },
    /// Pawns occupy the first or eighth rank.
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
    /// A side has more than eight pawns.
    #[error("{color} has {count} pawns, at most 8 allowed")]
    TooManyPawns {
        /// Which side has too many pawns.
        color: Color,
        /// Number of pawns found.
        count: usize,
    },
    /// A side has more than sixteen pieces.
    #[error("{color} has {count} pieces, at most 16 allowed")]
    TooManyPieces {
        /// Which side has too many pieces.
        color: Color,
        /// Number of pieces found, king included.
        count: usize,
    },
    /// A side has more pieces beyond its starting set than missing pawns.
    #[error("{color} has {promoted} promoted pieces but only {missing} pawns missing")]
    TooManyPromotions {
        /// Which side has too many promoted pieces.
        color: Color,
        /// Pieces beyond the starting set.
        promoted: usize,
        /// Pawns no longer on the board.
        missing: usize,
    },
    /// The piece-location index disagrees with the square array.
    #[error("location index for {piece:?} is out of sync with the board")]
    LocationIndexMismatch {
        /// The piece whose list is wrong.
        piece: Piece,
    },
    /// The stored hash disagrees with a full recomputation.
    #[error("incremental hash {stored:#018x} != recomputed {expected:#018x}")]
    HashMismatch {
        /// Hash carried by the board.
        stored: u64,
        /// Hash recomputed from scratch.
        expected: u64,
    },
}

/// Errors from resolving coordinate move text such as `e2e4` or `e7e8q`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    /// The text is not of the form `<from><to>[promotion]`.
    #[error("malformed move text: \"{text}\"")]
    Malformed {
        /// The rejected text.
        text: String,
    },
    /// The text is well formed but no legal move matches it.
    #[error("illegal move in this position: \"{text}\"")]
    Illegal {
        /// The rejected text.
        text: String,
    },
}
