//! The chess board: a 64-square mailbox plus per-piece location lists, side
//! to move, castling, en passant, move counters and the undo log.

use std::fmt;

use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::BoardError;
use crate::fen::STARTING_FEN;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist::ZOBRIST;

/// Squares occupied by each colored piece, indexed by [`Piece::index`].
///
/// Every list is kept sorted by square so the index is a pure function of
/// the mailbox: two boards with the same placement have equal indexes no
/// matter which move sequence produced them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PieceLocations {
    lists: [Vec<Square>; Piece::COUNT],
}

impl PieceLocations {
    /// Return the squares holding `piece`, in ascending order.
    #[inline]
    pub fn squares(&self, piece: Piece) -> &[Square] {
        &self.lists[piece.index()]
    }

    fn add(&mut self, piece: Piece, sq: Square) {
        let list = &mut self.lists[piece.index()];
        let pos = list.binary_search(&sq).unwrap_or_else(|pos| pos);
        list.insert(pos, sq);
    }

    fn remove(&mut self, piece: Piece, sq: Square) {
        let list = &mut self.lists[piece.index()];
        match list.binary_search(&sq) {
            Ok(pos) => {
                list.remove(pos);
            }
            Err(_) => debug_assert!(false, "{piece:?} not indexed on {sq}"),
        }
    }
}

/// Pre-move state needed to take a move back. One record per applied ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UndoRecord {
    pub(crate) mv: Move,
    pub(crate) captured: Option<Piece>,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) hash: u64,
}

/// Complete, mutable chess position with its move history.
///
/// Equality compares everything, history included.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    /// Piece on each square, indexed by [`Square::index()`].
    squares: [Option<Piece>; Square::COUNT],
    /// Where each piece stands; mirrors `squares`.
    locations: PieceLocations,
    /// Which side moves next.
    side_to_move: Color,
    /// Current castling rights.
    castling: CastleRights,
    /// En passant target square, if any.
    en_passant: Option<Square>,
    /// Plies since the last capture or pawn move.
    halfmove_clock: u16,
    /// Fullmove number (starts at 1, incremented after Black moves).
    fullmove_number: u16,
    /// Zobrist hash of the position.
    hash: u64,
    /// Undo log, oldest move first.
    history: Vec<UndoRecord>,
}

impl Board {
    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        match STARTING_FEN.parse() {
            Ok(board) => board,
            Err(err) => unreachable!("starting FEN is valid: {err}"),
        }
    }

    /// Parse a FEN string. Same as [`str::parse`].
    pub fn from_fen(fen: &str) -> Result<Board, crate::FenError> {
        fen.parse()
    }

    /// An empty board with White to move. Used by FEN parsing.
    pub(crate) fn empty() -> Board {
        Board {
            squares: [None; Square::COUNT],
            locations: PieceLocations::default(),
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            history: Vec::new(),
        }
    }

    /// Return the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Return `true` if `sq` holds no piece.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Return the squares holding `piece`, in ascending order.
    #[inline]
    pub fn pieces_of(&self, piece: Piece) -> &[Square] {
        self.locations.squares(piece)
    }

    /// Return the squares holding `kind` pieces of `color`.
    #[inline]
    pub fn pieces(&self, kind: PieceKind, color: Color) -> &[Square] {
        self.locations.squares(Piece::new(kind, color))
    }

    /// Return the piece-location index.
    #[inline]
    pub fn locations(&self) -> &PieceLocations {
        &self.locations
    }

    /// Return the square of `color`'s king, or `None` on a kingless board.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(PieceKind::King, color).first().copied()
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Return the current castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Return the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Return the halfmove clock.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Return the fullmove number.
    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Return the Zobrist hash of the position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Return the hash as 16 hex digits, for diagnostics.
    pub fn hash_hex(&self) -> String {
        format!("{:016X}", self.hash)
    }

    /// Number of moves applied since the board was constructed.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The most recently applied move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.mv)
    }

    /// Moves applied since construction, oldest first.
    pub fn moves_played(&self) -> impl DoubleEndedIterator<Item = Move> + '_ {
        self.history.iter().map(|record| record.mv)
    }

    /// Put `piece` on an empty square. Touches neither the hash nor history.
    #[inline]
    pub(crate) fn place(&mut self, piece: Piece, sq: Square) {
        debug_assert!(self.squares[sq.index()].is_none(), "{sq} is occupied");
        self.squares[sq.index()] = Some(piece);
        self.locations.add(piece, sq);
    }

    /// Take whatever stands on `sq` off the board. Touches neither the hash
    /// nor history.
    #[inline]
    pub(crate) fn lift(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index()].take()?;
        self.locations.remove(piece, sq);
        Some(piece)
    }

    #[inline]
    pub(crate) fn toggle_hash(&mut self, key: u64) {
        self.hash ^= key;
    }

    #[inline]
    pub(crate) fn set_hash(&mut self, hash: u64) {
        self.hash = hash;
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    #[inline]
    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    #[inline]
    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    #[inline]
    pub(crate) fn push_history(&mut self, record: UndoRecord) {
        self.history.push(record);
    }

    #[inline]
    pub(crate) fn pop_history(&mut self) -> Option<UndoRecord> {
        self.history.pop()
    }

    /// Validate the structural integrity of the board.
    ///
    /// Checks king counts, back-rank pawns, material reachable from the
    /// starting set (which bounds the move count below [`MoveList`]'s
    /// capacity), that the location index mirrors the squares, and that the
    /// incremental hash matches a recomputation.
    ///
    /// [`MoveList`]: crate::movegen::MoveList
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self.pieces(PieceKind::King, color).len();
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color, count });
            }
        }

        for color in Color::ALL {
            let on_back_rank = self
                .pieces(PieceKind::Pawn, color)
                .iter()
                .any(|sq| sq.rank() == 0 || sq.rank() == 7);
            if on_back_rank {
                return Err(BoardError::PawnsOnBackRank);
            }
        }

        for color in Color::ALL {
            let pawns = self.pieces(PieceKind::Pawn, color).len();
            if pawns > 8 {
                return Err(BoardError::TooManyPawns { color, count: pawns });
            }
            let count: usize = PieceKind::ALL.iter().map(|&kind| self.pieces(kind, color).len()).sum();
            if count > 16 {
                return Err(BoardError::TooManyPieces { color, count });
            }
            // Every piece beyond the starting set must have been a pawn once
            let promoted: usize = [
                (PieceKind::Queen, 1),
                (PieceKind::Rook, 2),
                (PieceKind::Bishop, 2),
                (PieceKind::Knight, 2),
            ]
            .iter()
            .map(|&(kind, start)| self.pieces(kind, color).len().saturating_sub(start))
            .sum();
            let missing = 8 - pawns;
            if promoted > missing {
                return Err(BoardError::TooManyPromotions { color, promoted, missing });
            }
        }

        for piece in Piece::ALL {
            let expected = Square::all().filter(|&sq| self.piece_at(sq) == Some(piece));
            if !expected.eq(self.pieces_of(piece).iter().copied()) {
                return Err(BoardError::LocationIndexMismatch { piece });
            }
        }

        let expected = ZOBRIST.hash(self);
        if self.hash != expected {
            return Err(BoardError::HashMismatch {
                stored: self.hash,
                expected,
            });
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self)
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid with its FEN and hash.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let c = board
                    .piece_at(Square::new(rank, file))
                    .map_or('.', |piece| piece.fen_char());
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        writeln!(f)?;
        writeln!(f, "FEN:  {board}")?;
        write!(f, "Hash: {}", board.hash_hex())
    }
}
