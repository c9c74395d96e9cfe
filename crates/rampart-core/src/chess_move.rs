//! Move representation.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::castle_rights::CastleSide;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Special-move flag carried by every [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    /// Quiet move or ordinary capture.
    None,
    /// Pawn reaching the last rank, with the piece it becomes.
    Promotion(PieceKind),
    /// King-side castle; origin and target are the king's squares.
    KingCastle,
    /// Queen-side castle; origin and target are the king's squares.
    QueenCastle,
    /// En passant capture; the captured pawn is not on the target square.
    EnPassant,
    /// Pawn advancing two squares from its start rank.
    DoublePush,
}

/// A move: origin, target and special flag.
///
/// The `priority` is scratch space for move ordering. It is not part of the
/// move's identity: two moves with the same squares and flag compare equal
/// and hash the same whatever their priorities.
#[derive(Clone, Copy)]
pub struct Move {
    origin: Square,
    target: Square,
    flag: MoveFlag,
    priority: i32,
}

impl Move {
    /// Create a quiet move or ordinary capture.
    #[inline]
    pub const fn new(origin: Square, target: Square) -> Move {
        Move::with_flag(origin, target, MoveFlag::None)
    }

    /// Create a move with an explicit flag.
    #[inline]
    pub const fn with_flag(origin: Square, target: Square, flag: MoveFlag) -> Move {
        Move {
            origin,
            target,
            flag,
            priority: 0,
        }
    }

    /// Create a promotion.
    #[inline]
    pub const fn new_promotion(origin: Square, target: Square, piece: PieceKind) -> Move {
        Move::with_flag(origin, target, MoveFlag::Promotion(piece))
    }

    /// Create a castling move from the king's origin and target squares.
    #[inline]
    pub const fn new_castle(origin: Square, target: Square, side: CastleSide) -> Move {
        let flag = match side {
            CastleSide::KingSide => MoveFlag::KingCastle,
            CastleSide::QueenSide => MoveFlag::QueenCastle,
        };
        Move::with_flag(origin, target, flag)
    }

    /// Return the origin square.
    #[inline]
    pub const fn origin(self) -> Square {
        self.origin
    }

    /// Return the target square.
    #[inline]
    pub const fn target(self) -> Square {
        self.target
    }

    /// Return the special-move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        self.flag
    }

    /// Return the promotion piece, if this is a promotion.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        match self.flag {
            MoveFlag::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// Return the castle side, if this is a castling move.
    #[inline]
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self.flag {
            MoveFlag::KingCastle => Some(CastleSide::KingSide),
            MoveFlag::QueenCastle => Some(CastleSide::QueenSide),
            _ => None,
        }
    }

    /// Return `true` for either castling flag.
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.flag, MoveFlag::KingCastle | MoveFlag::QueenCastle)
    }

    /// Return `true` for an en passant capture.
    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag, MoveFlag::EnPassant)
    }

    /// Return the move-ordering priority.
    #[inline]
    pub const fn priority(self) -> i32 {
        self.priority
    }

    /// Set the move-ordering priority.
    #[inline]
    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Return the coordinate (UCI) form, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.origin == other.origin && self.target == other.target && self.flag == other.flag
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.target.hash(state);
        self.flag.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.target)?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.fen_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?} prio={})", self, self.flag, self.priority)
    }
}
