//! Where generated moves go: collected into a list, or checked against a
//! single probe square.
//!
//! Each generator is generic over [`MoveSink`], so the probe variant is a
//! separate monomorphized copy with the list-building code compiled out.

use crate::chess_move::Move;
use crate::square::Square;

use super::MoveList;

/// Destination for candidate moves.
pub(crate) trait MoveSink {
    /// `true` when only reachability of one square matters.
    const PROBE: bool;

    /// Return `true` if reaching `sq` answers the probe.
    fn hits(&self, sq: Square) -> bool;

    /// Record a candidate move.
    fn push(&mut self, mv: Move);
}

/// Collects every candidate move.
pub(crate) struct Collect<'a>(pub(crate) &'a mut MoveList);

impl MoveSink for Collect<'_> {
    const PROBE: bool = false;

    #[inline]
    fn hits(&self, _sq: Square) -> bool {
        false
    }

    #[inline]
    fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }
}

/// Answers "can any piece reach this square?".
pub(crate) struct Probe(pub(crate) Square);

impl MoveSink for Probe {
    const PROBE: bool = true;

    #[inline]
    fn hits(&self, sq: Square) -> bool {
        sq == self.0
    }

    #[inline]
    fn push(&mut self, _mv: Move) {}
}
