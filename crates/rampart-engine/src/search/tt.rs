//! Transposition table: search results memoized by position hash.
//!
//! A fixed array of optional slots indexed by `hash % len`. Each slot keeps
//! the full hash, so two positions that share a slot are told apart on probe
//! rather than assumed equal.
//!
//! ## Replacement
//!
//! An incoming entry overwrites its slot unless the resident entry's
//! `age + depth` is strictly greater. Ties go to the incoming entry, so of
//! two equally valuable results the most recent one wins.

use crate::search::Evaluation;

/// How an entry's score relates to the true value of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The score is exact: it fell strictly inside the search window.
    Exact,
    /// The side to move's best reply exceeded the opponent's bound and
    /// enumeration stopped early. The score is at least as good for the side
    /// to move as stored.
    BetaCutoff,
    /// No move improved on the bound the side to move already had. The score
    /// is at most as good for the side to move as stored.
    FailLow,
    /// A static evaluation recorded by quiescence, reusable as its baseline.
    Quiescence,
}

/// One memoized search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtEntry {
    /// Full position hash, checked on every probe.
    pub hash: u64,
    /// Remaining depth the result was searched to.
    pub depth: u8,
    /// Fullmove number of the position when recorded.
    pub age: u16,
    /// Relationship between the stored score and the true value.
    pub kind: EntryKind,
    /// Score and principal line, relative to the recorded position.
    pub result: Evaluation,
}

impl TtEntry {
    /// Combined replacement weight.
    fn value(&self) -> u32 {
        u32::from(self.age) + u32::from(self.depth)
    }
}

/// Fixed-size transposition table.
pub struct TranspositionTable {
    slots: Vec<Option<TtEntry>>,
    occupancy: usize,
    min_depth: u8,
}

impl TranspositionTable {
    /// Allocate `size` empty slots (at least one). Entries recorded below
    /// `min_depth` are dropped by [`put`](Self::put).
    pub fn new(size: usize, min_depth: u8) -> Self {
        Self {
            slots: vec![None; size.max(1)],
            occupancy: 0,
            min_depth,
        }
    }

    fn index(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// Record `entry`, subject to the minimum depth and the replacement rule.
    /// Returns `true` if the entry was written.
    pub fn put(&mut self, entry: TtEntry) -> bool {
        if entry.depth < self.min_depth {
            return false;
        }
        let index = self.index(entry.hash);
        match &self.slots[index] {
            Some(resident) if resident.value() > entry.value() => return false,
            Some(_) => {}
            None => self.occupancy += 1,
        }
        self.slots[index] = Some(entry);
        true
    }

    /// Return the entry for `hash`, or `None` on a miss or a slot held by a
    /// different position.
    pub fn get(&self, hash: u64) -> Option<&TtEntry> {
        self.slots[self.index(hash)]
            .as_ref()
            .filter(|entry| entry.hash == hash)
    }

    /// Empty every slot and reset the occupancy counter.
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.occupancy = 0;
    }

    /// Number of filled slots.
    pub fn occupancy(&self) -> usize {
        self.occupancy
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: the table has at least one slot.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Filled slots per thousand.
    pub fn hashfull(&self) -> usize {
        self.occupancy * 1000 / self.slots.len()
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("slots", &self.slots.len())
            .field("occupancy", &self.occupancy)
            .field("min_depth", &self.min_depth)
            .finish()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
