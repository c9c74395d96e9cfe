//! Search configuration and per-call budgets.

use std::time::Duration;

/// Tunable search settings, fixed for the lifetime of a [`Searcher`](super::Searcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Probe and fill the transposition table.
    pub use_transpositions: bool,
    /// Extend leaf nodes with a capture-only quiescence search.
    pub use_quiescence: bool,
    /// Number of transposition table slots.
    pub table_size: usize,
    /// Entries recorded below this depth are discarded.
    pub min_table_depth: u8,
    /// Extra plies quiescence may add past the horizon.
    pub quiescence_max_depth: u8,
    /// Safety margin subtracted from the gap a capture must close.
    pub delta_margin: i32,
    /// Gap beyond which quiescence stands pat without trying captures.
    pub delta_cutoff: i32,
    /// Non-king material (both sides, centipawns) below which the endgame king table applies.
    pub endgame_material: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            use_transpositions: true,
            use_quiescence: true,
            table_size: 1_035_721,
            min_table_depth: 0,
            quiescence_max_depth: 4,
            delta_margin: 0,
            delta_cutoff: 1000,
            endgame_material: 1500,
        }
    }
}

/// Budget for a single [`Searcher::search`](super::Searcher::search) call.
///
/// With neither limit set the search deepens until cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Deepest iteration to run.
    pub depth: Option<u8>,
    /// Wall-clock budget, measured from the start of the call.
    pub time: Option<Duration>,
}

impl SearchLimits {
    /// Limit by depth only.
    pub fn depth(depth: u8) -> Self {
        Self { depth: Some(depth), time: None }
    }

    /// Limit by wall-clock time only.
    pub fn time(time: Duration) -> Self {
        Self { depth: None, time: Some(time) }
    }
}
