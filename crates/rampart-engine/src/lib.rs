//! Search and evaluation for rampart.

pub mod eval;
pub mod search;

pub use eval::evaluate;
pub use search::alphabeta::{MATE_SCORE, MATE_THRESHOLD};
pub use search::background::{SearchHandle, SearchOutcome, spawn_search};
pub use search::control::CancelToken;
pub use search::tt::{EntryKind, TranspositionTable, TtEntry};
pub use search::{
    Diagnostics, Evaluation, MAX_DEPTH, SearchConfig, SearchError, SearchLimits, SearchReport,
    Searcher,
};
