//! Search failure conditions.

/// Errors surfaced by the search entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The cancel token fired or the time budget ran out before a result was ready.
    #[error("search cancelled")]
    Cancelled,
}
