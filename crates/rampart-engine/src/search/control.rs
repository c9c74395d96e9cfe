//! Search control: cooperative cancellation and the time budget.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::search::error::SearchError;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that has not fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every search holding this token to stop at its next check.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Return `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Decides, at each recursive call, whether the search must abort.
///
/// The cancel token is read on every call; the clock only every 2048 nodes.
/// Once the deadline has passed the control stays expired without touching
/// the caller's token.
pub(crate) struct SearchControl {
    cancel: CancelToken,
    deadline: Option<Instant>,
    expired: Cell<bool>,
}

impl SearchControl {
    pub(crate) fn new(cancel: CancelToken, deadline: Option<Instant>) -> Self {
        Self {
            cancel,
            deadline,
            expired: Cell::new(false),
        }
    }

    /// Fail with [`SearchError::Cancelled`] if the search should stop now.
    pub(crate) fn check(&self, nodes: u64) -> Result<(), SearchError> {
        if self.expired.get() || self.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        // Only check the clock every 2048 nodes
        if nodes & 2047 != 0 {
            return Ok(());
        }

        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            self.expired.set(true);
            return Err(SearchError::Cancelled);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn token_clones_share_state() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn cancelled_token_fails_every_check() {
        let token = CancelToken::new();
        let control = SearchControl::new(token.clone(), None);
        assert_eq!(control.check(1), Ok(()));
        token.cancel();
        assert_eq!(control.check(1), Err(SearchError::Cancelled));
    }

    #[test]
    fn deadline_checked_on_node_boundary() {
        let past = Instant::now() - Duration::from_millis(1);
        let control = SearchControl::new(CancelToken::new(), Some(past));
        assert_eq!(control.check(1), Ok(()), "clock is not read off-boundary");
        assert_eq!(control.check(2048), Err(SearchError::Cancelled));
        assert_eq!(control.check(2049), Err(SearchError::Cancelled), "expiry sticks");
    }
}
