//! Running a search on a worker thread.
//!
//! The board and the [`Searcher`] (with its table) move into the worker, so
//! nothing is shared with the foreground except the cancel token. The
//! foreground polls [`SearchHandle::is_finished`], may
//! [`cancel`](SearchHandle::cancel), and [`join`](SearchHandle::join)s to get
//! the searcher back along with the result.

use std::thread::{self, JoinHandle};

use rampart_core::Board;
use tracing::debug;

use crate::search::control::CancelToken;
use crate::search::{SearchError, SearchLimits, SearchReport, Searcher};

/// What the worker hands back: the searcher for reuse, and the outcome.
pub type SearchOutcome = (Searcher, Result<SearchReport, SearchError>);

/// Handle to a search running on another thread.
#[derive(Debug)]
pub struct SearchHandle {
    cancel: CancelToken,
    worker: JoinHandle<SearchOutcome>,
}

/// Start searching `board` on a new thread.
pub fn spawn_search(mut searcher: Searcher, mut board: Board, limits: SearchLimits) -> SearchHandle {
    let cancel = CancelToken::new();
    let token = cancel.clone();

    let worker = thread::spawn(move || {
        debug!(hash = %board.hash_hex(), ?limits, "background search started");
        let result = searcher.search(&mut board, limits, &token);
        debug!(ok = result.is_ok(), "background search finished");
        (searcher, result)
    });

    SearchHandle { cancel, worker }
}

impl SearchHandle {
    /// `true` once the worker has returned; [`join`](Self::join) will not block.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Ask the worker to stop. It finishes at its next recursion entry and
    /// reports the deepest iteration it completed.
    pub fn cancel(&self) {
        debug!("cancelling background search");
        self.cancel.cancel();
    }

    /// The token the worker checks.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Wait for the worker and take back the searcher and the outcome.
    ///
    /// A panic on the worker thread is resumed on the caller's thread.
    pub fn join(self) -> SearchOutcome {
        match self.worker.join() {
            Ok(outcome) => outcome,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}
