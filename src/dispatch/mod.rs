//! Debounced query dispatch with request sequencing.
//!
//! Every text change schedules (or reschedules) one backend search after a
//! quiescence window; only the final text of a burst is ever sent. Each
//! text change is stamped with a monotonically increasing sequence number
//! synchronously, before any timer or request exists, and completions are
//! classified against that sequence when applied: a response belonging to
//! anything but the newest scheduled change is discarded, whether the newer
//! request has already fired or is still inside its debounce window. This
//! keeps the visible result set in text-change order regardless of network
//! completion order.
//!
//! Scheduling uses logical cancellation rather than task aborts: a timer
//! whose sequence is stale when it fires exits without issuing a request. A
//! request that has already gone out is never cancelled, only suppressed at
//! apply time.

pub mod types;

#[cfg(test)]
mod tests;

pub use types::{ApplyOutcome, SearchOutcome};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::backend::SearchBackend;

/// Default quiescence window before a scheduled search fires.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Minimum query length actually sent to the backend. Shorter text resolves
/// to an empty result set without a network call.
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Dispatcher tuning knobs.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Trailing-edge debounce window.
    pub window: Duration,
    /// Minimum character count before the backend is contacted.
    pub min_query_len: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

/// Debounced, sequence-guarded search dispatcher.
///
/// [`Dispatcher::on_text_changed`] schedules work; completions arrive on the
/// channel handed out at construction and must be passed back through
/// [`Dispatcher::apply`], which enforces the staleness guard.
pub struct Dispatcher<B> {
    backend: Arc<B>,
    config: DispatcherConfig,
    /// Bumped synchronously on every text change; doubles as the sequence
    /// number of that change. Stale timers check it and bail.
    scheduled: Arc<AtomicU64>,
    /// Last sequence number accepted by [`Dispatcher::apply`].
    applied: u64,
    tx: mpsc::UnboundedSender<SearchOutcome>,
}

impl<B: SearchBackend + 'static> Dispatcher<B> {
    /// Creates a dispatcher and the channel its completions arrive on.
    pub fn new(
        backend: Arc<B>,
        config: DispatcherConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SearchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                backend,
                config,
                scheduled: Arc::new(AtomicU64::new(0)),
                applied: 0,
                tx,
            },
            rx,
        )
    }

    /// Reacts to a raw text change.
    ///
    /// Short text (below the configured minimum) resolves immediately to an
    /// empty result set with a fresh sequence number, superseding anything
    /// still in flight. Otherwise a single search is scheduled after the
    /// debounce window; any previously pending schedule is cancelled.
    ///
    /// Scheduling spawns a timer task and must run inside a tokio runtime.
    pub fn on_text_changed(&self, text: &str) {
        // Sequence allocation and scheduling are one atomic step, so the
        // staleness guard sees this change before any request exists.
        let seq = self.scheduled.fetch_add(1, Ordering::SeqCst) + 1;

        if text.chars().count() < self.config.min_query_len {
            debug!(seq, len = text.len(), "short query, resolving empty");
            let _ = self.tx.send(SearchOutcome {
                seq,
                text: text.to_string(),
                result: Ok(Vec::new()),
            });
            return;
        }

        let backend = Arc::clone(&self.backend);
        let scheduled = Arc::clone(&self.scheduled);
        let tx = self.tx.clone();
        let window = self.config.window;
        let text = text.to_string();

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if scheduled.load(Ordering::SeqCst) != seq {
                // Rescheduled while we were waiting.
                return;
            }

            debug!(seq, text = %text, "debounce window elapsed, searching");
            let result = backend.search(&text).await;
            let _ = tx.send(SearchOutcome { seq, text, result });
        });
    }

    /// Classifies a completed search against the staleness guard.
    ///
    /// An outcome is superseded if a newer text change has been scheduled
    /// since it was issued (even one still inside its debounce window), or
    /// if an equal-or-newer outcome has already been applied. Superseded
    /// outcomes must not touch any state.
    pub fn apply(&mut self, outcome: SearchOutcome) -> ApplyOutcome {
        if outcome.seq < self.scheduled.load(Ordering::SeqCst) || outcome.seq <= self.applied {
            debug!(seq = outcome.seq, applied = self.applied, "discarding stale response");
            return ApplyOutcome::Superseded { seq: outcome.seq };
        }

        self.applied = outcome.seq;
        match outcome.result {
            Ok(documents) => ApplyOutcome::Applied {
                seq: outcome.seq,
                documents,
            },
            Err(error) => ApplyOutcome::Failed {
                seq: outcome.seq,
                error,
            },
        }
    }

    /// Returns the sequence number of the newest scheduled text change.
    #[inline]
    pub fn last_scheduled(&self) -> u64 {
        self.scheduled.load(Ordering::SeqCst)
    }

    /// Returns the sequence number of the newest applied outcome.
    #[inline]
    pub fn last_applied(&self) -> u64 {
        self.applied
    }
}

impl<B> std::fmt::Debug for Dispatcher<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("scheduled", &self.scheduled.load(Ordering::SeqCst))
            .field("applied", &self.applied)
            .finish()
    }
}
