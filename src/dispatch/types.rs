use crate::backend::BackendError;
use crate::model::Document;

/// Completion of one issued search, tagged with its text-change sequence.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Monotonic sequence number allocated when the text change was
    /// scheduled.
    pub seq: u64,
    /// Query text the request was issued for.
    pub text: String,
    /// Backend result (or the empty short-circuit for short queries).
    pub result: Result<Vec<Document>, BackendError>,
}

/// Result of running a [`SearchOutcome`] through the staleness guard.
#[derive(Debug)]
pub enum ApplyOutcome {
    /// Outcome is current; its documents should replace the result set.
    Applied {
        /// Sequence number that was applied.
        seq: u64,
        /// Fresh, ungraded documents in backend order.
        documents: Vec<Document>,
    },
    /// A newer text change was scheduled (or a newer outcome applied) in
    /// the meantime; the outcome must be discarded without touching state.
    Superseded {
        /// Sequence number of the discarded outcome.
        seq: u64,
    },
    /// Outcome is current but the backend failed; the previous result set
    /// is preserved and the error is surfaced as non-fatal state.
    Failed {
        /// Sequence number of the failed request.
        seq: u64,
        /// The backend error.
        error: BackendError,
    },
}

impl ApplyOutcome {
    /// Returns `true` for [`ApplyOutcome::Superseded`].
    #[inline]
    pub fn is_superseded(&self) -> bool {
        matches!(self, ApplyOutcome::Superseded { .. })
    }

    /// Returns the sequence number carried by this outcome.
    #[inline]
    pub fn seq(&self) -> u64 {
        match self {
            ApplyOutcome::Applied { seq, .. }
            | ApplyOutcome::Superseded { seq }
            | ApplyOutcome::Failed { seq, .. } => *seq,
        }
    }
}
