//! Session orchestration.
//!
//! One [`Session`] owns the whole state machine for one assessor sitting:
//! the query text, the dispatcher, the graded result list, the export
//! labels, and the dialog flag. User intents mutate it synchronously via
//! [`Session::handle`]; asynchronous search completions are pumped through
//! [`Session::next_outcome`], which runs them through the staleness guard
//! and the grade merge. The presentation layer renders from
//! [`Session::snapshot`] and never touches internals.

pub mod query_store;
pub mod types;


pub use query_store::{MemoryQueryStore, QueryStore};
pub use types::{Intent, Snapshot};

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::backend::SearchBackend;
use crate::dispatch::{ApplyOutcome, Dispatcher, DispatcherConfig, SearchOutcome};
use crate::export;
use crate::grades::GradeStore;
use crate::model::Grade;

/// Default query-id export label.
pub const DEFAULT_QUERY_ID: &str = "1";

/// Default assessor-id export label.
pub const DEFAULT_ASSESSOR_ID: &str = "anonymous";

/// Session construction parameters.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Initial query-id label (editable through the dialog).
    pub query_id: String,
    /// Initial assessor-id label (editable through the dialog).
    pub assessor_id: String,
    /// Dispatcher tuning.
    pub dispatcher: DispatcherConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            query_id: DEFAULT_QUERY_ID.to_string(),
            assessor_id: DEFAULT_ASSESSOR_ID.to_string(),
            dispatcher: DispatcherConfig::default(),
        }
    }
}

/// One assessor sitting: query, result set, grades, dialog, labels.
pub struct Session<B, Q> {
    dispatcher: Dispatcher<B>,
    outcomes: mpsc::UnboundedReceiver<SearchOutcome>,
    grades: GradeStore,
    query_store: Q,
    text: String,
    dialog_open: bool,
    query_id: String,
    assessor_id: String,
    last_error: Option<String>,
}

impl<B, Q> Session<B, Q>
where
    B: SearchBackend + 'static,
    Q: QueryStore,
{
    /// Creates a session, seeding the query text from the query store and
    /// scheduling an initial dispatch when the seed is non-empty.
    ///
    /// Scheduling spawns a timer task, so a session must be constructed
    /// inside a tokio runtime.
    pub fn new(backend: Arc<B>, query_store: Q, config: SessionConfig) -> Self {
        let (dispatcher, outcomes) = Dispatcher::new(backend, config.dispatcher);
        let text = query_store.read_query();

        // A blank session starts with an empty result set already; only a
        // seeded query needs the initial dispatch.
        if !text.is_empty() {
            dispatcher.on_text_changed(&text);
        }

        Self {
            dispatcher,
            outcomes,
            grades: GradeStore::new(),
            query_store,
            text,
            dialog_open: false,
            query_id: config.query_id,
            assessor_id: config.assessor_id,
            last_error: None,
        }
    }

    /// Routes one user intent. All mutations here are synchronous; only
    /// text changes schedule asynchronous work.
    pub fn handle(&mut self, intent: Intent) {
        match intent {
            Intent::TextChanged(text) => {
                // Address bar tracks every keystroke, ahead of any debounce.
                self.query_store.write_query(&text);
                self.dispatcher.on_text_changed(&text);
                self.text = text;
            }
            Intent::GradeClicked { id, grade } => {
                self.set_grade(&id, grade);
            }
            Intent::DialogOpened => self.dialog_open = true,
            Intent::DialogClosed => self.dialog_open = false,
            Intent::QueryIdChanged(query_id) => self.query_id = query_id,
            Intent::AssessorIdChanged(assessor_id) => self.assessor_id = assessor_id,
        }
    }

    /// Sets the grade for one visible document by id.
    pub fn set_grade(&mut self, id: &str, grade: Grade) -> bool {
        self.grades.set_grade(id, grade)
    }

    /// Awaits the next search completion and applies it.
    ///
    /// Superseded completions leave all state untouched. Applied ones
    /// replace the result set (with grades merged in) and clear any error;
    /// failed ones record the error and preserve the previous result set.
    /// The returned [`ApplyOutcome::Applied`] carries the post-merge list.
    ///
    /// Returns `None` if the dispatcher side has gone away.
    pub async fn next_outcome(&mut self) -> Option<ApplyOutcome> {
        let outcome = self.outcomes.recv().await?;
        Some(self.apply(outcome))
    }

    /// Applies an already-received completion (non-blocking pump for tests
    /// and cooperative loops).
    pub fn try_next_outcome(&mut self) -> Option<ApplyOutcome> {
        let outcome = self.outcomes.try_recv().ok()?;
        Some(self.apply(outcome))
    }

    fn apply(&mut self, outcome: SearchOutcome) -> ApplyOutcome {
        match self.dispatcher.apply(outcome) {
            ApplyOutcome::Applied { seq, documents } => {
                self.grades.merge(documents);
                self.last_error = None;
                debug!(seq, count = self.grades.len(), "result set replaced");
                ApplyOutcome::Applied {
                    seq,
                    documents: self.grades.documents().to_vec(),
                }
            }
            ApplyOutcome::Superseded { seq } => ApplyOutcome::Superseded { seq },
            ApplyOutcome::Failed { seq, error } => {
                warn!(seq, error = %error, "search failed, keeping previous results");
                self.last_error = Some(error.to_string());
                ApplyOutcome::Failed { seq, error }
            }
        }
    }

    /// Encodes the current judgments as a qrel payload.
    pub fn export(&self) -> Vec<u8> {
        export::encode(&self.query_id, &self.assessor_id, self.grades.documents())
    }

    /// Returns an immutable view-state snapshot for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            documents: self.grades.documents().to_vec(),
            dialog_open: self.dialog_open,
            query_id: self.query_id.clone(),
            assessor_id: self.assessor_id.clone(),
            last_error: self.last_error.clone(),
        }
    }

    /// Returns the current query text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the underlying query store.
    #[inline]
    pub fn query_store(&self) -> &Q {
        &self.query_store
    }
}

impl<B, Q> std::fmt::Debug for Session<B, Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("text", &self.text)
            .field("documents", &self.grades.len())
            .field("dialog_open", &self.dialog_open)
            .finish()
    }
}
