//! In-memory mock backend for tests and examples.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use super::error::BackendError;
use super::SearchBackend;
use crate::model::Document;

/// Failure to inject on the next searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Transport-level failure.
    Unavailable,
    /// Non-success HTTP status.
    Status(u16),
    /// Response body that does not parse.
    Malformed,
}

impl MockFailure {
    fn to_error(self) -> BackendError {
        match self {
            MockFailure::Unavailable => BackendError::Unavailable {
                url: "mock://search".to_string(),
                message: "connection refused".to_string(),
            },
            MockFailure::Status(status) => BackendError::BackendStatus { status },
            MockFailure::Malformed => BackendError::MalformedResponse {
                message: "missing hits envelope".to_string(),
            },
        }
    }
}

/// Canned-response search backend.
///
/// Responses are keyed by exact query text; unknown queries return an empty
/// result set. Per-query artificial delays make out-of-order completion
/// scenarios reproducible under paused tokio time, and every issued call is
/// recorded for debounce assertions.
#[derive(Default)]
pub struct MockSearchBackend {
    responses: Mutex<HashMap<String, Vec<Document>>>,
    delays: Mutex<HashMap<String, Duration>>,
    failure: Mutex<Option<MockFailure>>,
    calls: Mutex<Vec<String>>,
}

impl MockSearchBackend {
    /// Creates an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cans a response for an exact query text.
    pub fn insert_response(&self, text: &str, documents: Vec<Document>) {
        self.responses.lock().insert(text.to_string(), documents);
    }

    /// Delays completion of searches for `text` by `delay`.
    pub fn set_delay(&self, text: &str, delay: Duration) {
        self.delays.lock().insert(text.to_string(), delay);
    }

    /// Makes every subsequent search fail with `failure`.
    pub fn fail_with(&self, failure: MockFailure) {
        *self.failure.lock() = Some(failure);
    }

    /// Clears any injected failure.
    pub fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    /// Returns the number of searches actually issued.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the query texts of all issued searches, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl SearchBackend for MockSearchBackend {
    async fn search(&self, text: &str) -> Result<Vec<Document>, BackendError> {
        self.calls.lock().push(text.to_string());

        let delay = self.delays.lock().get(text).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = *self.failure.lock();
        if let Some(failure) = failure {
            return Err(failure.to_error());
        }

        Ok(self
            .responses
            .lock()
            .get(text)
            .cloned()
            .unwrap_or_default())
    }
}

impl std::fmt::Debug for MockSearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSearchBackend")
            .field("responses", &self.responses.lock().len())
            .field("calls", &self.calls.lock().len())
            .finish()
    }
}
