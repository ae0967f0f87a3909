//! Address-bar query persistence collaborator.
//!
//! The browser keeps the in-progress query text in a `q` query-string
//! parameter so sessions can be bookmarked and shared mid-query. The core
//! only sees this surface as read-on-start / write-on-every-keystroke.

/// Persistence seam for the current query text.
pub trait QueryStore: Send {
    /// Reads the persisted query text (empty string if none).
    fn read_query(&self) -> String;

    /// Persists the latest query text. Called synchronously on every text
    /// change, before any dispatch is scheduled.
    fn write_query(&mut self, text: &str);
}

/// In-memory stand-in for the address bar (tests, embedding without a
/// browser).
#[derive(Debug, Clone, Default)]
pub struct MemoryQueryStore {
    text: String,
}

impl MemoryQueryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with query text.
    pub fn seeded(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl QueryStore for MemoryQueryStore {
    fn read_query(&self) -> String {
        self.text.clone()
    }

    fn write_query(&mut self, text: &str) {
        self.text = text.to_string();
    }
}
