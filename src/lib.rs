//! qrel-judge library crate (used by the server binary and integration
//! tests).
//!
//! An interactive relevance-judgment tool: an assessor types a query, the
//! tool retrieves candidate documents from a search backend, the assessor
//! grades each candidate, and the accumulated judgments export as TREC qrel
//! lines. The crate is the query/result/grade state machine behind that
//! flow; rendering and file delivery live with the embedding frontend.
//!
//! # Public API Surface
//!
//! - [`Session`], [`Intent`], [`Snapshot`] - the state machine, driven by
//!   user intents and rendered from snapshots
//! - [`Dispatcher`], [`ApplyOutcome`] - debounced dispatch with the
//!   staleness guard, usable standalone
//! - [`GradeStore`] - grade carry-over across re-queries
//! - [`export::encode`] - qrel serialization
//! - [`EsClient`], [`SearchBackend`] - the backend seam
//! - [`Config`], [`ConfigError`] - environment-backed configuration
//! - `gateway` - the Axum plumbing used by the server binary
//!
//! Mock implementations are available behind `#[cfg(any(test, feature =
//! "mock"))]`.

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod export;
pub mod gateway;
pub mod grades;
pub mod model;
pub mod session;

pub use backend::{
    BackendError, DEFAULT_INDEX, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESULT_CAP, EsClient,
    SearchBackend,
};
#[cfg(any(test, feature = "mock"))]
pub use backend::MockSearchBackend;

pub use config::{Config, ConfigError, DEFAULT_BACKEND_URL};
pub use dispatch::{
    ApplyOutcome, DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_QUERY_LEN, Dispatcher, DispatcherConfig,
    SearchOutcome,
};
pub use export::{QREL_FILENAME, QREL_MIME};
pub use grades::GradeStore;
pub use model::{Document, Grade, InvalidGrade, MAX_GRADE_LEVEL};
pub use session::{
    DEFAULT_ASSESSOR_ID, DEFAULT_QUERY_ID, Intent, MemoryQueryStore, QueryStore, Session,
    SessionConfig, Snapshot,
};
