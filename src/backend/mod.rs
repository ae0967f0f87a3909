//! Search backend integration (Elasticsearch-shaped).

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use client::EsClient;
pub use error::BackendError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSearchBackend;

use crate::model::Document;

/// Default Elasticsearch index queried when none is configured.
pub const DEFAULT_INDEX: &str = "crawler";

/// Default cap on the number of results requested per search.
pub const DEFAULT_RESULT_CAP: usize = 200;

/// Default client-side timeout for a single search request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Minimal async interface the dispatcher issues queries through.
pub trait SearchBackend: Send + Sync {
    /// Runs one full-text search and returns ranked, ungraded documents in
    /// backend order.
    fn search(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Document>, BackendError>> + Send;
}
