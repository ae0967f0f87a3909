use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::BackendError;
use super::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESULT_CAP, SearchBackend};
use crate::model::{Document, Grade};

/// Wire shape of a search request: `{ size, query: { match: { body } } }`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Cap on the number of returned results.
    pub size: usize,
    query: QueryClause,
}

#[derive(Debug, Clone, Serialize)]
struct QueryClause {
    #[serde(rename = "match")]
    match_clause: MatchClause,
}

#[derive(Debug, Clone, Serialize)]
struct MatchClause {
    body: String,
}

impl SearchRequest {
    /// Builds the match-on-body request for `text`.
    pub fn new(text: &str, size: usize) -> Self {
        Self {
            size,
            query: QueryClause {
                match_clause: MatchClause {
                    body: text.to_string(),
                },
            },
        }
    }
}

/// Wire shape of a search response: `{ hits: { hits: [ { _id, ... } ] } }`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score", default)]
    score: Option<f64>,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

impl SearchResponse {
    /// Converts backend hits into ungraded documents, preserving order.
    pub fn into_documents(self) -> Vec<Document> {
        self.hits
            .hits
            .into_iter()
            .map(|hit| Document {
                id: hit.id,
                score: hit.score,
                fields: hit.fields,
                grade: Grade::UNGRADED,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
/// Elasticsearch search client.
///
/// Issues `POST {base}/{index}/_search` with a match-on-body query and a
/// fixed result cap, and derives read-only document detail links.
pub struct EsClient {
    http: reqwest::Client,
    base_url: Url,
    index: String,
    result_cap: usize,
    timeout: Duration,
}

impl EsClient {
    /// Creates a client for `base_url` querying `index`.
    pub fn new(base_url: &str, index: &str) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url).map_err(|e| BackendError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            index: index.to_string(),
            result_cap: DEFAULT_RESULT_CAP,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// Overrides the per-search result cap.
    pub fn with_result_cap(mut self, cap: usize) -> Self {
        self.result_cap = cap;
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the configured index name.
    pub fn index(&self) -> &str {
        &self.index
    }

    fn search_url(&self) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend([self.index.as_str(), "_search"]);
        Ok(url)
    }

    /// Derives the read-only detail link for a document:
    /// `{base}/{index}/_doc/{percent-encoded id}`.
    ///
    /// Ids are frequently URLs themselves, so the final segment is
    /// percent-encoded rather than joined.
    pub fn doc_url(&self, id: &str) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend([self.index.as_str(), "_doc", id]);
        Ok(url)
    }
}

impl SearchBackend for EsClient {
    async fn search(&self, text: &str) -> Result<Vec<Document>, BackendError> {
        let url = self.search_url()?;
        let request = SearchRequest::new(text, self.result_cap);

        debug!(index = %self.index, size = request.size, "issuing backend search");

        let response = self
            .http
            .post(url.clone())
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::BackendStatus {
                status: status.as_u16(),
            });
        }

        let parsed: SearchResponse =
            response
                .json()
                .await
                .map_err(|e| BackendError::MalformedResponse {
                    message: e.to_string(),
                })?;

        Ok(parsed.into_documents())
    }
}
