use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::GatewayError;
use super::state::GatewayState;
use crate::backend::SearchBackend;
use crate::export;
use crate::model::Document;

/// Body of a `POST /search` request.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    /// Raw query text.
    pub query: String,
}

/// Body of a `POST /search` response.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    /// Ungraded documents in backend order.
    pub documents: Vec<Document>,
}

/// Body of a `POST /export` request: the frontend's current judgment state.
#[derive(Debug, Deserialize)]
pub struct ExportBody {
    /// Query-id label for every emitted line.
    pub query_id: String,
    /// Assessor-id label for every emitted line.
    pub assessor_id: String,
    /// Current result list with grades attached.
    pub documents: Vec<Document>,
}

/// Forwards one search to the backend and returns documents as JSON.
#[instrument(skip(state, body), fields(len = body.query.len()))]
pub async fn search_handler<B>(
    State(state): State<GatewayState<B>>,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResults>, GatewayError>
where
    B: SearchBackend + 'static,
{
    let documents = state.backend.search(&body.query).await?;
    debug!(count = documents.len(), "search forwarded");
    Ok(Json(SearchResults { documents }))
}

/// Encodes judgments as a qrel file download.
///
/// Never fails: an empty or fully-ungraded document list yields an empty
/// attachment.
#[instrument(skip(body), fields(documents = body.documents.len()))]
pub async fn export_handler(Json(body): Json<ExportBody>) -> Response {
    let payload = export::encode(&body.query_id, &body.assessor_id, &body.documents);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(export::QREL_MIME),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"qrel.txt\""),
    );

    (StatusCode::OK, headers, payload).into_response()
}
