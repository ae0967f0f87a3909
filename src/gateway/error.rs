use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("search failed: {0}")]
    SearchFailed(#[from] BackendError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            // All backend failures are upstream trouble from the gateway's
            // point of view; the frontend treats them as non-fatal.
            GatewayError::SearchFailed(BackendError::InvalidUrl { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::SearchFailed(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
