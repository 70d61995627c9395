//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

/// Errors returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required request parameter was missing or blank.
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// A search or lookup failed in the engine or storage layer.
    #[error("search failed: {0}")]
    Search(#[source] gurgle_core::Error),
}

impl From<gurgle_core::Error> for ApiError {
    fn from(err: gurgle_core::Error) -> Self {
        match err {
            gurgle_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Search(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Search(err) => match err {
                gurgle_core::Error::QuerySyntax(_) | gurgle_core::Error::InvalidInput(_) => {
                    StatusCode::BAD_REQUEST
                }
                gurgle_core::Error::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => {
                serde_json::json!({ "error": msg })
            }
            ApiError::Search(err) => {
                if status.is_server_error() {
                    error!(error_code = err.code(), error_msg = %err, "Request failed");
                } else {
                    warn!(error_code = err.code(), error_msg = %err, "Request rejected");
                }
                serde_json::json!({
                    "error": "search_error",
                    "code": err.code(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
