//! API error types with IntoResponse
//!
//! Every failure renders as `{"error": "<message>"}` with the matching status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request parameter (400)
    #[error(transparent)]
    InvalidParameter(#[from] ValidationError),

    /// Request that could not be decoded at all (400)
    #[error("{0}")]
    BadRequest(String),

    /// Referenced record does not exist (404)
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Store failure (500, logged). The store's message is returned as is.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Store(e) => tracing::error!("Store error: {}", e),
            Self::InvalidParameter(e) => tracing::debug!(field = e.field(), "rejected request"),
            Self::BadRequest(reason) => tracing::debug!(%reason, "rejected request"),
            Self::NotFound { resource } => tracing::debug!(resource, "not found"),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
