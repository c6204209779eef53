use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::runs::{RunListError, StoreError};

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    RunList(#[from] RunListError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("run {run_id} not found in job {job}")]
    RunNotFound { job: String, run_id: String },
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RunList(RunListError::UnknownJob(_)) | Self::RunNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            Self::RunList(RunListError::Etag(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(StoreError::InvalidKey) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(name: "api.error", error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
