//! Mapping of engine errors to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tribo_core::TriboError;

/// Error returned by request handlers
///
/// Rendered as a plain-text body with the given status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<TriboError> for ApiError {
    fn from(error: TriboError) -> Self {
        let status = match &error {
            TriboError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            TriboError::DeadlineExceeded { .. } => StatusCode::GATEWAY_TIMEOUT,
            TriboError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!(status = %self.status, "{}", self.message);
        } else {
            tracing::debug!(status = %self.status, "{}", self.message);
        }
        (self.status, self.message).into_response()
    }
}
