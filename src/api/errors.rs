use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::result::OutcomeKind;

/// Maps a use-case outcome to its HTTP status code
pub fn status_for(kind: OutcomeKind) -> StatusCode {
    match kind {
        OutcomeKind::Ok => StatusCode::OK,
        OutcomeKind::Created => StatusCode::CREATED,
        OutcomeKind::InvalidInput => StatusCode::BAD_REQUEST,
        OutcomeKind::Conflict => StatusCode::CONFLICT,
        OutcomeKind::NotFound => StatusCode::NOT_FOUND,
        OutcomeKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// API error type for request-level failures that never reach a use case
/// (malformed path or query parameters)
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.message,
            "errors": [],
            "data": null
        }));

        (self.status, body).into_response()
    }
}
