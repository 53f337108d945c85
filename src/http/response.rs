//! Error responses.
//!
//! # Design Decisions
//! - Every error body is JSON: `{"error": "..."}`
//! - Unknown menus are 404, malformed locations 400
//! - Rejections are counted by reason

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::navigation::NavError;
use crate::observability::metrics;

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    reason: &'static str,
    message: String,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            reason: "internal",
            message: message.into(),
        }
    }
}

impl From<NavError> for ApiError {
    fn from(err: NavError) -> Self {
        let (status, reason) = match &err {
            NavError::UnknownMenu(_) => (StatusCode::NOT_FOUND, "unknown_menu"),
            NavError::Resolve(_) => (StatusCode::BAD_REQUEST, "invalid_location"),
        };
        Self {
            status,
            reason,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        metrics::record_rejected(self.reason);
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
