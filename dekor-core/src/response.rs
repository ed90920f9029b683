//! Standard response envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// The `{statusCode, data, message}` body used across the framework.
///
/// Error responses carry `data: null`; handlers can also return the
/// envelope directly for uniform success bodies.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T = ()> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data: Some(data),
            message: message.into(),
        }
    }

    /// Success envelope with status 200.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, data, message)
    }
}

impl ApiResponse<()> {
    /// Envelope with `data: null`, as rendered for every error.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data: None,
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
