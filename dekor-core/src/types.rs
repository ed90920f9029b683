//! Convenience type aliases for common handler return types.

use crate::error::ApiError;
use axum::http::StatusCode;
use axum::Json;

/// Flexible result alias — any response type with [`ApiError`].
///
/// ```ignore
/// #[get("/health")]
/// async fn health(&self) -> ApiResult<StatusCode> {
///     Ok(StatusCode::OK)
/// }
/// ```
pub type ApiResult<T> = Result<T, ApiError>;

/// The most common handler return type — `Result<Json<T>, ApiError>`.
pub type JsonResult<T> = Result<Json<T>, ApiError>;

/// Shorthand for endpoints that return only a status code (e.g. DELETE).
pub type StatusResult = Result<StatusCode, ApiError>;
