//! Error taxonomy: fatal configuration errors and typed request errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::response::ApiResponse;

/// Fatal setup error, raised synchronously during configuration or
/// registration. A broken route table aborts boot instead of mounting a
/// partially working API.
pub enum ConfigurationError {
    /// The global prefix must not start with a path separator.
    InvalidGlobalPrefix(String),
    /// A route entry declared a verb outside the supported set.
    UnsupportedVerb {
        controller: &'static str,
        handler: String,
        verb: String,
    },
    /// A middleware annotation ran but no verb annotation ever did.
    MissingVerb {
        controller: &'static str,
        handler: String,
    },
    /// A route entry names a handler the controller cannot bind.
    UnknownHandler {
        controller: &'static str,
        handler: String,
    },
    /// `listen` was called while the server is already listening.
    AlreadyListening,
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::InvalidGlobalPrefix(prefix) => {
                write!(f, "global prefix {prefix:?} must not start with '/'")
            }
            ConfigurationError::UnsupportedVerb {
                controller,
                handler,
                verb,
            } => write!(
                f,
                "route {controller}::{handler} declares unsupported verb {verb:?}"
            ),
            ConfigurationError::MissingVerb {
                controller,
                handler,
            } => write!(
                f,
                "route {controller}::{handler} has middleware but no verb annotation"
            ),
            ConfigurationError::UnknownHandler {
                controller,
                handler,
            } => write!(f, "controller {controller} cannot bind handler {handler:?}"),
            ConfigurationError::AlreadyListening => {
                write!(f, "listen called while the server is already listening")
            }
        }
    }
}

impl std::fmt::Debug for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for ConfigurationError {}

/// Typed request-time errors, each carrying a standard HTTP status pairing.
///
/// Every variant renders through the `{statusCode, data, message}` envelope;
/// the async boundary converts them into responses, so they never escape to
/// the process.
pub enum ApiError {
    /// 400
    BadRequest(String),
    /// 401
    Unauthorized(String),
    /// 403
    Forbidden(String),
    /// 404
    NotFound(String),
    /// 409
    Conflict(String),
    /// 422, with a structured detail list rendered as `errors`.
    UnprocessableEntity {
        message: String,
        errors: Vec<serde_json::Value>,
    },
    /// 429
    TooManyRequests(String),
    /// 500
    Internal(String),
    /// Any other standard status pairing.
    Custom {
        status: StatusCode,
        message: String,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Custom { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::TooManyRequests(msg)
            | ApiError::Internal(msg) => msg,
            ApiError::UnprocessableEntity { message, .. } => message,
            ApiError::Custom { message, .. } => message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::UnprocessableEntity { message, errors } => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                let body = serde_json::json!({
                    "statusCode": status.as_u16(),
                    "data": null,
                    "message": message,
                    "errors": errors,
                });
                (status, axum::Json(body)).into_response()
            }
            other => {
                let status = other.status_code();
                ApiResponse::error(status, other.message()).into_response()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status_code(), self.message())
    }
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for ApiError {}
