//! Async error boundary around route handlers.
//!
//! [`capture`] wraps every terminal handler at registration time; [`install`]
//! adds the terminal fallback responder and a catch-panic layer for anything
//! that slips past the per-route capture (middleware included).

use std::panic::AssertUnwindSafe;

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use futures_util::FutureExt;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::ApiError;
use crate::response::ApiResponse;

/// Await a handler future, converting errors and panics into envelope
/// responses. Request-time failures never propagate past this point.
pub async fn capture<R, F>(fut: F) -> Response
where
    F: std::future::Future<Output = Result<R, ApiError>>,
    R: IntoResponse,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(value)) => value.into_response(),
        Ok(Err(err)) => {
            tracing::error!(status = err.status_code().as_u16(), error = %err, "handler error");
            err.into_response()
        }
        Err(panic) => {
            tracing::error!(panic = panic_message(&panic), "handler panicked");
            internal_error_response()
        }
    }
}

/// Install the terminal pieces of the error pipeline: a fallback responder
/// for unmatched paths and a catch-panic layer. Meant to run after all other
/// registration so it sits last in the chain.
pub fn install(router: Router) -> Router {
    router
        .fallback(fallback_handler)
        .layer(CatchPanicLayer::custom(handle_panic))
}

async fn fallback_handler(method: Method, uri: Uri) -> Response {
    ApiResponse::error(
        StatusCode::NOT_FOUND,
        format!("Cannot {method} {}", uri.path()),
    )
    .into_response()
}

fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!(panic = panic_message(&panic), "request panicked");
    internal_error_response()
}

fn internal_error_response() -> Response {
    ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
