//! Narrow re-export of the axum surface controller code interacts with.

pub use axum::extract::{Path, Query, Request, State};
pub use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
pub use axum::response::{Html, IntoResponse, Redirect, Response};
pub use axum::routing::{self, MethodFilter};
pub use axum::{serve, Json, RequestExt, Router};
pub use tower_http::cors::CorsLayer;
