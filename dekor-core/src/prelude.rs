//! dekor-core prelude — import everything controller code needs with a
//! single `use`.

pub use crate::app::{App, Lifecycle};
pub use crate::controller::{Controller as ControllerTrait, ControllerDef};
pub use crate::controllers;
pub use crate::error::{ApiError, ConfigurationError};
pub use crate::handler::{BoundHandler, Middleware, Next};
pub use crate::logging::init_tracing;
pub use crate::meta::{ControllerDescriptor, RouteEntry, RouteRegistry};
pub use crate::resolver::{register_controllers, Verb};
pub use crate::response::ApiResponse;
pub use crate::types::{ApiResult, JsonResult, StatusResult};

// ── HTTP re-exports ─────────────────────────────────────────────────────

pub use crate::http::{
    CorsLayer, Html, IntoResponse, Json, Path, Query, Redirect, Request, RequestExt, Response,
    Router, State, StatusCode,
};
