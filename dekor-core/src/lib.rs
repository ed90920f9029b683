//! Core runtime for the dekor web framework.
//!
//! Controllers declare their routes through annotations; the metadata lands
//! in a [`RouteRegistry`], the [`resolver`] turns it into mounted axum
//! sub-routers, and the [`App`] facade owns the assembled router and the
//! server lifecycle.

pub mod app;
pub mod boundary;
pub mod controller;
pub mod error;
pub mod handler;
pub mod http;
pub mod logging;
pub mod meta;
pub mod paths;
pub mod prelude;
pub mod resolver;
pub mod response;
pub mod types;

pub use app::{App, Lifecycle};
pub use controller::{BoundInstance, Controller, ControllerDef};
pub use error::{ApiError, ConfigurationError};
pub use handler::{BoundHandler, HandlerFuture, Middleware, Next};
pub use logging::init_tracing;
pub use meta::{ControllerDescriptor, RouteEntry, RouteRegistry};
pub use resolver::{register_controllers, resolve_controllers, Verb};
pub use response::ApiResponse;
pub use types::{ApiResult, JsonResult, StatusResult};
