//! Dekor — annotation-driven controllers over Axum.
//!
//! This facade crate bundles the runtime (`dekor-core`) and the attribute
//! macros (`dekor-macros`) behind a single dependency. Import everything
//! you need with:
//!
//! ```ignore
//! use dekor::prelude::*;
//! ```
//!
//! A minimal application:
//!
//! ```ignore
//! use dekor::prelude::*;
//!
//! #[derive(Default)]
//! struct HealthController;
//!
//! #[controller("health")]
//! impl HealthController {
//!     #[get("/")]
//!     async fn ping(&self) -> ApiResult<&'static str> {
//!         Ok("ok")
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_tracing();
//!     let mut app = App::new();
//!     app.set_application_name("demo");
//!     app.set_global_prefix("api/v1")?;
//!     app.register_controllers(&controllers![HealthController])?;
//!     app.install_exception_boundary();
//!     app.listen(8080).await
//! }
//! ```

// Re-export sub-crates as public modules so they're accessible as
// `dekor::dekor_core` and `dekor::dekor_macros`.
//
// The proc macros use `proc-macro-crate` to detect whether the user depends
// on `dekor` (facade) or `dekor-core` directly, and generate the correct
// paths.
pub extern crate dekor_core;
pub extern crate dekor_macros;

// Re-export everything from dekor-core at the top level for convenience.
pub use dekor_core::*;

pub use dekor_macros::{
    controller, delete, get, head, middleware, options, patch, post, put,
};

/// Unified prelude — import everything with `use dekor::prelude::*`.
///
/// Includes the core prelude plus the attribute macros.
pub mod prelude {
    pub use dekor_core::prelude::*;
    pub use dekor_macros::{
        controller, delete, get, head, middleware, options, patch, post, put,
    };
}
