//! Application facade: owns the assembled router, the global prefix, and
//! the server lifecycle.

use std::net::SocketAddr;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::controller::ControllerDef;
use crate::error::ConfigurationError;
use crate::resolver::{mount_all, resolve_controllers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Constructed,
    Listening,
}

/// The application: a router, a global prefix, and a lifecycle state.
///
/// Constructed explicitly by the caller and passed where needed; the crate
/// keeps no hidden shared instance.
///
/// ```ignore
/// let mut app = App::new();
/// app.set_global_prefix("api/v1")?;
/// app.register_controllers(&controllers![UserController])?;
/// app.install_exception_boundary();
/// app.listen(3000).await?;
/// ```
pub struct App {
    router: Router,
    global_prefix: String,
    app_name: String,
    lifecycle: Lifecycle,
}

impl App {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            global_prefix: String::new(),
            app_name: "dekor".to_string(),
            lifecycle: Lifecycle::Constructed,
        }
    }

    /// Set the global path prefix prepended to every controller mount.
    ///
    /// Written without a leading slash (`"api/v1"`). Calling again
    /// overwrites; controllers registered earlier are not remounted.
    pub fn set_global_prefix(&mut self, prefix: &str) -> Result<(), ConfigurationError> {
        if prefix.starts_with('/') {
            return Err(ConfigurationError::InvalidGlobalPrefix(prefix.to_string()));
        }
        self.global_prefix = prefix.to_string();
        Ok(())
    }

    pub fn global_prefix(&self) -> &str {
        &self.global_prefix
    }

    pub fn set_application_name(&mut self, name: impl Into<String>) {
        self.app_name = name.into();
    }

    pub fn application_name(&self) -> &str {
        &self.app_name
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Register controllers in list order under the current global prefix.
    ///
    /// Fail-fast: on error the route table is left exactly as it was.
    pub fn register_controllers(
        &mut self,
        controllers: &[ControllerDef],
    ) -> Result<(), ConfigurationError> {
        let mounts = resolve_controllers(&self.global_prefix, controllers)?;
        let router = std::mem::take(&mut self.router);
        self.router = mount_all(router, mounts);
        Ok(())
    }

    /// Apply a CORS layer to the whole application.
    ///
    /// Use [`CorsLayer::permissive`] for development or pass a configured
    /// layer for production.
    pub fn enable_cors(&mut self, layer: CorsLayer) {
        let router = std::mem::take(&mut self.router);
        self.router = router.layer(layer);
    }

    /// Log requests and responses through tower-http's trace layer.
    pub fn enable_trace(&mut self) {
        let router = std::mem::take(&mut self.router);
        self.router = router.layer(TraceLayer::new_for_http());
    }

    /// Install the terminal fallback responder and the catch-panic layer.
    /// Call after all other registration so it is last in the chain.
    pub fn install_exception_boundary(&mut self) {
        let router = std::mem::take(&mut self.router);
        self.router = crate::boundary::install(router);
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Consume the facade, yielding the assembled router. Used by tests and
    /// custom serving setups.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind and serve on `port`, logging a startup line.
    pub async fn listen(&mut self, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let name = self.app_name.clone();
        self.serve(port, move |addr| {
            info!(%addr, "[{}] server started on port {}", name, addr.port());
        })
        .await
    }

    /// Bind and serve on `port`, deferring the startup notification to
    /// `on_listening` instead of logging.
    pub async fn listen_with<F>(
        &mut self,
        port: u16,
        on_listening: F,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        F: FnOnce(SocketAddr),
    {
        self.serve(port, on_listening).await
    }

    async fn serve<F>(&mut self, port: u16, on_listening: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: FnOnce(SocketAddr),
    {
        if self.lifecycle == Lifecycle::Listening {
            return Err(Box::new(ConfigurationError::AlreadyListening));
        }
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        let addr = listener.local_addr()?;
        self.lifecycle = Lifecycle::Listening;
        on_listening(addr);
        let router = std::mem::take(&mut self.router);
        axum::serve(listener, router).await?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
