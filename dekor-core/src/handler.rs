//! Type-erased handler and middleware plumbing.
//!
//! Route chains are built once, at registration time: the controller method
//! is captured into a [`BoundHandler`] and its middleware are folded ahead
//! of it with [`compose`]. Nothing is looked up by name while a request is
//! in flight.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};

/// Boxed future produced by every step of a route chain.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A handler closure bound to its controller instance.
///
/// A missing or renamed method surfaces during registration rather than on
/// the first request that hits the route.
pub type BoundHandler = Arc<dyn Fn(Request) -> HandlerFuture + Send + Sync>;

type MiddlewareFn = dyn Fn(Request, Next) -> HandlerFuture + Send + Sync;

/// One middleware step in a route chain.
///
/// A middleware receives the request and a [`Next`] handle and decides
/// whether to forward. Steps run strictly in declaration order ahead of the
/// terminal handler.
#[derive(Clone)]
pub struct Middleware {
    name: &'static str,
    f: Arc<MiddlewareFn>,
}

impl Middleware {
    /// Wrap an `async fn(Request, Next) -> impl IntoResponse` under a name.
    ///
    /// The name shows up in `Debug` output and logs; the `#[middleware]`
    /// attribute passes the function's identifier.
    pub fn named<F, Fut>(name: &'static str, f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoResponse,
    {
        Self {
            name,
            f: Arc::new(move |req, next| {
                let fut = f(req, next);
                Box::pin(async move { fut.await.into_response() })
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn call(&self, req: Request, next: Next) -> HandlerFuture {
        (self.f)(req, next)
    }
}

impl std::fmt::Debug for Middleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Middleware").field(&self.name).finish()
    }
}

/// Handle to the remainder of a route chain.
#[derive(Clone)]
pub struct Next {
    inner: BoundHandler,
}

impl Next {
    pub(crate) fn new(inner: BoundHandler) -> Self {
        Self { inner }
    }

    /// Forward the request to the next step of the chain.
    pub async fn run(self, req: Request) -> Response {
        (self.inner)(req).await
    }
}

/// Fold a middleware chain ahead of its terminal handler.
///
/// The first stored middleware ends up outermost, so execution order is the
/// stored order, followed by the handler.
pub fn compose(chain: &[Middleware], terminal: BoundHandler) -> BoundHandler {
    let mut next = terminal;
    for mw in chain.iter().rev() {
        let mw = mw.clone();
        let inner = next;
        next = Arc::new(move |req| mw.call(req, Next::new(inner.clone())));
    }
    next
}
