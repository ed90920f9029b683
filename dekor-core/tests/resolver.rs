use std::sync::Arc;

use axum::body::Body;
use dekor_core::controller::Controller;
use dekor_core::controllers;
use dekor_core::error::ConfigurationError;
use dekor_core::handler::{BoundHandler, Middleware, Next};
use dekor_core::http::{IntoResponse, Request, Router, StatusCode};
use dekor_core::meta::RouteRegistry;
use dekor_core::resolver::register_controllers;
use tower::ServiceExt;

async fn send(router: Router, method: &str, path: &str) -> (StatusCode, String) {
    let req = axum::http::Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = http_body_util::BodyExt::collect(resp.into_body())
        .await
        .unwrap()
        .to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

fn respond(text: &'static str) -> BoundHandler {
    Arc::new(move |_req| Box::pin(async move { text.into_response() }))
}

fn tagging(name: &'static str) -> Middleware {
    Middleware::named(name, move |req: Request, next: Next| async move {
        let mut resp = next.run(req).await;
        resp.headers_mut().append(
            "x-mw",
            axum::http::HeaderValue::from_static(name),
        );
        resp
    })
}

// ── Basic mounting ──────────────────────────────────────────────────────

struct UsersController;

impl Controller for UsersController {
    fn construct() -> Self {
        UsersController
    }
    fn register_meta(registry: &mut RouteRegistry) {
        registry.set_prefix::<Self>("users");
        registry
            .route_entry_mut::<Self>("list")
            .set_verb_and_path("get", "/");
        registry
            .route_entry_mut::<Self>("create")
            .set_verb_and_path("post", "/");
        registry
            .route_entry_mut::<Self>("find")
            .set_verb_and_path("get", "/{id}");
    }
    fn bind(_this: &Arc<Self>, handler_name: &str) -> Option<BoundHandler> {
        match handler_name {
            "list" => Some(respond("list")),
            "create" => Some(respond("create")),
            "find" => Some(respond("find")),
            _ => None,
        }
    }
}

#[tokio::test]
async fn routes_mount_under_global_and_controller_prefix() {
    let router =
        register_controllers(Router::new(), "api/v1", &controllers![UsersController]).unwrap();

    let (status, body) = send(router.clone(), "GET", "/api/v1/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "list");

    let (status, body) = send(router.clone(), "POST", "/api/v1/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "create");

    let (status, body) = send(router, "GET", "/api/v1/users/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "find");
}

#[tokio::test]
async fn verb_is_enforced_per_route() {
    let router =
        register_controllers(Router::new(), "api/v1", &controllers![UsersController]).unwrap();
    let (status, _) = send(router, "DELETE", "/api/v1/users").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn empty_prefixes_mount_at_the_root() {
    let router = register_controllers(Router::new(), "", &controllers![RootController]).unwrap();
    let (status, body) = send(router, "GET", "/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "pong");
}

struct RootController;

impl Controller for RootController {
    fn construct() -> Self {
        RootController
    }
    fn register_meta(registry: &mut RouteRegistry) {
        registry
            .route_entry_mut::<Self>("ping")
            .set_verb_and_path("get", "/ping");
    }
    fn bind(_this: &Arc<Self>, handler_name: &str) -> Option<BoundHandler> {
        (handler_name == "ping").then(|| respond("pong"))
    }
}

// ── Middleware composition ──────────────────────────────────────────────

struct GuardedController;

impl Controller for GuardedController {
    fn construct() -> Self {
        GuardedController
    }
    fn register_meta(registry: &mut RouteRegistry) {
        registry.set_prefix::<Self>("guarded");
        // Middleware applied before the verb: both must land on one route.
        {
            let entry = registry.route_entry_mut::<Self>("first");
            entry.merge_middleware([tagging("outer"), tagging("inner")]);
            entry.set_verb_and_path("get", "/first");
        }
        // Verb applied before the middleware.
        {
            let entry = registry.route_entry_mut::<Self>("second");
            entry.set_verb_and_path("get", "/second");
            entry.merge_middleware([tagging("outer")]);
        }
        registry
            .route_entry_mut::<Self>("locked")
            .set_verb_and_path("get", "/locked");
        registry
            .route_entry_mut::<Self>("locked")
            .merge_middleware([Middleware::named("reject", |_req: Request, _next: Next| async {
                (StatusCode::FORBIDDEN, "nope")
            })]);
    }
    fn bind(_this: &Arc<Self>, handler_name: &str) -> Option<BoundHandler> {
        match handler_name {
            "first" => Some(respond("first")),
            "second" => Some(respond("second")),
            "locked" => Some(respond("locked")),
            _ => None,
        }
    }
}

#[tokio::test]
async fn middleware_runs_regardless_of_annotation_order() {
    let router =
        register_controllers(Router::new(), "", &controllers![GuardedController]).unwrap();

    let req = axum::http::Request::builder()
        .uri("/guarded/first")
        .body(Body::empty())
        .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let tags: Vec<_> = resp
        .headers()
        .get_all("x-mw")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    // Tags append on the way out, so declaration order reads reversed.
    assert_eq!(tags, vec!["inner", "outer"]);

    let (status, body) = send(router, "GET", "/guarded/second").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "second");
}

#[tokio::test]
async fn middleware_can_short_circuit_the_chain() {
    let router =
        register_controllers(Router::new(), "", &controllers![GuardedController]).unwrap();
    let (status, body) = send(router, "GET", "/guarded/locked").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "nope");
}

// ── Configuration failures are fail-fast ────────────────────────────────

struct BadVerbController;

impl Controller for BadVerbController {
    fn construct() -> Self {
        BadVerbController
    }
    fn register_meta(registry: &mut RouteRegistry) {
        registry.set_prefix::<Self>("bad");
        registry
            .route_entry_mut::<Self>("weird")
            .set_verb_and_path("foo", "/");
    }
    fn bind(_this: &Arc<Self>, handler_name: &str) -> Option<BoundHandler> {
        (handler_name == "weird").then(|| respond("weird"))
    }
}

#[tokio::test]
async fn unsupported_verb_aborts_registration() {
    let err = register_controllers(
        Router::new(),
        "",
        &controllers![UsersController, BadVerbController],
    )
    .unwrap_err();
    match err {
        ConfigurationError::UnsupportedVerb {
            controller,
            handler,
            verb,
        } => {
            assert_eq!(controller, "BadVerbController");
            assert_eq!(handler, "weird");
            assert_eq!(verb, "foo");
        }
        other => panic!("expected UnsupportedVerb, got {other}"),
    }
}

struct OrphanMiddlewareController;

impl Controller for OrphanMiddlewareController {
    fn construct() -> Self {
        OrphanMiddlewareController
    }
    fn register_meta(registry: &mut RouteRegistry) {
        registry
            .route_entry_mut::<Self>("orphan")
            .merge_middleware([tagging("auth")]);
    }
    fn bind(_this: &Arc<Self>, handler_name: &str) -> Option<BoundHandler> {
        (handler_name == "orphan").then(|| respond("orphan"))
    }
}

#[tokio::test]
async fn middleware_without_verb_aborts_registration() {
    let err =
        register_controllers(Router::new(), "", &controllers![OrphanMiddlewareController])
            .unwrap_err();
    assert!(matches!(err, ConfigurationError::MissingVerb { .. }));
}

struct LiarController;

impl Controller for LiarController {
    fn construct() -> Self {
        LiarController
    }
    fn register_meta(registry: &mut RouteRegistry) {
        registry
            .route_entry_mut::<Self>("ghost")
            .set_verb_and_path("get", "/");
    }
    fn bind(_this: &Arc<Self>, _handler_name: &str) -> Option<BoundHandler> {
        None
    }
}

#[tokio::test]
async fn unbindable_handler_aborts_registration() {
    let err = register_controllers(Router::new(), "", &controllers![LiarController]).unwrap_err();
    match err {
        ConfigurationError::UnknownHandler {
            controller,
            handler,
        } => {
            assert_eq!(controller, "LiarController");
            assert_eq!(handler, "ghost");
        }
        other => panic!("expected UnknownHandler, got {other}"),
    }
}

// ── Overlapping mounts ──────────────────────────────────────────────────

struct PrimaryController;
struct ShadowController;

impl Controller for PrimaryController {
    fn construct() -> Self {
        PrimaryController
    }
    fn register_meta(registry: &mut RouteRegistry) {
        registry.set_prefix::<Self>("shared");
        registry
            .route_entry_mut::<Self>("a")
            .set_verb_and_path("get", "/a");
    }
    fn bind(_this: &Arc<Self>, handler_name: &str) -> Option<BoundHandler> {
        (handler_name == "a").then(|| respond("primary"))
    }
}

impl Controller for ShadowController {
    fn construct() -> Self {
        ShadowController
    }
    fn register_meta(registry: &mut RouteRegistry) {
        registry.set_prefix::<Self>("shared");
        registry
            .route_entry_mut::<Self>("a")
            .set_verb_and_path("get", "/a");
        registry
            .route_entry_mut::<Self>("b")
            .set_verb_and_path("get", "/b");
    }
    fn bind(_this: &Arc<Self>, handler_name: &str) -> Option<BoundHandler> {
        match handler_name {
            "a" => Some(respond("shadow-a")),
            "b" => Some(respond("shadow-b")),
            _ => None,
        }
    }
}

#[tokio::test]
async fn first_registered_controller_wins_on_overlap() {
    let router = register_controllers(
        Router::new(),
        "",
        &controllers![PrimaryController, ShadowController],
    )
    .unwrap();

    let (_, body) = send(router.clone(), "GET", "/shared/a").await;
    assert_eq!(body, "primary");

    // Routes only the first mount lacks still reach the second.
    let (_, body) = send(router, "GET", "/shared/b").await;
    assert_eq!(body, "shadow-b");
}

#[tokio::test]
async fn repeated_class_does_not_duplicate_middleware() {
    let router = register_controllers(
        Router::new(),
        "",
        &controllers![GuardedController, GuardedController],
    )
    .unwrap();

    let req = axum::http::Request::builder()
        .uri("/guarded/second")
        .body(Body::empty())
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    let tags: Vec<_> = resp.headers().get_all("x-mw").iter().collect();
    assert_eq!(tags.len(), 1);
}
