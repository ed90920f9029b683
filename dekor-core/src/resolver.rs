//! Registration resolver: turns controller metadata into mounted sub-routers.
//!
//! Resolution is one-shot and write-only; there is no unmount or reload.
//! Mount order equals registration order, and precedence among overlapping
//! mounts is first-match.

use axum::extract::Request;
use axum::routing::{on, MethodFilter};
use axum::Router;
use tracing::info;

use crate::controller::ControllerDef;
use crate::error::ConfigurationError;
use crate::handler::compose;
use crate::meta::{RouteEntry, RouteRegistry};
use crate::paths::{mount_path, route_path};

/// The seven supported verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl Verb {
    /// Parse a declared verb string, case-insensitively.
    pub fn parse(s: &str) -> Option<Verb> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Some(Verb::Get),
            "post" => Some(Verb::Post),
            "put" => Some(Verb::Put),
            "delete" => Some(Verb::Delete),
            "patch" => Some(Verb::Patch),
            "options" => Some(Verb::Options),
            "head" => Some(Verb::Head),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Patch => "PATCH",
            Verb::Options => "OPTIONS",
            Verb::Head => "HEAD",
        }
    }

    fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Put => MethodFilter::PUT,
            Verb::Delete => MethodFilter::DELETE,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Options => MethodFilter::OPTIONS,
            Verb::Head => MethodFilter::HEAD,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn entry_verb(controller: &'static str, entry: &RouteEntry) -> Result<Verb, ConfigurationError> {
    match entry.verb.as_deref() {
        None => Err(ConfigurationError::MissingVerb {
            controller,
            handler: entry.handler_name.clone(),
        }),
        Some(raw) => Verb::parse(raw).ok_or_else(|| ConfigurationError::UnsupportedVerb {
            controller,
            handler: entry.handler_name.clone(),
            verb: raw.to_string(),
        }),
    }
}

/// Resolve the controller list into ordered `(mount_path, sub_router)`
/// pairs, without touching the target router.
///
/// Every entry of every controller is validated before any sub-router is
/// built: one bad entry fails the whole call and nothing gets mounted.
pub fn resolve_controllers(
    global_prefix: &str,
    controllers: &[ControllerDef],
) -> Result<Vec<(String, Router)>, ConfigurationError> {
    let mut registry = RouteRegistry::new();
    for def in controllers {
        // One descriptor per class; repeat appearances reuse it so that
        // middleware chains are not merged twice.
        if !registry.contains((def.type_id)()) {
            (def.register_meta)(&mut registry);
        }
    }

    for def in controllers {
        if let Some(descriptor) = registry.get((def.type_id)()) {
            for entry in &descriptor.routes {
                entry_verb(descriptor.controller_name, entry)?;
            }
        }
    }

    let mut mounts = Vec::with_capacity(controllers.len());
    for def in controllers {
        let Some(descriptor) = registry.get((def.type_id)()) else {
            // A hand-written controller that registered nothing.
            continue;
        };
        let path = mount_path(global_prefix, &descriptor.path_prefix);
        let instance = (def.instantiate)();

        let mut sub = Router::new();
        for entry in &descriptor.routes {
            let verb = entry_verb(descriptor.controller_name, entry)?;
            let handler = instance.bind(&entry.handler_name).ok_or_else(|| {
                ConfigurationError::UnknownHandler {
                    controller: descriptor.controller_name,
                    handler: entry.handler_name.clone(),
                }
            })?;
            let chain = compose(&entry.middleware, handler);
            let route = route_path(&entry.path);
            info!(
                controller = descriptor.controller_name,
                handler = %entry.handler_name,
                "mapped {{{}, {verb}}} route",
                full_path(&path, &route),
            );
            sub = sub.route(
                &route,
                on(verb.filter(), move |req: Request| {
                    let chain = chain.clone();
                    async move { chain(req).await }
                }),
            );
        }
        mounts.push((path, sub));
    }
    Ok(mounts)
}

/// Mount resolved sub-routers onto `router`, in order.
///
/// axum rejects duplicate route registration instead of doing first-match,
/// so same-path mounts are chained through `fallback_service`: the router
/// mounted first serves everything it matches, later ones only see what it
/// missed.
pub fn mount_all(mut router: Router, mounts: Vec<(String, Router)>) -> Router {
    let mut grouped: Vec<(String, Router)> = Vec::new();
    for (path, sub) in mounts {
        match grouped.iter().position(|(p, _)| p == &path) {
            Some(idx) => {
                let first = std::mem::take(&mut grouped[idx].1);
                grouped[idx].1 = first.fallback_service(sub);
            }
            None => grouped.push((path, sub)),
        }
    }
    for (path, sub) in grouped {
        // Nesting at the root is rejected by axum; merge instead.
        router = if path == "/" {
            router.merge(sub)
        } else {
            router.nest(&path, sub)
        };
    }
    router
}

/// Resolve and mount in one shot.
pub fn register_controllers(
    router: Router,
    global_prefix: &str,
    controllers: &[ControllerDef],
) -> Result<Router, ConfigurationError> {
    let mounts = resolve_controllers(global_prefix, controllers)?;
    Ok(mount_all(router, mounts))
}

fn full_path(mount: &str, route: &str) -> String {
    match (mount, route) {
        ("/", r) => r.to_string(),
        (m, "/") => m.to_string(),
        (m, r) => format!("{m}{r}"),
    }
}
