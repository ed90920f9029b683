//! Route metadata store.
//!
//! A [`RouteRegistry`] maps each controller type to its
//! [`ControllerDescriptor`], populated through the accessors here when a
//! controller replays its annotations. Verb and middleware applications
//! merge into the same [`RouteEntry`] regardless of which ran first.
//!
//! The registry is written during registration and read once by the
//! resolver; the write phase and the serve phase never overlap, so no
//! locking is involved.

use std::any::TypeId;
use std::collections::HashMap;

use crate::handler::Middleware;

/// One endpoint definition: verb, path, handler name, middleware chain.
#[derive(Debug, Clone, Default)]
pub struct RouteEntry {
    /// Declared verb, kept as the raw string; the resolver validates it
    /// against the supported set. `None` until a verb attribute runs,
    /// which happens when a middleware attribute ran first.
    pub verb: Option<String>,
    pub path: String,
    pub handler_name: String,
    pub middleware: Vec<Middleware>,
}

impl RouteEntry {
    fn new(handler_name: &str) -> Self {
        Self {
            handler_name: handler_name.to_string(),
            ..Default::default()
        }
    }

    /// Overwrite verb and path. Applying two verb attributes to one method
    /// is misuse; the last application wins.
    pub fn set_verb_and_path(&mut self, verb: impl Into<String>, path: impl Into<String>) {
        self.verb = Some(verb.into());
        self.path = path.into();
    }

    /// Append middleware in call order. Valid before or after
    /// [`set_verb_and_path`](Self::set_verb_and_path).
    pub fn merge_middleware<I>(&mut self, middleware: I)
    where
        I: IntoIterator<Item = Middleware>,
    {
        self.middleware.extend(middleware);
    }
}

/// Per-controller bundle: path prefix plus its route entries, in discovery
/// order.
#[derive(Debug, Clone)]
pub struct ControllerDescriptor {
    pub path_prefix: String,
    pub routes: Vec<RouteEntry>,
    pub controller_name: &'static str,
}

impl ControllerDescriptor {
    fn new(controller_name: &'static str) -> Self {
        Self {
            path_prefix: String::new(),
            routes: Vec::new(),
            controller_name,
        }
    }

    /// Entry for a handler name: the existing one, keeping its discovery
    /// position in the sequence, or a freshly appended one.
    pub fn route_entry_mut(&mut self, handler_name: &str) -> &mut RouteEntry {
        if let Some(idx) = self
            .routes
            .iter()
            .position(|e| e.handler_name == handler_name)
        {
            &mut self.routes[idx]
        } else {
            self.routes.push(RouteEntry::new(handler_name));
            self.routes.last_mut().expect("entry just pushed")
        }
    }
}

/// Registry of controller descriptors, keyed by controller type.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    inner: HashMap<TypeId, ControllerDescriptor>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the descriptor for a controller type. Idempotent:
    /// repeated calls return the same descriptor.
    pub fn descriptor_mut<C: 'static>(&mut self) -> &mut ControllerDescriptor {
        self.inner
            .entry(TypeId::of::<C>())
            .or_insert_with(|| ControllerDescriptor::new(short_type_name::<C>()))
    }

    /// Read access to a descriptor, if the type has registered anything.
    pub fn descriptor<C: 'static>(&self) -> Option<&ControllerDescriptor> {
        self.get(TypeId::of::<C>())
    }

    pub(crate) fn get(&self, type_id: TypeId) -> Option<&ControllerDescriptor> {
        self.inner.get(&type_id)
    }

    pub(crate) fn contains(&self, type_id: TypeId) -> bool {
        self.inner.contains_key(&type_id)
    }

    /// Overwrite the controller's path prefix; last write wins.
    pub fn set_prefix<C: 'static>(&mut self, prefix: impl Into<String>) {
        self.descriptor_mut::<C>().path_prefix = prefix.into();
    }

    /// Entry for `handler_name` on controller `C`, creating descriptor and
    /// entry as needed.
    pub fn route_entry_mut<C: 'static>(&mut self, handler_name: &str) -> &mut RouteEntry {
        self.descriptor_mut::<C>().route_entry_mut(handler_name)
    }
}

/// Last segment of `std::any::type_name`, for logs and error messages.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
