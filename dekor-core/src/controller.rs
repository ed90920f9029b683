//! Controller trait and type-erased registration tokens.

use std::any::TypeId;
use std::sync::Arc;

use crate::handler::BoundHandler;
use crate::meta::{short_type_name, RouteRegistry};

/// A routable controller: replays its annotations into the metadata store
/// and binds handlers on a constructed instance.
///
/// Implementations are normally generated by the `#[controller]` attribute;
/// tests and special cases can implement the trait by hand.
pub trait Controller: Send + Sync + Sized + 'static {
    /// Build one instance. Controllers take no constructor arguments; the
    /// generated impl delegates to `Default`.
    fn construct() -> Self;

    /// Replay this controller's annotations into the registry, in source
    /// order.
    fn register_meta(registry: &mut RouteRegistry);

    /// Resolve a handler name to a closure bound to `this`, or `None` for
    /// names the controller does not know.
    fn bind(this: &Arc<Self>, handler_name: &str) -> Option<BoundHandler>;
}

/// Type-erased registration token for one controller class.
///
/// The resolver takes an ordered list of these; each appearance produces
/// its own instance and its own sub-router.
pub struct ControllerDef {
    pub(crate) type_id: fn() -> TypeId,
    pub(crate) name: &'static str,
    pub(crate) register_meta: fn(&mut RouteRegistry),
    pub(crate) instantiate: fn() -> BoundInstance,
}

impl ControllerDef {
    pub fn of<C: Controller>() -> Self {
        Self {
            type_id: TypeId::of::<C>,
            name: short_type_name::<C>(),
            register_meta: C::register_meta,
            instantiate: || {
                let instance = Arc::new(C::construct());
                BoundInstance {
                    bind: Box::new(move |name| C::bind(&instance, name)),
                }
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for ControllerDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ControllerDef").field(&self.name).finish()
    }
}

/// A constructed controller instance with name-to-handler binding.
pub struct BoundInstance {
    pub(crate) bind: Box<dyn Fn(&str) -> Option<BoundHandler> + Send + Sync>,
}

impl BoundInstance {
    pub(crate) fn bind(&self, handler_name: &str) -> Option<BoundHandler> {
        (self.bind)(handler_name)
    }
}

/// Build the ordered `Vec<ControllerDef>` handed to registration.
///
/// ```ignore
/// app.register_controllers(&controllers![UserController, HealthController])?;
/// ```
#[macro_export]
macro_rules! controllers {
    ( $( $ty:ty ),* $(,)? ) => {
        vec![ $( $crate::controller::ControllerDef::of::<$ty>() ),* ]
    };
}
