//! Controller registry: class name → factory.
//!
//! Controllers are looked up by the fully-qualified name produced by the
//! router's class-name builder. Existence and construction are two separate
//! operations so the router can tell "unknown class" apart from "the class
//! refused this view".
//!
//! Factories are registered at startup, either explicitly or at compile time
//! through [`register_controller!`](crate::register_controller) and
//! [`ControllerRegistry::from_inventory`].

use crate::controller::{Controller, ControllerContext};
use crate::logging::{debug, trace};
use crate::module::Module;
use crate::ControllerError;
use std::collections::HashMap;
use std::sync::Arc;

/// Boxed controller factory
pub type ControllerFactory = Arc<
    dyn Fn(&ControllerContext<'_>) -> Result<Box<dyn Controller>, ControllerError> + Send + Sync,
>;

/// Plain-function factory, usable in `const` context
pub type ControllerFactoryFn =
    fn(&ControllerContext<'_>) -> Result<Box<dyn Controller>, ControllerError>;

/// A controller factory collected via inventory
pub struct ControllerEntry {
    /// Fully-qualified controller name, e.g. `"blog::Index"`
    pub class_name: &'static str,
    pub factory: ControllerFactoryFn,
}

inventory::collect!(ControllerEntry);

impl ControllerEntry {
    pub const fn new(class_name: &'static str, factory: ControllerFactoryFn) -> Self {
        Self {
            class_name,
            factory,
        }
    }
}

/// Register a controller factory for compile-time collection
///
/// ```
/// use drone_mvc::{Controller, ControllerContext, ControllerError, register_controller};
///
/// struct Index;
///
/// impl Controller for Index {
///     fn set_method(&mut self, _view: &str) {}
///     fn execute(&mut self) -> Result<(), ControllerError> { Ok(()) }
/// }
///
/// fn build(_ctx: &ControllerContext<'_>) -> Result<Box<dyn Controller>, ControllerError> {
///     Ok(Box::new(Index))
/// }
///
/// register_controller!("docs::Index", build);
/// ```
#[macro_export]
macro_rules! register_controller {
    ($class_name:expr, $factory:expr) => {
        $crate::inventory::submit! {
            $crate::registry::ControllerEntry::new($class_name, $factory)
        }
    };
}

/// Lookup table from controller class names to factories, plus module hooks
#[derive(Clone, Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
    modules: HashMap<String, Arc<dyn Module>>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        debug!("Creating new controller registry");
        Self::default()
    }

    /// Registry pre-filled with every `register_controller!` entry
    pub fn from_inventory() -> Self {
        let mut registry = Self::new();
        for entry in inventory::iter::<ControllerEntry> {
            registry.register_fn(entry.class_name, entry.factory);
        }
        debug!(
            controller_count = registry.len(),
            "Controller registry loaded from inventory"
        );
        registry
    }

    /// Register a factory under a class name, replacing any previous one
    pub fn register<F>(&mut self, class_name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&ControllerContext<'_>) -> Result<Box<dyn Controller>, ControllerError>
            + Send
            + Sync
            + 'static,
    {
        let class_name = class_name.into();
        trace!(class_name = %class_name, "Registering controller factory");
        if self
            .factories
            .insert(class_name.clone(), Arc::new(factory))
            .is_some()
        {
            debug!(class_name = %class_name, "Controller factory replaced");
        }
        self
    }

    pub fn register_fn(
        &mut self,
        class_name: impl Into<String>,
        factory: ControllerFactoryFn,
    ) -> &mut Self {
        self.register(class_name, factory)
    }

    /// Register a module hook under its own name
    pub fn register_module<M: Module>(&mut self, module: M) -> &mut Self {
        let name = module.name().to_string();
        debug!(module = %name, "Module hook registered");
        self.modules.insert(name, Arc::new(module));
        self
    }

    /// Does a controller with this class name exist?
    pub fn contains(&self, class_name: &str) -> bool {
        let exists = self.factories.contains_key(class_name);
        trace!(class_name, exists, "Checked controller existence");
        exists
    }

    /// Construct the controller registered under `class_name`.
    ///
    /// Returns `None` when no such class exists; otherwise the factory's own
    /// outcome.
    pub fn construct(
        &self,
        class_name: &str,
        ctx: &ControllerContext<'_>,
    ) -> Option<Result<Box<dyn Controller>, ControllerError>> {
        self.factories.get(class_name).map(|factory| factory(ctx))
    }

    pub fn module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.get(name)
    }

    /// Registered class names, sorted
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut modules: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        modules.sort_unstable();
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.class_names())
            .field("modules", &modules)
            .finish()
    }
}
