//! Router: builds the route and calls the application controller.
//!
//! # Matching
//!
//! ```text
//! RequestParams (+ reserved "params")
//!     → expand key/value path params
//!     → module:     identifier | routes["defaults"].module
//!     → controller: identifier | routes[module].controller
//!     → view:       identifier | routes[module].view
//!     → class name = builder(module, controller)
//!     → registry lookup → factory(ctx) → module hook → set_method(view)
//! ```
//!
//! A router serves one request: `match_route` then `run`.

use crate::class_name::{self, ClassNameBuilder};
use crate::controller::{Controller, ControllerContext};
use crate::logging::{debug, trace, warn};
use crate::params::RequestParams;
use crate::registry::ControllerRegistry;
use crate::route_stack::{RouteStack, SegmentRouteStack};
use crate::routes::{Route, RouteTable};
use crate::{ControllerError, Error, Result};
use std::sync::Arc;

/// The identifiers a route is built from. Empty or absent means "default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifiers {
    pub module: Option<String>,
    pub controller: Option<String>,
    pub view: Option<String>,
}

impl Identifiers {
    pub fn new(module: Option<&str>, controller: Option<&str>, view: Option<&str>) -> Self {
        Self {
            module: module.map(str::to_string),
            controller: controller.map(str::to_string),
            view: view.map(str::to_string),
        }
    }
}

fn explicit(identifier: &Option<String>) -> Option<&str> {
    identifier.as_deref().filter(|s| !s.is_empty())
}

/// The controller chosen by the last successful match
struct MatchedController {
    class_name: String,
    view: String,
    controller: Box<dyn Controller>,
}

/// Request router
pub struct Router {
    routes: RouteTable,
    identifiers: Identifiers,
    class_name_builder: Option<ClassNameBuilder>,
    registry: Arc<ControllerRegistry>,
    route_stack: Box<dyn RouteStack>,
    matched: Option<MatchedController>,
}

impl Router {
    /// Router with an empty route table and the default class-name builder
    pub fn new(registry: Arc<ControllerRegistry>) -> Self {
        Self {
            routes: RouteTable::new(),
            identifiers: Identifiers::default(),
            class_name_builder: Some(class_name::default_builder()),
            registry,
            route_stack: Box::new(SegmentRouteStack::new()),
            matched: None,
        }
    }

    /// Router bulk-loaded with `routes`; fails on the first duplicate key
    pub fn with_routes<I>(registry: Arc<ControllerRegistry>, routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Route>,
    {
        let mut router = Self::new(registry);
        for route in routes {
            router.add_route(route)?;
        }
        Ok(router)
    }

    /// Replace the path-pattern route delegate
    pub fn with_route_stack(mut self, stack: impl RouteStack + 'static) -> Self {
        self.route_stack = Box::new(stack);
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn identifiers(&self) -> &Identifiers {
        &self.identifiers
    }

    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    pub fn route_stack(&self) -> &dyn RouteStack {
        self.route_stack.as_ref()
    }

    pub fn class_name_builder(&self) -> Option<&ClassNameBuilder> {
        self.class_name_builder.as_ref()
    }

    /// Overwrite the identifier triple
    pub fn set_identifiers(
        &mut self,
        module: Option<&str>,
        controller: Option<&str>,
        view: Option<&str>,
    ) {
        self.identifiers = Identifiers::new(module, controller, view);
    }

    /// Replace the strategy that turns `(module, controller)` into a class name
    pub fn set_class_name_builder<F>(&mut self, builder: F)
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.class_name_builder = Some(Arc::new(builder));
    }

    pub fn clear_class_name_builder(&mut self) {
        self.class_name_builder = None;
    }

    /// Add a route table entry; a key may only be defined once
    pub fn add_route(&mut self, route: Route) -> Result<()> {
        let key = route.key.clone();
        self.routes.insert(route)?;
        trace!(key = %key, "Route added");
        Ok(())
    }

    /// Add a named route to the path-pattern delegate
    pub fn add_pattern_route(&mut self, name: &str, pattern: &str) -> Result<()> {
        self.route_stack.add_route(name, pattern)?;
        Ok(())
    }

    /// The matched controller
    pub fn controller(&self) -> Result<&dyn Controller> {
        self.matched
            .as_ref()
            .map(|m| m.controller.as_ref())
            .ok_or(Error::NoControllerMatched)
    }

    pub fn controller_mut(&mut self) -> Result<&mut (dyn Controller + 'static)> {
        match self.matched.as_mut() {
            Some(m) => Ok(m.controller.as_mut()),
            None => Err(Error::NoControllerMatched),
        }
    }

    /// View bound on the matched controller
    pub fn matched_view(&self) -> Option<&str> {
        self.matched.as_ref().map(|m| m.view.as_str())
    }

    /// Class name of the matched controller
    pub fn matched_class_name(&self) -> Option<&str> {
        self.matched.as_ref().map(|m| m.class_name.as_str())
    }

    pub fn is_matched(&self) -> bool {
        self.matched.is_some()
    }

    /// Build the current route and construct its controller.
    ///
    /// The reserved `params` entry of `params` is expanded into regular
    /// parameters first. Any previous match is discarded, so a failed match
    /// leaves the router unmatched.
    pub fn match_route(&mut self, params: &mut RequestParams) -> Result<()> {
        let builder = self
            .class_name_builder
            .clone()
            .ok_or_else(|| Error::Configuration("No class name builder found".to_string()))?;

        self.matched = None;

        let expanded = params.expand_path_params();
        if !expanded.is_empty() {
            trace!(count = expanded.len(), "Expanded key/value path parameters");
        }

        let module = match explicit(&self.identifiers.module) {
            Some(module) => module.to_string(),
            None => self.routes.default_module().unwrap_or_default().to_string(),
        };

        let Some(descriptor) = self.routes.get(&module) else {
            debug!(module = %module, "Module not found in routes");
            return Err(Error::ModuleNotFound(module));
        };

        let controller = explicit(&self.identifiers.controller)
            .or(descriptor.controller.as_deref())
            .unwrap_or_default()
            .to_string();
        let view = explicit(&self.identifiers.view)
            .or(descriptor.view.as_deref())
            .unwrap_or_default()
            .to_string();

        let class_name = builder(&module, &controller);
        debug!(
            module = %module,
            controller = %controller,
            view = %view,
            class_name = %class_name,
            "Resolved route"
        );

        if !self.registry.contains(&class_name) {
            return Err(Error::ControllerNotFound(class_name));
        }

        let ctx = ControllerContext {
            module: &module,
            controller: &controller,
            view: &view,
            params,
        };

        let mut instance = match self.registry.construct(&class_name, &ctx) {
            Some(Ok(instance)) => instance,
            // a view the controller can't serve is, to the caller, no page at all
            Some(Err(
                cause @ (ControllerError::MethodNotFound(_)
                | ControllerError::PrivateMethodExecution(_)),
            )) => {
                warn!(class_name = %class_name, view = %view, error = %cause, "View rejected by controller");
                return Err(Error::PageNotFound {
                    message: cause.message().to_string(),
                    source: cause,
                });
            }
            Some(Err(other)) => return Err(Error::Controller(other)),
            None => return Err(Error::ControllerNotFound(class_name)),
        };

        if let Some(hook) = self.registry.module(&module) {
            trace!(module = %module, "Running module hook");
            hook.init(instance.as_mut(), descriptor);
        }

        instance.set_method(&view);
        self.matched = Some(MatchedController {
            class_name,
            view,
            controller: instance,
        });

        Ok(())
    }

    /// Execute the view bound on the matched controller
    pub fn run(&mut self) -> Result<()> {
        let matched = self.matched.as_mut().ok_or(Error::NoControllerMatched)?;
        trace!(class_name = %matched.class_name, view = %matched.view, "Executing controller");
        matched.controller.execute().map_err(Error::Execution)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("identifiers", &self.identifiers)
            .field("has_class_name_builder", &self.class_name_builder.is_some())
            .field("registry", &self.registry)
            .field("route_stack_len", &self.route_stack.len())
            .field("matched", &self.matched_class_name())
            .finish()
    }
}
