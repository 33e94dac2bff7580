// Module hooks run before each controller of a module

use crate::controller::Controller;
use crate::routes::RouteDescriptor;

/// Per-module initialisation.
///
/// Registered under a module name in the
/// [`ControllerRegistry`](crate::registry::ControllerRegistry); the router
/// calls [`init`](Module::init) on every controller it constructs for that
/// module, before the view is bound.
pub trait Module: Send + Sync + 'static {
    /// Module name as used in the route table
    fn name(&self) -> &str;

    /// Prepare a freshly constructed controller of this module
    fn init(&self, controller: &mut dyn Controller, config: &RouteDescriptor);
}
