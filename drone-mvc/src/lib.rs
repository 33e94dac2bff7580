// Request-dispatch core for the Drone MVC framework
// Route table, controller registry and the router that ties them together

pub mod class_name;
pub mod controller;
pub mod error;
pub mod logging;
pub mod module;
pub mod params;
pub mod registry;
pub mod route_stack;
pub mod router;
pub mod routes;

pub use class_name::{ClassNameBuilder, namespaced};
pub use controller::{ActionTable, Controller, ControllerContext, Visibility};
pub use error::*;
pub use module::Module;
pub use params::{KeyValuePairs, PARAMS_KEY, RequestParams, parse_key_value_pairs};
pub use registry::{ControllerEntry, ControllerFactory, ControllerFactoryFn, ControllerRegistry};
pub use route_stack::{RouteStack, RouteStackMatch, SegmentRouteStack};
pub use router::{Identifiers, Router};
pub use routes::{DEFAULTS_KEY, Route, RouteDescriptor, RouteTable};

#[doc(hidden)]
pub use inventory;
