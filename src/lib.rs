// Drone - a small MVC framework for Rust
//
// Resolves module, controller and view from a route table, builds the
// controller through a registry and runs the bound view.

// Re-export the dispatch core
pub use drone_mvc::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use drone_config;

#[cfg(feature = "testing")]
pub use drone_testing;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ActionTable, Controller, ControllerContext, ControllerError, ControllerRegistry, Error,
        Identifiers, Module, RequestParams, Route, RouteDescriptor, Router, register_controller,
    };

    #[cfg(feature = "config")]
    pub use drone_config::{AppConfig, FileFormat};
}
