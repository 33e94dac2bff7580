//! Testing utilities for the Drone router.
//!
//! - **MockFactory** / **MockController** - controllers that record every
//!   construction, `set_method` and `execute` into a shared [`CallLog`]
//! - **RecordingModule** - module hook that logs its `init` calls
//! - **Assertions** - router-aware assertion helpers
//!
//! ```
//! use drone_mvc::{ControllerRegistry, RequestParams, Route, Router};
//! use drone_testing::*;
//! use std::sync::Arc;
//!
//! let factory = MockFactory::new("blog::Index").with_views(&["show"]);
//! let mut registry = ControllerRegistry::new();
//! factory.register(&mut registry);
//!
//! let mut router = Router::with_routes(
//!     Arc::new(registry),
//!     [Route::defaults("blog"), Route::module("blog", "Index", "show")],
//! ).unwrap();
//!
//! router.match_route(&mut RequestParams::new()).unwrap();
//! router.run().unwrap();
//!
//! assert_matched_view(&router, "blog::Index", "show");
//! assert_call_sequence(factory.log(), &["construct:show", "set_method:show", "execute:show"]);
//! ```

pub mod assertions;
pub mod mock;

pub use assertions::*;
pub use mock::*;
