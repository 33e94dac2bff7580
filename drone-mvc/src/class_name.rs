// Class-name building strategies

use std::sync::Arc;

/// Separator used by the default strategy.
pub const CLASS_NAME_SEPARATOR: &str = "::";

/// Maps `(module, controller)` to the name looked up in the controller
/// registry. Must be a pure function.
pub type ClassNameBuilder = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// `"{module}::{controller}"`, no case or plural changes
pub fn namespaced(module: &str, controller: &str) -> String {
    format!("{module}{CLASS_NAME_SEPARATOR}{controller}")
}

pub fn default_builder() -> ClassNameBuilder {
    Arc::new(namespaced)
}
