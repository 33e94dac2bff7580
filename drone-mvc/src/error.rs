// Error types for the Drone dispatch core

use thiserror::Error;

/// Errors raised by the router and surfaced to the hosting framework.
///
/// Every variant is a distinct kind so the host can pick an HTTP status
/// (see [`Error::status_code`]).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("The key '{0}' was already defined as route")]
    DuplicateRouteKey(String),

    #[error("The key '{0}' does not exist in routes")]
    ModuleNotFound(String),

    #[error("The controller class '{0}' does not exist")]
    ControllerNotFound(String),

    /// A construction-time `MethodNotFound` or `PrivateMethodExecution`,
    /// re-signalled as "no such page".
    #[error("Page not found: {message}")]
    PageNotFound {
        message: String,
        #[source]
        source: ControllerError,
    },

    #[error("No controller matched, try to match first")]
    NoControllerMatched,

    #[error("Controller construction failed: {0}")]
    Controller(#[source] ControllerError),

    #[error("Controller execution failed: {0}")]
    Execution(#[source] ControllerError),

    #[error("Route stack rejected route: {0}")]
    RouteStack(#[from] RouteStackError),
}

impl Error {
    /// Get the HTTP status code a host would typically answer with
    pub fn status_code(&self) -> u16 {
        match self {
            Error::ModuleNotFound(_) | Error::ControllerNotFound(_) | Error::PageNotFound { .. } => {
                404
            }
            _ => 500,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

/// Errors raised by controllers, either while being constructed for a
/// view or while executing it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// The requested view is not a handler of the controller
    #[error("{0}")]
    MethodNotFound(String),

    /// The requested view exists but is not publicly invocable
    #[error("{0}")]
    PrivateMethodExecution(String),

    #[error("{0}")]
    Construction(String),

    #[error("{0}")]
    Execution(String),
}

impl ControllerError {
    /// The message carried by the error, whatever its kind
    pub fn message(&self) -> &str {
        match self {
            ControllerError::MethodNotFound(msg)
            | ControllerError::PrivateMethodExecution(msg)
            | ControllerError::Construction(msg)
            | ControllerError::Execution(msg) => msg,
        }
    }
}

/// Rejections from a [`RouteStack`](crate::route_stack::RouteStack) delegate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteStackError {
    #[error("route name '{0}' is already registered")]
    DuplicateName(String),

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::ModuleNotFound("admin".into()).status_code(), 404);
        assert_eq!(Error::ControllerNotFound("blog::Index".into()).status_code(), 404);
        assert_eq!(Error::Configuration("no builder".into()).status_code(), 500);
        assert_eq!(Error::NoControllerMatched.status_code(), 500);
        assert!(Error::ModuleNotFound("x".into()).is_client_error());
        assert!(Error::DuplicateRouteKey("x".into()).is_server_error());
    }

    #[test]
    fn test_page_not_found_keeps_cause() {
        let cause = ControllerError::MethodNotFound("The action 'edit' does not exist".into());
        let err = Error::PageNotFound {
            message: cause.message().to_string(),
            source: cause.clone(),
        };

        assert_eq!(err.status_code(), 404);
        assert!(err.to_string().contains("The action 'edit' does not exist"));
        let source = err.source().expect("source preserved");
        assert_eq!(source.to_string(), cause.to_string());
    }

    #[test]
    fn test_duplicate_key_message() {
        let err = Error::DuplicateRouteKey("blog".into());
        assert_eq!(err.to_string(), "The key 'blog' was already defined as route");
    }
}
