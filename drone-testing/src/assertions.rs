// Test assertions for router outcomes

use crate::mock::CallLog;
use drone_mvc::{ControllerError, Error, Router};

/// Assert that a result is a `PageNotFound` raised for the given cause kind
pub fn assert_page_not_found<T: std::fmt::Debug>(
    result: &Result<T, Error>,
    expected_cause: fn(&ControllerError) -> bool,
) {
    match result {
        Err(Error::PageNotFound { source, .. }) => assert!(
            expected_cause(source),
            "PageNotFound carried an unexpected cause: {:?}",
            source
        ),
        other => panic!("Expected PageNotFound, got {:?}", other),
    }
}

/// Assert that the router matched `class_name` and bound `view`
pub fn assert_matched_view(router: &Router, class_name: &str, view: &str) {
    assert!(
        router.is_matched(),
        "Expected a matched controller, router is unmatched"
    );
    assert_eq!(
        router.matched_class_name(),
        Some(class_name),
        "Expected class '{}', got {:?}",
        class_name,
        router.matched_class_name()
    );
    assert_eq!(
        router.matched_view(),
        Some(view),
        "Expected view '{}', got {:?}",
        view,
        router.matched_view()
    );
}

/// Assert that the log holds exactly these calls, in order
pub fn assert_call_sequence(log: &CallLog, expected: &[&str]) {
    let calls = log.calls();
    assert_eq!(
        calls, expected,
        "Expected call sequence {:?}, got {:?}",
        expected, calls
    );
}

/// Assert that a result failed with the given HTTP status
pub fn assert_status<T: std::fmt::Debug>(result: &Result<T, Error>, expected: u16) {
    match result {
        Err(error) => assert_eq!(
            error.status_code(),
            expected,
            "Expected status {}, got {} ({})",
            expected,
            error.status_code(),
            error
        ),
        Ok(value) => panic!("Expected an error with status {}, got Ok({:?})", expected, value),
    }
}
