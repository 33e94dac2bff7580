//! Integration tests for common Drone workflows.
//!
//! Config file to router, inventory-registered controllers, and a full
//! match-then-run cycle.

use drone::prelude::*;
use drone_config::AppConfig;
use drone_testing::*;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// =============================================================================
// Controllers
// =============================================================================

static RENDERED: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Posts {
    view: String,
    id: Option<String>,
}

fn post_actions() -> ActionTable<Posts> {
    ActionTable::new("Posts")
        .public("list", |_| {
            RENDERED.lock().unwrap().push("posts:list".to_string());
            Ok(())
        })
        .public("show", |c: &mut Posts| {
            let id = c.id.clone().unwrap_or_default();
            RENDERED.lock().unwrap().push(format!("posts:show:{}", id));
            Ok(())
        })
        .private("load", |_| Ok(()))
}

impl Controller for Posts {
    fn set_method(&mut self, view: &str) {
        self.view = view.to_string();
    }

    fn execute(&mut self) -> Result<(), ControllerError> {
        let view = self.view.clone();
        post_actions().invoke(self, &view)
    }

    fn method(&self) -> Option<&str> {
        Some(&self.view)
    }
}

fn build_posts(ctx: &ControllerContext<'_>) -> Result<Box<dyn Controller>, ControllerError> {
    post_actions().resolve(ctx.view)?;
    Ok(Box::new(Posts {
        view: String::new(),
        id: ctx.params.get("id").map(str::to_string),
    }))
}

register_controller!("blog::Posts", build_posts);

fn rendered(entry: &str) -> bool {
    RENDERED.lock().unwrap().iter().any(|r| r == entry)
}

const APP_TOML: &str = r#"
routes = [
    { defaults = { module = "blog" } },
    { blog = { controller = "Posts", view = "list" } },
    { shop = { controller = "Cart", view = "show" } },
]
"#;

fn config() -> AppConfig {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.toml");
    fs::write(&path, APP_TOML).unwrap();
    AppConfig::from_file(&path).unwrap()
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_config_to_run_with_defaults() {
    let registry = Arc::new(ControllerRegistry::from_inventory());
    let mut router = config().build_router(registry).unwrap();

    router.match_route(&mut RequestParams::new()).unwrap();
    assert_matched_view(&router, "blog::Posts", "list");

    router.run().unwrap();
    assert!(rendered("posts:list"));
}

#[test]
fn test_path_params_reach_controller() {
    let registry = Arc::new(ControllerRegistry::from_inventory());
    let mut router = config().build_router(registry).unwrap();
    router.set_identifiers(None, None, Some("show"));

    let mut params = RequestParams::new().with("params", "id/42/slug/hello-world");
    router.match_route(&mut params).unwrap();

    assert_eq!(params.get("id"), Some("42"));
    assert_eq!(params.get("slug"), Some("hello-world"));
    assert!(!params.contains_key("params"));

    router.run().unwrap();
    assert!(rendered("posts:show:42"));
}

#[test]
fn test_private_and_unknown_views_are_not_found() {
    let registry = Arc::new(ControllerRegistry::from_inventory());
    let mut router = config().build_router(registry).unwrap();

    router.set_identifiers(None, None, Some("load"));
    let result = router.match_route(&mut RequestParams::new());
    assert_page_not_found(&result, |e| {
        matches!(e, ControllerError::PrivateMethodExecution(_))
    });

    router.set_identifiers(None, None, Some("archive"));
    let result = router.match_route(&mut RequestParams::new());
    assert_page_not_found(&result, |e| matches!(e, ControllerError::MethodNotFound(_)));
    assert_status(&result, 404);
}

#[test]
fn test_unregistered_controller_in_config() {
    let registry = Arc::new(ControllerRegistry::from_inventory());
    let mut router = config().build_router(registry).unwrap();
    router.set_identifiers(Some("shop"), None, None);

    let result = router.match_route(&mut RequestParams::new());
    assert!(matches!(result, Err(Error::ControllerNotFound(ref name)) if name == "shop::Cart"));
}

#[test]
fn test_mocks_alongside_inventory() {
    let factory = MockFactory::new("shop::Cart").with_views(&["show"]);
    let mut registry = ControllerRegistry::from_inventory();
    factory.register(&mut registry);

    let mut router = config().build_router(Arc::new(registry)).unwrap();
    router.set_identifiers(Some("shop"), None, None);
    router.match_route(&mut RequestParams::new()).unwrap();
    router.run().unwrap();

    assert_call_sequence(
        factory.log(),
        &["construct:show", "set_method:show", "execute:show"],
    );
}

#[test]
fn test_run_before_match() {
    let mut router = Router::new(Arc::new(ControllerRegistry::new()));
    assert!(matches!(router.run(), Err(Error::NoControllerMatched)));
}
