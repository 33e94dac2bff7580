//! Integration tests for drone-config

use drone_config::*;
use drone_mvc::ControllerRegistry;
use std::env;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const ROUTES_TOML: &str = r#"
routes = [
    { defaults = { module = "blog" } },
    { blog = { controller = "Index", view = "show" } },
    { shop = { controller = "Catalog", view = "list", currency = "EUR" } },
]

[logging]
level = "warn"
format = "plain"
output = "stderr"
"#;

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "routes.toml", ROUTES_TOML);

    let config = AppConfig::from_file(&path).unwrap();
    assert_eq!(config.routes.len(), 3);
    assert_eq!(
        config.logging.as_ref().and_then(|l| l.level.as_deref()),
        Some("warn")
    );
}

#[test]
fn test_load_json_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "routes.json",
        r#"{"routes": [{"defaults": {"module": "shop"}},
                       {"shop": {"controller": "Catalog", "view": "list"}}]}"#,
    );

    let config = AppConfig::from_file(&path).unwrap();
    assert!(config.logging.is_none());

    let router = config
        .build_router(Arc::new(ControllerRegistry::new()))
        .unwrap();
    assert_eq!(router.routes().default_module(), Some("shop"));
}

#[test]
fn test_build_router_keeps_module_config() {
    let config = AppConfig::parse(ROUTES_TOML, FileFormat::Toml).unwrap();
    let router = config
        .build_router(Arc::new(ControllerRegistry::new()))
        .unwrap();

    let shop = router.routes().get("shop").unwrap();
    assert_eq!(shop.controller.as_deref(), Some("Catalog"));
    assert_eq!(shop.config["currency"], "EUR");
    assert_eq!(router.routes().len(), 3);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "routes.yaml", "routes: []");

    assert!(matches!(
        AppConfig::from_file(&path),
        Err(ConfigError::LoadError(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(
        AppConfig::from_file(&path),
        Err(ConfigError::LoadError(_))
    ));
}

#[test]
fn test_wrong_shape_is_deserialization_error() {
    let err = AppConfig::parse(r#"{"routes": {"blog": {}}}"#, FileFormat::Json).unwrap_err();
    assert!(matches!(err, ConfigError::DeserializationError(_)));
}

#[test]
fn test_logging_section_converts() {
    let config = AppConfig::parse(ROUTES_TOML, FileFormat::Toml).unwrap();
    let log = config.log_config().unwrap();

    assert_eq!(log.level, drone_mvc::logging::LogLevel::Warn);
    assert_eq!(log.format, drone_mvc::logging::LogFormat::Plain);
    assert_eq!(log.output, drone_mvc::logging::LogOutput::Stderr);
}

#[test]
fn test_from_env() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "app.toml", ROUTES_TOML);

    unsafe {
        env::set_var("DRONE_CONFIG", &path);
    }

    let result = AppConfig::from_env();

    unsafe {
        env::remove_var("DRONE_CONFIG");
    }

    let config = result.unwrap();
    assert_eq!(config.route_list()[0].key, "defaults");
}

#[test]
fn test_env_loader_with_prefix() {
    let loader = EnvLoader::new(Some("DRONE_IT".to_string()));

    unsafe {
        env::set_var("DRONE_IT_ROUTES", "routes.toml");
    }

    assert_eq!(loader.load_var("routes").unwrap(), "routes.toml");

    unsafe {
        env::remove_var("DRONE_IT_ROUTES");
    }
}
