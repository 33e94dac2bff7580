//! Configuration for Drone applications.
//!
//! A config file carries the route table as an ordered list of one-entry
//! maps, and an optional logging section:
//!
//! ```toml
//! routes = [
//!     { defaults = { module = "blog" } },
//!     { blog = { controller = "Index", view = "show" } },
//!     { shop = { controller = "Catalog", view = "list", currency = "EUR" } },
//! ]
//!
//! [logging]
//! level = "debug"
//! format = "pretty"
//! ```
//!
//! ```
//! use drone_config::{AppConfig, FileFormat};
//! use drone_mvc::ControllerRegistry;
//! use std::sync::Arc;
//!
//! let config = AppConfig::parse(
//!     r#"{"routes": [{"defaults": {"module": "blog"}},
//!                    {"blog": {"controller": "Index", "view": "show"}}]}"#,
//!     FileFormat::Json,
//! ).unwrap();
//!
//! let router = config.build_router(Arc::new(ControllerRegistry::new())).unwrap();
//! assert_eq!(router.routes().default_module(), Some("blog"));
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use env::{ENV_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use drone_mvc::logging::{LogConfig, LogFormat, LogLevel, LogOutput, Rotation};
use drone_mvc::{ControllerRegistry, DEFAULTS_KEY, Route, RouteDescriptor, Router};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// One route table entry as written in a config file: `{key: descriptor}`
pub type RouteTableEntry = BTreeMap<String, RouteDescriptor>;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub routes: Vec<RouteTableEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

impl AppConfig {
    /// Parse and validate configuration text
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let value = ConfigLoader::new(format).parse(content)?;
        Self::from_value(value)
    }

    /// Load and validate a config file, format chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let value = ConfigLoader::auto(path)?.load_file(path)?;
        let config = Self::from_value(value)?;
        debug!(
            path = %path.display(),
            route_count = config.routes.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load the file named by `DRONE_CONFIG`
    pub fn from_env() -> Result<Self> {
        let path = EnvLoader::default().load_var("CONFIG")?;
        Self::from_file(path)
    }

    fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Route table entries in file order
    pub fn route_list(&self) -> Vec<Route> {
        self.routes
            .iter()
            .flat_map(|entry| {
                entry
                    .iter()
                    .map(|(key, descriptor)| Route::new(key.clone(), descriptor.clone()))
            })
            .collect()
    }

    /// Router loaded with the configured route table
    pub fn build_router(&self, registry: Arc<ControllerRegistry>) -> Result<Router> {
        Ok(Router::with_routes(registry, self.route_list())?)
    }

    /// Logging settings, falling back to the defaults when absent
    pub fn log_config(&self) -> Result<LogConfig> {
        match &self.logging {
            Some(logging) => logging.to_log_config(),
            None => Ok(LogConfig::default()),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut default_module = None;

        for (index, entry) in self.routes.iter().enumerate() {
            let field = format!("routes[{}]", index);
            ConfigValidator::single_key(entry.len(), &field)?;

            for (key, descriptor) in entry {
                if !seen.insert(key.as_str()) {
                    return Err(ConfigError::ValidationError(format!(
                        "{}: the key '{}' was already defined as route",
                        field, key
                    )));
                }

                if key == DEFAULTS_KEY {
                    ConfigValidator::not_empty(
                        descriptor.module.as_deref(),
                        &format!("{}.module", field),
                    )?;
                    default_module = descriptor.module.as_deref();
                } else {
                    ConfigValidator::not_empty(
                        descriptor.controller.as_deref(),
                        &format!("{}.{}.controller", field, key),
                    )?;
                    ConfigValidator::not_empty(
                        descriptor.view.as_deref(),
                        &format!("{}.{}.view", field, key),
                    )?;
                }
            }
        }

        if let Some(module) = default_module {
            if module == DEFAULTS_KEY || !seen.contains(module) {
                return Err(ConfigError::ValidationError(format!(
                    "default module '{}' is not declared in routes",
                    module
                )));
            }
        }

        if let Some(logging) = &self.logging {
            logging.validate()?;
        }

        Ok(())
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    /// `stdout`, `stderr`, `file` or `rolling`
    pub output: Option<String>,
    /// Log file for `output = "file"`
    pub file: Option<String>,
    /// Directory for `output = "rolling"`
    pub directory: Option<String>,
    pub prefix: Option<String>,
    pub rotation: Option<String>,
    /// Filter directives overriding `level`
    pub filter: Option<String>,
    pub colors: bool,
}

impl LoggingConfig {
    /// Convert into the router crate's logging builder
    pub fn to_log_config(&self) -> Result<LogConfig> {
        let mut config = LogConfig::new().with_colors(self.colors);

        if let Some(level) = &self.level {
            config = config.level(LogLevel::parse(level).ok_or_else(|| {
                ConfigError::ValidationError(format!("unknown log level '{}'", level))
            })?);
        }

        if let Some(format) = &self.format {
            config = config.format(LogFormat::parse(format).ok_or_else(|| {
                ConfigError::ValidationError(format!("unknown log format '{}'", format))
            })?);
        }

        let output = match self.output.as_deref().unwrap_or("stdout") {
            "stdout" => LogOutput::Stdout,
            "stderr" => LogOutput::Stderr,
            "file" => {
                ConfigValidator::not_empty(self.file.as_deref(), "logging.file")?;
                LogOutput::File(self.file.clone().unwrap_or_default())
            }
            "rolling" => {
                ConfigValidator::not_empty(self.directory.as_deref(), "logging.directory")?;
                let rotation = match &self.rotation {
                    Some(name) => Rotation::parse(name).ok_or_else(|| {
                        ConfigError::ValidationError(format!("unknown rotation '{}'", name))
                    })?,
                    None => Rotation::Daily,
                };
                LogOutput::RollingFile {
                    directory: self.directory.clone().unwrap_or_default(),
                    prefix: self.prefix.clone().unwrap_or_else(|| "drone".to_string()),
                    rotation,
                }
            }
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown log output '{}'",
                    other
                )));
            }
        };
        config = config.output(output);

        if let Some(filter) = &self.filter {
            config = config.with_env_filter(filter.clone());
        }

        Ok(config)
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<()> {
        self.to_log_config().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES_JSON: &str = r#"{
        "routes": [
            {"defaults": {"module": "blog"}},
            {"blog": {"controller": "Index", "view": "show"}},
            {"shop": {"controller": "Catalog", "view": "list", "currency": "EUR"}}
        ]
    }"#;

    #[test]
    fn test_parse_route_list_in_order() {
        let config = AppConfig::parse(ROUTES_JSON, FileFormat::Json).unwrap();
        let keys: Vec<String> = config.route_list().into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["defaults", "blog", "shop"]);
    }

    #[test]
    fn test_opaque_module_config_kept() {
        let config = AppConfig::parse(ROUTES_JSON, FileFormat::Json).unwrap();
        let shop = &config.routes[2]["shop"];
        assert_eq!(shop.config["currency"], "EUR");
    }

    #[test]
    fn test_multi_key_entry_rejected() {
        let json = r#"{"routes": [{"blog": {"controller": "I", "view": "v"},
                                   "shop": {"controller": "C", "view": "l"}}]}"#;
        let err = AppConfig::parse(json, FileFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let json = r#"{"routes": [{"blog": {"controller": "I", "view": "v"}},
                                  {"blog": {"controller": "J", "view": "w"}}]}"#;
        let err = AppConfig::parse(json, FileFormat::Json).unwrap_err();
        assert!(err.to_string().contains("already defined"));
    }

    #[test]
    fn test_module_without_view_rejected() {
        let json = r#"{"routes": [{"blog": {"controller": "Index"}}]}"#;
        let err = AppConfig::parse(json, FileFormat::Json).unwrap_err();
        assert!(err.to_string().contains("routes[0].blog.view"));
    }

    #[test]
    fn test_undeclared_default_module_rejected() {
        let json = r#"{"routes": [{"defaults": {"module": "admin"}},
                                  {"blog": {"controller": "I", "view": "v"}}]}"#;
        let err = AppConfig::parse(json, FileFormat::Json).unwrap_err();
        assert!(err.to_string().contains("'admin'"));
    }

    #[test]
    fn test_logging_section() {
        let toml = r#"
            routes = []

            [logging]
            level = "debug"
            format = "compact"
            output = "rolling"
            directory = "logs"
            rotation = "hourly"
        "#;
        let config = AppConfig::parse(toml, FileFormat::Toml).unwrap();
        let log = config.log_config().unwrap();

        assert_eq!(log.level, LogLevel::Debug);
        assert_eq!(log.format, LogFormat::Compact);
        assert_eq!(
            log.output,
            LogOutput::RollingFile {
                directory: "logs".to_string(),
                prefix: "drone".to_string(),
                rotation: Rotation::Hourly,
            }
        );
    }

    #[test]
    fn test_bad_logging_values_rejected() {
        let toml = r#"
            [logging]
            level = "loud"
        "#;
        assert!(AppConfig::parse(toml, FileFormat::Toml).is_err());

        let toml = r#"
            [logging]
            output = "file"
        "#;
        let err = AppConfig::parse(toml, FileFormat::Toml).unwrap_err();
        assert!(err.to_string().contains("logging.file"));
    }

    #[test]
    fn test_missing_logging_uses_defaults() {
        let config = AppConfig::default();
        let log = config.log_config().unwrap();
        assert_eq!(log.format, LogFormat::Json);
        assert_eq!(log.output, LogOutput::Stdout);
    }
}
