// Configuration validation

use crate::{ConfigError, Result};

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Reusable validation rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is present and not empty
    pub fn not_empty(value: Option<&str>, field: &str) -> Result<()> {
        match value {
            Some(v) if !v.is_empty() => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            ))),
        }
    }

    /// Validate that a map-like entry holds exactly one key
    pub fn single_key(len: usize, field: &str) -> Result<()> {
        if len != 1 {
            return Err(ConfigError::ValidationError(format!(
                "{} must contain exactly one key, found {}",
                field, len
            )));
        }
        Ok(())
    }
}
