//! Configuration validation
//!
//! Ensures configuration values are within valid ranges before a network is
//! built from them.

use crate::{ConfigError, ConfigResult, SpikenetConfig, LOG_LEVELS};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Required fields
/// - Valid value ranges
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &SpikenetConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_required_fields(config, &mut errors);
    validate_value_ranges(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_required_fields(config: &SpikenetConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.network.name.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "network.name".to_string(),
        });
    }
}

fn validate_value_ranges(config: &SpikenetConfig, errors: &mut Vec<ConfigValidationError>) {
    let dt = config.network.dt;
    if !dt.is_finite() || dt <= 0.0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "network.dt".to_string(),
            reason: format!("must be a positive finite number of seconds, got {}", dt),
        });
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("'{}' is not one of {}", config.logging.level, LOG_LEVELS.join(", ")),
        });
    }
}
