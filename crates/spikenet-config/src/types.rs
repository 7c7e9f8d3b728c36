// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `spikenet.toml`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpikenetConfig {
    pub network: NetworkConfig,
    pub logging: LoggingConfig,
}

/// Network construction settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Root of every element path (`<name>.<group>[<i>]`)
    pub name: String,
    /// Simulation time step in seconds, handed to the execution engine
    pub dt: f64,
    /// What `connect` does when the two groups differ in size
    pub size_mismatch: SizeMismatchPolicy,
    /// Bind every still-unconnected port to a fresh channel on `start`
    pub auto_bind: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "network".to_string(),
            dt: 1e-3,
            size_mismatch: SizeMismatchPolicy::Truncate,
            auto_bind: true,
        }
    }
}

/// Group-size mismatch handling during fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMismatchPolicy {
    /// Connect indices up to the smaller group size and warn
    #[default]
    Truncate,
    /// Reject the connection before any channel is created
    Strict,
}

impl fmt::Display for SizeMismatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeMismatchPolicy::Truncate => write!(f, "truncate"),
            SizeMismatchPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for SizeMismatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "truncate" => Ok(SizeMismatchPolicy::Truncate),
            "strict" | "error" => Ok(SizeMismatchPolicy::Strict),
            other => Err(format!(
                "unknown size mismatch policy '{}' (expected 'truncate' or 'strict')",
                other
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch_from_str() {
        assert_eq!(
            "truncate".parse::<SizeMismatchPolicy>().unwrap(),
            SizeMismatchPolicy::Truncate
        );
        assert_eq!(
            " Strict ".parse::<SizeMismatchPolicy>().unwrap(),
            SizeMismatchPolicy::Strict
        );
        assert!("sometimes".parse::<SizeMismatchPolicy>().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SpikenetConfig = toml::from_str(
            r#"
            [network]
            size_mismatch = "strict"
            "#,
        )
        .unwrap();

        assert_eq!(config.network.size_mismatch, SizeMismatchPolicy::Strict);
        assert_eq!(config.network.name, "network");
        assert!(config.network.auto_bind);
        assert_eq!(config.logging.format, LogFormat::Text);
    }
}
