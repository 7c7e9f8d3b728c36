// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, SpikenetConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "spikenet.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `SPIKENET_CONFIG_PATH` environment variable
/// 2. Current working directory: `./spikenet.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("SPIKENET_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by SPIKENET_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet SPIKENET_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<SpikenetConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: SpikenetConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    crate::validate_config(&config)?;

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SPIKENET_NETWORK_NAME` -> `network.name`
/// - `SPIKENET_DT` -> `network.dt`
/// - `SPIKENET_SIZE_MISMATCH` -> `network.size_mismatch`
/// - `SPIKENET_AUTO_BIND` -> `network.auto_bind`
/// - `SPIKENET_LOG_LEVEL` -> `logging.level`
///
/// Unparseable values are ignored.
pub fn apply_environment_overrides(config: &mut SpikenetConfig) {
    let vars = [
        ("SPIKENET_NETWORK_NAME", "network_name"),
        ("SPIKENET_DT", "dt"),
        ("SPIKENET_SIZE_MISMATCH", "size_mismatch"),
        ("SPIKENET_AUTO_BIND", "auto_bind"),
        ("SPIKENET_LOG_LEVEL", "log_level"),
    ];
    for (var, key) in vars {
        if let Ok(value) = env::var(var) {
            apply_override(config, key, &value);
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// Keys: `network_name`, `dt`, `size_mismatch`, `auto_bind`, `log_level`.
/// Unknown keys are ignored.
pub fn apply_cli_overrides(config: &mut SpikenetConfig, cli_args: &HashMap<String, String>) {
    for (key, value) in cli_args {
        apply_override(config, key, value);
    }
}

fn apply_override(config: &mut SpikenetConfig, key: &str, value: &str) {
    match key {
        "network_name" => config.network.name = value.to_string(),
        "dt" => {
            if let Ok(dt) = value.parse::<f64>() {
                config.network.dt = dt;
            }
        }
        "size_mismatch" => {
            if let Ok(policy) = value.parse() {
                config.network.size_mismatch = policy;
            }
        }
        "auto_bind" => {
            config.network.auto_bind =
                value.eq_ignore_ascii_case("true") || value == "1" || value.eq_ignore_ascii_case("yes");
        }
        "log_level" => config.logging.level = value.to_lowercase(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SizeMismatchPolicy;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("SPIKENET_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("SPIKENET_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nope.toml");

        env::set_var("SPIKENET_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("SPIKENET_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::remove_var("SPIKENET_DT");
        env::remove_var("SPIKENET_NETWORK_NAME");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[network]").unwrap();
        writeln!(file, "name = \"A\"").unwrap();
        writeln!(file, "dt = 0.0001").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.network.name, "A");
        assert_eq!(config.network.dt, 1e-4);
        assert_eq!(config.network.size_mismatch, SizeMismatchPolicy::Truncate);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::remove_var("SPIKENET_DT");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[network]").unwrap();
        writeln!(file, "dt = -1.0").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_bad_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[network").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = SpikenetConfig::default();

        env::set_var("SPIKENET_SIZE_MISMATCH", "strict");
        env::set_var("SPIKENET_AUTO_BIND", "no");

        apply_environment_overrides(&mut config);

        env::remove_var("SPIKENET_SIZE_MISMATCH");
        env::remove_var("SPIKENET_AUTO_BIND");

        assert_eq!(config.network.size_mismatch, SizeMismatchPolicy::Strict);
        assert!(!config.network.auto_bind);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = SpikenetConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("network_name".to_string(), "cortex".to_string());
        cli_args.insert("dt".to_string(), "0.5".to_string());
        cli_args.insert("unknown".to_string(), "ignored".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.network.name, "cortex");
        assert_eq!(config.network.dt, 0.5);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[network]").unwrap();
        writeln!(file, "name = \"file-net\"").unwrap();
        writeln!(file, "dt = 0.01").unwrap();

        env::set_var("SPIKENET_NETWORK_NAME", "env-net");
        env::set_var("SPIKENET_DT", "0.02");

        let mut cli_args = HashMap::new();
        cli_args.insert("network_name".to_string(), "cli-net".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("SPIKENET_NETWORK_NAME");
        env::remove_var("SPIKENET_DT");

        // CLI wins for name, env wins for dt (no CLI override)
        assert_eq!(config.network.name, "cli-net");
        assert_eq!(config.network.dt, 0.02);
    }
}
