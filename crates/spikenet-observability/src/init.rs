// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Installs a console layer (text or JSON per `LoggingConfig`) and, with the
//! `file-logging` feature, a JSON file layer in a timestamped run folder.

use anyhow::{Context, Result};
use spikenet_config::{LogFormat, LoggingConfig};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

#[cfg(feature = "file-logging")]
use std::path::{Path, PathBuf};

use crate::cli::CrateDebugFlags;

/// Keeps background log writers alive; drop it to flush
#[derive(Default)]
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    #[cfg(feature = "file-logging")]
    log_dir: Option<PathBuf>,
}

#[cfg(feature = "file-logging")]
impl LoggingGuard {
    /// Run folder the file layer writes into, if any
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the `EnvFilter` for a given configuration and flag set
pub fn build_filter(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(&config.level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter directives: {}", directives))
}

fn console_layer(
    config: &LoggingConfig,
    filter: EnvFilter,
) -> Box<dyn Layer<Registry> + Send + Sync> {
    match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(filter)
            .boxed(),
    }
}

/// Initialize console logging
///
/// # Errors
///
/// Fails if the filter directives are invalid or a global subscriber is
/// already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = build_filter(debug_flags, config)?;

    Registry::default()
        .with(vec![console_layer(config, filter)])
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!(target: "spikenet",
        "Logging initialized (level: {}, format: {:?}, debug: {})",
        config.level, config.format, debug_flags.to_filter_string(&config.level));

    Ok(LoggingGuard::default())
}

/// Initialize console logging plus a JSON file layer
///
/// Creates `<log_dir>/run_<YYYYmmdd_HHMMSS>/spikenet.log` with daily rotation.
#[cfg(feature = "file-logging")]
pub fn init_logging_with_file(
    debug_flags: &CrateDebugFlags,
    config: &LoggingConfig,
    log_dir: Option<PathBuf>,
) -> Result<LoggingGuard> {
    use tracing_appender::rolling;

    let base_log_dir = log_dir.unwrap_or_else(|| PathBuf::from("./logs"));
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    let appender = rolling::daily(&run_folder, "spikenet.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(build_filter(debug_flags, config)?)
        .boxed();

    Registry::default()
        .with(vec![console_layer(config, build_filter(debug_flags, config)?), file_layer])
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!(target: "spikenet",
        "Logging initialized (level: {}, format: {:?}, log dir: {})",
        config.level, config.format, run_folder.display());

    Ok(LoggingGuard {
        _file_guards: vec![guard],
        log_dir: Some(run_folder),
    })
}
