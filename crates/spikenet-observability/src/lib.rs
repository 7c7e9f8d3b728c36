// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # spikenet-observability
//!
//! Logging bootstrap shared by spikenet binaries and tests.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! caller's job and happens here, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: File-based log rotation (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known spikenet crate names (tracing targets) for debug flags
pub const KNOWN_CRATES: &[&str] = &["spikenet-wiring", "spikenet"];
