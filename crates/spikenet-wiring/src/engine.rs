// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Seam to the discrete-event execution engine.
//!
//! The engine owns clocks, scheduling and time advance. It receives the
//! finished network read-only; wiring is frozen from then on.

use crate::network::Network;
use tracing::info;

/// Failure reported by an execution engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct EngineError(pub String);

/// Runs a fully wired network for a span of simulated time
pub trait ExecutionEngine {
    /// Advance the simulation by `duration` seconds
    fn run(&mut self, network: &Network, duration: f64) -> Result<(), EngineError>;
}

/// What a [`DryRunEngine`] saw on one `run`
#[derive(Debug, Clone, PartialEq)]
pub struct DryRun {
    pub network: String,
    pub duration: f64,
    pub dt: f64,
    pub groups: usize,
    pub channels: usize,
    pub unbound_ports: usize,
}

impl DryRun {
    /// Number of `dt` steps the duration spans
    pub fn steps(&self) -> u64 {
        if self.dt > 0.0 {
            (self.duration / self.dt).round() as u64
        } else {
            0
        }
    }
}

/// Engine that simulates nothing and records every request
#[derive(Debug, Clone, Default)]
pub struct DryRunEngine {
    runs: Vec<DryRun>,
}

impl DryRunEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[DryRun] {
        &self.runs
    }
}

impl ExecutionEngine for DryRunEngine {
    fn run(&mut self, network: &Network, duration: f64) -> Result<(), EngineError> {
        let run = DryRun {
            network: network.name().to_string(),
            duration,
            dt: network.dt(),
            groups: network.groups().count(),
            channels: network.channels().len(),
            unbound_ports: network.unbound_ports().len(),
        };

        info!(target: "spikenet-wiring",
            "Dry run of '{}' for {}s: {} groups, {} channels, {} steps",
            run.network, run.duration, run.groups, run.channels, run.steps());

        self.runs.push(run);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps() {
        let run = DryRun {
            network: "A".into(),
            duration: 1.0,
            dt: 1e-3,
            groups: 0,
            channels: 0,
            unbound_ports: 0,
        };
        assert_eq!(run.steps(), 1000);
    }
}
