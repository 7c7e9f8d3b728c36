//! # spikenet - circuit wiring for spiking-network simulation
//!
//! Builds networks of stimulus, neuron and synapse groups, connects them
//! element-wise through typed ports and hands the finished wiring to an
//! execution engine.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! spikenet = "0.1"  # Default: wiring + config + logging bootstrap
//! ```
//!
//! ## Feature Flags
//!
//! - **`observability`** (default): `tracing-subscriber` bootstrap with per-crate debug flags
//! - **`file-logging`**: Rolling log files under a per-run directory
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spikenet::prelude::*;
//!
//! let config = spikenet::config::load_config(None, None)?;
//! let mut net = spikenet::network_from_config(&config);
//!
//! net.add_stimulus_group("i1", 2, StimulusParams::default())?;
//! net.add_neuron_group("n1", 2, NeuronParams::default())?;
//! net.add_synapse_group("s1", 2, SynapseParams::default())?;
//!
//! net.connect("i1", "output", "s1", "spike")?;
//! net.connect("n1", "vm", "s1", "post")?;
//!
//! let mut engine = DryRunEngine::new();
//! net.start(1.0, &mut engine)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: spikenet-config                            │
//! │  (TOML file, env + CLI overrides, validation)           │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Core: spikenet-wiring                                  │
//! │  (ports, groups, channels, dispatch, fan-out)           │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  External: ExecutionEngine                              │
//! │  (clocks, scheduling, time advance)                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub use spikenet_config as config;
pub use spikenet_wiring as wiring;

#[cfg(feature = "observability")]
pub use spikenet_observability as observability;

use spikenet_config::SpikenetConfig;
use spikenet_wiring::Network;
use tracing::info;

/// Empty network named and tuned by the `[network]` section
pub fn network_from_config(config: &SpikenetConfig) -> Network {
    let net = Network::with_config(&config.network);
    info!(target: "spikenet",
        "Network '{}' (dt={}s, size mismatch: {}, auto-bind: {})",
        net.name(), net.dt(), net.size_mismatch_policy(), net.auto_bind_enabled());
    net
}

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::wiring::{
        ConnectionReport, DryRunEngine, ElementKind, ElementParams, ExecutionEngine, Network,
        NeuronParams, SizeMismatchPolicy, StimulusParams, SynapseParams, WiringError,
        WiringResult,
    };

    pub use crate::config::{load_config, SpikenetConfig};

    #[cfg(feature = "observability")]
    pub use crate::observability::{init_logging, parse_debug_flags};
}
