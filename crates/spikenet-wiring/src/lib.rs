// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# spikenet-wiring

Circuit wiring for spiking-network simulation: groups of stimuli, neurons
and synapses are connected element-wise through typed ports.

## Architecture

```text
Network::connect("i1", "output", "s1", "spike")
   │
   ├─ dispatch      (source kind, target kind) -> fan-out policy or error
   ├─ fanout        index 0..min(size): resolve ports, bind via channel
   │    └─ resolver (name, direction, data kind) lookup on one element
   └─ channel       arena of channels, each listing drivers and sinks

Network::start(duration, engine)
   ├─ autobind      single-endpoint channels for every unbound port
   ├─ verify        channels and ports agree
   └─ engine        ExecutionEngine::run (frozen network)
```

## Example

```rust
use spikenet_wiring::{DryRunEngine, Network, StimulusParams, SynapseParams};

let mut net = Network::new("A", 1e-3);
net.add_stimulus_group("i1", 2, StimulusParams::default())?;
net.add_synapse_group("s1", 2, SynapseParams::default())?;

assert_eq!(net.connect("i1", "output", "s1", "spike")?, 2);

let mut engine = DryRunEngine::new();
net.start(0.1, &mut engine)?;
# Ok::<(), spikenet_wiring::WiringError>(())
```
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod autobind;
pub mod channel;
pub mod dispatch;
pub mod element;
pub mod engine;
pub mod fanout;
pub mod group;
pub mod kind;
pub mod network;
pub mod params;
pub mod port;
pub mod resolver;
pub mod summary;
pub mod types;

pub use channel::{Channel, ChannelOrigin};
pub use dispatch::{connection_policy, Binding, ConnectionPolicy, UnsupportedReason};
pub use element::Element;
pub use engine::{DryRun, DryRunEngine, EngineError, ExecutionEngine};
pub use fanout::ConnectionReport;
pub use group::Group;
pub use kind::ElementKind;
pub use network::Network;
pub use params::{ElementParams, NeuronParams, StimulusParams, SynapseParams};
pub use port::{DataKind, Direction, Port, PortSpec};
pub use resolver::PortNotFound;
pub use summary::{GroupSummary, NetworkSummary};
pub use types::{ChannelId, GroupId, PortRef, WiringError, WiringResult};

// Policy enum lives with the configuration so it can be set from TOML
pub use spikenet_config::SizeMismatchPolicy;
