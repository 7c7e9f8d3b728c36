// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Connection dispatch over (source kind, target kind).

Every pair has an explicit entry in [`connection_policy`]; the match has no
wildcard arm, so adding an [`ElementKind`] does not compile until each new
pair is given a policy.

| Source \ Target | Stimulus      | Neuron          | Synapse                  |
|-----------------|---------------|-----------------|--------------------------|
| Stimulus        | not supported | not implemented | fan-out, pulse, signal   |
| Neuron          | not supported | not implemented | fan-out, analog, direct  |
| Synapse         | not supported | not implemented | not supported            |
*/

use crate::fanout::{self, ConnectionReport, FanOutPlan};
use crate::kind::ElementKind;
use crate::network::Network;
use crate::port::DataKind;
use crate::types::{GroupId, WiringError, WiringResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error};

/// How each element-wise binding is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    /// Always create a fresh intermediary channel
    Signal,
    /// Sink joins the channel the source already drives, if any
    Direct,
}

/// Why a pair cannot be connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsupportedReason {
    /// The pattern makes no sense for these kinds
    NotSupported,
    /// Plausible but not available yet
    NotImplemented,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::NotSupported => write!(f, "not supported"),
            UnsupportedReason::NotImplemented => write!(f, "not implemented yet"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPolicy {
    /// Connect `source[i]` to `target[i]` carrying `data_kind`
    FanOut { data_kind: DataKind, binding: Binding },
    Unsupported(UnsupportedReason),
}

impl ConnectionPolicy {
    pub fn is_supported(&self) -> bool {
        matches!(self, ConnectionPolicy::FanOut { .. })
    }
}

/// The connection table
pub fn connection_policy(source: ElementKind, target: ElementKind) -> ConnectionPolicy {
    use ConnectionPolicy::{FanOut, Unsupported};
    use ElementKind::{Neuron, Stimulus, Synapse};
    use UnsupportedReason::{NotImplemented, NotSupported};

    match (source, target) {
        (Stimulus, Stimulus) => Unsupported(NotSupported),
        (Stimulus, Neuron) => Unsupported(NotImplemented),
        (Stimulus, Synapse) => FanOut {
            data_kind: DataKind::Pulse,
            binding: Binding::Signal,
        },

        (Neuron, Stimulus) => Unsupported(NotSupported),
        (Neuron, Neuron) => Unsupported(NotImplemented),
        (Neuron, Synapse) => FanOut {
            data_kind: DataKind::Analog,
            binding: Binding::Direct,
        },

        (Synapse, Stimulus) => Unsupported(NotSupported),
        (Synapse, Neuron) => Unsupported(NotImplemented),
        (Synapse, Synapse) => Unsupported(NotSupported),
    }
}

/// Dispatch a group-to-group connection
///
/// Unsupported pairs fail before any port is touched.
pub fn dispatch(
    network: &mut Network,
    source: GroupId,
    source_port: &str,
    target: GroupId,
    target_port: &str,
) -> WiringResult<ConnectionReport> {
    let (source_kind, target_kind) = {
        let src = network.group_by_id(source);
        let tgt = network.group_by_id(target);
        match (src, tgt) {
            (Some(s), Some(t)) => (s.kind(), t.kind()),
            (None, _) => return Err(WiringError::GroupNotFound(format!("#{}", source.0))),
            (_, None) => return Err(WiringError::GroupNotFound(format!("#{}", target.0))),
        }
    };

    match connection_policy(source_kind, target_kind) {
        ConnectionPolicy::Unsupported(reason) => {
            error!(target: "spikenet-wiring",
                "{} to {} is {}", source_kind, target_kind, reason);
            Err(WiringError::UnsupportedConnection {
                source_kind,
                target_kind,
                reason,
            })
        }
        ConnectionPolicy::FanOut { data_kind, binding } => {
            debug!(target: "spikenet-wiring",
                "+ {} connect .{} to {}.{}", source_kind, source_port, target_kind, target_port);
            fanout::fan_out(
                network,
                FanOutPlan {
                    source,
                    source_port,
                    target,
                    target_port,
                    data_kind,
                    binding,
                },
            )
        }
    }
}
