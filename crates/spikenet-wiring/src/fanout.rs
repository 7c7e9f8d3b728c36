// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Group fan-out: connect `source[i]` to `target[i]` for each shared index.

## Per-index steps

```text
1. resolve source port (out, data kind from the policy)
2. resolve target port (in, same data kind)
3. miss, or target already driven  -> warn, stop, report partial count
4. bind through a channel recorded in the network's arena
```

A failure at index `i` leaves indices `0..i` connected and nothing at or
beyond `i`. Size mismatch between the groups follows the network's
[`SizeMismatchPolicy`].
*/

use crate::channel::{channel_name, ChannelOrigin};
use crate::dispatch::Binding;
use crate::network::Network;
use crate::port::{DataKind, Direction};
use crate::resolver;
use crate::types::{GroupId, PortRef, WiringError, WiringResult};
use spikenet_config::SizeMismatchPolicy;
use tracing::{debug, warn};

/// One dispatched connection request
#[derive(Debug, Clone, Copy)]
pub(crate) struct FanOutPlan<'a> {
    pub source: GroupId,
    pub source_port: &'a str,
    pub target: GroupId,
    pub target_port: &'a str,
    pub data_kind: DataKind,
    pub binding: Binding,
}

/// Outcome of a fan-out that was allowed to run
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionReport {
    /// Indices bound successfully, always a prefix `0..connected`
    pub connected: usize,
    /// New channels allocated (direct bindings may reuse one)
    pub channels_created: usize,
    /// Indices the fan-out covered: the smaller group size
    pub requested: usize,
    /// Groups differed in size and the larger one was cut off
    pub truncated: bool,
    /// Recoverable reason the fan-out stopped early
    pub aborted: Option<WiringError>,
}

impl ConnectionReport {
    /// Every covered index was bound
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none() && self.connected == self.requested
    }
}

pub(crate) fn fan_out(network: &mut Network, plan: FanOutPlan<'_>) -> WiringResult<ConnectionReport> {
    let (source_name, source_size) = group_shape(network, plan.source)?;
    let (target_name, target_size) = group_shape(network, plan.target)?;

    let requested = source_size.min(target_size);
    let truncated = source_size != target_size;

    if truncated {
        match network.size_mismatch_policy() {
            SizeMismatchPolicy::Strict => {
                return Err(WiringError::SizeMismatch {
                    source_group: source_name,
                    source_size,
                    target_group: target_name,
                    target_size,
                });
            }
            SizeMismatchPolicy::Truncate => {
                warn!(target: "spikenet-wiring",
                    "{} has {} elements, {} has {}; connecting first {} only",
                    source_name, source_size, target_name, target_size, requested);
            }
        }
    }

    let mut report = ConnectionReport {
        connected: 0,
        channels_created: 0,
        requested,
        truncated,
        aborted: None,
    };

    for index in 0..requested {
        match bind_index(network, &plan, index) {
            Ok(created) => {
                report.connected += 1;
                if created {
                    report.channels_created += 1;
                }
            }
            Err(err) => {
                warn!(target: "spikenet-wiring", "{}. Ignoring rest ...", err);
                report.aborted = Some(err);
                break;
            }
        }
    }

    if report.aborted.is_none() {
        debug!(target: "spikenet-wiring",
            "\t\t ... SUCCESS ({} bindings {}.{} -> {}.{})",
            report.connected, source_name, plan.source_port, target_name, plan.target_port);
    }

    Ok(report)
}

fn group_shape(network: &Network, id: GroupId) -> WiringResult<(String, usize)> {
    network
        .group_by_id(id)
        .map(|g| (g.name().to_string(), g.size()))
        .ok_or_else(|| WiringError::GroupNotFound(format!("#{}", id.0)))
}

/// Bind one index; `Ok(true)` when a new channel was allocated
fn bind_index(network: &mut Network, plan: &FanOutPlan<'_>, index: usize) -> WiringResult<bool> {
    let source = locate(
        network,
        plan.source,
        index,
        plan.source_port,
        Direction::Out,
        plan.data_kind,
    )?;
    let target = locate(
        network,
        plan.target,
        index,
        plan.target_port,
        Direction::In,
        plan.data_kind,
    )?;

    // Direct bindings only join channels made by earlier connects
    let (source_path, existing) = {
        let port = network.port_at(source)?;
        let explicit = port.bound().iter().copied().find(|id| {
            network
                .channel(*id)
                .is_some_and(|c| c.origin() == ChannelOrigin::Explicit)
        });
        (port.path().to_string(), explicit)
    };
    let (target_path, driven_by) = {
        let port = network.port_at(target)?;
        (port.path().to_string(), port.driver_channel())
    };

    if let Some(channel) = driven_by {
        return Err(WiringError::PortAlreadyDriven {
            port: target_path,
            channel,
        });
    }

    let (channel, created) = match (plan.binding, existing) {
        (Binding::Direct, Some(channel)) => (channel, false),
        _ => {
            let name = channel_name(Some(&source_path), Some(&target_path));
            let id = network
                .channels_mut()
                .alloc(name, plan.data_kind, ChannelOrigin::Explicit);
            (id, true)
        }
    };

    network.attach(channel, source)?;
    network.attach(channel, target)?;

    debug!(target: "spikenet-wiring",
        "++ Bound {} to {} via channel {}", target_path, source_path, channel);

    Ok(created)
}

fn locate(
    network: &Network,
    group: GroupId,
    index: usize,
    name: &str,
    direction: Direction,
    data_kind: DataKind,
) -> WiringResult<PortRef> {
    let element = network
        .group_by_id(group)
        .and_then(|g| g.element(index))
        .ok_or_else(|| WiringError::GroupNotFound(format!("#{}[{}]", group.0, index)))?;

    let port = resolver::resolve_slot(element, name, direction, data_kind)?;

    Ok(PortRef {
        group,
        element: index,
        port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{NeuronParams, StimulusParams, SynapseParams};

    fn network() -> Network {
        let mut net = Network::new("A", 1e-3);
        net.add_stimulus_group("i1", 3, StimulusParams::default()).unwrap();
        net.add_neuron_group("n1", 3, NeuronParams::default()).unwrap();
        net.add_synapse_group("s1", 3, SynapseParams::default()).unwrap();
        net
    }

    fn plan<'a>(
        net: &Network,
        src: &str,
        sp: &'a str,
        tgt: &str,
        tp: &'a str,
        kind: DataKind,
        binding: Binding,
    ) -> FanOutPlan<'a> {
        FanOutPlan {
            source: net.group(src).unwrap().id(),
            source_port: sp,
            target: net.group(tgt).unwrap().id(),
            target_port: tp,
            data_kind: kind,
            binding,
        }
    }

    #[test]
    fn test_signal_binding_creates_one_channel_per_index() {
        let mut net = network();
        let p = plan(&net, "i1", "output", "s1", "spike", DataKind::Pulse, Binding::Signal);
        let report = fan_out(&mut net, p).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.connected, 3);
        assert_eq!(report.channels_created, 3);
        assert_eq!(net.channels().len(), 3);
    }

    #[test]
    fn test_direct_binding_reuses_driven_channel() {
        let mut net = network();
        net.add_synapse_group("s2", 3, SynapseParams::default()).unwrap();

        let first = plan(&net, "n1", "vm", "s1", "post", DataKind::Analog, Binding::Direct);
        assert_eq!(fan_out(&mut net, first).unwrap().channels_created, 3);

        let second = plan(&net, "n1", "vm", "s2", "post", DataKind::Analog, Binding::Direct);
        let report = fan_out(&mut net, second).unwrap();
        assert_eq!(report.connected, 3);
        assert_eq!(report.channels_created, 0);

        assert_eq!(net.channels().len(), 3);
        for channel in net.channels() {
            assert_eq!(channel.drivers().len(), 1);
            assert_eq!(channel.sinks().len(), 2);
        }
    }

    #[test]
    fn test_second_driver_for_input_aborts() {
        let mut net = network();
        let p = plan(&net, "i1", "output", "s1", "spike", DataKind::Pulse, Binding::Signal);
        fan_out(&mut net, p).unwrap();

        let report = fan_out(&mut net, p).unwrap();
        assert_eq!(report.connected, 0);
        assert!(matches!(
            report.aborted,
            Some(WiringError::PortAlreadyDriven { .. })
        ));
        assert_eq!(net.channels().len(), 3);
    }

    #[test]
    fn test_driven_target_mid_group_keeps_prefix() {
        let mut net = Network::new("A", 1e-3);
        net.add_stimulus_group("i1", 4, StimulusParams::default()).unwrap();
        net.add_synapse_group("s1", 4, SynapseParams::default()).unwrap();

        let s1 = net.group("s1").unwrap().id();
        let spike = PortRef {
            group: s1,
            element: 2,
            port: 0,
        };
        let pre = net
            .channels_mut()
            .alloc("pre".to_string(), DataKind::Pulse, ChannelOrigin::Explicit);
        net.attach(pre, spike).unwrap();

        let p = plan(&net, "i1", "output", "s1", "spike", DataKind::Pulse, Binding::Signal);
        let report = fan_out(&mut net, p).unwrap();

        assert_eq!(report.connected, 2);
        assert_eq!(report.channels_created, 2);
        assert!(matches!(
            report.aborted,
            Some(WiringError::PortAlreadyDriven { channel, .. }) if channel == pre
        ));
        assert_eq!(net.channels().len(), 3);

        let i1 = net.group("i1").unwrap();
        for (index, element) in i1.elements().iter().enumerate() {
            assert_eq!(element.ports()[0].is_bound(), index < 2, "i1[{}]", index);
        }
        let s1 = net.group("s1").unwrap();
        assert!(!s1.element(3).unwrap().ports()[0].is_bound());
        net.verify_bindings().unwrap();
    }

    #[test]
    fn test_direct_binding_skips_auto_bound_channel() {
        let mut net = network();
        net.auto_bind_group("n1").unwrap();
        let auto_bound = net.channels().len();

        let p = plan(&net, "n1", "vm", "s1", "post", DataKind::Analog, Binding::Direct);
        let report = fan_out(&mut net, p).unwrap();
        assert_eq!(report.connected, 3);
        assert_eq!(report.channels_created, 3);

        let summary = net.summary();
        assert_eq!(summary.explicit_channels, 3);
        assert_eq!(summary.auto_bound_channels, auto_bound);

        let first = &net.channels()[auto_bound];
        assert_eq!(first.origin(), ChannelOrigin::Explicit);
        assert_eq!(first.name(), "A.n1_0_.vm##A.s1_0_.post");
        net.verify_bindings().unwrap();
    }

    #[test]
    fn test_missing_port_aborts_at_first_index() {
        let mut net = network();
        let p = plan(&net, "i1", "output", "s1", "nope", DataKind::Pulse, Binding::Signal);
        let report = fan_out(&mut net, p).unwrap();

        assert_eq!(report.connected, 0);
        assert!(!report.is_complete());
        assert!(matches!(report.aborted, Some(WiringError::PortNotFound(_))));
        assert!(net.channels().is_empty());
    }
}
