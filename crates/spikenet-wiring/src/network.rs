// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Network registry: owns named groups and every channel.

## Lifecycle

```text
Network::new ─► add_*_group ─► connect ... ─► start(duration, engine)
                                                 │
                                 auto-bind leftovers, verify, hand off
```

Construction is single-threaded and synchronous. Once `start` hands the
network to the engine, further `add_*_group`/`connect` calls fail with
[`WiringError::NetworkStarted`].
*/

use crate::autobind;
use crate::channel::{Channel, ChannelArena, ChannelOrigin};
use crate::dispatch;
use crate::engine::ExecutionEngine;
use crate::fanout::ConnectionReport;
use crate::group::Group;
use crate::params::{ElementParams, NeuronParams, StimulusParams, SynapseParams};
use crate::port::{Direction, Port};
use crate::summary::{GroupSummary, NetworkSummary};
use crate::types::{ChannelId, GroupId, PortRef, WiringError, WiringResult};
use ahash::AHashMap;
use spikenet_config::{NetworkConfig, SizeMismatchPolicy};
use tracing::{info, warn};

#[derive(Debug)]
pub struct Network {
    name: String,
    dt: f64,
    size_mismatch: SizeMismatchPolicy,
    auto_bind: bool,
    /// Insertion order; auto-binding walks groups in this order
    groups: Vec<Group>,
    group_index: AHashMap<String, GroupId>,
    channels: ChannelArena,
    incomplete_connections: usize,
    started: bool,
}

impl Network {
    /// Create an empty network with default policies
    ///
    /// `dt` is not checked here; `start` rejects a non-finite or
    /// non-positive time step with [`WiringError::InvalidTimeStep`].
    pub fn new(name: impl Into<String>, dt: f64) -> Self {
        Self {
            name: name.into(),
            dt,
            size_mismatch: SizeMismatchPolicy::default(),
            auto_bind: true,
            groups: Vec::new(),
            group_index: AHashMap::new(),
            channels: ChannelArena::new(),
            incomplete_connections: 0,
            started: false,
        }
    }

    /// Create an empty network from the `[network]` configuration section
    pub fn with_config(config: &NetworkConfig) -> Self {
        let mut network = Self::new(config.name.clone(), config.dt);
        network.size_mismatch = config.size_mismatch;
        network.auto_bind = config.auto_bind;
        network
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Simulation time step (s)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn size_mismatch_policy(&self) -> SizeMismatchPolicy {
        self.size_mismatch
    }

    pub fn set_size_mismatch_policy(&mut self, policy: SizeMismatchPolicy) {
        self.size_mismatch = policy;
    }

    pub fn auto_bind_enabled(&self) -> bool {
        self.auto_bind
    }

    pub fn set_auto_bind(&mut self, enabled: bool) {
        self.auto_bind = enabled;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    fn ensure_open(&self) -> WiringResult<()> {
        if self.started {
            return Err(WiringError::NetworkStarted(self.name.clone()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Add a group of `size` elements; the kind follows the params variant
    ///
    /// # Errors
    /// `DuplicateGroupName` if `name` is taken, `NetworkStarted` after `start`.
    pub fn add_group(
        &mut self,
        name: &str,
        size: usize,
        params: impl Into<ElementParams>,
    ) -> WiringResult<GroupId> {
        self.ensure_open()?;
        if self.group_index.contains_key(name) {
            return Err(WiringError::DuplicateGroupName(name.to_string()));
        }

        let params = params.into();
        let id = GroupId(self.groups.len());
        let group = Group::new(id, &self.name, name, size, params);

        info!(target: "spikenet-wiring",
            "Added {} '{}' with {} elements", group.kind(), name, size);

        self.groups.push(group);
        self.group_index.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn add_stimulus_group(
        &mut self,
        name: &str,
        size: usize,
        params: StimulusParams,
    ) -> WiringResult<GroupId> {
        self.add_group(name, size, params)
    }

    pub fn add_neuron_group(
        &mut self,
        name: &str,
        size: usize,
        params: NeuronParams,
    ) -> WiringResult<GroupId> {
        self.add_group(name, size, params)
    }

    pub fn add_synapse_group(
        &mut self,
        name: &str,
        size: usize,
        params: SynapseParams,
    ) -> WiringResult<GroupId> {
        self.add_group(name, size, params)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.group_index.get(name).and_then(|id| self.groups.get(id.0))
    }

    pub fn group_by_id(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub fn group_id(&self, name: &str) -> WiringResult<GroupId> {
        self.group_index
            .get(name)
            .copied()
            .ok_or_else(|| WiringError::GroupNotFound(name.to_string()))
    }

    /// Groups in insertion order
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.group_index.contains_key(name)
    }

    // ------------------------------------------------------------------
    // Ports and channels
    // ------------------------------------------------------------------

    pub fn port(&self, port: PortRef) -> Option<&Port> {
        self.groups
            .get(port.group.0)?
            .element(port.element)?
            .port(port.port)
    }

    pub(crate) fn port_at(&self, port: PortRef) -> WiringResult<&Port> {
        self.port(port)
            .ok_or_else(|| WiringError::DanglingBinding(format!("no port at {:?}", port)))
    }

    pub fn channels(&self) -> &[Channel] {
        self.channels.as_slice()
    }

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(id)
    }

    pub(crate) fn channels_mut(&mut self) -> &mut ChannelArena {
        &mut self.channels
    }

    /// Bind `port` to `channel` on both sides: the port records the channel
    /// and the channel lists the port as driver (`Out`) or sink (`In`).
    pub(crate) fn attach(&mut self, channel: ChannelId, port: PortRef) -> WiringResult<()> {
        let p = self
            .groups
            .get_mut(port.group.0)
            .and_then(|g| g.element_mut(port.element))
            .and_then(|e| e.port_mut(port.port))
            .ok_or_else(|| WiringError::DanglingBinding(format!("no port at {:?}", port)))?;
        let direction = p.direction();

        let c = self
            .channels
            .get_mut(channel)
            .ok_or_else(|| WiringError::DanglingBinding(format!("no channel {}", channel)))?;
        match direction {
            Direction::Out => c.add_driver(port),
            Direction::In => c.add_sink(port),
        }

        p.bind(channel);
        Ok(())
    }

    /// Every port without a channel, in group/element/port order
    pub fn unbound_ports(&self) -> Vec<PortRef> {
        let mut unbound = Vec::new();
        for group in &self.groups {
            for (element, e) in group.elements().iter().enumerate() {
                for (port, p) in e.ports().iter().enumerate() {
                    if !p.is_bound() {
                        unbound.push(PortRef {
                            group: group.id(),
                            element,
                            port,
                        });
                    }
                }
            }
        }
        unbound
    }

    // ------------------------------------------------------------------
    // Wiring
    // ------------------------------------------------------------------

    /// Connect `source.source_port` to `target.target_port` element-wise
    ///
    /// Returns the number of indices bound. A missing port stops the
    /// fan-out early and yields the partial count.
    ///
    /// # Errors
    /// `UnsupportedConnection` for kind pairs the dispatcher rejects (fatal),
    /// `SizeMismatch` under the strict policy, `GroupNotFound`,
    /// `NetworkStarted`.
    pub fn connect(
        &mut self,
        source: &str,
        source_port: &str,
        target: &str,
        target_port: &str,
    ) -> WiringResult<usize> {
        self.connect_with_report(source, source_port, target, target_port)
            .map(|report| report.connected)
    }

    /// [`connect`](Self::connect) with the full fan-out report
    pub fn connect_with_report(
        &mut self,
        source: &str,
        source_port: &str,
        target: &str,
        target_port: &str,
    ) -> WiringResult<ConnectionReport> {
        self.ensure_open()?;
        let source_id = self.group_id(source)?;
        let target_id = self.group_id(target)?;

        let report = dispatch::dispatch(self, source_id, source_port, target_id, target_port)?;
        if !report.is_complete() {
            self.incomplete_connections += 1;
        }
        Ok(report)
    }

    /// Auto-bind one group by name; returns channels created
    pub fn auto_bind_group(&mut self, name: &str) -> WiringResult<usize> {
        self.ensure_open()?;
        let id = self.group_id(name)?;
        autobind::auto_bind(self, id)
    }

    /// Auto-bind every group that still has unbound ports, in insertion order
    pub fn auto_bind_all(&mut self) -> WiringResult<usize> {
        self.ensure_open()?;
        let pending: Vec<GroupId> = self
            .groups
            .iter()
            .filter(|g| g.unbound_port_count() > 0)
            .map(|g| g.id())
            .collect();

        let mut created = 0;
        for id in pending {
            created += autobind::auto_bind(self, id)?;
        }
        Ok(created)
    }

    /// Finish wiring and hand the network to `engine` for `duration` seconds
    ///
    /// Auto-binds leftovers (when enabled), checks the binding invariant,
    /// then freezes the network.
    pub fn start<E: ExecutionEngine + ?Sized>(
        &mut self,
        duration: f64,
        engine: &mut E,
    ) -> WiringResult<()> {
        self.ensure_open()?;
        if !duration.is_finite() || duration < 0.0 {
            return Err(WiringError::InvalidDuration(duration));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(WiringError::InvalidTimeStep(self.dt));
        }

        if self.auto_bind {
            let created = self.auto_bind_all()?;
            info!(target: "spikenet-wiring", "Auto-bound {} ports in '{}'", created, self.name);
        } else {
            let unbound = self.unbound_ports().len();
            if unbound > 0 {
                warn!(target: "spikenet-wiring",
                    "'{}' starts with {} unbound ports (auto-bind disabled)", self.name, unbound);
            }
        }

        if self.incomplete_connections > 0 {
            warn!(target: "spikenet-wiring",
                "'{}' starts with incomplete connectivity: {} connect calls stopped early",
                self.name, self.incomplete_connections);
        }

        self.verify_bindings()?;
        self.started = true;

        info!(target: "spikenet-wiring",
            "Starting '{}' for {}s ({} groups, {} channels)",
            self.name, duration, self.groups.len(), self.channels.len());

        engine.run(self, duration)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Check that channels and ports agree about every binding
    ///
    /// - every channel has at least one endpoint
    /// - every endpoint exists, has the right direction and data kind, and
    ///   lists the channel among its bindings
    /// - every port binding points at an existing channel that lists it
    /// - no input is bound to more than one channel
    pub fn verify_bindings(&self) -> WiringResult<()> {
        for channel in self.channels.as_slice() {
            if channel.drivers().is_empty() && channel.sinks().is_empty() {
                return Err(WiringError::DanglingBinding(format!(
                    "channel {} '{}' has no endpoints",
                    channel.id(),
                    channel.name()
                )));
            }

            let endpoints = [
                (channel.drivers(), Direction::Out),
                (channel.sinks(), Direction::In),
            ];
            for (refs, direction) in endpoints {
                for r in refs {
                    let port = self.port_at(*r)?;
                    if port.direction() != direction
                        || port.data_kind() != channel.data_kind()
                        || !port.bound().contains(&channel.id())
                    {
                        return Err(WiringError::DanglingBinding(format!(
                            "channel {} '{}' and port {} disagree",
                            channel.id(),
                            channel.name(),
                            port.path()
                        )));
                    }
                }
            }
        }

        for group in &self.groups {
            for (element, e) in group.elements().iter().enumerate() {
                for (slot, p) in e.ports().iter().enumerate() {
                    if p.direction() == Direction::In && p.bound().len() > 1 {
                        return Err(WiringError::DanglingBinding(format!(
                            "input {} is driven by {} channels",
                            p.path(),
                            p.bound().len()
                        )));
                    }

                    let r = PortRef {
                        group: group.id(),
                        element,
                        port: slot,
                    };
                    for id in p.bound() {
                        let listed = self.channels.get(*id).map(|c| match p.direction() {
                            Direction::Out => c.drivers().contains(&r),
                            Direction::In => c.sinks().contains(&r),
                        });
                        if listed != Some(true) {
                            return Err(WiringError::DanglingBinding(format!(
                                "port {} refers to channel {} which does not list it",
                                p.path(),
                                id
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary {
            name: self.name.clone(),
            dt: self.dt,
            started: self.started,
            groups: self
                .groups
                .iter()
                .map(|g| GroupSummary {
                    name: g.name().to_string(),
                    kind: g.kind(),
                    size: g.size(),
                    unbound_ports: g.unbound_port_count(),
                })
                .collect(),
            explicit_channels: self.channels.count_by_origin(ChannelOrigin::Explicit),
            auto_bound_channels: self.channels.count_by_origin(ChannelOrigin::AutoBound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DryRunEngine;
    use crate::kind::ElementKind;

    #[test]
    fn test_duplicate_group_name() {
        let mut net = Network::new("A", 1e-3);
        net.add_neuron_group("n1", 2, NeuronParams::default()).unwrap();
        let err = net
            .add_synapse_group("n1", 2, SynapseParams::default())
            .unwrap_err();
        assert_eq!(err, WiringError::DuplicateGroupName("n1".to_string()));
        assert!(!err.is_fatal());
        assert_eq!(net.groups().count(), 1);
    }

    #[test]
    fn test_connect_unknown_group() {
        let mut net = Network::new("A", 1e-3);
        net.add_stimulus_group("i1", 2, StimulusParams::default()).unwrap();
        assert_eq!(
            net.connect("i1", "output", "s9", "spike"),
            Err(WiringError::GroupNotFound("s9".to_string()))
        );
    }

    #[test]
    fn test_with_config() {
        let config = NetworkConfig {
            name: "cfg".to_string(),
            dt: 5e-4,
            size_mismatch: SizeMismatchPolicy::Strict,
            auto_bind: false,
        };
        let net = Network::with_config(&config);
        assert_eq!(net.name(), "cfg");
        assert_eq!(net.dt(), 5e-4);
        assert_eq!(net.size_mismatch_policy(), SizeMismatchPolicy::Strict);
        assert!(!net.auto_bind_enabled());
    }

    #[test]
    fn test_start_seals_network() {
        let mut net = Network::new("A", 1e-3);
        net.add_neuron_group("n1", 1, NeuronParams::default()).unwrap();
        let mut engine = DryRunEngine::new();
        net.start(0.1, &mut engine).unwrap();

        assert!(net.is_started());
        assert!(matches!(
            net.add_neuron_group("n2", 1, NeuronParams::default()),
            Err(WiringError::NetworkStarted(_))
        ));
        assert!(matches!(
            net.start(0.1, &mut engine),
            Err(WiringError::NetworkStarted(_))
        ));
        assert_eq!(engine.runs().len(), 1);
    }

    #[test]
    fn test_start_rejects_bad_duration() {
        let mut net = Network::new("A", 1e-3);
        let mut engine = DryRunEngine::new();
        assert!(matches!(
            net.start(f64::NAN, &mut engine),
            Err(WiringError::InvalidDuration(_))
        ));
        assert!(matches!(
            net.start(-1.0, &mut engine),
            Err(WiringError::InvalidDuration(_))
        ));
        assert!(!net.is_started());
        assert!(engine.runs().is_empty());
    }

    #[test]
    fn test_start_rejects_bad_time_step() {
        let mut engine = DryRunEngine::new();
        for dt in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            let mut net = Network::new("A", dt);
            net.add_neuron_group("n1", 1, NeuronParams::default()).unwrap();
            assert!(matches!(
                net.start(0.1, &mut engine),
                Err(WiringError::InvalidTimeStep(_))
            ));
            assert!(!net.is_started());
            assert!(net.channels().is_empty());
        }
        assert!(engine.runs().is_empty());
    }

    #[test]
    fn test_start_without_auto_bind_leaves_ports_open() {
        let mut net = Network::new("A", 1e-3);
        net.set_auto_bind(false);
        net.add_synapse_group("s1", 2, SynapseParams::default()).unwrap();
        let mut engine = DryRunEngine::new();
        net.start(1.0, &mut engine).unwrap();

        assert!(net.channels().is_empty());
        assert_eq!(engine.runs()[0].unbound_ports, 6);
    }

    #[test]
    fn test_summary() {
        let mut net = Network::new("A", 1e-3);
        net.add_stimulus_group("i1", 2, StimulusParams::default()).unwrap();
        net.add_synapse_group("s1", 2, SynapseParams::default()).unwrap();
        net.connect("i1", "output", "s1", "spike").unwrap();

        let summary = net.summary();
        assert_eq!(summary.groups.len(), 2);
        assert_eq!(summary.groups[0].kind, ElementKind::Stimulus);
        assert_eq!(summary.groups[0].unbound_ports, 0);
        assert_eq!(summary.groups[1].unbound_ports, 4);
        assert_eq!(summary.explicit_channels, 2);
        assert_eq!(summary.auto_bound_channels, 0);
    }
}
