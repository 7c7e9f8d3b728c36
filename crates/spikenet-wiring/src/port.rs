// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Ports: named, directed, typed attachment points on an element.

use crate::types::ChannelId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a port as seen from its element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
        }
    }
}

/// Kind of value carried through a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKind {
    /// Boolean spike events
    Pulse,
    /// Real-valued signals (membrane voltage, current)
    Analog,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Pulse => write!(f, "pulse"),
            DataKind::Analog => write!(f, "analog"),
        }
    }
}

/// Static declaration of a port in a kind's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSpec {
    pub name: &'static str,
    pub direction: Direction,
    pub data_kind: DataKind,
}

impl PortSpec {
    pub const fn input(name: &'static str, data_kind: DataKind) -> Self {
        Self {
            name,
            direction: Direction::In,
            data_kind,
        }
    }

    pub const fn output(name: &'static str, data_kind: DataKind) -> Self {
        Self {
            name,
            direction: Direction::Out,
            data_kind,
        }
    }
}

/// A port instance owned by one element
///
/// An `In` port is bound to at most one channel; an `Out` port may drive
/// several.
#[derive(Debug, Clone)]
pub struct Port {
    spec: PortSpec,
    path: String,
    bound: Vec<ChannelId>,
}

impl Port {
    pub(crate) fn new(spec: PortSpec, element_path: &str) -> Self {
        Self {
            spec,
            path: format!("{}.{}", element_path, spec.name),
            bound: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn direction(&self) -> Direction {
        self.spec.direction
    }

    pub fn data_kind(&self) -> DataKind {
        self.spec.data_kind
    }

    pub fn spec(&self) -> PortSpec {
        self.spec
    }

    /// Hierarchical path, e.g. `net.s1[0].spike`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Channels this port is bound to
    pub fn bound(&self) -> &[ChannelId] {
        &self.bound
    }

    pub fn is_bound(&self) -> bool {
        !self.bound.is_empty()
    }

    /// Channel currently driving this input, if any
    pub fn driver_channel(&self) -> Option<ChannelId> {
        match self.spec.direction {
            Direction::In => self.bound.first().copied(),
            Direction::Out => None,
        }
    }

    pub(crate) fn bind(&mut self, channel: ChannelId) {
        if !self.bound.contains(&channel) {
            self.bound.push(channel);
        }
    }

    pub(crate) fn matches(&self, name: &str, direction: Direction, data_kind: DataKind) -> bool {
        self.spec.name == name && self.spec.direction == direction && self.spec.data_kind == data_kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_path_and_binding() {
        let mut port = Port::new(PortSpec::input("spike", DataKind::Pulse), "net.s1[0]");
        assert_eq!(port.path(), "net.s1[0].spike");
        assert!(!port.is_bound());

        port.bind(ChannelId(3));
        port.bind(ChannelId(3));
        assert_eq!(port.bound(), &[ChannelId(3)]);
        assert_eq!(port.driver_channel(), Some(ChannelId(3)));
    }

    #[test]
    fn test_output_has_no_driver_channel() {
        let mut port = Port::new(PortSpec::output("vm", DataKind::Analog), "net.n1[0]");
        port.bind(ChannelId(0));
        port.bind(ChannelId(1));
        assert_eq!(port.bound().len(), 2);
        assert_eq!(port.driver_channel(), None);
    }
}
