// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! A single simulated unit and the ports it owns.

use crate::params::ElementParams;
use crate::port::{DataKind, Direction, Port};
use ahash::AHashMap;

/// One stimulus source, neuron or synapse
///
/// Ports are created from the kind's vocabulary and kept in declaration
/// order; `by_name` indexes them for resolution.
#[derive(Debug, Clone)]
pub struct Element {
    path: String,
    index: usize,
    params: ElementParams,
    ports: Vec<Port>,
    by_name: AHashMap<&'static str, Vec<usize>>,
}

impl Element {
    pub(crate) fn new(path: String, index: usize, params: ElementParams) -> Self {
        let ports: Vec<Port> = params
            .kind()
            .port_specs()
            .iter()
            .map(|spec| Port::new(*spec, &path))
            .collect();

        let mut by_name: AHashMap<&'static str, Vec<usize>> = AHashMap::new();
        for (slot, port) in ports.iter().enumerate() {
            by_name.entry(port.name()).or_default().push(slot);
        }

        Self {
            path,
            index,
            params,
            ports,
            by_name,
        }
    }

    /// Hierarchical path, e.g. `net.n1[3]`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Position inside the owning group
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn params(&self) -> &ElementParams {
        &self.params
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn port(&self, slot: usize) -> Option<&Port> {
        self.ports.get(slot)
    }

    pub(crate) fn port_mut(&mut self, slot: usize) -> Option<&mut Port> {
        self.ports.get_mut(slot)
    }

    /// Slot of the port matching all three of name, direction and data kind
    pub(crate) fn find_slot(
        &self,
        name: &str,
        direction: Direction,
        data_kind: DataKind,
    ) -> Option<usize> {
        self.by_name
            .get(name)?
            .iter()
            .copied()
            .find(|&slot| {
                self.ports
                    .get(slot)
                    .is_some_and(|p| p.matches(name, direction, data_kind))
            })
    }

    /// Comma-separated `name(direction, kind)` list for diagnostics
    pub fn available_ports_csv(&self) -> String {
        self.ports
            .iter()
            .map(|p| format!("{}({}, {})", p.name(), p.direction(), p.data_kind()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SynapseParams;

    #[test]
    fn test_ports_follow_vocabulary() {
        let element = Element::new("net.s1[0]".to_string(), 0, SynapseParams::default().into());
        let names: Vec<_> = element.ports().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["spike", "post", "psc"]);
        assert_eq!(element.port(1).map(|p| p.path()), Some("net.s1[0].post"));
    }

    #[test]
    fn test_available_ports_csv() {
        let element = Element::new("net.s1[0]".to_string(), 0, SynapseParams::default().into());
        assert_eq!(
            element.available_ports_csv(),
            "spike(in, pulse), post(in, analog), psc(out, analog)"
        );
    }
}
