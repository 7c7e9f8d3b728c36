// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Element kinds and their fixed port vocabularies.

| Kind     | Port     | Direction | Data   |
|----------|----------|-----------|--------|
| Stimulus | `output` | out       | pulse  |
| Neuron   | `vm`     | out       | analog |
| Neuron   | `inject` | in        | analog |
| Synapse  | `spike`  | in        | pulse  |
| Synapse  | `post`   | in        | analog |
| Synapse  | `psc`    | out       | analog |
*/

use crate::port::{DataKind, PortSpec};
use serde::{Deserialize, Serialize};
use std::fmt;

const STIMULUS_PORTS: &[PortSpec] = &[PortSpec::output("output", DataKind::Pulse)];

const NEURON_PORTS: &[PortSpec] = &[
    PortSpec::output("vm", DataKind::Analog),
    PortSpec::input("inject", DataKind::Analog),
];

const SYNAPSE_PORTS: &[PortSpec] = &[
    PortSpec::input("spike", DataKind::Pulse),
    PortSpec::input("post", DataKind::Analog),
    PortSpec::output("psc", DataKind::Analog),
];

/// Closed set of element kinds. Fixed per group at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Spike generator
    Stimulus,
    /// Integrate-and-fire neuron
    Neuron,
    /// Exponential synapse
    Synapse,
}

impl ElementKind {
    pub const ALL: [ElementKind; 3] = [
        ElementKind::Stimulus,
        ElementKind::Neuron,
        ElementKind::Synapse,
    ];

    /// Port vocabulary shared by every element of this kind
    pub fn port_specs(self) -> &'static [PortSpec] {
        match self {
            ElementKind::Stimulus => STIMULUS_PORTS,
            ElementKind::Neuron => NEURON_PORTS,
            ElementKind::Synapse => SYNAPSE_PORTS,
        }
    }

    /// Name of the group type holding elements of this kind
    pub fn group_label(self) -> &'static str {
        match self {
            ElementKind::Stimulus => "StimulusGroup",
            ElementKind::Neuron => "NeuronGroup",
            ElementKind::Synapse => "SynapseGroup",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group_label())
    }
}
