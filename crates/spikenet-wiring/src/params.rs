// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Constructor parameters per element kind.
//!
//! Values are stored on each element and handed to the execution engine
//! untouched; nothing here integrates or validates the dynamics. Units are SI.

use crate::kind::ElementKind;
use serde::{Deserialize, Serialize};

/// Periodic spike generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StimulusParams {
    /// Inter-spike interval (s)
    pub period: f64,
    /// Time of the first spike (s)
    pub delay: f64,
}

impl Default for StimulusParams {
    fn default() -> Self {
        Self {
            period: 1e-3,
            delay: 0.0,
        }
    }
}

/// Leaky integrate-and-fire neuron
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronParams {
    /// Membrane time constant (s)
    pub tau_m: f64,
    /// Membrane resistance (ohm)
    pub r_m: f64,
    pub v_rest: f64,
    pub v_threshold: f64,
    pub v_reset: f64,
    /// Absolute refractory period (s)
    pub refractory: f64,
}

impl Default for NeuronParams {
    fn default() -> Self {
        Self {
            tau_m: 10e-3,
            r_m: 10e6,
            v_rest: -65e-3,
            v_threshold: -50e-3,
            v_reset: -65e-3,
            refractory: 2e-3,
        }
    }
}

/// Exponential conductance synapse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynapseParams {
    /// Peak conductance (S)
    pub gbar: f64,
    /// Decay time constant (s)
    pub tau: f64,
    /// Reversal potential (V)
    pub e_syn: f64,
}

impl Default for SynapseParams {
    fn default() -> Self {
        Self {
            gbar: 1e-9,
            tau: 1e-3,
            e_syn: 0.0,
        }
    }
}

/// Parameters of one element; the variant fixes the element kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ElementParams {
    Stimulus(StimulusParams),
    Neuron(NeuronParams),
    Synapse(SynapseParams),
}

impl ElementParams {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementParams::Stimulus(_) => ElementKind::Stimulus,
            ElementParams::Neuron(_) => ElementKind::Neuron,
            ElementParams::Synapse(_) => ElementKind::Synapse,
        }
    }

    /// Default parameters for a kind
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Stimulus => ElementParams::Stimulus(StimulusParams::default()),
            ElementKind::Neuron => ElementParams::Neuron(NeuronParams::default()),
            ElementKind::Synapse => ElementParams::Synapse(SynapseParams::default()),
        }
    }
}

impl From<StimulusParams> for ElementParams {
    fn from(params: StimulusParams) -> Self {
        ElementParams::Stimulus(params)
    }
}

impl From<NeuronParams> for ElementParams {
    fn from(params: NeuronParams) -> Self {
        ElementParams::Neuron(params)
    }
}

impl From<SynapseParams> for ElementParams {
    fn from(params: SynapseParams) -> Self {
        ElementParams::Synapse(params)
    }
}
