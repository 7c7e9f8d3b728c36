// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Serializable snapshot of a network's wiring, for logs and debugging.

use crate::kind::ElementKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub name: String,
    pub kind: ElementKind,
    pub size: usize,
    pub unbound_ports: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub name: String,
    pub dt: f64,
    pub started: bool,
    /// In insertion order
    pub groups: Vec<GroupSummary>,
    pub explicit_channels: usize,
    pub auto_bound_channels: usize,
}

impl NetworkSummary {
    pub fn total_channels(&self) -> usize {
        self.explicit_channels + self.auto_bound_channels
    }
}
