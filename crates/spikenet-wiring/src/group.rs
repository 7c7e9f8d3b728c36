// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size homogeneous collections of elements.

use crate::element::Element;
use crate::kind::ElementKind;
use crate::params::ElementParams;
use crate::port::PortSpec;
use crate::types::GroupId;

/// Ordered, fixed-size collection of elements of one kind
///
/// Created once by the network and never resized.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    name: String,
    kind: ElementKind,
    elements: Vec<Element>,
}

impl Group {
    pub(crate) fn new(
        id: GroupId,
        network_name: &str,
        name: &str,
        size: usize,
        params: ElementParams,
    ) -> Self {
        let elements = (0..size)
            .map(|i| Element::new(format!("{}.{}[{}]", network_name, name, i), i, params))
            .collect();

        Self {
            id,
            name: name.to_string(),
            kind: params.kind(),
            elements,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub(crate) fn element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Port vocabulary of every element in this group
    pub fn port_specs(&self) -> &'static [PortSpec] {
        self.kind.port_specs()
    }

    /// Number of ports in the group with no channel attached
    pub fn unbound_port_count(&self) -> usize {
        self.elements
            .iter()
            .flat_map(|e| e.ports())
            .filter(|p| !p.is_bound())
            .count()
    }
}
