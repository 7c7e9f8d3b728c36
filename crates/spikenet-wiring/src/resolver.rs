// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Port resolution by name, direction and data kind.
//!
//! All three must match. An `in` and an `out` port may share a name; the
//! direction disambiguates. A miss is an ordinary result, not a panic.

use crate::element::Element;
use crate::port::{DataKind, Direction, Port};

/// No port on `element` matched the requested name, direction and data kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Could not find {direction} {data_kind} port '{port}' on {element}. Available: {available}")]
pub struct PortNotFound {
    pub element: String,
    pub port: String,
    pub direction: Direction,
    pub data_kind: DataKind,
    pub available: String,
}

/// Look up a port on an element
pub fn resolve<'a>(
    element: &'a Element,
    name: &str,
    direction: Direction,
    data_kind: DataKind,
) -> Result<&'a Port, PortNotFound> {
    let slot = resolve_slot(element, name, direction, data_kind)?;
    element
        .port(slot)
        .ok_or_else(|| not_found(element, name, direction, data_kind))
}

/// Like [`resolve`], returning the port's slot in the element
pub fn resolve_slot(
    element: &Element,
    name: &str,
    direction: Direction,
    data_kind: DataKind,
) -> Result<usize, PortNotFound> {
    element
        .find_slot(name, direction, data_kind)
        .ok_or_else(|| not_found(element, name, direction, data_kind))
}

fn not_found(element: &Element, name: &str, direction: Direction, data_kind: DataKind) -> PortNotFound {
    PortNotFound {
        element: element.path().to_string(),
        port: name.to_string(),
        direction,
        data_kind,
        available: element.available_ports_csv(),
    }
}
