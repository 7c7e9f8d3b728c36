// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Intermediary channels and the arena that owns them.

A channel links driving `Out` ports to receiving `In` ports of the same
data kind. Channels live in the network's [`ChannelArena`]; ports refer to
them by [`ChannelId`] only, so dropping the arena tears the wiring down.
*/

use crate::port::DataKind;
use crate::types::{ChannelId, PortRef};
use serde::{Deserialize, Serialize};

/// Separator between driver and sink paths in channel names
pub const NAME_SEPARATOR: &str = "##";

/// How a channel came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelOrigin {
    /// Created by `connect`
    Explicit,
    /// Created by the auto-binder for a port nobody wired
    AutoBound,
}

#[derive(Debug, Clone)]
pub struct Channel {
    id: ChannelId,
    name: String,
    data_kind: DataKind,
    origin: ChannelOrigin,
    drivers: Vec<PortRef>,
    sinks: Vec<PortRef>,
}

impl Channel {
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Deterministic name derived from the endpoint port paths
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_kind(&self) -> DataKind {
        self.data_kind
    }

    pub fn origin(&self) -> ChannelOrigin {
        self.origin
    }

    pub fn drivers(&self) -> &[PortRef] {
        &self.drivers
    }

    pub fn sinks(&self) -> &[PortRef] {
        &self.sinks
    }

    pub(crate) fn add_driver(&mut self, port: PortRef) {
        if !self.drivers.contains(&port) {
            self.drivers.push(port);
        }
    }

    pub(crate) fn add_sink(&mut self, port: PortRef) {
        if !self.sinks.contains(&port) {
            self.sinks.push(port);
        }
    }
}

/// Owner of every channel in a network
#[derive(Debug, Clone, Default)]
pub struct ChannelArena {
    channels: Vec<Channel>,
}

impl ChannelArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an empty channel; endpoints are attached by the caller
    pub(crate) fn alloc(
        &mut self,
        name: String,
        data_kind: DataKind,
        origin: ChannelOrigin,
    ) -> ChannelId {
        let id = ChannelId(self.channels.len());
        self.channels.push(Channel {
            id,
            name,
            data_kind,
            origin,
            drivers: Vec::new(),
            sinks: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ChannelId) -> Option<&mut Channel> {
        self.channels.get_mut(id.0)
    }

    pub fn as_slice(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn count_by_origin(&self, origin: ChannelOrigin) -> usize {
        self.channels.iter().filter(|c| c.origin == origin).count()
    }
}

/// Build a channel name from the driver and sink port paths
///
/// Either side may be absent (auto-bound channels have a single endpoint).
pub fn channel_name(driver_path: Option<&str>, sink_path: Option<&str>) -> String {
    sanitize_path(&format!(
        "{}{}{}",
        driver_path.unwrap_or(""),
        NAME_SEPARATOR,
        sink_path.unwrap_or("")
    ))
}

/// Replace every character outside `[A-Za-z0-9_.#-]` with `_`
pub fn sanitize_path(path: &str) -> String {
    path.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '#' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
