// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for wiring operations: handles and the error taxonomy.
*/

use crate::dispatch::UnsupportedReason;
use crate::engine::EngineError;
use crate::kind::ElementKind;
use crate::resolver::PortNotFound;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Index of a group inside its [`Network`](crate::Network)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub usize);

/// Index of a channel inside the network's channel arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(pub usize);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-owning reference to one port: group, element index, port slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub group: GroupId,
    pub element: usize,
    pub port: usize,
}

/// Errors that can occur while building a network
///
/// `UnsupportedConnection` is a configuration error and always propagates
/// out of `connect`. `PortNotFound` and `PortAlreadyDriven` only ever stop a
/// single fan-out and are reported through
/// [`ConnectionReport::aborted`](crate::ConnectionReport).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WiringError {
    #[error("Group '{0}' already exists")]
    DuplicateGroupName(String),

    #[error("Group '{0}' not found")]
    GroupNotFound(String),

    #[error("{source_kind} to {target_kind} connection is {reason}")]
    UnsupportedConnection {
        source_kind: ElementKind,
        target_kind: ElementKind,
        reason: UnsupportedReason,
    },

    #[error(
        "Size mismatch: '{source_group}' has {source_size} elements but '{target_group}' has {target_size}"
    )]
    SizeMismatch {
        source_group: String,
        source_size: usize,
        target_group: String,
        target_size: usize,
    },

    #[error(transparent)]
    PortNotFound(#[from] PortNotFound),

    #[error("Port {port} is already driven by channel {channel}")]
    PortAlreadyDriven { port: String, channel: ChannelId },

    #[error("Invalid duration: {0} (must be finite and non-negative)")]
    InvalidDuration(f64),

    #[error("Invalid time step: {0} (must be finite and positive)")]
    InvalidTimeStep(f64),

    #[error("Network '{0}' has started; wiring is frozen")]
    NetworkStarted(String),

    #[error("Dangling binding: {0}")]
    DanglingBinding(String),

    #[error("Execution engine failed: {0}")]
    Engine(#[from] EngineError),
}

impl WiringError {
    /// True for errors that must abort network construction.
    ///
    /// Everything else is left to the caller (`DuplicateGroupName`,
    /// `SizeMismatch`) or handled locally by the fan-out.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WiringError::UnsupportedConnection { .. } | WiringError::DanglingBinding(_)
        )
    }
}
