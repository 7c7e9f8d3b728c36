// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Default binding of ports nobody wired.
//!
//! Every unbound port gets a fresh single-endpoint channel so the element
//! is runnable. Bound ports are skipped, so running twice is a no-op.

use crate::channel::{channel_name, ChannelOrigin};
use crate::network::Network;
use crate::port::{DataKind, Direction};
use crate::types::{GroupId, PortRef, WiringError, WiringResult};
use tracing::debug;

/// Bind every unbound port of `group`; returns the number of channels created
pub fn auto_bind(network: &mut Network, group: GroupId) -> WiringResult<usize> {
    let pending: Vec<(PortRef, Direction, DataKind, String)> = {
        let g = network
            .group_by_id(group)
            .ok_or_else(|| WiringError::GroupNotFound(format!("#{}", group.0)))?;

        debug!(target: "spikenet-wiring", "+ Binding unbound ports of {} {}", g.kind(), g.name());

        g.elements()
            .iter()
            .enumerate()
            .flat_map(|(element, e)| {
                e.ports().iter().enumerate().filter_map(move |(port, p)| {
                    (!p.is_bound()).then(|| {
                        (
                            PortRef {
                                group,
                                element,
                                port,
                            },
                            p.direction(),
                            p.data_kind(),
                            p.path().to_string(),
                        )
                    })
                })
            })
            .collect()
    };

    let created = pending.len();

    for (port, direction, data_kind, path) in pending {
        let name = match direction {
            Direction::Out => channel_name(Some(&path), None),
            Direction::In => channel_name(None, Some(&path)),
        };
        let channel = network
            .channels_mut()
            .alloc(name, data_kind, ChannelOrigin::AutoBound);
        network.attach(channel, port)?;
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SynapseParams;

    #[test]
    fn test_auto_bind_is_idempotent() {
        let mut net = Network::new("A", 1e-3);
        let id = net.add_synapse_group("s1", 2, SynapseParams::default()).unwrap();

        assert_eq!(auto_bind(&mut net, id).unwrap(), 6);
        assert_eq!(auto_bind(&mut net, id).unwrap(), 0);
        assert_eq!(net.channels().len(), 6);
    }

    #[test]
    fn test_auto_bound_names_are_deterministic() {
        let build = || {
            let mut net = Network::new("A", 1e-3);
            let id = net.add_synapse_group("s1", 1, SynapseParams::default()).unwrap();
            auto_bind(&mut net, id).unwrap();
            net.channels()
                .iter()
                .map(|c| c.name().to_string())
                .collect::<Vec<_>>()
        };

        let names = build();
        assert_eq!(names, build());
        assert_eq!(
            names,
            vec![
                "##A.s1_0_.spike".to_string(),
                "##A.s1_0_.post".to_string(),
                "A.s1_0_.psc##".to_string(),
            ]
        );
    }

    #[test]
    fn test_unknown_group() {
        let mut net = Network::new("A", 1e-3);
        assert!(matches!(
            auto_bind(&mut net, GroupId(7)),
            Err(WiringError::GroupNotFound(_))
        ));
    }
}
