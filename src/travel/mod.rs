//! Travel over the known subgraph.
//!
//! Pathfinding only ever sees connections the player has discovered: an
//! edge that exists in the world graph but is not in the knowledge store is
//! not traversable and never leaks into a route.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::constants::{BASE_TRAVEL_TIME, SCAVENGE_TIME_FACTOR};
use crate::knowledge::PlayerKnowledge;
use crate::world::{AreaId, Connection, WorldGraph};

/// One leg of a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub to: AreaId,
    pub ticks: u64,
}

/// Base tick cost of traversing one connection (before scavenging).
pub fn hop_ticks(connection: &Connection) -> u64 {
    BASE_TRAVEL_TIME * connection.travel_time_multiplier as u64
}

/// Applies the scavenge time doubling to a route cost.
pub fn scavenge_adjusted(ticks: u64, scavenge: bool) -> u64 {
    if scavenge {
        ticks * SCAVENGE_TIME_FACTOR
    } else {
        ticks
    }
}

/// The direct known connection between two areas, if the player knows one.
pub fn direct_connection<'w>(
    world: &'w WorldGraph,
    knowledge: &PlayerKnowledge,
    from: AreaId,
    to: AreaId,
) -> Option<&'w Connection> {
    world
        .connections_from(from)
        .into_iter()
        .find(|c| c.id.other(from) == to && knowledge.is_connection_id_known(c.id))
}

/// Dijkstra over the known-connection subgraph.
///
/// Returns the hops from `from` to `to` (excluding the starting area) with
/// per-hop tick costs, or `None` when the known subgraph has no route.
pub fn find_path(
    world: &WorldGraph,
    knowledge: &PlayerKnowledge,
    from: AreaId,
    to: AreaId,
) -> Option<Vec<Hop>> {
    if from == to {
        return Some(Vec::new());
    }

    let mut best: BTreeMap<AreaId, u64> = BTreeMap::new();
    let mut came_from: BTreeMap<AreaId, (AreaId, u64)> = BTreeMap::new();
    let mut heap: BinaryHeap<Reverse<(u64, AreaId)>> = BinaryHeap::new();

    best.insert(from, 0);
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, area))) = heap.pop() {
        if area == to {
            break;
        }
        if cost > best.get(&area).copied().unwrap_or(u64::MAX) {
            continue;
        }
        for conn in world.connections_from(area) {
            if !knowledge.is_connection_id_known(conn.id) {
                continue;
            }
            let next = conn.id.other(area);
            let next_cost = cost + hop_ticks(conn);
            if next_cost < best.get(&next).copied().unwrap_or(u64::MAX) {
                best.insert(next, next_cost);
                came_from.insert(next, (area, hop_ticks(conn)));
                heap.push(Reverse((next_cost, next)));
            }
        }
    }

    if !best.contains_key(&to) {
        return None;
    }

    let mut hops = Vec::new();
    let mut cursor = to;
    while cursor != from {
        let (prev, ticks) = came_from[&cursor];
        hops.push(Hop { to: cursor, ticks });
        cursor = prev;
    }
    hops.reverse();
    Some(hops)
}

/// Total tick cost of a route.
pub fn path_ticks(hops: &[Hop]) -> u64 {
    hops.iter().map(|h| h.ticks).sum()
}
