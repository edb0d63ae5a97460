//! Player knowledge: what this player has personally discovered, as
//! distinct from what exists in the generated world.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::world::{AreaId, ConnectionId, LocationId};

/// The monotonically growing record of discoveries.
///
/// Discoveries are permanent: no operation removes a known id. The hub is
/// known from game start and the current area is always itself known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerKnowledge {
    pub current_area_id: AreaId,
    pub current_location_id: Option<LocationId>,
    known_area_ids: BTreeSet<AreaId>,
    known_location_ids: BTreeSet<LocationId>,
    known_connection_ids: BTreeSet<ConnectionId>,
}

impl Default for PlayerKnowledge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerKnowledge {
    /// A fresh player standing in the hub, knowing only the hub.
    pub fn new() -> Self {
        let mut known_area_ids = BTreeSet::new();
        known_area_ids.insert(AreaId::HUB);
        Self {
            current_area_id: AreaId::HUB,
            current_location_id: None,
            known_area_ids,
            known_location_ids: BTreeSet::new(),
            known_connection_ids: BTreeSet::new(),
        }
    }

    pub fn mark_area_known(&mut self, id: AreaId) {
        self.known_area_ids.insert(id);
    }

    pub fn mark_location_known(&mut self, id: LocationId) {
        self.known_location_ids.insert(id);
    }

    pub fn mark_connection_known(&mut self, id: ConnectionId) {
        self.known_connection_ids.insert(id);
    }

    pub fn is_area_known(&self, id: AreaId) -> bool {
        self.known_area_ids.contains(&id)
    }

    pub fn is_location_known(&self, id: LocationId) -> bool {
        self.known_location_ids.contains(&id)
    }

    /// Connections are undirected; either endpoint ordering matches.
    pub fn is_connection_known(&self, a: AreaId, b: AreaId) -> bool {
        self.known_connection_ids.contains(&ConnectionId::new(a, b))
            || self.known_connection_ids.contains(&ConnectionId::new(b, a))
    }

    pub fn is_connection_id_known(&self, id: ConnectionId) -> bool {
        self.known_connection_ids.contains(&id)
    }

    pub fn known_areas(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.known_area_ids.iter().copied()
    }

    pub fn known_locations(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.known_location_ids.iter().copied()
    }

    pub fn known_connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.known_connection_ids.iter().copied()
    }

    pub fn known_area_count(&self) -> usize {
        self.known_area_ids.len()
    }

    /// Moves the player, keeping the invariant that the current area is
    /// always known. Panics on a violation: travel code must only move the
    /// player along known areas.
    pub fn move_to_area(&mut self, id: AreaId) {
        assert!(
            self.is_area_known(id),
            "moved player into unknown area {id}"
        );
        self.current_area_id = id;
        self.current_location_id = None;
    }
}

/// Memo for "is this area fully explored?".
///
/// Knowledge only grows, but the world side can still reopen an area:
/// inbound connections are proposed by their *other* endpoint (an area one
/// band closer, or the lower-index sibling), so a new edge into an area may
/// materialize after the area was confirmed exhausted. Each confirmation
/// therefore records the connection count it was computed against; a count
/// that has since grown voids the entry. `false` is always recomputed by
/// the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FullyExploredCache {
    confirmed: BTreeMap<AreaId, usize>,
}

impl FullyExploredCache {
    /// True only if the area was confirmed against this exact connection
    /// count. Connections are never removed, so an unequal count means new
    /// edges have appeared since confirmation.
    pub fn is_confirmed(&self, id: AreaId, connection_count: usize) -> bool {
        self.confirmed.get(&id) == Some(&connection_count)
    }

    pub fn confirm(&mut self, id: AreaId, connection_count: usize) {
        self.confirmed.insert(id, connection_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::AreaId;

    #[test]
    fn test_fresh_player_knows_only_the_hub() {
        let knowledge = PlayerKnowledge::new();
        assert_eq!(knowledge.current_area_id, AreaId::HUB);
        assert!(knowledge.is_area_known(AreaId::HUB));
        assert_eq!(knowledge.known_area_count(), 1);
        assert_eq!(knowledge.known_locations().count(), 0);
        assert_eq!(knowledge.known_connections().count(), 0);
    }

    #[test]
    fn test_marking_is_idempotent() {
        let mut knowledge = PlayerKnowledge::new();
        let area = AreaId::new(1, 0);
        knowledge.mark_area_known(area);
        knowledge.mark_area_known(area);
        assert_eq!(knowledge.known_area_count(), 2);
    }

    #[test]
    fn test_connection_knowledge_is_undirected() {
        let mut knowledge = PlayerKnowledge::new();
        let a = AreaId::HUB;
        let b = AreaId::new(1, 3);
        knowledge.mark_connection_known(ConnectionId::new(b, a));
        assert!(knowledge.is_connection_known(a, b));
        assert!(knowledge.is_connection_known(b, a));
    }

    #[test]
    fn test_move_requires_known_area() {
        let mut knowledge = PlayerKnowledge::new();
        let area = AreaId::new(1, 1);
        knowledge.mark_area_known(area);
        knowledge.current_location_id = Some(crate::world::LocationId {
            area: AreaId::HUB,
            slot: 0,
        });
        knowledge.move_to_area(area);
        assert_eq!(knowledge.current_area_id, area);
        assert_eq!(knowledge.current_location_id, None);
    }

    #[test]
    #[should_panic(expected = "unknown area")]
    fn test_move_to_unknown_area_panics() {
        let mut knowledge = PlayerKnowledge::new();
        knowledge.move_to_area(AreaId::new(4, 2));
    }

    #[test]
    fn test_explored_cache_only_stores_confirmations() {
        let mut cache = FullyExploredCache::default();
        let area = AreaId::new(1, 0);
        assert!(!cache.is_confirmed(area, 3));
        cache.confirm(area, 3);
        assert!(cache.is_confirmed(area, 3));
    }

    #[test]
    fn test_explored_cache_is_voided_by_edge_growth() {
        let mut cache = FullyExploredCache::default();
        let area = AreaId::new(2, 1);
        cache.confirm(area, 2);
        assert!(cache.is_confirmed(area, 2));
        // A lately materialized neighbor added an inbound connection.
        assert!(!cache.is_confirmed(area, 3));
    }
}
