//! The aggregate exploration state: everything that must survive a save.

use serde::{Deserialize, Serialize};

use crate::core::rolls::RollStream;
use crate::exploration::explore_candidates;
use crate::knowledge::{FullyExploredCache, PlayerKnowledge};
use crate::skills::SkillProfile;
use crate::world::{AreaId, WorldGraph};

/// One player's world, knowledge, and roll stream.
///
/// Owned exclusively by whatever action is in flight; the engine is
/// instanced per run and needs no internal locking. Serializing this struct
/// captures the complete deterministic state: reloading it and replaying
/// the same calls reproduces the same outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationState {
    pub world: WorldGraph,
    pub knowledge: PlayerKnowledge,
    pub rolls: RollStream,
    pub explored_cache: FullyExploredCache,
}

impl ExplorationState {
    /// A fresh game: hub materialized, player in the hub, counter at 0.
    pub fn new(seed: &str) -> Self {
        Self {
            world: WorldGraph::new(seed),
            knowledge: PlayerKnowledge::new(),
            rolls: RollStream::new(seed),
            explored_cache: FullyExploredCache::default(),
        }
    }

    /// Whether an area has nothing left to discover, memoized through
    /// [`FullyExploredCache`]. Confirmations are keyed to the area's
    /// connection count: a neighbor that materializes later can propose a
    /// new inbound edge, and that edge must reopen the area rather than be
    /// masked by a stale confirmation. `false` is recomputed every call.
    pub fn is_area_fully_explored(&mut self, skills: &SkillProfile, area_id: AreaId) -> bool {
        self.world.ensure_area_fully_generated(area_id);
        let connection_count = self.world.connections_from(area_id).len();
        if self.explored_cache.is_confirmed(area_id, connection_count) {
            return true;
        }
        let exhausted =
            explore_candidates(&self.world, &self.knowledge, skills, area_id).is_empty();
        if exhausted {
            self.explored_cache.confirm(area_id, connection_count);
        }
        exhausted
    }

    /// JSON snapshot for the external save/display collaborators.
    pub fn to_snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_snapshot_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
