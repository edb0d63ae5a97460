//! Discovery candidate enumeration and weighted selection.
//!
//! Candidates are ephemeral: rebuilt from the world graph and the player's
//! knowledge every time they are asked for, never stored.

use serde::{Deserialize, Serialize};

use crate::constants::{
    WEIGHT_CONNECTION_TO_KNOWN, WEIGHT_CONNECTION_TO_UNKNOWN, WEIGHT_GATHERING_SKILL_HELD,
    WEIGHT_GATHERING_SKILL_MISSING, WEIGHT_OTHER_LOCATION,
};
use crate::knowledge::PlayerKnowledge;
use crate::skills::SkillProfile;
use crate::world::{AreaId, ConnectionId, LocationId, LocationKind, WorldGraph};

/// What a successful roll may reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscoverableKind {
    Location(LocationId),
    Connection(ConnectionId),
    /// A new area, reached through the connection that reveals it.
    Area { area: AreaId, via: ConnectionId },
}

/// One undiscovered item with its relative selection weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Discoverable {
    pub kind: DiscoverableKind,
    pub weight: f64,
}

/// Undiscovered content inside `area` for an Explore action: locations in
/// the area and connections leaving it. The area must already be fully
/// generated (neighbors included) so connections classify correctly.
pub fn explore_candidates(
    world: &WorldGraph,
    knowledge: &PlayerKnowledge,
    skills: &SkillProfile,
    area_id: AreaId,
) -> Vec<Discoverable> {
    let area = world.expect_area(area_id);
    assert!(
        area.generated,
        "explore candidates requested for ungenerated area {area_id}"
    );

    let mut candidates = Vec::new();

    for location in &area.locations {
        if knowledge.is_location_known(location.id) {
            continue;
        }
        let weight = match &location.kind {
            LocationKind::GatheringNode { required_skill, .. } => {
                // Nodes past the player's skills are an order of magnitude
                // harder to stumble onto.
                if skills.holds(required_skill) {
                    WEIGHT_GATHERING_SKILL_HELD
                } else {
                    WEIGHT_GATHERING_SKILL_MISSING
                }
            }
            LocationKind::MobCamp { .. } | LocationKind::GuildHall { .. } | LocationKind::Warehouse => {
                WEIGHT_OTHER_LOCATION
            }
        };
        candidates.push(Discoverable {
            kind: DiscoverableKind::Location(location.id),
            weight,
        });
    }

    for conn in world.connections_from(area_id) {
        if knowledge.is_connection_id_known(conn.id) {
            continue;
        }
        let far = conn.id.other(area_id);
        let weight = if knowledge.is_area_known(far) {
            WEIGHT_CONNECTION_TO_KNOWN
        } else {
            WEIGHT_CONNECTION_TO_UNKNOWN
        };
        candidates.push(Discoverable {
            kind: DiscoverableKind::Connection(conn.id),
            weight,
        });
    }

    candidates
}

/// Survey candidates: every connection from `area` whose far endpoint is
/// not yet a known area. Areas are discovered one connection-hop at a time;
/// all candidates carry equal weight.
pub fn survey_candidates(
    world: &WorldGraph,
    knowledge: &PlayerKnowledge,
    area_id: AreaId,
) -> Vec<Discoverable> {
    world
        .connections_from(area_id)
        .into_iter()
        .filter_map(|conn| {
            let far = conn.id.other(area_id);
            if knowledge.is_area_known(far) {
                None
            } else {
                Some(Discoverable {
                    kind: DiscoverableKind::Area {
                        area: far,
                        via: conn.id,
                    },
                    weight: 1.0,
                })
            }
        })
        .collect()
}

/// Inputs for the success-chance formula, read from the knowledge state:
/// known areas adjacent to `area`, and known areas in the target band that
/// are not adjacent to it.
pub fn band_knowledge_inputs(
    world: &WorldGraph,
    knowledge: &PlayerKnowledge,
    area_id: AreaId,
    target_distance: u32,
) -> (u32, u32) {
    let adjacent: Vec<AreaId> = world
        .connections_from(area_id)
        .iter()
        .map(|c| c.id.other(area_id))
        .collect();

    let connected_known = adjacent
        .iter()
        .filter(|id| knowledge.is_area_known(**id))
        .count() as u32;

    let non_connected_known = knowledge
        .known_areas()
        .filter(|id| *id != area_id && id.distance == target_distance && !adjacent.contains(id))
        .count() as u32;

    (connected_known, non_connected_known)
}

/// Cumulative-weight selection: maps a unit roll onto the candidate list.
/// Panics on an empty list; callers must have failed the action first.
pub fn pick_weighted(candidates: &[Discoverable], unit_roll: f64) -> &Discoverable {
    assert!(
        !candidates.is_empty(),
        "weighted pick over an empty candidate list"
    );
    let total: f64 = candidates.iter().map(|c| c.weight).sum();
    let target = unit_roll * total;
    let mut cumulative = 0.0;
    for candidate in candidates {
        cumulative += candidate.weight;
        if target < cumulative {
            return candidate;
        }
    }
    // Floating-point edge where the roll lands exactly on the total.
    candidates.last().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EXPLORATION_SKILL;

    fn prepared_world() -> (WorldGraph, PlayerKnowledge, SkillProfile) {
        let mut world = WorldGraph::new("candidate-seed");
        world.ensure_area_fully_generated(AreaId::HUB);
        let knowledge = PlayerKnowledge::new();
        let skills = SkillProfile::new().with_skill(EXPLORATION_SKILL, 1);
        (world, knowledge, skills)
    }

    #[test]
    fn test_hub_explore_candidates_cover_locations_and_connections() {
        let (world, knowledge, skills) = prepared_world();
        let candidates = explore_candidates(&world, &knowledge, &skills, AreaId::HUB);

        let locations = candidates
            .iter()
            .filter(|c| matches!(c.kind, DiscoverableKind::Location(_)))
            .count();
        let connections = candidates
            .iter()
            .filter(|c| matches!(c.kind, DiscoverableKind::Connection(_)))
            .count();
        assert_eq!(locations, 2); // guild hall + warehouse
        assert_eq!(connections, 5); // hub spokes
    }

    #[test]
    fn test_connection_weights_depend_on_far_area_knowledge() {
        let (world, mut knowledge, skills) = prepared_world();
        knowledge.mark_area_known(AreaId::new(1, 0));

        let candidates = explore_candidates(&world, &knowledge, &skills, AreaId::HUB);
        let known_edge = ConnectionId::new(AreaId::HUB, AreaId::new(1, 0));
        for c in &candidates {
            if let DiscoverableKind::Connection(id) = c.kind {
                if id == known_edge {
                    assert_eq!(c.weight, WEIGHT_CONNECTION_TO_KNOWN);
                } else {
                    assert_eq!(c.weight, WEIGHT_CONNECTION_TO_UNKNOWN);
                }
            }
        }
    }

    #[test]
    fn test_known_items_drop_out() {
        let (world, mut knowledge, skills) = prepared_world();
        let before = explore_candidates(&world, &knowledge, &skills, AreaId::HUB).len();

        let hub = world.expect_area(AreaId::HUB);
        knowledge.mark_location_known(hub.locations[0].id);
        let after = explore_candidates(&world, &knowledge, &skills, AreaId::HUB).len();
        assert_eq!(after, before - 1);
    }

    #[test]
    fn test_gathering_weight_follows_skill() {
        let mut world = WorldGraph::new("gather-seed");
        // Find a first-band area holding a gathering node.
        let mut target = None;
        for i in 0..5 {
            let id = AreaId::new(1, i);
            world.ensure_area_fully_generated(id);
            let node = world.expect_area(id).locations.iter().find_map(|l| {
                if let LocationKind::GatheringNode { required_skill, .. } = &l.kind {
                    Some((l.id, required_skill.clone()))
                } else {
                    None
                }
            });
            if let Some(found) = node {
                target = Some((id, found));
                break;
            }
        }
        let (area_id, (loc_id, skill_name)) = target.expect("no gathering node in band 1");

        let mut knowledge = PlayerKnowledge::new();
        knowledge.mark_area_known(area_id);

        let unskilled = SkillProfile::new();
        let skilled = SkillProfile::new().with_skill(&skill_name, 3);

        let weight_of = |skills: &SkillProfile| {
            explore_candidates(&world, &knowledge, skills, area_id)
                .iter()
                .find(|c| c.kind == DiscoverableKind::Location(loc_id))
                .map(|c| c.weight)
                .unwrap()
        };
        assert_eq!(weight_of(&unskilled), WEIGHT_GATHERING_SKILL_MISSING);
        assert_eq!(weight_of(&skilled), WEIGHT_GATHERING_SKILL_HELD);
    }

    #[test]
    fn test_survey_candidates_exclude_known_areas() {
        let (world, mut knowledge, _) = prepared_world();
        assert_eq!(survey_candidates(&world, &knowledge, AreaId::HUB).len(), 5);

        knowledge.mark_area_known(AreaId::new(1, 2));
        let remaining = survey_candidates(&world, &knowledge, AreaId::HUB);
        assert_eq!(remaining.len(), 4);
        assert!(remaining.iter().all(|c| {
            !matches!(c.kind, DiscoverableKind::Area { area, .. } if area == AreaId::new(1, 2))
        }));
    }

    #[test]
    fn test_band_knowledge_inputs() {
        let (world, mut knowledge, _) = prepared_world();
        knowledge.mark_area_known(AreaId::new(1, 0));
        knowledge.mark_area_known(AreaId::new(1, 1));

        // Both band-1 areas border the hub, so from the hub they are
        // connected-known and nothing is non-connected.
        let (connected, non_connected) =
            band_knowledge_inputs(&world, &knowledge, AreaId::HUB, 1);
        assert_eq!(connected, 2);
        assert_eq!(non_connected, 0);
    }

    #[test]
    fn test_pick_weighted_respects_cumulative_bands() {
        let candidates = vec![
            Discoverable {
                kind: DiscoverableKind::Location(LocationId {
                    area: AreaId::HUB,
                    slot: 0,
                }),
                weight: 1.0,
            },
            Discoverable {
                kind: DiscoverableKind::Location(LocationId {
                    area: AreaId::HUB,
                    slot: 1,
                }),
                weight: 3.0,
            },
        ];
        assert_eq!(pick_weighted(&candidates, 0.0).kind, candidates[0].kind);
        assert_eq!(pick_weighted(&candidates, 0.24).kind, candidates[0].kind);
        assert_eq!(pick_weighted(&candidates, 0.26).kind, candidates[1].kind);
        assert_eq!(pick_weighted(&candidates, 0.999).kind, candidates[1].kind);
    }
}
