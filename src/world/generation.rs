//! Lazy, deterministic world graph generation.
//!
//! Every area materializes from its own derived roll stream keyed by
//! `(world seed, distance, index)`, so the content of an area never depends
//! on when the player first reaches it or on the main action stream's
//! counter. Generating the same area twice yields identical content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    FIRST_BAND_AREA_COUNT, GATHERING_SKILLS, HUB_NAME, MAX_LOCATIONS_PER_AREA,
    MAX_TRAVEL_MULTIPLIER, MIN_LOCATIONS_PER_AREA, MIN_TRAVEL_MULTIPLIER,
    SECOND_BAND_AREA_COUNT, SIBLING_CONNECTION_CHANCE,
};
use crate::core::rolls::RollStream;
use crate::world::names::{generate_area_name, generate_mob_camp_name};
use crate::world::types::{
    Area, AreaId, Connection, ConnectionId, Location, LocationId, LocationKind,
};

/// How many areas exist at a given distance band from the hub.
///
/// Distance 0 is the singular hub; bands 1+ grow Fibonacci-style from 5:
/// 5, 8, 13, 21, 34, ... This directly shapes discovery difficulty through
/// the probability model's `total_at_distance` denominator.
pub fn area_count(distance: u32) -> u64 {
    if distance == 0 {
        return 1;
    }
    let mut prev = FIRST_BAND_AREA_COUNT;
    let mut curr = SECOND_BAND_AREA_COUNT;
    for _ in 3..=distance {
        let next = prev + curr;
        prev = curr;
        curr = next;
    }
    if distance == 1 {
        prev
    } else {
        curr
    }
}

/// The generated world: every area referenced so far plus every connection
/// generated alongside them. Areas and connections are never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldGraph {
    seed: String,
    areas: BTreeMap<AreaId, Area>,
    connections: BTreeMap<ConnectionId, Connection>,
}

impl WorldGraph {
    /// Creates the world with the hub already materialized.
    pub fn new(seed: impl Into<String>) -> Self {
        let mut world = Self {
            seed: seed.into(),
            areas: BTreeMap::new(),
            connections: BTreeMap::new(),
        };
        world.ensure_area_generated(AreaId::HUB);
        world
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(&id)
    }

    /// Looks up an area that callers have already proven must exist (it is
    /// an endpoint of a generated connection). Absence is generator
    /// corruption, not player behavior, so it fails loudly.
    pub fn expect_area(&self, id: AreaId) -> &Area {
        self.areas
            .get(&id)
            .unwrap_or_else(|| panic!("area {id} referenced but never placed in the world graph"))
    }

    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    /// All connections touching `area`, in canonical id order.
    pub fn connections_from(&self, area: AreaId) -> Vec<&Connection> {
        self.connections
            .values()
            .filter(|c| c.id.touches(area))
            .collect()
    }

    /// Materializes an area if it has not been generated yet. Idempotent.
    pub fn ensure_area_generated(&mut self, id: AreaId) {
        if self.areas.get(&id).map(|a| a.generated).unwrap_or(false) {
            return;
        }
        if id.is_hub() {
            self.materialize_hub();
        } else {
            self.materialize_area(id);
        }
    }

    /// Materializes an area *and* every neighbor referenced by its
    /// connections, so a "connection to an unknown area" always points at
    /// real content before discovery candidates are classified. Idempotent.
    pub fn ensure_area_fully_generated(&mut self, id: AreaId) {
        self.ensure_area_generated(id);
        let neighbors: Vec<AreaId> = self
            .connections_from(id)
            .iter()
            .map(|c| c.id.other(id))
            .collect();
        for neighbor in neighbors {
            self.ensure_area_generated(neighbor);
        }
    }

    fn materialize_hub(&mut self) {
        let id = AreaId::HUB;
        let mut area = Area::placeholder(id);
        area.name = HUB_NAME.to_string();
        area.locations = vec![
            Location {
                id: LocationId { area: id, slot: 0 },
                name: "Exploration Guild".to_string(),
                kind: LocationKind::GuildHall {
                    guild: "Exploration".to_string(),
                },
            },
            Location {
                id: LocationId { area: id, slot: 1 },
                name: "Town Warehouse".to_string(),
                kind: LocationKind::Warehouse,
            },
        ];
        area.generated = true;
        self.areas.insert(id, area);

        // The hub connects to every first-band area unconditionally.
        for index in 0..area_count(1) {
            let far = AreaId::new(1, index as u32);
            self.reference_area(far);
            self.connections
                .entry(ConnectionId::new(id, far))
                .or_insert(Connection {
                    id: ConnectionId::new(id, far),
                    travel_time_multiplier: MIN_TRAVEL_MULTIPLIER,
                });
        }
    }

    fn materialize_area(&mut self, id: AreaId) {
        let mut rng = RollStream::for_area(&self.seed, id.distance, id.index);

        let mut area = Area::placeholder(id);
        area.name = generate_area_name(&mut rng, id.distance);
        area.locations = self.roll_locations(&mut rng, id);
        area.generated = true;
        self.areas.insert(id, area);

        // Outward links toward the next band.
        let next_band = area_count(id.distance + 1);
        let link_count = rng.draw_index(1, 2, "outward-link-count");
        let mut targets: Vec<u32> = Vec::new();
        for _ in 0..link_count {
            let target = rng.draw_index(0, next_band - 1, "outward-link-target") as u32;
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        for target in targets {
            let far = AreaId::new(id.distance + 1, target);
            let multiplier = rng.draw_index(
                MIN_TRAVEL_MULTIPLIER as u64,
                MAX_TRAVEL_MULTIPLIER as u64,
                "outward-link-multiplier",
            ) as u32;
            self.reference_area(far);
            self.connections
                .entry(ConnectionId::new(id, far))
                .or_insert(Connection {
                    id: ConnectionId::new(id, far),
                    travel_time_multiplier: multiplier,
                });
        }

        // A sibling link is proposed only by the lower-index side so the
        // pair is generated exactly once regardless of visit order.
        let band = area_count(id.distance) as u32;
        if id.index + 1 < band && rng.draw_bool(SIBLING_CONNECTION_CHANCE, "sibling-link") {
            let sibling = AreaId::new(id.distance, id.index + 1);
            let multiplier = rng.draw_index(
                MIN_TRAVEL_MULTIPLIER as u64,
                MAX_TRAVEL_MULTIPLIER as u64,
                "sibling-link-multiplier",
            ) as u32;
            self.reference_area(sibling);
            self.connections
                .entry(ConnectionId::new(id, sibling))
                .or_insert(Connection {
                    id: ConnectionId::new(id, sibling),
                    travel_time_multiplier: multiplier,
                });
        }
    }

    fn roll_locations(&self, rng: &mut RollStream, id: AreaId) -> Vec<Location> {
        let count = rng.draw_index(
            MIN_LOCATIONS_PER_AREA as u64,
            MAX_LOCATIONS_PER_AREA as u64,
            "location-count",
        ) as u32;

        (0..count)
            .map(|slot| {
                let loc_id = LocationId { area: id, slot };
                let kind_roll = rng.draw_unit("location-kind");
                if kind_roll < 0.50 {
                    let skill_idx =
                        rng.draw_index(0, GATHERING_SKILLS.len() as u64 - 1, "gathering-skill");
                    let skill = GATHERING_SKILLS[skill_idx as usize];
                    let tier = 1 + (id.distance - 1) / 3;
                    let resource = resource_name(skill, tier);
                    Location {
                        id: loc_id,
                        name: resource.to_string(),
                        kind: LocationKind::GatheringNode {
                            resource: resource.to_string(),
                            required_skill: skill.to_string(),
                            tier,
                        },
                    }
                } else if kind_roll < 0.80 {
                    let threat = id.distance + rng.draw_index(0, 2, "camp-threat") as u32;
                    Location {
                        id: loc_id,
                        name: generate_mob_camp_name(rng),
                        kind: LocationKind::MobCamp { threat },
                    }
                } else {
                    Location {
                        id: loc_id,
                        name: "Abandoned Warehouse".to_string(),
                        kind: LocationKind::Warehouse,
                    }
                }
            })
            .collect()
    }

    fn reference_area(&mut self, id: AreaId) {
        self.areas.entry(id).or_insert_with(|| Area::placeholder(id));
    }
}

fn resource_name(skill: &str, tier: u32) -> &'static str {
    let table: [&'static str; 5] = match skill {
        "Mining" => [
            "Copper Vein",
            "Iron Seam",
            "Silver Lode",
            "Mithril Deposit",
            "Adamant Depths",
        ],
        "Woodcutting" => [
            "Oak Grove",
            "Birch Stand",
            "Yew Thicket",
            "Ironwood Copse",
            "Elderwood Heart",
        ],
        "Herbalism" => [
            "Chamomile Patch",
            "Nettle Field",
            "Sage Hollow",
            "Moonbloom Glade",
            "Dreamroot Cluster",
        ],
        other => panic!("unknown gathering skill {other}"),
    };
    let idx = (tier.saturating_sub(1) as usize).min(table.len() - 1);
    table[idx]
}
