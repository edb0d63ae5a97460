//! Deterministic flavor names for areas and locations.

use crate::core::rolls::RollStream;

pub fn area_prefixes() -> Vec<&'static str> {
    vec![
        "Misty", "Broken", "Silent", "Amber", "Hollow", "Windswept", "Sunken", "Thorny",
        "Frozen", "Gilded", "Ashen", "Verdant",
    ]
}

pub fn area_terrains() -> Vec<&'static str> {
    vec![
        "Hills", "Marsh", "Forest", "Ravine", "Plateau", "Fens", "Highlands", "Vale",
        "Barrens", "Coast",
    ]
}

pub fn mob_camp_names() -> Vec<&'static str> {
    vec![
        "Bandit Camp", "Wolf Den", "Goblin Warren", "Troll Bridge", "Wyvern Roost",
        "Raider Outpost",
    ]
}

/// Names the deeper bands with a second prefix so distant areas read
/// distinct from the first ring.
pub fn deep_qualifiers() -> Vec<&'static str> {
    vec!["Far", "Deep", "Outer", "Lost", "Elder"]
}

pub fn generate_area_name(rng: &mut RollStream, distance: u32) -> String {
    let prefixes = area_prefixes();
    let terrains = area_terrains();
    let prefix = prefixes[rng.draw_index(0, prefixes.len() as u64 - 1, "area-name-prefix") as usize];
    let terrain = terrains[rng.draw_index(0, terrains.len() as u64 - 1, "area-name-terrain") as usize];

    if distance >= 4 {
        let deep = deep_qualifiers();
        let qualifier = deep[rng.draw_index(0, deep.len() as u64 - 1, "area-name-deep") as usize];
        format!("{qualifier} {prefix} {terrain}")
    } else {
        format!("{prefix} {terrain}")
    }
}

pub fn generate_mob_camp_name(rng: &mut RollStream) -> String {
    let camps = mob_camp_names();
    camps[rng.draw_index(0, camps.len() as u64 - 1, "camp-name") as usize].to_string()
}
