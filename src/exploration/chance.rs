//! The canonical probability and roll-interval model.
//!
//! This is the single source of truth for exploration odds: previews, the
//! executor, and the simulator all call these functions rather than
//! re-deriving the formulas inline.

use crate::constants::{BASE_ROLL_INTERVAL, MIN_ROLL_INTERVAL, UNSKILLED_SUCCESS_CHANCE};

/// Ticks between roll attempts: 2 at low level, improving by 0.1 per 10
/// levels, floored at 1 tick from level 100 on.
pub fn roll_interval(level: u32) -> f64 {
    let steps = (level / 10) as f64;
    (BASE_ROLL_INTERVAL - steps * 0.1).max(MIN_ROLL_INTERVAL)
}

/// Per-roll success chance.
///
/// Level 0 (enrolled but untrained) is a flat 1% regardless of every other
/// input. Otherwise the chance grows with level and with how well the
/// target band is already known, shrinks with distance, and clamps to
/// `[0, 1]`.
///
/// * `connected_known` — known areas adjacent to the current area.
/// * `non_connected_known` — known areas in the target band that are not
///   adjacent to the current area.
/// * `total_at_distance` — how many areas exist in the target band.
pub fn success_chance(
    level: u32,
    distance: u32,
    connected_known: u32,
    non_connected_known: u32,
    total_at_distance: u64,
) -> f64 {
    if level == 0 {
        return UNSKILLED_SUCCESS_CHANCE;
    }
    let band_knowledge = if total_at_distance > 0 {
        non_connected_known as f64 / total_at_distance as f64
    } else {
        0.0
    };
    let chance = 0.05 + 0.05 * (level as f64 - 1.0) - 0.05 * (distance as f64 - 1.0)
        + 0.05 * connected_known as f64
        + 0.20 * band_knowledge;
    chance.clamp(0.0, 1.0)
}

/// Expected ticks until success for a geometric roll process.
pub fn expected_ticks(chance: f64, interval: f64) -> f64 {
    if chance <= 0.0 {
        return f64::INFINITY;
    }
    interval / chance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_roll_interval_law() {
        assert!(close(roll_interval(1), 2.0));
        assert!(close(roll_interval(9), 2.0));
        assert!(close(roll_interval(10), 1.9));
        assert!(close(roll_interval(55), 1.5));
        assert!(close(roll_interval(100), 1.0));
        assert!(close(roll_interval(150), 1.0));
    }

    #[test]
    fn test_level_zero_is_flat_one_percent() {
        assert!(close(success_chance(0, 1, 0, 0, 5), 0.01));
        assert!(close(success_chance(0, 9, 40, 100, 377), 0.01));
    }

    #[test]
    fn test_fresh_explorer_scenario() {
        // Level 1, distance 1, one connected known area, none non-connected.
        assert!(close(success_chance(1, 1, 1, 0, 5), 0.10));
    }

    #[test]
    fn test_distance_penalty() {
        let near = success_chance(5, 1, 0, 0, 5);
        let far = success_chance(5, 4, 0, 0, 21);
        assert!(close(near - far, 0.15));
    }

    #[test]
    fn test_band_knowledge_bonus() {
        let none = success_chance(1, 2, 0, 0, 8);
        let half = success_chance(1, 2, 0, 4, 8);
        assert!(close(half - none, 0.10));
    }

    #[test]
    fn test_chance_is_clamped() {
        assert!(close(success_chance(100, 1, 10, 0, 5), 1.0));
        assert!(close(success_chance(1, 30, 0, 0, 5), 0.0));
    }

    #[test]
    fn test_expected_ticks_law() {
        assert!(close(expected_ticks(0.1, 2.0), 20.0));
        assert!(close(expected_ticks(0.01, 2.0), 200.0));
        assert!(expected_ticks(0.0, 2.0).is_infinite());
    }
}
