//! Batch simulation runner.
//!
//! Each run instantiates an isolated engine (own world, knowledge, roll
//! stream) and plays a simple greedy policy: explore the current area dry,
//! survey for a new one, travel there, repeat until the session budget runs
//! out. Statistics come straight off the `ActionResult`s.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::constants::EXPLORATION_SKILL;
use crate::core::action::{run_action, ActionFailure, ActionKind};
use crate::core::state::ExplorationState;
use crate::skills::SkillProfile;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let seed = format!("{}-{}", config.seed, run_idx);
        let run_stats = simulate_single_run(config, &seed);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - areas {}, locations {}, connections {}, deepest d{}, ticks {}",
                run_idx + 1,
                config.num_runs,
                run_stats.areas_discovered,
                run_stats.locations_discovered,
                run_stats.connections_discovered,
                run_stats.deepest_distance,
                run_stats.ticks_used
            );
        }
        all_runs.push(run_stats);
    }

    SimReport::from_runs(all_runs)
}

fn simulate_single_run(config: &SimConfig, seed: &str) -> RunStats {
    let mut state = ExplorationState::new(seed);
    let mut skills = SkillProfile::new().with_skill(EXPLORATION_SKILL, config.skill_level);
    for gathering in &config.gathering_skills {
        skills.set(gathering, 1);
    }

    let mut stats = RunStats::new(seed.to_string());
    let mut budget = config.ticks_per_run;

    while budget > 0 {
        let current = state.knowledge.current_area_id;
        let kind = if !state.is_area_fully_explored(&skills, current) {
            ActionKind::Explore
        } else {
            ActionKind::Survey
        };

        let result = run_action(kind, &mut state, &skills, budget);
        budget = budget.saturating_sub(result.ticks_consumed);
        stats.ticks_used += result.ticks_consumed;

        if result.success {
            if let Some(luck) = result.luck {
                stats.record_luck(luck.rating);
            }
            if let Some(area) = result.discovered_area_id() {
                stats.areas_discovered += 1;
                stats.deepest_distance = stats.deepest_distance.max(area.distance);
                // Walk to the freshly surveyed area and keep going there.
                let travel = run_action(
                    ActionKind::ExplorationTravel {
                        destination: area,
                        scavenge: false,
                    },
                    &mut state,
                    &skills,
                    budget,
                );
                budget = budget.saturating_sub(travel.ticks_consumed);
                stats.ticks_used += travel.ticks_consumed;
                if !travel.success {
                    break;
                }
            } else if result.discovered_location_id().is_some() {
                stats.locations_discovered += 1;
            } else if result.discovered_connection_id().is_some() {
                stats.connections_discovered += 1;
            }
            continue;
        }

        match result.failure {
            Some(ActionFailure::NoUndiscoveredAreas) => {
                // Frontier exhausted here; fall back toward the hub.
                if current == crate::world::AreaId::HUB {
                    break;
                }
                let retreat = run_action(
                    ActionKind::FarTravel {
                        destination: crate::world::AreaId::HUB,
                        scavenge: false,
                    },
                    &mut state,
                    &skills,
                    budget,
                );
                budget = budget.saturating_sub(retreat.ticks_consumed);
                stats.ticks_used += retreat.ticks_consumed;
                if !retreat.success {
                    break;
                }
            }
            _ => break,
        }
    }

    stats.final_known_areas = state.knowledge.known_area_count() as u32;
    stats
}
