//! Tick-stepped action execution.
//!
//! An [`ActionRun`] drives one Survey, Explore, or travel request one tick
//! at a time. The caller owns the pacing: driving `tick()` in a timed loop
//! animates the action, driving it in a tight loop batch-simulates it, and
//! simply not calling it again cancels the run. Either way the roll counter
//! and session budget advance exactly as far as the ticks actually taken,
//! and knowledge mutates only at the moment of success.

use serde::{Deserialize, Serialize};

use crate::core::luck::{luck_summary, LuckSummary};
use crate::core::state::ExplorationState;
use crate::exploration::{
    band_knowledge_inputs, expected_ticks, explore_candidates, pick_weighted, roll_interval,
    success_chance, survey_candidates, Discoverable, DiscoverableKind,
};
use crate::skills::SkillProfile;
use crate::travel::{direct_connection, find_path, hop_ticks, path_ticks, scavenge_adjusted, Hop};
use crate::world::{area_count, AreaId, ConnectionId, LocationId};

const ROLL_EPSILON: f64 = 1e-9;

/// One exploration-engine request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Discover a new area reachable from the current one.
    Survey,
    /// Discover locations/connections inside the current area.
    Explore,
    /// Single hop across a directly known connection.
    ExplorationTravel { destination: AreaId, scavenge: bool },
    /// Multi-hop travel along the known subgraph.
    FarTravel { destination: AreaId, scavenge: bool },
}

/// Expected, recoverable outcomes — returned to the caller, never thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionFailure {
    NotQualified,
    SessionEnded,
    AreaFullyExplored,
    NoUndiscoveredAreas,
    AreaNotKnown,
    NoPathToDestination,
    AlreadyInArea,
}

/// What a successful discovery revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discovery {
    Area { area: AreaId, via: ConnectionId },
    Location(LocationId),
    Connection(ConnectionId),
}

/// Final result of one action invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub ticks_consumed: u64,
    pub failure: Option<ActionFailure>,
    pub discovery: Option<Discovery>,
    pub luck: Option<LuckSummary>,
}

impl ActionResult {
    fn failed(failure: ActionFailure, ticks_consumed: u64) -> Self {
        Self {
            success: false,
            ticks_consumed,
            failure: Some(failure),
            discovery: None,
            luck: None,
        }
    }

    pub fn discovered_area_id(&self) -> Option<AreaId> {
        match self.discovery {
            Some(Discovery::Area { area, .. }) => Some(area),
            _ => None,
        }
    }

    pub fn discovered_location_id(&self) -> Option<LocationId> {
        match self.discovery {
            Some(Discovery::Location(id)) => Some(id),
            _ => None,
        }
    }

    pub fn discovered_connection_id(&self) -> Option<ConnectionId> {
        match self.discovery {
            Some(Discovery::Area { via, .. }) => Some(via),
            Some(Discovery::Connection(id)) => Some(id),
            _ => None,
        }
    }
}

/// Cost estimate shown to the player before committing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostPreview {
    pub expected_ticks: f64,
    pub is_variable: bool,
}

/// Per-tick feedback for animation: how far along the run is, and the
/// final result once there is one.
#[derive(Debug, Clone)]
pub struct TickFeedback {
    pub ticks_elapsed: u64,
    pub rolls_made: u32,
    /// Set on the tick a travel hop completes.
    pub arrived_at: Option<AreaId>,
    pub outcome: Option<ActionResult>,
}

#[derive(Debug, Clone)]
enum RunMode {
    Rolling {
        interval: f64,
        chance: f64,
        expected: f64,
        accumulator: f64,
    },
    Travelling {
        hops: Vec<Hop>,
        next_hop: usize,
        ticks_into_hop: u64,
    },
    Finished(ActionResult),
}

/// A suspended, tick-granular action. States: rolling/travelling until
/// success, cancellation (the caller stops ticking), or budget exhaustion.
#[derive(Debug, Clone)]
pub struct ActionRun {
    kind: ActionKind,
    budget_remaining: u64,
    ticks_elapsed: u64,
    rolls_made: u32,
    mode: RunMode,
}

impl ActionRun {
    /// Validates a request and prepares its run. Validation failures come
    /// back before any tick is spent and before any roll stream draw.
    pub fn begin(
        kind: ActionKind,
        state: &mut ExplorationState,
        skills: &SkillProfile,
        session_budget: u64,
    ) -> Result<ActionRun, ActionFailure> {
        let mode = match kind {
            ActionKind::Survey | ActionKind::Explore => {
                if !skills.holds_exploration() {
                    return Err(ActionFailure::NotQualified);
                }
                let current = state.knowledge.current_area_id;
                state.world.ensure_area_fully_generated(current);

                let empty = match kind {
                    ActionKind::Survey => {
                        survey_candidates(&state.world, &state.knowledge, current).is_empty()
                    }
                    _ => state.is_area_fully_explored(skills, current),
                };
                if empty {
                    return Err(match kind {
                        ActionKind::Survey => ActionFailure::NoUndiscoveredAreas,
                        _ => ActionFailure::AreaFullyExplored,
                    });
                }
                if session_budget == 0 {
                    return Err(ActionFailure::SessionEnded);
                }

                let (interval, chance, expected) = discovery_odds(state, skills, kind);
                RunMode::Rolling {
                    interval,
                    chance,
                    expected,
                    accumulator: 0.0,
                }
            }
            ActionKind::ExplorationTravel {
                destination,
                scavenge,
            } => {
                let hops = plan_single_hop(state, destination, scavenge)?;
                if session_budget == 0 {
                    return Err(ActionFailure::SessionEnded);
                }
                RunMode::Travelling {
                    hops,
                    next_hop: 0,
                    ticks_into_hop: 0,
                }
            }
            ActionKind::FarTravel {
                destination,
                scavenge,
            } => {
                let hops = plan_route(state, destination, scavenge)?;
                if session_budget == 0 {
                    return Err(ActionFailure::SessionEnded);
                }
                RunMode::Travelling {
                    hops,
                    next_hop: 0,
                    ticks_into_hop: 0,
                }
            }
        };

        Ok(ActionRun {
            kind,
            budget_remaining: session_budget,
            ticks_elapsed: 0,
            rolls_made: 0,
            mode,
        })
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks_elapsed
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.mode, RunMode::Finished(_))
    }

    /// Advances the run by exactly one tick. Calling after completion is
    /// harmless and just replays the outcome.
    pub fn tick(&mut self, state: &mut ExplorationState, skills: &SkillProfile) -> TickFeedback {
        if let RunMode::Finished(result) = &self.mode {
            return self.feedback(None, Some(result.clone()));
        }

        if self.budget_remaining == 0 {
            let result = ActionResult::failed(ActionFailure::SessionEnded, self.ticks_elapsed);
            self.mode = RunMode::Finished(result.clone());
            return self.feedback(None, Some(result));
        }

        self.budget_remaining -= 1;
        self.ticks_elapsed += 1;

        match &mut self.mode {
            RunMode::Rolling {
                interval,
                chance,
                expected,
                accumulator,
            } => {
                *accumulator += 1.0;
                if *accumulator + ROLL_EPSILON < *interval {
                    return self.feedback(None, None);
                }
                *accumulator -= *interval;
                self.rolls_made += 1;

                let (chance, expected, interval) = (*chance, *expected, *interval);
                let label = match self.kind {
                    ActionKind::Survey => "survey-roll",
                    _ => "explore-roll",
                };
                if !state.rolls.draw_bool(chance, label) {
                    return self.feedback(None, None);
                }

                let discovery = resolve_discovery(self.kind, state, skills);
                let result = ActionResult {
                    success: true,
                    ticks_consumed: self.ticks_elapsed,
                    failure: None,
                    discovery: Some(discovery),
                    luck: Some(luck_summary(self.ticks_elapsed, expected, interval)),
                };
                self.mode = RunMode::Finished(result.clone());
                self.feedback(None, Some(result))
            }
            RunMode::Travelling {
                hops,
                next_hop,
                ticks_into_hop,
            } => {
                *ticks_into_hop += 1;
                let hop = hops[*next_hop];
                if *ticks_into_hop < hop.ticks {
                    return self.feedback(None, None);
                }

                state.knowledge.move_to_area(hop.to);
                *ticks_into_hop = 0;
                *next_hop += 1;

                if *next_hop == hops.len() {
                    let result = ActionResult {
                        success: true,
                        ticks_consumed: self.ticks_elapsed,
                        failure: None,
                        discovery: None,
                        luck: None,
                    };
                    self.mode = RunMode::Finished(result.clone());
                    self.feedback(Some(hop.to), Some(result))
                } else {
                    self.feedback(Some(hop.to), None)
                }
            }
            RunMode::Finished(_) => unreachable!("finished runs return before ticking"),
        }
    }

    fn feedback(&self, arrived_at: Option<AreaId>, outcome: Option<ActionResult>) -> TickFeedback {
        TickFeedback {
            ticks_elapsed: self.ticks_elapsed,
            rolls_made: self.rolls_made,
            arrived_at,
            outcome,
        }
    }
}

/// Runs an action to completion in one call — the batch path. The result
/// carries any validation failure instead of an `Err`, matching the
/// engine's failures-are-data contract.
pub fn run_action(
    kind: ActionKind,
    state: &mut ExplorationState,
    skills: &SkillProfile,
    session_budget: u64,
) -> ActionResult {
    let mut run = match ActionRun::begin(kind, state, skills, session_budget) {
        Ok(run) => run,
        Err(failure) => return ActionResult::failed(failure, 0),
    };
    loop {
        if let Some(outcome) = run.tick(state, skills).outcome {
            return outcome;
        }
    }
}

/// Cost preview without mutating any state.
pub fn preview_action(
    kind: ActionKind,
    state: &ExplorationState,
    skills: &SkillProfile,
) -> Result<CostPreview, ActionFailure> {
    match kind {
        ActionKind::Survey | ActionKind::Explore => {
            if !skills.holds_exploration() {
                return Err(ActionFailure::NotQualified);
            }
            let (interval, chance, _) = discovery_odds(state, skills, kind);
            Ok(CostPreview {
                expected_ticks: expected_ticks(chance, interval),
                is_variable: true,
            })
        }
        ActionKind::ExplorationTravel {
            destination,
            scavenge,
        } => {
            let hops = plan_single_hop(state, destination, scavenge)?;
            Ok(CostPreview {
                expected_ticks: path_ticks(&hops) as f64,
                is_variable: false,
            })
        }
        ActionKind::FarTravel {
            destination,
            scavenge,
        } => {
            let hops = plan_route(state, destination, scavenge)?;
            Ok(CostPreview {
                expected_ticks: path_ticks(&hops) as f64,
                is_variable: false,
            })
        }
    }
}

/// The shared interval/chance/expectation triple — previews and execution
/// read the exact same numbers.
fn discovery_odds(
    state: &ExplorationState,
    skills: &SkillProfile,
    kind: ActionKind,
) -> (f64, f64, f64) {
    let current = state.knowledge.current_area_id;
    let target_distance = match kind {
        ActionKind::Survey => current.distance + 1,
        _ => current.distance,
    };
    let level = skills.exploration_level();
    let (connected_known, non_connected_known) =
        band_knowledge_inputs(&state.world, &state.knowledge, current, target_distance);

    let interval = roll_interval(level);
    let chance = success_chance(
        level,
        target_distance,
        connected_known,
        non_connected_known,
        area_count(target_distance),
    );
    (interval, chance, expected_ticks(chance, interval))
}

fn resolve_discovery(
    kind: ActionKind,
    state: &mut ExplorationState,
    skills: &SkillProfile,
) -> Discovery {
    let current = state.knowledge.current_area_id;
    let candidates: Vec<Discoverable> = match kind {
        ActionKind::Survey => survey_candidates(&state.world, &state.knowledge, current),
        _ => explore_candidates(&state.world, &state.knowledge, skills, current),
    };

    let pick_label = match kind {
        ActionKind::Survey => "survey-pick",
        _ => "explore-pick",
    };
    let unit = state.rolls.draw_unit(pick_label);
    let picked = *pick_weighted(&candidates, unit);

    match picked.kind {
        DiscoverableKind::Location(id) => {
            state.knowledge.mark_location_known(id);
            Discovery::Location(id)
        }
        DiscoverableKind::Connection(id) => {
            state.knowledge.mark_connection_known(id);
            Discovery::Connection(id)
        }
        DiscoverableKind::Area { area, via } => {
            state.knowledge.mark_connection_known(via);
            state.knowledge.mark_area_known(area);
            Discovery::Area { area, via }
        }
    }
}

fn plan_single_hop(
    state: &ExplorationState,
    destination: AreaId,
    scavenge: bool,
) -> Result<Vec<Hop>, ActionFailure> {
    let current = state.knowledge.current_area_id;
    if destination == current {
        return Err(ActionFailure::AlreadyInArea);
    }
    if !state.knowledge.is_area_known(destination) {
        return Err(ActionFailure::AreaNotKnown);
    }
    let conn = direct_connection(&state.world, &state.knowledge, current, destination)
        .ok_or(ActionFailure::NoPathToDestination)?;
    Ok(vec![Hop {
        to: destination,
        ticks: scavenge_adjusted(hop_ticks(conn), scavenge),
    }])
}

fn plan_route(
    state: &ExplorationState,
    destination: AreaId,
    scavenge: bool,
) -> Result<Vec<Hop>, ActionFailure> {
    let current = state.knowledge.current_area_id;
    if destination == current {
        return Err(ActionFailure::AlreadyInArea);
    }
    if !state.knowledge.is_area_known(destination) {
        return Err(ActionFailure::AreaNotKnown);
    }
    let hops = find_path(&state.world, &state.knowledge, current, destination)
        .ok_or(ActionFailure::NoPathToDestination)?;
    Ok(hops
        .into_iter()
        .map(|hop| Hop {
            to: hop.to,
            ticks: scavenge_adjusted(hop.ticks, scavenge),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BASE_TRAVEL_TIME, EXPLORATION_SKILL};

    fn ready_state(seed: &str) -> (ExplorationState, SkillProfile) {
        let state = ExplorationState::new(seed);
        let skills = SkillProfile::new().with_skill(EXPLORATION_SKILL, 5);
        (state, skills)
    }

    #[test]
    fn test_unenrolled_player_is_not_qualified() {
        let (mut state, _) = ready_state("action-seed");
        let skills = SkillProfile::new();
        let result = run_action(ActionKind::Survey, &mut state, &skills, 1000);
        assert!(!result.success);
        assert_eq!(result.failure, Some(ActionFailure::NotQualified));
        assert_eq!(result.ticks_consumed, 0);
        assert_eq!(state.rolls.counter(), 0);
    }

    #[test]
    fn test_survey_discovers_an_area_and_its_edge() {
        let (mut state, skills) = ready_state("action-seed");
        let result = run_action(ActionKind::Survey, &mut state, &skills, 100_000);
        assert!(result.success, "survey failed: {:?}", result.failure);

        let area = result.discovered_area_id().unwrap();
        let via = result.discovered_connection_id().unwrap();
        assert_eq!(area.distance, 1);
        assert!(state.knowledge.is_area_known(area));
        assert!(state.knowledge.is_connection_id_known(via));
        assert!(result.luck.is_some());
    }

    #[test]
    fn test_exactly_one_discovery_per_invocation() {
        let (mut state, skills) = ready_state("action-seed");
        let before = state.knowledge.known_area_count();
        let result = run_action(ActionKind::Survey, &mut state, &skills, 100_000);
        assert!(result.success);
        assert_eq!(state.knowledge.known_area_count(), before + 1);
    }

    #[test]
    fn test_survey_exhausts_the_first_band_frontier() {
        let (mut state, skills) = ready_state("action-seed");
        for _ in 0..5 {
            let result = run_action(ActionKind::Survey, &mut state, &skills, 1_000_000);
            assert!(result.success);
        }
        // All five hub neighbors known; the frontier from the hub is gone.
        let result = run_action(ActionKind::Survey, &mut state, &skills, 1_000_000);
        assert_eq!(result.failure, Some(ActionFailure::NoUndiscoveredAreas));
    }

    #[test]
    fn test_empty_explore_fails_without_draws_or_mutation() {
        let (mut state, skills) = ready_state("action-seed");

        // Learn everything the hub offers.
        let locations: Vec<_> = state
            .world
            .expect_area(AreaId::HUB)
            .locations
            .iter()
            .map(|l| l.id)
            .collect();
        for id in locations {
            state.knowledge.mark_location_known(id);
        }
        let connections: Vec<_> = state
            .world
            .connections_from(AreaId::HUB)
            .iter()
            .map(|c| c.id)
            .collect();
        for id in connections {
            state.knowledge.mark_connection_known(id);
        }

        let counter_before = state.rolls.counter();
        let known_before = state.knowledge.known_locations().count();

        let result = run_action(ActionKind::Explore, &mut state, &skills, 1000);
        assert_eq!(result.failure, Some(ActionFailure::AreaFullyExplored));
        assert_eq!(result.ticks_consumed, 0);
        assert_eq!(state.rolls.counter(), counter_before);
        assert_eq!(state.knowledge.known_locations().count(), known_before);
    }

    #[test]
    fn test_session_exhaustion_keeps_ticks_spent() {
        let (mut state, skills) = ready_state("exhaust-seed");
        let result = run_action(ActionKind::Explore, &mut state, &skills, 3);
        if !result.success {
            assert_eq!(result.failure, Some(ActionFailure::SessionEnded));
            assert_eq!(result.ticks_consumed, 3);
        }
    }

    #[test]
    fn test_cancellation_leaves_no_discovery_but_advances_the_counter() {
        let (mut state, skills) = ready_state("cancel-seed");
        let known_before = state.knowledge.known_area_count();

        let mut run =
            ActionRun::begin(ActionKind::Survey, &mut state, &skills, 100_000).unwrap();
        // Drive a few ticks, then drop the run: cooperative cancellation.
        let mut draws = 0;
        for _ in 0..5 {
            let feedback = run.tick(&mut state, &skills);
            draws = feedback.rolls_made;
            if feedback.outcome.is_some() {
                return; // unlucky seed: success before the 5th tick, nothing to assert
            }
        }
        drop(run);

        assert_eq!(state.rolls.counter(), draws as u64);
        assert_eq!(state.knowledge.known_area_count(), known_before);
    }

    #[test]
    fn test_single_hop_travel_cost_and_movement() {
        let (mut state, skills) = ready_state("travel-seed");
        let dest = AreaId::new(1, 0);
        let edge = ConnectionId::new(AreaId::HUB, dest);
        state.knowledge.mark_area_known(dest);
        state.knowledge.mark_connection_known(edge);

        let result = run_action(
            ActionKind::ExplorationTravel {
                destination: dest,
                scavenge: false,
            },
            &mut state,
            &skills,
            1000,
        );
        assert!(result.success);
        // Hub spokes are multiplier 1.
        assert_eq!(result.ticks_consumed, BASE_TRAVEL_TIME);
        assert_eq!(state.knowledge.current_area_id, dest);
    }

    #[test]
    fn test_scavenge_doubles_travel_time() {
        let (mut state, skills) = ready_state("travel-seed");
        let dest = AreaId::new(1, 0);
        state.knowledge.mark_area_known(dest);
        state
            .knowledge
            .mark_connection_known(ConnectionId::new(AreaId::HUB, dest));

        let preview = preview_action(
            ActionKind::ExplorationTravel {
                destination: dest,
                scavenge: true,
            },
            &state,
            &skills,
        )
        .unwrap();
        assert_eq!(preview.expected_ticks, (BASE_TRAVEL_TIME * 2) as f64);
        assert!(!preview.is_variable);
    }

    #[test]
    fn test_travel_failure_taxonomy() {
        let (mut state, skills) = ready_state("travel-seed");
        let known_far = AreaId::new(1, 1);
        state.knowledge.mark_area_known(known_far);

        let already = run_action(
            ActionKind::FarTravel {
                destination: AreaId::HUB,
                scavenge: false,
            },
            &mut state,
            &skills,
            1000,
        );
        assert_eq!(already.failure, Some(ActionFailure::AlreadyInArea));

        let unknown = run_action(
            ActionKind::FarTravel {
                destination: AreaId::new(2, 0),
                scavenge: false,
            },
            &mut state,
            &skills,
            1000,
        );
        assert_eq!(unknown.failure, Some(ActionFailure::AreaNotKnown));

        // Known area, but no known connection chain reaches it.
        let no_path = run_action(
            ActionKind::FarTravel {
                destination: known_far,
                scavenge: false,
            },
            &mut state,
            &skills,
            1000,
        );
        assert_eq!(no_path.failure, Some(ActionFailure::NoPathToDestination));
    }

    #[test]
    fn test_travel_exhaustion_strands_at_last_completed_hop() {
        let (mut state, skills) = ready_state("travel-seed");
        let a = AreaId::new(1, 0);
        let b = AreaId::new(1, 1);
        for far in [a, b] {
            state.knowledge.mark_area_known(far);
            state
                .knowledge
                .mark_connection_known(ConnectionId::new(AreaId::HUB, far));
        }
        state.knowledge.move_to_area(a);

        // a -> hub -> b costs 2 hops; budget covers only the first.
        let result = run_action(
            ActionKind::FarTravel {
                destination: b,
                scavenge: false,
            },
            &mut state,
            &skills,
            BASE_TRAVEL_TIME + 3,
        );
        assert!(!result.success);
        assert_eq!(result.failure, Some(ActionFailure::SessionEnded));
        assert_eq!(state.knowledge.current_area_id, AreaId::HUB);
    }

    #[test]
    fn test_preview_matches_execution_odds() {
        let (mut state, skills) = ready_state("preview-seed");
        let preview = preview_action(ActionKind::Survey, &state, &skills).unwrap();
        assert!(preview.is_variable);

        let (interval, chance, expected) = discovery_odds(&state, &skills, ActionKind::Survey);
        assert_eq!(preview.expected_ticks, expected);
        assert!(chance > 0.0);
        assert!(interval >= 1.0);

        // Executing right after previews does not change the odds used.
        let run = ActionRun::begin(ActionKind::Survey, &mut state, &skills, 1000).unwrap();
        match run.mode {
            RunMode::Rolling {
                interval: i,
                chance: c,
                expected: e,
                ..
            } => {
                assert_eq!(i, interval);
                assert_eq!(c, chance);
                assert_eq!(e, expected);
            }
            _ => panic!("survey run should be rolling"),
        }
    }

    #[test]
    fn test_roll_cadence_follows_interval() {
        // Level 1 exploring at distance 3 clamps the chance to 0, so the
        // run can never succeed and the cadence is fully observable:
        // interval 2 means rolls land on ticks 2, 4, 6, 8, 10.
        let mut state = ExplorationState::new("cadence-seed");
        let skills = SkillProfile::new().with_skill(EXPLORATION_SKILL, 1);
        let far = AreaId::new(3, 0);
        state.world.ensure_area_fully_generated(far);
        state.knowledge.mark_area_known(far);
        state.knowledge.move_to_area(far);

        let mut run = ActionRun::begin(ActionKind::Explore, &mut state, &skills, 100).unwrap();
        let mut rolls_made = 0;
        for _ in 0..10 {
            let feedback = run.tick(&mut state, &skills);
            assert!(feedback.outcome.is_none());
            rolls_made = feedback.rolls_made;
        }
        assert_eq!(rolls_made, 5);
        assert_eq!(state.rolls.counter(), 5);
    }
}
