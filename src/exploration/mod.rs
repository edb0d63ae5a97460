//! Discovery mechanics: the probability model and candidate enumeration.

pub mod candidates;
pub mod chance;

pub use candidates::{
    band_knowledge_inputs, explore_candidates, pick_weighted, survey_candidates, Discoverable,
    DiscoverableKind,
};
pub use chance::{expected_ticks, roll_interval, success_chance};
