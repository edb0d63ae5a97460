//! Wayfarer - discovery and traversal engine for a tick-based exploration game.
//!
//! Procedurally generates an unbounded graph of areas radiating out from a
//! fixed hub, tracks what the player has personally discovered, and resolves
//! Survey/Explore/travel requests as cancellable, tick-granular processes
//! that are bit-for-bit reproducible from a seed and a roll counter.

pub mod constants;
pub mod core;
pub mod exploration;
pub mod knowledge;
pub mod save_manager;
pub mod sim;
pub mod skills;
pub mod travel;
pub mod world;

pub use crate::core::action::{
    preview_action, run_action, ActionFailure, ActionKind, ActionResult, ActionRun, CostPreview,
    Discovery, TickFeedback,
};
pub use crate::core::state::ExplorationState;
pub use knowledge::PlayerKnowledge;
pub use skills::SkillProfile;
pub use world::{AreaId, WorldGraph};
