//! Engine core: roll stream, aggregate state, action execution, luck.

pub mod action;
pub mod luck;
pub mod rolls;
pub mod state;

pub use action::{
    preview_action, run_action, ActionFailure, ActionKind, ActionResult, ActionRun, CostPreview,
    Discovery, TickFeedback,
};
pub use luck::{luck_summary, LuckRating, LuckSummary};
pub use rolls::RollStream;
pub use state::ExplorationState;
