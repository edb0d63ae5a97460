//! Batch simulation: many isolated engine instances, one report.

pub mod config;
pub mod report;
pub mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
