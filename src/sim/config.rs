//! Simulation configuration.

/// Configuration for a batch exploration simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent runs (each gets its own seed and state)
    pub num_runs: u32,

    /// Base seed for reproducibility (run i uses "{seed}-{i}")
    pub seed: String,

    /// Session tick budget per run
    pub ticks_per_run: u64,

    /// Exploration skill level to simulate at
    pub skill_level: u32,

    /// Gathering skills the simulated player holds
    pub gathering_skills: Vec<String>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-run detail)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: "wayfarer-sim".to_string(),
            ticks_per_run: 10_000,
            skill_level: 5,
            gathering_skills: vec!["Mining".to_string()],
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for pacing checks at a given skill level.
    pub fn pacing_test(skill_level: u32) -> Self {
        Self {
            num_runs: 50,
            skill_level,
            ..Default::default()
        }
    }
}
