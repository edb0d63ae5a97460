//! Player skill levels, fed in by the guild/character system by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::EXPLORATION_SKILL;

/// Skill name → level. A skill absent from the map is one the player has
/// never enrolled in, which is different from holding it at level 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillProfile {
    levels: BTreeMap<String, u32>,
}

impl SkillProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(mut self, name: &str, level: u32) -> Self {
        self.set(name, level);
        self
    }

    pub fn set(&mut self, name: &str, level: u32) {
        self.levels.insert(name.to_string(), level);
    }

    pub fn level(&self, name: &str) -> u32 {
        self.levels.get(name).copied().unwrap_or(0)
    }

    /// Enrolled at all, regardless of level.
    pub fn holds(&self, name: &str) -> bool {
        self.levels.contains_key(name)
    }

    pub fn exploration_level(&self) -> u32 {
        self.level(EXPLORATION_SKILL)
    }

    pub fn holds_exploration(&self) -> bool {
        self.holds(EXPLORATION_SKILL)
    }
}
