// Game timing constants
pub const TICK_INTERVAL_MS: u64 = 100;
pub const TICKS_PER_SECOND: u64 = 1000 / TICK_INTERVAL_MS;

// Travel constants
pub const BASE_TRAVEL_TIME: u64 = 10; // ticks per hop before the connection multiplier
pub const SCAVENGE_TIME_FACTOR: u64 = 2;
pub const MIN_TRAVEL_MULTIPLIER: u32 = 1;
pub const MAX_TRAVEL_MULTIPLIER: u32 = 4;

// Skill names (consumed from the skill/guild system by name)
pub const EXPLORATION_SKILL: &str = "Exploration";
pub const GATHERING_SKILLS: [&str; 3] = ["Mining", "Woodcutting", "Herbalism"];

// Discovery weights, relative to the known-connection baseline
pub const WEIGHT_CONNECTION_TO_KNOWN: f64 = 1.0;
pub const WEIGHT_CONNECTION_TO_UNKNOWN: f64 = 0.25;
pub const WEIGHT_GATHERING_SKILL_HELD: f64 = 0.5;
pub const WEIGHT_GATHERING_SKILL_MISSING: f64 = 0.05;
pub const WEIGHT_OTHER_LOCATION: f64 = 0.5;

// Probability model
pub const UNSKILLED_SUCCESS_CHANCE: f64 = 0.01;
pub const BASE_ROLL_INTERVAL: f64 = 2.0;
pub const MIN_ROLL_INTERVAL: f64 = 1.0;

// World shape
pub const HUB_NAME: &str = "Town";
pub const FIRST_BAND_AREA_COUNT: u64 = 5;
pub const SECOND_BAND_AREA_COUNT: u64 = 8;
pub const MIN_LOCATIONS_PER_AREA: u32 = 2;
pub const MAX_LOCATIONS_PER_AREA: u32 = 4;
pub const SIBLING_CONNECTION_CHANCE: f64 = 0.30;

// Luck percentile buckets (normal CDF of the tick z-score)
pub const LUCK_VERY_LUCKY_PERCENTILE: f64 = 5.0;
pub const LUCK_LUCKY_PERCENTILE: f64 = 25.0;
pub const LUCK_AVERAGE_PERCENTILE: f64 = 75.0;
pub const LUCK_UNLUCKY_PERCENTILE: f64 = 95.0;

// Roll stream audit trail
pub const ROLL_HISTORY_CAP: usize = 64;

// Save system constants
pub const SAVE_VERSION_MAGIC: u64 = 0x5741594641524531; // "WAYFARE1"
