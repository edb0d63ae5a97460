//! Post-hoc luck scoring: how did the realized wait compare to the odds?
//!
//! The discovery wait is a discrete geometric process; we score the actual
//! tick count as a z-score against its expectation and convert that to a
//! percentile. Purely informational — nothing here feeds back into rolls.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    LUCK_AVERAGE_PERCENTILE, LUCK_LUCKY_PERCENTILE, LUCK_UNLUCKY_PERCENTILE,
    LUCK_VERY_LUCKY_PERCENTILE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LuckRating {
    VeryLucky,
    Lucky,
    Average,
    Unlucky,
    VeryUnlucky,
}

impl fmt::Display for LuckRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LuckRating::VeryLucky => "very lucky",
            LuckRating::Lucky => "lucky",
            LuckRating::Average => "average",
            LuckRating::Unlucky => "unlucky",
            LuckRating::VeryUnlucky => "very unlucky",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LuckSummary {
    pub actual_ticks: u64,
    pub expected_ticks: f64,
    pub z_score: f64,
    /// Percentile of the outcome, 0–100; low means the discovery came
    /// faster than the odds predicted.
    pub percentile: f64,
    pub rating: LuckRating,
}

/// Scores one finished discovery run.
pub fn luck_summary(actual_ticks: u64, expected_ticks: f64, roll_interval: f64) -> LuckSummary {
    let p = (roll_interval / expected_ticks).clamp(0.0, 1.0);
    let std_dev = expected_ticks * (1.0 - p).sqrt();

    let z_score = if std_dev > 0.0 {
        (actual_ticks as f64 - expected_ticks) / std_dev
    } else {
        0.0
    };
    let percentile = normal_cdf(z_score) * 100.0;

    LuckSummary {
        actual_ticks,
        expected_ticks,
        z_score,
        percentile,
        rating: rating_for_percentile(percentile),
    }
}

fn rating_for_percentile(percentile: f64) -> LuckRating {
    if percentile < LUCK_VERY_LUCKY_PERCENTILE {
        LuckRating::VeryLucky
    } else if percentile < LUCK_LUCKY_PERCENTILE {
        LuckRating::Lucky
    } else if percentile < LUCK_AVERAGE_PERCENTILE {
        LuckRating::Average
    } else if percentile < LUCK_UNLUCKY_PERCENTILE {
        LuckRating::Unlucky
    } else {
        LuckRating::VeryUnlucky
    }
}

/// Standard normal CDF via the Abramowitz & Stegun erf approximation
/// (7.1.26), accurate to ~1.5e-7 — plenty for bucketing luck.
fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    sign * (1.0 - poly * (-x * x).exp())
}
