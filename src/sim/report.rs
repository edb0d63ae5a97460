//! Simulation report generation.

use serde::Serialize;

use crate::constants::TICKS_PER_SECOND;
use crate::core::luck::LuckRating;

/// Statistics collected from one simulated session.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub seed: String,
    pub areas_discovered: u32,
    pub locations_discovered: u32,
    pub connections_discovered: u32,
    pub deepest_distance: u32,
    pub final_known_areas: u32,
    pub ticks_used: u64,
    /// Counts per luck bucket: very lucky, lucky, average, unlucky, very unlucky.
    pub luck_counts: [u32; 5],
}

impl RunStats {
    pub fn new(seed: String) -> Self {
        Self {
            seed,
            areas_discovered: 0,
            locations_discovered: 0,
            connections_discovered: 0,
            deepest_distance: 0,
            final_known_areas: 0,
            ticks_used: 0,
            luck_counts: [0; 5],
        }
    }

    pub fn record_luck(&mut self, rating: LuckRating) {
        let idx = match rating {
            LuckRating::VeryLucky => 0,
            LuckRating::Lucky => 1,
            LuckRating::Average => 2,
            LuckRating::Unlucky => 3,
            LuckRating::VeryUnlucky => 4,
        };
        self.luck_counts[idx] += 1;
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub total_areas: u32,
    pub total_locations: u32,
    pub total_connections: u32,
    pub avg_areas_discovered: f64,
    pub avg_locations_discovered: f64,
    pub avg_ticks_used: f64,
    pub max_deepest_distance: u32,
    pub luck_distribution: [u32; 5],
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let denom = num_runs.max(1) as f64;

        let total_areas = runs.iter().map(|r| r.areas_discovered).sum();
        let total_locations = runs.iter().map(|r| r.locations_discovered).sum();
        let total_connections = runs.iter().map(|r| r.connections_discovered).sum();
        let mut luck_distribution = [0u32; 5];
        for run in &runs {
            for (bucket, count) in luck_distribution.iter_mut().zip(run.luck_counts) {
                *bucket += count;
            }
        }

        Self {
            num_runs,
            total_areas,
            total_locations,
            total_connections,
            avg_areas_discovered: total_areas as f64 / denom,
            avg_locations_discovered: total_locations as f64 / denom,
            avg_ticks_used: runs.iter().map(|r| r.ticks_used).sum::<u64>() as f64 / denom,
            max_deepest_distance: runs.iter().map(|r| r.deepest_distance).max().unwrap_or(0),
            luck_distribution,
            run_stats: runs,
        }
    }

    /// Human-readable summary for the CLI.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Runs:                {}\n", self.num_runs));
        out.push_str(&format!(
            "Avg areas found:     {:.2}\n",
            self.avg_areas_discovered
        ));
        out.push_str(&format!(
            "Avg locations found: {:.2}\n",
            self.avg_locations_discovered
        ));
        out.push_str(&format!(
            "Avg ticks used:      {:.1} ({:.1}s of play)\n",
            self.avg_ticks_used,
            self.avg_ticks_used / TICKS_PER_SECOND as f64
        ));
        out.push_str(&format!(
            "Deepest distance:    {}\n",
            self.max_deepest_distance
        ));
        out.push_str("Luck spread:         ");
        let labels = ["very lucky", "lucky", "average", "unlucky", "very unlucky"];
        let parts: Vec<String> = labels
            .iter()
            .zip(self.luck_distribution)
            .map(|(label, count)| format!("{label} {count}"))
            .collect();
        out.push_str(&parts.join(", "));
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_aggregates_runs() {
        let mut a = RunStats::new("a".to_string());
        a.areas_discovered = 3;
        a.ticks_used = 100;
        a.record_luck(LuckRating::Lucky);
        let mut b = RunStats::new("b".to_string());
        b.areas_discovered = 1;
        b.ticks_used = 300;
        b.record_luck(LuckRating::Lucky);
        b.record_luck(LuckRating::VeryUnlucky);

        let report = SimReport::from_runs(vec![a, b]);
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.total_areas, 4);
        assert_eq!(report.avg_areas_discovered, 2.0);
        assert_eq!(report.avg_ticks_used, 200.0);
        assert_eq!(report.luck_distribution, [0, 2, 0, 0, 1]);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = SimReport::from_runs(vec![RunStats::new("solo".to_string())]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"num_runs\":1"));
    }
}
