//! Simulation report generation.

use crate::character::PlayerClass;
use serde::Serialize;

/// Outcome of one simulated character.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub class: PlayerClass,
    pub reached_target: bool,
    pub updates: u64,
    pub victories: u32,
    pub defeats: u32,
    pub level_ups: u32,
    pub final_level: u32,
    pub floors_cleared: u32,
    pub gold: u64,
    pub chest_gold: u64,
    pub upgrades_equipped: u32,
    pub points_allocated: u32,
    pub seconds_played: u64,
    pub seconds_waited: u64,
}

impl RunStats {
    pub fn new(class: PlayerClass) -> Self {
        Self {
            class,
            reached_target: false,
            updates: 0,
            victories: 0,
            defeats: 0,
            level_ups: 0,
            final_level: 1,
            floors_cleared: 0,
            gold: 0,
            chest_gold: 0,
            upgrades_equipped: 0,
            points_allocated: 0,
            seconds_played: 0,
            seconds_waited: 0,
        }
    }
}

/// Averages for one class.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub class: PlayerClass,
    pub runs: u32,
    pub runs_completed: u32,
    pub avg_victories: f64,
    pub avg_defeats: f64,
    pub avg_final_level: f64,
    pub avg_floors_cleared: f64,
    pub avg_gold: f64,
    pub avg_hours_played: f64,
    pub avg_hours_waited: f64,
    /// `floor_distribution[n]` = runs that ended with exactly n floors cleared.
    pub floor_distribution: Vec<u32>,
}

fn mean(runs: &[&RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(|r| f(*r)).sum::<f64>() / runs.len() as f64
}

impl ClassSummary {
    fn from_runs(class: PlayerClass, runs: &[&RunStats], target_floor: u32) -> Self {
        let mut floor_distribution = vec![0; target_floor as usize + 1];
        for run in runs {
            let index = (run.floors_cleared as usize).min(target_floor as usize);
            floor_distribution[index] += 1;
        }

        Self {
            class,
            runs: runs.len() as u32,
            runs_completed: runs.iter().filter(|r| r.reached_target).count() as u32,
            avg_victories: mean(runs, |r| r.victories as f64),
            avg_defeats: mean(runs, |r| r.defeats as f64),
            avg_final_level: mean(runs, |r| r.final_level as f64),
            avg_floors_cleared: mean(runs, |r| r.floors_cleared as f64),
            avg_gold: mean(runs, |r| r.gold as f64),
            avg_hours_played: mean(runs, |r| r.seconds_played as f64 / 3600.0),
            avg_hours_waited: mean(runs, |r| r.seconds_waited as f64 / 3600.0),
            floor_distribution,
        }
    }

    pub fn defeat_rate(&self) -> f64 {
        let fights = self.avg_victories + self.avg_defeats;
        if fights > 0.0 {
            self.avg_defeats / fights
        } else {
            0.0
        }
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub target_floor: u32,
    pub classes: Vec<ClassSummary>,
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, target_floor: u32) -> Self {
        let classes = PlayerClass::all()
            .into_iter()
            .filter_map(|class| {
                let of_class: Vec<&RunStats> = runs.iter().filter(|r| r.class == class).collect();
                (!of_class.is_empty())
                    .then(|| ClassSummary::from_runs(class, &of_class, target_floor))
            })
            .collect();

        Self {
            num_runs: runs.len() as u32,
            target_floor,
            classes,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, target floor {}\n\n",
            self.num_runs, self.target_floor
        ));

        for summary in &self.classes {
            report.push_str(&format!(
                "── {} ({} runs, {} reached target) ──────────────────────────\n",
                summary.class.name().to_uppercase(),
                summary.runs,
                summary.runs_completed
            ));
            report.push_str(&format!(
                "  Avg Final Level:     {:.1}\n",
                summary.avg_final_level
            ));
            report.push_str(&format!(
                "  Avg Floors Cleared:  {:.1}\n",
                summary.avg_floors_cleared
            ));
            report.push_str(&format!(
                "  Avg Victories:       {:.1}\n",
                summary.avg_victories
            ));
            report.push_str(&format!(
                "  Avg Defeats:         {:.1} ({:.1}% of fights)\n",
                summary.avg_defeats,
                summary.defeat_rate() * 100.0
            ));
            report.push_str(&format!("  Avg Gold:            {:.0}\n", summary.avg_gold));
            report.push_str(&format!(
                "  Avg Hours Played:    {:.1} ({:.1} waiting for stamina)\n",
                summary.avg_hours_played, summary.avg_hours_waited
            ));

            report.push_str("  Floors cleared:\n");
            for (floors, count) in summary.floor_distribution.iter().enumerate() {
                if *count == 0 {
                    continue;
                }
                let pct = *count as f64 / summary.runs.max(1) as f64 * 100.0;
                let bar: String = "█".repeat((pct / 5.0) as usize);
                report.push_str(&format!("    {:2}: {:>5.1}% {}\n", floors, pct, bar));
            }
            report.push('\n');
        }

        report
    }

    /// Serialize the per-class summaries as pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(class: PlayerClass, floors: u32, victories: u32, defeats: u32) -> RunStats {
        RunStats {
            floors_cleared: floors,
            victories,
            defeats,
            reached_target: floors >= 2,
            ..RunStats::new(class)
        }
    }

    #[test]
    fn test_report_groups_by_class() {
        let report = SimReport::from_runs(
            vec![
                run(PlayerClass::Warrior, 2, 10, 0),
                run(PlayerClass::Warrior, 1, 6, 2),
                run(PlayerClass::Mage, 0, 1, 3),
            ],
            2,
        );

        assert_eq!(report.num_runs, 3);
        assert_eq!(report.classes.len(), 2);
        let warrior = &report.classes[0];
        assert_eq!(warrior.class, PlayerClass::Warrior);
        assert_eq!(warrior.runs_completed, 1);
        assert_eq!(warrior.avg_floors_cleared, 1.5);
        assert_eq!(warrior.floor_distribution, vec![0, 1, 1]);
        assert_eq!(warrior.defeat_rate(), 1.0 / 9.0);
    }

    #[test]
    fn test_text_and_json_output() {
        let report = SimReport::from_runs(vec![run(PlayerClass::Ranger, 1, 3, 1)], 3);
        let text = report.to_text();
        assert!(text.contains("RANGER"));
        assert!(text.contains("Avg Floors Cleared:  1.0"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["target_floor"], 3);
        assert_eq!(json["classes"][0]["class"], "Ranger");
        assert!(json.get("run_stats").is_none());
    }
}
