//! Simulation configuration.

use crate::character::PlayerClass;
use crate::core::config::{BattleTiming, GameConfig};
use crate::core::constants::MAX_FLOORS;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Runs per class
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Classes to simulate (empty = all)
    pub classes: Vec<PlayerClass>,

    /// Stop a run once this floor is cleared
    pub target_floor: u32,

    /// Maximum game updates per run before timeout
    pub max_updates_per_run: u64,

    /// Game rules. Battle pacing is usually instant so runs stay fast.
    pub game: GameConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            classes: Vec::new(),
            target_floor: MAX_FLOORS,
            max_updates_per_run: 2_000_000,
            game: GameConfig {
                battle: BattleTiming::instant(),
                ..GameConfig::default()
            },
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking the first few floors
    pub fn quick(target_floor: u32) -> Self {
        Self {
            num_runs: 20,
            target_floor,
            max_updates_per_run: 500_000,
            ..Default::default()
        }
    }

    pub fn classes_to_run(&self) -> Vec<PlayerClass> {
        if self.classes.is_empty() {
            PlayerClass::all().to_vec()
        } else {
            self.classes.clone()
        }
    }
}
