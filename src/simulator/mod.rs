//! Game balance simulator for Monte Carlo analysis.
//!
//! Auto-plays many seeded characters through the real [`crate::Game`] to
//! analyze:
//! - Floors cleared per class
//! - Victory/defeat ratios
//! - Time spent waiting for stamina

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{ClassSummary, RunStats, SimReport};
pub use runner::{
    apply_upkeep, choose_skill, plan_exploration, plan_upkeep, run_simulation,
    simulate_single_run, ExploreAction,
};
