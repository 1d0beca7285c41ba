//! Core game state, timing and configuration.

pub mod config;
pub mod constants;
pub mod game;
pub mod scheduler;

pub use config::*;
pub use constants::*;
pub use game::*;
pub use scheduler::*;
