//! Castlecrawl - headless turn-based RPG engine.
//!
//! Exposes the game model for front ends, the balance simulator and tests.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod error;
pub mod exploration;
pub mod items;
pub mod simulator;

pub use crate::core::game::{Game, GameEvent, Scene};
pub use error::GameError;
