//! Dungeon floors: unlocks, costs and generation.

pub mod floors;
pub mod generation;

pub use floors::*;
pub use generation::*;
