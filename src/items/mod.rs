//! Item system: types, equipment and loot.

pub mod equipment;
pub mod loot;
pub mod types;

pub use equipment::*;
pub use loot::*;
pub use types::*;
