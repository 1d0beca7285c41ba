//! Player classes, stats, progression and stamina.

pub mod class;
pub mod derived_stats;
pub mod player;
pub mod progression;
pub mod stamina;
pub mod stats;

pub use class::*;
pub use derived_stats::*;
pub use player::*;
pub use progression::*;
pub use stats::*;
