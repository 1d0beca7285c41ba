//! Top-down exploration: movement, engagement and the live floor map.

pub mod engagement;
pub mod map;
pub mod movement;
pub mod types;

pub use engagement::*;
pub use map::*;
pub use movement::*;
pub use types::*;
