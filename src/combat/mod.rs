//! Turn-based battles: resolution, pacing and shared types.

pub mod logic;
pub mod pacing;
pub mod types;

pub use logic::*;
pub use pacing::*;
pub use types::*;
