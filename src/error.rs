use crate::character::ProgressionError;
use crate::combat::BattleError;
use crate::core::game::Scene;
use crate::dungeon::DungeonError;
use crate::exploration::ExplorationError;
use crate::items::EquipmentError;
use thiserror::Error;

/// Every way a [`crate::core::game::Game`] request can be rejected. A
/// rejected request leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("not available in the {0:?} scene")]
    WrongScene(Scene),
    #[error("no character has been created yet")]
    NoCharacter,
    #[error(transparent)]
    Battle(#[from] BattleError),
    #[error(transparent)]
    Progression(#[from] ProgressionError),
    #[error(transparent)]
    Equipment(#[from] EquipmentError),
    #[error(transparent)]
    Dungeon(#[from] DungeonError),
    #[error(transparent)]
    Exploration(#[from] ExplorationError),
}
