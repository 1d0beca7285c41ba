//! Distance checks that turn exploration into combat or interaction.

use super::types::{InteractiveObject, MapEnemy, Position};
use crate::core::config::MovementConfig;

/// What a click on an enemy or object should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickResponse {
    /// Close enough: engage or interact now.
    Act,
    /// Too far: walk toward this point.
    WalkTo(Position),
    Ignore,
}

/// Index of the first enemy (in list order) within collision range.
///
/// The range is inclusive so an enemy standing exactly on the collision
/// radius, where it also stops chasing, still engages.
pub fn find_collision(
    player: Position,
    enemies: &[MapEnemy],
    config: &MovementConfig,
) -> Option<usize> {
    enemies.iter().position(|enemy| {
        let distance = player.distance_to(enemy.position);
        tracing::trace!(enemy = enemy.id, distance, "collision check");
        distance <= config.collision_radius
    })
}

pub fn is_adjacent(player: Position, target: Position, config: &MovementConfig) -> bool {
    player.distance_to(target) < config.engage_radius
}

pub fn respond_to_enemy_click(
    player: Position,
    enemy: &MapEnemy,
    config: &MovementConfig,
) -> ClickResponse {
    if is_adjacent(player, enemy.position, config) {
        ClickResponse::Act
    } else {
        ClickResponse::WalkTo(enemy.position)
    }
}

/// Opened objects ignore clicks.
pub fn respond_to_object_click(
    player: Position,
    object: &InteractiveObject,
    config: &MovementConfig,
) -> ClickResponse {
    if object.opened {
        ClickResponse::Ignore
    } else if is_adjacent(player, object.position, config) {
        ClickResponse::Act
    } else {
        ClickResponse::WalkTo(object.position)
    }
}
