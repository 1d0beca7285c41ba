//! Per-tick movement integration.
//!
//! Straight-line motion only: no pathfinding and no obstacle avoidance.

use super::types::Position;
use crate::core::config::MovementConfig;

/// Advances the player one tick toward `target`.
///
/// Within one step of the target the player lands exactly on it; otherwise
/// it moves `player_speed` units and is clamped to the map.
pub fn step_player(position: Position, target: Position, config: &MovementConfig) -> Position {
    let dx = target.x - position.x;
    let dy = target.y - position.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance < config.player_speed {
        return target;
    }

    let x = position.x + dx / distance * config.player_speed;
    let y = position.y + dy / distance * config.player_speed;
    Position::new(x.clamp(0.0, config.max_x()), y.clamp(0.0, config.max_y()))
}

/// Advances an enemy one tick toward the player.
///
/// Enemies only chase inside the awareness radius and stop once they are
/// within the collision radius.
pub fn step_enemy(position: Position, player: Position, config: &MovementConfig) -> Position {
    let dx = player.x - position.x;
    let dy = player.y - position.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance < config.awareness_radius && distance > config.collision_radius {
        Position::new(
            position.x + dx / distance * config.enemy_speed,
            position.y + dy / distance * config.enemy_speed,
        )
    } else {
        position
    }
}
