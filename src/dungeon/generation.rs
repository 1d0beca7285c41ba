//! Random floor layouts.

use crate::combat::types::spawn_opponents;
use crate::core::config::MovementConfig;
use crate::core::constants::*;
use crate::exploration::types::{InteractiveObject, MapEnemy, ObjectKind, Position};
use crate::items::roll_enemy_loot;
use rand::Rng;

/// Boss yields are this many times a single opponent's.
pub const BOSS_REWARD_MULTIPLIER: u64 = 4;

/// Minimum spacing between anything placed on a floor, in tiles.
const MIN_SPACING_TILES: f64 = 2.0;
const PLACEMENT_ATTEMPTS: usize = 200;

const ENEMY_NAMES: [&str; 5] = ["Goblin", "Skeleton", "Orc", "Wraith", "Troll"];

/// Enemies and objects of one floor.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorLayout {
    pub floor: u32,
    pub start: Position,
    pub enemies: Vec<MapEnemy>,
    pub objects: Vec<InteractiveObject>,
}

pub fn enemy_count(floor: u32) -> u32 {
    3 + floor / 2
}

pub fn max_opponents(floor: u32) -> u32 {
    (1 + floor / 3).min(3)
}

pub fn xp_per_opponent(floor: u32) -> u64 {
    20 + 10 * floor as u64
}

pub fn gold_per_opponent(floor: u32) -> u64 {
    8 + 4 * floor as u64
}

pub fn enemy_name(floor: u32) -> &'static str {
    let index = ((floor.saturating_sub(1)) / 2) as usize;
    ENEMY_NAMES[index.min(ENEMY_NAMES.len() - 1)]
}

pub fn boss_name(floor: u32) -> String {
    if floor >= MAX_FLOORS {
        "Ancient Warlord".to_string()
    } else {
        format!("{} Chieftain", enemy_name(floor))
    }
}

/// Picks a tile-aligned spot at least awareness + one tile away from the
/// start and a couple of tiles from everything already placed.
fn place(
    rng: &mut impl Rng,
    config: &MovementConfig,
    start: Position,
    taken: &[Position],
) -> Position {
    let columns = (config.max_x() / config.tile_size).floor().max(0.0) as u32;
    let rows = (config.max_y() / config.tile_size).floor().max(0.0) as u32;
    let keep_clear = config.awareness_radius + config.tile_size;
    let spacing = MIN_SPACING_TILES * config.tile_size;

    let mut candidate = Position::new(config.max_x(), config.max_y());
    for _ in 0..PLACEMENT_ATTEMPTS {
        candidate = Position::new(
            rng.gen_range(0..=columns) as f64 * config.tile_size,
            rng.gen_range(0..=rows) as f64 * config.tile_size,
        );
        let clear_of_start = candidate.distance_to(start) >= keep_clear;
        let clear_of_others = taken.iter().all(|p| p.distance_to(candidate) >= spacing);
        if clear_of_start && clear_of_others {
            return candidate;
        }
    }
    // Crowded map: accept the last roll rather than loop forever.
    candidate
}

/// Generates floor `floor`. The last enemy is the floor boss.
pub fn generate_floor(floor: u32, rng: &mut impl Rng, config: &MovementConfig) -> FloorLayout {
    let start = Position::new(FLOOR_START_X, FLOOR_START_Y);
    let count = enemy_count(floor);
    let name = enemy_name(floor);
    let mut taken: Vec<Position> = Vec::new();
    let mut enemies = Vec::with_capacity(count as usize);

    for id in 1..=count {
        let position = place(rng, config, start, &taken);
        taken.push(position);

        let is_boss = id == count;
        let enemy = if is_boss {
            MapEnemy {
                id,
                name: boss_name(floor),
                max_health: BOSS_HEALTH,
                position,
                opponent_count: 1,
                xp_yield: xp_per_opponent(floor) * BOSS_REWARD_MULTIPLIER,
                gold_yield: gold_per_opponent(floor) * BOSS_REWARD_MULTIPLIER,
                loot: Some(Vec::new()),
                is_boss: true,
            }
        } else {
            let opponents = rng.gen_range(1..=max_opponents(floor));
            MapEnemy {
                id,
                name: name.to_string(),
                max_health: 0,
                position,
                opponent_count: opponents,
                xp_yield: xp_per_opponent(floor) * opponents as u64,
                gold_yield: gold_per_opponent(floor) * opponents as u64,
                loot: roll_enemy_loot(floor, rng),
                is_boss: false,
            }
        };
        enemies.push(enemy);
    }

    // The displayed pool is what the spawned roster will actually have.
    for enemy in &mut enemies {
        enemy.max_health = spawn_opponents(enemy).iter().map(|o| o.max_health).sum();
    }

    let mut objects = Vec::new();
    let chest_at = place(rng, config, start, &taken);
    taken.push(chest_at);
    objects.push(InteractiveObject::new(1, ObjectKind::Chest, chest_at));
    if floor % 2 == 1 {
        let shrine_at = place(rng, config, start, &taken);
        objects.push(InteractiveObject::new(2, ObjectKind::Shrine, shrine_at));
    }

    tracing::debug!(floor, enemies = enemies.len(), objects = objects.len(), "floor generated");

    FloorLayout {
        floor,
        start,
        enemies,
        objects,
    }
}
