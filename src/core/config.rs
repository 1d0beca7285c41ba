//! Tunable game settings.
//!
//! Every field defaults to the matching value in [`crate::core::constants`],
//! so a JSON file only needs to name the settings it overrides.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Exploration geometry and speeds. Speeds are in map units per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub tick_hz: u32,
    pub map_width: f64,
    pub map_height: f64,
    pub tile_size: f64,
    pub player_speed: f64,
    pub enemy_speed: f64,
    pub awareness_radius: f64,
    pub collision_radius: f64,
    pub engage_radius: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            tick_hz: EXPLORATION_TICK_HZ,
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            tile_size: TILE_SIZE,
            player_speed: PLAYER_SPEED,
            enemy_speed: ENEMY_SPEED,
            awareness_radius: TILE_SIZE * AWARENESS_RADIUS_TILES,
            collision_radius: TILE_SIZE * COLLISION_RADIUS_TILES,
            engage_radius: TILE_SIZE * ENGAGE_RADIUS_TILES,
        }
    }
}

impl MovementConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz.max(1) as f64)
    }

    /// Largest x/y the player's tile may occupy.
    pub fn max_x(&self) -> f64 {
        (self.map_width - self.tile_size).max(0.0)
    }

    pub fn max_y(&self) -> f64 {
        (self.map_height - self.tile_size).max(0.0)
    }
}

/// Presentation delays between battle steps, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleTiming {
    pub player_windup_ms: u64,
    pub opponent_turn_delay_ms: u64,
    pub opponent_windup_ms: u64,
    pub player_hit_recovery_ms: u64,
    pub opponent_gap_ms: u64,
    pub effect_duration_ms: u64,
    pub settle_ms: u64,
}

impl Default for BattleTiming {
    fn default() -> Self {
        Self {
            player_windup_ms: PLAYER_WINDUP_MS,
            opponent_turn_delay_ms: OPPONENT_TURN_DELAY_MS,
            opponent_windup_ms: OPPONENT_WINDUP_MS,
            player_hit_recovery_ms: PLAYER_HIT_RECOVERY_MS,
            opponent_gap_ms: OPPONENT_GAP_MS,
            effect_duration_ms: EFFECT_DURATION_MS,
            settle_ms: BATTLE_SETTLE_MS,
        }
    }
}

impl BattleTiming {
    /// Every step resolves on the next update. Used by tests and the simulator.
    pub fn instant() -> Self {
        Self {
            player_windup_ms: 0,
            opponent_turn_delay_ms: 0,
            opponent_windup_ms: 0,
            player_hit_recovery_ms: 0,
            opponent_gap_ms: 0,
            effect_duration_ms: 0,
            settle_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    pub max_stamina: u32,
    pub regen_interval_secs: u64,
    pub poll_interval_secs: u64,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            max_stamina: MAX_STAMINA,
            regen_interval_secs: STAMINA_REGEN_INTERVAL_SECS,
            poll_interval_secs: STAMINA_POLL_INTERVAL_SECS,
        }
    }
}

impl StaminaConfig {
    pub fn regen_interval_ms(&self) -> i64 {
        (self.regen_interval_secs * 1000) as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub chest_gold_min: u64,
    pub chest_gold_max: u64,
    pub shrine_damage_multiplier: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            chest_gold_min: CHEST_GOLD_MIN,
            chest_gold_max: CHEST_GOLD_MAX,
            shrine_damage_multiplier: SHRINE_DAMAGE_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub movement: MovementConfig,
    pub battle: BattleTiming,
    pub stamina: StaminaConfig,
    pub rewards: RewardConfig,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        if m.tick_hz == 0 {
            return Err(ConfigError::Invalid("movement.tick_hz must be > 0".into()));
        }
        if m.tile_size.is_nan() || m.tile_size <= 0.0 {
            return Err(ConfigError::Invalid("movement.tile_size must be > 0".into()));
        }
        if m.map_width < m.tile_size || m.map_height < m.tile_size {
            return Err(ConfigError::Invalid(
                "movement map must be at least one tile in each direction".into(),
            ));
        }
        if m.player_speed <= 0.0 || m.enemy_speed < 0.0 {
            return Err(ConfigError::Invalid("movement speeds must be positive".into()));
        }
        if m.collision_radius > m.awareness_radius {
            return Err(ConfigError::Invalid(
                "movement.collision_radius exceeds awareness_radius".into(),
            ));
        }
        if self.stamina.regen_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "stamina.regen_interval_secs must be > 0".into(),
            ));
        }
        if self.rewards.chest_gold_min > self.rewards.chest_gold_max {
            return Err(ConfigError::Invalid(
                "rewards.chest_gold_min exceeds chest_gold_max".into(),
            ));
        }
        Ok(())
    }
}
