use super::class::PlayerClass;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Temporary combat bonus picked up in the dungeon. Consumed by the next battle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub damage_multiplier: f64,
}

/// The persistent half of the player: everything that is not derived from
/// equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub class: PlayerClass,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next_level: u64,
    pub current_health: u32,
    pub str: u32,
    pub vit: u32,
    pub int: u32,
    pub unallocated_points: u32,
    pub skill_points: u32,
    pub stamina: u32,
    pub max_stamina: u32,
    /// Unix milliseconds of the last stamina regeneration step.
    pub last_regen_ms: i64,
    pub cleared_floors: u32,
    #[serde(default)]
    pub buff: Option<Buff>,
}

impl PlayerStats {
    /// A fresh level 1 character with full health and stamina.
    pub fn new(class: PlayerClass, now_ms: i64, max_stamina: u32) -> Self {
        let base = class.base_stats();
        Self {
            class,
            level: 1,
            xp: 0,
            xp_to_next_level: STARTING_XP_TO_NEXT_LEVEL,
            current_health: base.vit * HEALTH_PER_VITALITY,
            str: base.str,
            vit: base.vit,
            int: base.int,
            unallocated_points: 0,
            skill_points: 0,
            stamina: max_stamina,
            max_stamina,
            last_regen_ms: now_ms,
            cleared_floors: 0,
            buff: None,
        }
    }

    /// Damage multiplier of the active buff, 1.0 without one.
    pub fn damage_multiplier(&self) -> f64 {
        self.buff.map_or(1.0, |b| b.damage_multiplier)
    }

    /// Removes the buff and returns its multiplier.
    pub fn consume_buff(&mut self) -> f64 {
        self.buff.take().map_or(1.0, |b| b.damage_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mage() {
        let stats = PlayerStats::new(PlayerClass::Mage, 1_000, MAX_STAMINA);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.xp, 0);
        assert_eq!(stats.xp_to_next_level, 100);
        assert_eq!((stats.str, stats.vit, stats.int), (3, 5, 10));
        assert_eq!(stats.current_health, 50);
        assert_eq!(stats.stamina, 50);
        assert_eq!(stats.last_regen_ms, 1_000);
        assert!(stats.buff.is_none());
    }

    #[test]
    fn test_buff_consumed_once() {
        let mut stats = PlayerStats::new(PlayerClass::Ranger, 0, MAX_STAMINA);
        stats.buff = Some(Buff {
            damage_multiplier: 1.5,
        });
        assert_eq!(stats.damage_multiplier(), 1.5);
        assert_eq!(stats.consume_buff(), 1.5);
        assert_eq!(stats.consume_buff(), 1.0);
        assert_eq!(stats.damage_multiplier(), 1.0);
    }
}
