use super::class::PlayerClass;
use super::stats::PlayerStats;
use crate::core::constants::*;
use crate::items::EquippedItems;
use serde::{Deserialize, Serialize};

/// Stats after equipment bonuses. Recomputed whenever they are needed and
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub class: PlayerClass,
    pub level: u32,
    pub str: u32,
    pub vit: u32,
    pub int: u32,
    pub max_health: u32,
    pub current_health: u32,
}

pub fn max_health_for(vit: u32) -> u32 {
    vit.saturating_mul(HEALTH_PER_VITALITY)
}

impl EffectiveStats {
    /// Adds equipment bonuses to the base stats. Current health is clamped so
    /// it never exceeds the derived max.
    pub fn calculate(stats: &PlayerStats, equipment: &EquippedItems) -> Self {
        let bonus = equipment.total_bonus();
        let vit = stats.vit.saturating_add(bonus.vit);
        let max_health = max_health_for(vit);

        Self {
            class: stats.class,
            level: stats.level,
            str: stats.str.saturating_add(bonus.str),
            vit,
            int: stats.int.saturating_add(bonus.int),
            max_health,
            current_health: stats.current_health.min(max_health),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{EquipmentSlot, Item, StatBonus};

    #[test]
    fn test_no_equipment() {
        let stats = PlayerStats::new(PlayerClass::Warrior, 0, MAX_STAMINA);
        let effective = EffectiveStats::calculate(&stats, &EquippedItems::new());
        assert_eq!((effective.str, effective.vit, effective.int), (8, 7, 3));
        assert_eq!(effective.max_health, 70);
        assert_eq!(effective.current_health, 70);
    }

    #[test]
    fn test_equipment_adds_to_stats_and_max_health() {
        let stats = PlayerStats::new(PlayerClass::Warrior, 0, MAX_STAMINA);
        let mut equipment = EquippedItems::new();
        equipment.replace(Item::new(
            201,
            "Leather Armor",
            EquipmentSlot::Armor,
            StatBonus::new(0, 3, 0),
        ));
        equipment.replace(Item::new(
            101,
            "Rusty Sword",
            EquipmentSlot::Weapon,
            StatBonus::new(2, 0, 0),
        ));

        let effective = EffectiveStats::calculate(&stats, &equipment);
        assert_eq!(effective.str, 10);
        assert_eq!(effective.vit, 10);
        assert_eq!(effective.max_health, 100);
        // base health is not raised by equipping
        assert_eq!(effective.current_health, 70);
    }

    #[test]
    fn test_health_clamped_to_max() {
        let mut stats = PlayerStats::new(PlayerClass::Mage, 0, MAX_STAMINA);
        stats.current_health = 500;
        let effective = EffectiveStats::calculate(&stats, &EquippedItems::new());
        assert_eq!(effective.current_health, effective.max_health);
    }
}
