use super::class::PlayerClass;
use super::derived_stats::EffectiveStats;
use super::progression::{allocate_stats, apply_xp, ProgressionError, StatAllocation, XpGain};
use super::stats::PlayerStats;
use crate::items::{
    equip_from_inventory, starting_inventory, unequip_to_inventory, EquipmentError,
    EquipmentSlot, EquippedItems, Item,
};
use serde::{Deserialize, Serialize};

/// Everything the player owns: stats, bag, worn gear and gold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub stats: PlayerStats,
    pub inventory: Vec<Item>,
    pub equipment: EquippedItems,
    pub gold: u64,
}

impl Character {
    pub fn new(class: PlayerClass, now_ms: i64, max_stamina: u32) -> Self {
        Self {
            stats: PlayerStats::new(class, now_ms, max_stamina),
            inventory: starting_inventory(),
            equipment: EquippedItems::new(),
            gold: 0,
        }
    }

    pub fn class(&self) -> PlayerClass {
        self.stats.class
    }

    pub fn effective_stats(&self) -> EffectiveStats {
        EffectiveStats::calculate(&self.stats, &self.equipment)
    }

    fn clamp_health(&mut self) {
        let max = self.effective_stats().max_health;
        self.stats.current_health = self.stats.current_health.min(max);
    }

    pub fn equip(&mut self, item_id: u32) -> Result<(), EquipmentError> {
        equip_from_inventory(&mut self.inventory, &mut self.equipment, item_id)?;
        self.clamp_health();
        Ok(())
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<(), EquipmentError> {
        unequip_to_inventory(&mut self.inventory, &mut self.equipment, slot)?;
        self.clamp_health();
        Ok(())
    }

    pub fn allocate(&mut self, allocation: StatAllocation) -> Result<(), ProgressionError> {
        allocate_stats(&mut self.stats, &self.equipment, allocation)
    }

    pub fn gain_xp(&mut self, amount: u64) -> XpGain {
        apply_xp(&mut self.stats, &self.equipment, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::MAX_STAMINA;

    #[test]
    fn test_new_character_carries_starter_gear() {
        let character = Character::new(PlayerClass::Warrior, 0, MAX_STAMINA);
        assert_eq!(character.inventory.len(), 2);
        assert!(character.equipment.iter_equipped().next().is_none());
        assert_eq!(character.gold, 0);
    }

    #[test]
    fn test_equip_then_unequip_armor_clamps_health() {
        let mut character = Character::new(PlayerClass::Warrior, 0, MAX_STAMINA);
        character.equip(201).unwrap();
        assert_eq!(character.effective_stats().max_health, 100);
        character.stats.current_health = 100;

        character.unequip(EquipmentSlot::Armor).unwrap();
        assert_eq!(character.effective_stats().max_health, 70);
        assert_eq!(character.stats.current_health, 70);
        assert_eq!(character.inventory.len(), 2);
    }

    #[test]
    fn test_equip_swaps_previous_item_back() {
        let mut character = Character::new(PlayerClass::Ranger, 0, MAX_STAMINA);
        character.inventory.push(Item::new(
            102,
            "Sharp Dagger",
            EquipmentSlot::Weapon,
            crate::items::StatBonus::new(4, 0, 0),
        ));

        character.equip(101).unwrap();
        character.equip(102).unwrap();
        assert_eq!(character.equipment.weapon.as_ref().map(|i| i.id), Some(102));
        assert!(character.inventory.iter().any(|i| i.id == 101));
        assert!(!character.inventory.iter().any(|i| i.id == 102));
    }

    #[test]
    fn test_rejected_equip_changes_nothing() {
        let mut character = Character::new(PlayerClass::Mage, 0, MAX_STAMINA);
        let before = character.clone();
        assert_eq!(character.equip(999), Err(EquipmentError::NotInInventory(999)));
        assert_eq!(
            character.unequip(EquipmentSlot::Helmet),
            Err(EquipmentError::SlotEmpty(EquipmentSlot::Helmet))
        );
        assert_eq!(character, before);
    }

    #[test]
    fn test_level_up_heals_to_effective_max() {
        let mut character = Character::new(PlayerClass::Warrior, 0, MAX_STAMINA);
        character.equip(201).unwrap();
        character.stats.current_health = 5;
        character.gain_xp(100);
        assert_eq!(character.stats.current_health, 100);
    }
}
