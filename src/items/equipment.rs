use super::types::{EquipmentSlot, Item, StatBonus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipmentError {
    #[error("item {0} is not in the inventory")]
    NotInInventory(u32),
    #[error("nothing equipped in the {} slot", .0.name())]
    SlotEmpty(EquipmentSlot),
}

/// One optional item per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquippedItems {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub helmet: Option<Item>,
}

impl EquippedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Helmet => self.helmet.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Helmet => &mut self.helmet,
        }
    }

    /// Puts `item` into its slot and returns whatever was there before.
    pub fn replace(&mut self, item: Item) -> Option<Item> {
        self.slot_mut(item.slot).replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor, &self.helmet]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    /// Sum of every equipped item's bonuses.
    pub fn total_bonus(&self) -> StatBonus {
        self.iter_equipped()
            .fold(StatBonus::default(), |acc, item| StatBonus {
                str: acc.str + item.stats.str,
                vit: acc.vit + item.stats.vit,
                int: acc.int + item.stats.int,
            })
    }
}

/// Moves an item from the inventory into its slot. A previously equipped
/// item in that slot goes back into the inventory.
pub fn equip_from_inventory(
    inventory: &mut Vec<Item>,
    equipped: &mut EquippedItems,
    item_id: u32,
) -> Result<(), EquipmentError> {
    let index = inventory
        .iter()
        .position(|item| item.id == item_id)
        .ok_or(EquipmentError::NotInInventory(item_id))?;

    let item = inventory.remove(index);
    if let Some(previous) = equipped.replace(item) {
        inventory.push(previous);
    }
    Ok(())
}

/// Moves the item in `slot` back into the inventory.
pub fn unequip_to_inventory(
    inventory: &mut Vec<Item>,
    equipped: &mut EquippedItems,
    slot: EquipmentSlot,
) -> Result<(), EquipmentError> {
    let item = equipped.take(slot).ok_or(EquipmentError::SlotEmpty(slot))?;
    inventory.push(item);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword(id: u32, str: u32) -> Item {
        Item::new(id, "Sword", EquipmentSlot::Weapon, StatBonus::new(str, 0, 0))
    }

    fn helmet(id: u32) -> Item {
        Item::new(id, "Helmet", EquipmentSlot::Helmet, StatBonus::new(0, 1, 0))
    }

    #[test]
    fn test_equipment_starts_empty() {
        let eq = EquippedItems::new();
        assert_eq!(eq.iter_equipped().count(), 0);
        assert_eq!(eq.total_bonus(), StatBonus::default());
    }

    #[test]
    fn test_total_bonus_sums_slots() {
        let mut eq = EquippedItems::new();
        eq.replace(sword(1, 4));
        eq.replace(helmet(2));
        assert_eq!(eq.total_bonus(), StatBonus::new(4, 1, 0));
    }

    #[test]
    fn test_equip_moves_item_out_of_inventory() {
        let mut inventory = vec![sword(1, 2), helmet(2)];
        let mut eq = EquippedItems::new();

        equip_from_inventory(&mut inventory, &mut eq, 1).unwrap();

        assert_eq!(eq.get(EquipmentSlot::Weapon).map(|i| i.id), Some(1));
        assert!(inventory.iter().all(|i| i.id != 1));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_equip_swaps_previous_item_back() {
        let mut inventory = vec![sword(1, 2), sword(2, 4)];
        let mut eq = EquippedItems::new();

        equip_from_inventory(&mut inventory, &mut eq, 1).unwrap();
        equip_from_inventory(&mut inventory, &mut eq, 2).unwrap();

        assert_eq!(eq.get(EquipmentSlot::Weapon).map(|i| i.id), Some(2));
        assert_eq!(inventory.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_equip_only_takes_first_duplicate_id() {
        let mut inventory = vec![sword(5, 1), helmet(5)];
        let mut eq = EquippedItems::new();

        equip_from_inventory(&mut inventory, &mut eq, 5).unwrap();

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].slot, EquipmentSlot::Helmet);
    }

    #[test]
    fn test_equip_unknown_item_is_rejected() {
        let mut inventory = vec![sword(1, 2)];
        let mut eq = EquippedItems::new();

        let result = equip_from_inventory(&mut inventory, &mut eq, 99);

        assert_eq!(result, Err(EquipmentError::NotInInventory(99)));
        assert_eq!(inventory.len(), 1);
        assert!(eq.weapon.is_none());
    }

    #[test]
    fn test_unequip_returns_item() {
        let mut inventory = vec![sword(1, 2)];
        let mut eq = EquippedItems::new();
        equip_from_inventory(&mut inventory, &mut eq, 1).unwrap();

        unequip_to_inventory(&mut inventory, &mut eq, EquipmentSlot::Weapon).unwrap();

        assert!(eq.weapon.is_none());
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_unequip_empty_slot_is_rejected() {
        let mut inventory = Vec::new();
        let mut eq = EquippedItems::new();
        assert_eq!(
            unequip_to_inventory(&mut inventory, &mut eq, EquipmentSlot::Armor),
            Err(EquipmentError::SlotEmpty(EquipmentSlot::Armor))
        );
    }
}
