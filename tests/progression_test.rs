//! Integration test: character growth
//!
//! XP and level-ups, stat allocation, equipment swaps and stamina refill
//! through the Character API.

use castlecrawl::character::stamina::{ms_until_next_point, regenerate};
use castlecrawl::character::{Character, PlayerClass, ProgressionError, StatAllocation};
use castlecrawl::core::config::StaminaConfig;
use castlecrawl::core::constants::MAX_STAMINA;
use castlecrawl::items::{loot_pool, EquipmentError, EquipmentSlot};

const MINUTE: i64 = 60_000;

#[test]
fn test_level_up_restores_health_with_gear() {
    let mut warrior = Character::new(PlayerClass::Warrior, 0, MAX_STAMINA);
    assert_eq!(warrior.stats.current_health, 70);
    assert!(warrior.equipment.weapon.is_none());
    assert_eq!(warrior.inventory.len(), 2);

    warrior.equip(201).unwrap();
    let stats = warrior.effective_stats();
    assert_eq!(stats.vit, 10);
    assert_eq!(stats.max_health, 100);
    // Equipping never heals.
    assert_eq!(stats.current_health, 70);

    warrior.stats.current_health = 12;
    let gain = warrior.gain_xp(100);
    assert_eq!(gain.levels_gained, 1);
    assert_eq!(gain.new_level, 2);
    assert_eq!(warrior.stats.xp, 0);
    assert_eq!(warrior.stats.xp_to_next_level, 150);
    assert_eq!(warrior.stats.current_health, 100);
    assert_eq!(warrior.stats.unallocated_points, 3);
    assert_eq!(warrior.stats.skill_points, 1);
}

#[test]
fn test_allocation_then_unequip_clamps_health() {
    let mut warrior = Character::new(PlayerClass::Warrior, 0, MAX_STAMINA);
    warrior.equip(201).unwrap();
    warrior.gain_xp(100);

    warrior.allocate(StatAllocation::new(0, 3, 0)).unwrap();
    assert_eq!(warrior.stats.vit, 10);
    assert_eq!(warrior.effective_stats().max_health, 130);
    assert_eq!(warrior.stats.current_health, 130);
    assert_eq!(
        warrior.allocate(StatAllocation::new(1, 0, 0)),
        Err(ProgressionError::InsufficientPoints {
            requested: 1,
            available: 0
        })
    );

    warrior.unequip(EquipmentSlot::Armor).unwrap();
    assert_eq!(warrior.effective_stats().max_health, 100);
    assert_eq!(warrior.stats.current_health, 100);
    assert_eq!(
        warrior.unequip(EquipmentSlot::Armor),
        Err(EquipmentError::SlotEmpty(EquipmentSlot::Armor))
    );
    assert!(warrior.inventory.iter().any(|item| item.id == 201));
}

#[test]
fn test_equip_swaps_previous_item_back() {
    let mut ranger = Character::new(PlayerClass::Ranger, 0, MAX_STAMINA);
    ranger.equip(101).unwrap();
    assert_eq!(ranger.effective_stats().str, 8);

    ranger.inventory.extend(loot_pool(1).into_iter().filter(|i| i.id == 102));
    ranger.equip(102).unwrap();
    assert_eq!(ranger.effective_stats().str, 10);
    assert_eq!(ranger.equipment.weapon.as_ref().map(|i| i.id), Some(102));
    assert!(ranger.inventory.iter().any(|i| i.id == 101));
    assert_eq!(ranger.equip(999), Err(EquipmentError::NotInInventory(999)));
}

#[test]
fn test_big_xp_gain_levels_repeatedly() {
    let mut mage = Character::new(PlayerClass::Mage, 0, MAX_STAMINA);
    mage.stats.xp = 90;
    mage.gain_xp(30);
    assert_eq!((mage.stats.level, mage.stats.xp), (2, 20));

    // 380 covers 150 + 225, leaving 5 toward the next 337.
    let gain = mage.gain_xp(360);
    assert_eq!(gain.levels_gained, 2);
    assert_eq!(mage.stats.level, 4);
    assert_eq!(mage.stats.xp, 5);
    assert_eq!(mage.stats.xp_to_next_level, 337);
    assert_eq!(mage.stats.unallocated_points, 9);
}

#[test]
fn test_stamina_refills_over_real_time() {
    let config = StaminaConfig::default();
    let mut character = Character::new(PlayerClass::Ranger, 0, MAX_STAMINA);
    character.stats.stamina = 10;

    assert_eq!(regenerate(&mut character.stats, 4 * MINUTE, &config), 0);
    assert_eq!(regenerate(&mut character.stats, 12 * MINUTE, &config), 2);
    assert_eq!(character.stats.stamina, 12);
    assert_eq!(character.stats.last_regen_ms, 10 * MINUTE);
    assert_eq!(
        ms_until_next_point(&character.stats, 12 * MINUTE, &config),
        Some(3 * MINUTE)
    );

    // A long absence fills the bar and no more.
    assert_eq!(regenerate(&mut character.stats, 1_000 * MINUTE, &config), 38);
    assert_eq!(character.stats.stamina, MAX_STAMINA);
    assert_eq!(character.stats.last_regen_ms, 1_000 * MINUTE);
    assert_eq!(ms_until_next_point(&character.stats, 1_000 * MINUTE, &config), None);
}
