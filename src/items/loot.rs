//! Item catalog, battle rewards and dungeon loot rolls.

use super::types::{EquipmentSlot, Item, Rarity, StatBonus};
use crate::character::class::PlayerClass;
use crate::exploration::types::MapEnemy;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chance that a regular dungeon enemy carries an item.
pub const ENEMY_LOOT_CHANCE: f64 = 0.3;

/// What a victory pays out. Fixed when the battle starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleRewards {
    pub xp: u64,
    pub gold: u64,
    pub loot: Vec<Item>,
}

pub fn starting_inventory() -> Vec<Item> {
    vec![
        Item::new(
            101,
            "Rusty Sword",
            EquipmentSlot::Weapon,
            StatBonus::new(2, 0, 0),
        ),
        Item::new(
            201,
            "Leather Armor",
            EquipmentSlot::Armor,
            StatBonus::new(0, 3, 0),
        ),
    ]
}

/// The epic weapon every boss drops, tailored to the player's class.
pub fn boss_weapon(class: PlayerClass) -> Item {
    let item = match class {
        PlayerClass::Warrior => Item::new(
            104,
            "Blade of the Ancients",
            EquipmentSlot::Weapon,
            StatBonus::new(10, 5, 0),
        ),
        PlayerClass::Mage => Item::new(
            105,
            "Staff of Fallen Stars",
            EquipmentSlot::Weapon,
            StatBonus::new(0, 0, 12),
        ),
        PlayerClass::Ranger => Item::new(
            106,
            "Eaglefang Longbow",
            EquipmentSlot::Weapon,
            StatBonus::new(8, 0, 4),
        ),
    };
    item.with_rarity(Rarity::Epic)
}

/// Rewards for beating `enemy`: its yields and loot table, plus the class
/// epic weapon when it is a boss.
pub fn rewards_for(enemy: &MapEnemy, class: PlayerClass) -> BattleRewards {
    let mut loot = enemy.loot.clone().unwrap_or_default();
    if enemy.is_boss {
        loot.push(boss_weapon(class));
    }
    BattleRewards {
        xp: enemy.xp_yield,
        gold: enemy.gold_yield,
        loot,
    }
}

struct LootEntry {
    min_floor: u32,
    id: u32,
    name: &'static str,
    slot: EquipmentSlot,
    stats: (u32, u32, u32),
    rarity: Rarity,
}

const LOOT_TABLE: &[LootEntry] = &[
    LootEntry {
        min_floor: 1,
        id: 301,
        name: "Old Helmet",
        slot: EquipmentSlot::Helmet,
        stats: (0, 1, 0),
        rarity: Rarity::Common,
    },
    LootEntry {
        min_floor: 1,
        id: 102,
        name: "Sharp Dagger",
        slot: EquipmentSlot::Weapon,
        stats: (4, 0, 0),
        rarity: Rarity::Common,
    },
    LootEntry {
        min_floor: 2,
        id: 107,
        name: "Apprentice Wand",
        slot: EquipmentSlot::Weapon,
        stats: (0, 0, 5),
        rarity: Rarity::Common,
    },
    LootEntry {
        min_floor: 3,
        id: 202,
        name: "Chainmail",
        slot: EquipmentSlot::Armor,
        stats: (0, 6, 0),
        rarity: Rarity::Rare,
    },
    LootEntry {
        min_floor: 4,
        id: 302,
        name: "Iron Helm",
        slot: EquipmentSlot::Helmet,
        stats: (1, 3, 0),
        rarity: Rarity::Rare,
    },
    LootEntry {
        min_floor: 5,
        id: 108,
        name: "Hunter's Bow",
        slot: EquipmentSlot::Weapon,
        stats: (5, 0, 3),
        rarity: Rarity::Rare,
    },
    LootEntry {
        min_floor: 6,
        id: 203,
        name: "Runed Robe",
        slot: EquipmentSlot::Armor,
        stats: (0, 4, 6),
        rarity: Rarity::Rare,
    },
];

/// Items that can drop on `floor`.
pub fn loot_pool(floor: u32) -> Vec<Item> {
    LOOT_TABLE
        .iter()
        .filter(|entry| entry.min_floor <= floor)
        .map(|entry| {
            let (str, vit, int) = entry.stats;
            Item::new(entry.id, entry.name, entry.slot, StatBonus::new(str, vit, int))
                .with_rarity(entry.rarity)
        })
        .collect()
}

/// Rolls the loot table for a regular enemy on `floor`.
pub fn roll_enemy_loot(floor: u32, rng: &mut impl Rng) -> Option<Vec<Item>> {
    if !rng.gen_bool(ENEMY_LOOT_CHANCE) {
        return None;
    }
    loot_pool(floor).choose(rng).cloned().map(|item| vec![item])
}
