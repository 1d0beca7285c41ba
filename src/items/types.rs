use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Helmet,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 3] {
        [
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Helmet,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Helmet => "Helmet",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Rarity {
    #[default]
    Common = 0,
    Rare = 1,
    Epic = 2,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
        }
    }
}

/// Flat bonuses an item adds to the base stats. Missing entries count as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBonus {
    pub str: u32,
    pub vit: u32,
    pub int: u32,
}

impl StatBonus {
    pub fn new(str: u32, vit: u32, int: u32) -> Self {
        Self { str, vit, int }
    }

    pub fn total(&self) -> u32 {
        self.str + self.vit + self.int
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub slot: EquipmentSlot,
    pub stats: StatBonus,
    #[serde(default)]
    pub rarity: Rarity,
}

impl Item {
    pub fn new(id: u32, name: &str, slot: EquipmentSlot, stats: StatBonus) -> Self {
        Self {
            id,
            name: name.to_string(),
            slot,
            stats,
            rarity: Rarity::Common,
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }
}
