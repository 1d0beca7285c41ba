use crate::combat::types::Skill;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Warrior,
    Mage,
    Ranger,
}

/// Strength, vitality and intellect a class starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub str: u32,
    pub vit: u32,
    pub int: u32,
}

impl PlayerClass {
    pub fn all() -> [PlayerClass; 3] {
        [PlayerClass::Warrior, PlayerClass::Mage, PlayerClass::Ranger]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerClass::Warrior => "Warrior",
            PlayerClass::Mage => "Mage",
            PlayerClass::Ranger => "Ranger",
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        match self {
            PlayerClass::Warrior => BaseStats {
                str: 8,
                vit: 7,
                int: 3,
            },
            PlayerClass::Mage => BaseStats {
                str: 3,
                vit: 5,
                int: 10,
            },
            PlayerClass::Ranger => BaseStats {
                str: 6,
                vit: 6,
                int: 6,
            },
        }
    }

    /// Stat added to the base damage of single-target skills.
    pub fn damage_stat(&self, str: u32, int: u32) -> u32 {
        match self {
            PlayerClass::Warrior => str,
            PlayerClass::Mage => int,
            PlayerClass::Ranger => (str + int) / 2,
        }
    }

    /// Stat added to the base damage of area skills.
    pub fn aoe_stat(&self, str: u32, int: u32) -> u32 {
        match self {
            PlayerClass::Mage => int,
            PlayerClass::Warrior | PlayerClass::Ranger => str / 2,
        }
    }

    /// Intellect bonus added to heals. Mages heal at double rate.
    pub fn heal_bonus(&self, int: u32) -> u32 {
        match self {
            PlayerClass::Mage => int * 2,
            PlayerClass::Warrior | PlayerClass::Ranger => int,
        }
    }

    pub fn skills(&self) -> [Skill; 4] {
        match self {
            PlayerClass::Warrior => [
                Skill::damage("Power Strike", 1.5),
                Skill::damage("Shield Bash", 1.0),
                Skill::heal("Battle Cry", 15),
                Skill::damage("Shatter", 1.2),
            ],
            PlayerClass::Mage => [
                Skill::damage("Fireball", 1.4),
                Skill::damage("Ice Lance", 1.1),
                Skill::heal("Mend", 25),
                Skill::aoe("Meteor", 0.8),
            ],
            PlayerClass::Ranger => [
                Skill::damage("Poison Arrow", 1.3),
                Skill::damage("Double Shot", 1.6),
                Skill::heal("Quick Recovery", 18),
                Skill::aoe("Arrow Rain", 0.6),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::SkillKind;

    #[test]
    fn test_base_stats() {
        assert_eq!(
            PlayerClass::Warrior.base_stats(),
            BaseStats {
                str: 8,
                vit: 7,
                int: 3
            }
        );
        assert_eq!(PlayerClass::Mage.base_stats().int, 10);
        assert_eq!(PlayerClass::Ranger.base_stats().vit, 6);
    }

    #[test]
    fn test_damage_stat_weighting() {
        assert_eq!(PlayerClass::Warrior.damage_stat(8, 3), 8);
        assert_eq!(PlayerClass::Mage.damage_stat(3, 10), 10);
        assert_eq!(PlayerClass::Ranger.damage_stat(6, 7), 6);
    }

    #[test]
    fn test_aoe_stat_weighting() {
        assert_eq!(PlayerClass::Mage.aoe_stat(3, 10), 10);
        assert_eq!(PlayerClass::Ranger.aoe_stat(7, 6), 3);
    }

    #[test]
    fn test_heal_bonus() {
        assert_eq!(PlayerClass::Mage.heal_bonus(10), 20);
        assert_eq!(PlayerClass::Warrior.heal_bonus(3), 3);
    }

    #[test]
    fn test_every_class_has_a_heal() {
        for class in PlayerClass::all() {
            assert!(class
                .skills()
                .iter()
                .any(|s| matches!(s.kind, SkillKind::Heal { .. })));
        }
    }

    #[test]
    fn test_warrior_has_no_aoe() {
        assert!(!PlayerClass::Warrior
            .skills()
            .iter()
            .any(|s| matches!(s.kind, SkillKind::Aoe { .. })));
    }
}
