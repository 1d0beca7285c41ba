use crate::core::constants::*;
use crate::exploration::types::MapEnemy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkillKind {
    /// Hits one random living opponent. `None` uses [`DEFAULT_DAMAGE_MULTIPLIER`].
    Damage { multiplier: Option<f64> },
    /// Hits every living opponent. `None` uses [`DEFAULT_AOE_MULTIPLIER`].
    Aoe { multiplier: Option<f64> },
    /// Restores the player's health. `None` uses [`DEFAULT_HEAL_AMOUNT`].
    Heal { amount: Option<u32> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub kind: SkillKind,
}

impl Skill {
    pub fn damage(name: &str, multiplier: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: SkillKind::Damage {
                multiplier: Some(multiplier),
            },
        }
    }

    pub fn aoe(name: &str, multiplier: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: SkillKind::Aoe {
                multiplier: Some(multiplier),
            },
        }
    }

    pub fn heal(name: &str, amount: u32) -> Self {
        Self {
            name: name.to_string(),
            kind: SkillKind::Heal {
                amount: Some(amount),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Attacking,
    Hit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Damage,
    Heal,
}

/// Floating number shown over a combatant. `key` changes on every new
/// effect so repeated equal values still restart the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectInfo {
    pub value: u32,
    pub kind: EffectKind,
    pub key: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub id: u32,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub animation: AnimationState,
    pub effect: Option<EffectInfo>,
    pub is_boss: bool,
}

impl Opponent {
    pub fn new(id: u32, name: String, max_health: u32, is_boss: bool) -> Self {
        Self {
            id,
            name,
            health: max_health,
            max_health,
            animation: AnimationState::Idle,
            effect: None,
            is_boss,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

/// Builds the battle roster for a map enemy.
///
/// A boss enemy leads with the boss itself; every other slot is a minion.
pub fn spawn_opponents(enemy: &MapEnemy) -> Vec<Opponent> {
    let count = enemy.opponent_count.max(1);
    (0..count)
        .map(|index| {
            let is_boss = enemy.is_boss && index == 0;
            let (name, health) = if is_boss {
                (enemy.name.clone(), BOSS_HEALTH)
            } else {
                (format!("{} Minion", enemy.name), MINION_HEALTH)
            };
            Opponent::new(enemy.id * 10 + index, name, health, is_boss)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleStatus {
    Playing,
    Victory,
    Defeat,
}

impl BattleStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, BattleStatus::Playing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// What a finished battle reports back to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    pub final_player_health: u32,
}
