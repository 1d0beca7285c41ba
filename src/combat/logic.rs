//! Turn-based battle resolution.
//!
//! [`Battle`] is synchronous: each call resolves one step immediately and
//! returns what happened. Spacing the steps out in time is the job of
//! [`crate::combat::pacing`].

use super::types::*;
use crate::character::derived_stats::EffectiveStats;
use crate::core::constants::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("the battle is already over")]
    Over,
    #[error("it is not the player's turn")]
    NotPlayerTurn,
    #[error("the opponents are not taking their turn")]
    NotOpponentsTurn,
    #[error("no skill in slot {0}")]
    UnknownSkill(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Player,
    Opponents,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillEffect {
    Damage { target: u32, amount: u32 },
    Aoe { hits: Vec<(u32, u32)> },
    /// `amount` is the rolled heal, `restored` what actually fit under max health.
    Heal { amount: u32, restored: u32 },
    /// A single-target skill found nobody alive to hit.
    NoTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillOutcome {
    pub skill: String,
    pub effect: SkillEffect,
    pub status: BattleStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentAttack {
    pub opponent_id: u32,
    pub damage: u32,
    pub player_health: u32,
    pub status: BattleStatus,
    /// True once every queued opponent has acted (or the player fell).
    pub turn_finished: bool,
}

fn scaled(base: u32, multiplier: f64, buff: f64) -> u32 {
    (base as f64 * multiplier * buff).max(0.0).round() as u32
}

/// Single-target damage: (8 + class stat) × multiplier × buff, rounded.
pub fn skill_damage(stats: &EffectiveStats, multiplier: Option<f64>, buff: f64) -> u32 {
    let base = BASE_SKILL_DAMAGE + stats.class.damage_stat(stats.str, stats.int);
    scaled(
        base,
        multiplier.unwrap_or(DEFAULT_DAMAGE_MULTIPLIER),
        buff,
    )
}

/// Per-opponent area damage: (5 + class area stat) × multiplier × buff, rounded.
pub fn aoe_damage(stats: &EffectiveStats, multiplier: Option<f64>, buff: f64) -> u32 {
    let base = BASE_AOE_DAMAGE + stats.class.aoe_stat(stats.str, stats.int);
    scaled(base, multiplier.unwrap_or(DEFAULT_AOE_MULTIPLIER), buff)
}

pub fn heal_amount(stats: &EffectiveStats, amount: Option<u32>) -> u32 {
    amount.unwrap_or(DEFAULT_HEAL_AMOUNT) + stats.class.heal_bonus(stats.int)
}

/// Damage an opponent deals for a given roll: vitality soaks half a point
/// per point, but every hit lands for at least 1.
pub fn opponent_damage(roll: u32, vit: u32) -> u32 {
    roll.saturating_sub(vit / DEFENSE_DIVISOR).max(1)
}

pub fn roll_opponent_damage(rng: &mut impl Rng, vit: u32) -> u32 {
    opponent_damage(rng.gen_range(OPPONENT_DAMAGE_MIN..=OPPONENT_DAMAGE_MAX), vit)
}

#[derive(Debug, Clone)]
pub struct Battle {
    opponents: Vec<Opponent>,
    player: EffectiveStats,
    player_health: u32,
    damage_multiplier: f64,
    status: BattleStatus,
    turn: Turn,
    attack_queue: VecDeque<u32>,
    result_taken: bool,
}

impl Battle {
    /// Starts a battle against a private copy of `roster`.
    ///
    /// `damage_multiplier` is the shrine buff (1.0 without one). The player's
    /// health is clamped to their max health.
    pub fn new(
        roster: &[Opponent],
        player: EffectiveStats,
        current_health: u32,
        damage_multiplier: f64,
    ) -> Self {
        Self {
            opponents: roster.to_vec(),
            player,
            player_health: current_health.min(player.max_health),
            damage_multiplier,
            status: BattleStatus::Playing,
            turn: Turn::Player,
            attack_queue: VecDeque::new(),
            result_taken: false,
        }
    }

    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    pub(crate) fn opponent_mut(&mut self, id: u32) -> Option<&mut Opponent> {
        self.opponents.iter_mut().find(|o| o.id == id)
    }

    pub fn player(&self) -> &EffectiveStats {
        &self.player
    }

    pub fn player_health(&self) -> u32 {
        self.player_health
    }

    pub fn damage_multiplier(&self) -> f64 {
        self.damage_multiplier
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn is_player_turn(&self) -> bool {
        self.status == BattleStatus::Playing && self.turn == Turn::Player
    }

    /// Opponents still waiting to attack this turn, in order.
    pub fn pending_attackers(&self) -> impl Iterator<Item = u32> + '_ {
        self.attack_queue.iter().copied()
    }

    fn living_ids(&self) -> Vec<u32> {
        self.opponents
            .iter()
            .filter(|o| o.is_alive())
            .map(|o| o.id)
            .collect()
    }

    fn all_opponents_down(&self) -> bool {
        self.opponents.iter().all(|o| !o.is_alive())
    }

    /// Resolves the player's skill and hands the turn to the opponents, or
    /// ends the battle in victory.
    pub fn use_skill(
        &mut self,
        skill: &Skill,
        rng: &mut impl Rng,
    ) -> Result<SkillOutcome, BattleError> {
        if self.status.is_over() {
            return Err(BattleError::Over);
        }
        if self.turn != Turn::Player {
            return Err(BattleError::NotPlayerTurn);
        }

        let effect = match skill.kind {
            SkillKind::Damage { multiplier } => {
                let living = self.living_ids();
                match living.choose(rng) {
                    Some(&target) => {
                        let amount = skill_damage(&self.player, multiplier, self.damage_multiplier);
                        if let Some(opponent) = self.opponent_mut(target) {
                            opponent.take_damage(amount);
                        }
                        SkillEffect::Damage { target, amount }
                    }
                    None => SkillEffect::NoTarget,
                }
            }
            SkillKind::Aoe { multiplier } => {
                let amount = aoe_damage(&self.player, multiplier, self.damage_multiplier);
                let hits = self
                    .opponents
                    .iter_mut()
                    .filter(|o| o.is_alive())
                    .map(|o| {
                        o.take_damage(amount);
                        (o.id, amount)
                    })
                    .collect();
                SkillEffect::Aoe { hits }
            }
            SkillKind::Heal { amount } => {
                let amount = heal_amount(&self.player, amount);
                let before = self.player_health;
                self.player_health = (before + amount).min(self.player.max_health);
                SkillEffect::Heal {
                    amount,
                    restored: self.player_health - before,
                }
            }
        };

        tracing::debug!(skill = %skill.name, ?effect, "player skill resolved");

        if self.all_opponents_down() {
            self.status = BattleStatus::Victory;
            tracing::debug!("all opponents down");
        } else {
            self.turn = Turn::Opponents;
            self.attack_queue = self.living_ids().into();
        }

        Ok(SkillOutcome {
            skill: skill.name.clone(),
            effect,
            status: self.status,
        })
    }

    /// The next queued opponent attacks. The turn passes back to the player
    /// after the last one, unless the player falls first.
    pub fn opponent_attack(&mut self, rng: &mut impl Rng) -> Result<OpponentAttack, BattleError> {
        if self.status.is_over() {
            return Err(BattleError::Over);
        }
        if self.turn != Turn::Opponents {
            return Err(BattleError::NotOpponentsTurn);
        }

        let Some(opponent_id) = self.attack_queue.pop_front() else {
            self.turn = Turn::Player;
            return Err(BattleError::NotOpponentsTurn);
        };

        let damage = roll_opponent_damage(rng, self.player.vit);
        self.player_health = self.player_health.saturating_sub(damage);
        tracing::debug!(
            opponent = opponent_id,
            damage,
            health = self.player_health,
            "opponent attack"
        );

        if self.player_health == 0 {
            self.status = BattleStatus::Defeat;
            self.attack_queue.clear();
        } else if self.attack_queue.is_empty() {
            self.turn = Turn::Player;
        }

        Ok(OpponentAttack {
            opponent_id,
            damage,
            player_health: self.player_health,
            status: self.status,
            turn_finished: self.status.is_over() || self.attack_queue.is_empty(),
        })
    }

    /// Runs every remaining opponent attack back to back.
    pub fn resolve_opponents_turn(
        &mut self,
        rng: &mut impl Rng,
    ) -> Result<Vec<OpponentAttack>, BattleError> {
        let mut attacks = Vec::new();
        loop {
            let attack = self.opponent_attack(rng)?;
            attacks.push(attack);
            if attack.turn_finished {
                return Ok(attacks);
            }
        }
    }

    /// The final result, handed out once.
    pub fn take_result(&mut self) -> Option<BattleResult> {
        if self.result_taken {
            return None;
        }
        let outcome = match self.status {
            BattleStatus::Playing => return None,
            BattleStatus::Victory => BattleOutcome::Victory,
            BattleStatus::Defeat => BattleOutcome::Defeat,
        };
        self.result_taken = true;
        Some(BattleResult {
            outcome,
            final_player_health: self.player_health,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::class::PlayerClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stats(class: PlayerClass, str: u32, vit: u32, int: u32) -> EffectiveStats {
        EffectiveStats {
            class,
            level: 1,
            str,
            vit,
            int,
            max_health: vit * HEALTH_PER_VITALITY,
            current_health: vit * HEALTH_PER_VITALITY,
        }
    }

    fn goblins(count: u32) -> Vec<Opponent> {
        (0..count)
            .map(|i| Opponent::new(10 + i, "Goblin Minion".to_string(), 40, false))
            .collect()
    }

    #[test]
    fn test_warrior_power_strike() {
        let warrior = stats(PlayerClass::Warrior, 8, 7, 3);
        let mut battle = Battle::new(&goblins(1), warrior, 70, 1.0);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = battle
            .use_skill(&Skill::damage("Power Strike", 1.5), &mut rng)
            .unwrap();

        assert_eq!(
            outcome.effect,
            SkillEffect::Damage {
                target: 10,
                amount: 24
            }
        );
        assert_eq!(battle.opponents()[0].health, 16);
        assert_eq!(battle.turn(), Turn::Opponents);
    }

    #[test]
    fn test_damage_formulas_by_class() {
        let mage = stats(PlayerClass::Mage, 3, 5, 10);
        let ranger = stats(PlayerClass::Ranger, 6, 6, 7);
        assert_eq!(skill_damage(&mage, Some(1.4), 1.0), 25); // 18 * 1.4 = 25.2
        assert_eq!(skill_damage(&ranger, Some(1.3), 1.0), 18); // 14 * 1.3 = 18.2
        assert_eq!(skill_damage(&ranger, None, 1.0), 14);
        assert_eq!(aoe_damage(&mage, Some(0.8), 1.0), 12); // 15 * 0.8
        assert_eq!(aoe_damage(&ranger, None, 1.0), 6); // 8 * 0.7 = 5.6
    }

    #[test]
    fn test_shrine_buff_scales_damage() {
        let warrior = stats(PlayerClass::Warrior, 8, 7, 3);
        assert_eq!(skill_damage(&warrior, Some(1.0), 1.5), 24);
    }

    #[test]
    fn test_heal_amounts() {
        let mage = stats(PlayerClass::Mage, 3, 5, 10);
        let warrior = stats(PlayerClass::Warrior, 8, 7, 3);
        assert_eq!(heal_amount(&mage, Some(25)), 45);
        assert_eq!(heal_amount(&warrior, Some(15)), 18);
        assert_eq!(heal_amount(&warrior, None), 23);
    }

    #[test]
    fn test_heal_capped_at_max_health() {
        let warrior = stats(PlayerClass::Warrior, 8, 7, 3);
        let mut battle = Battle::new(&goblins(1), warrior, 60, 1.0);
        let mut rng = StdRng::seed_from_u64(2);

        let outcome = battle
            .use_skill(&Skill::heal("Battle Cry", 15), &mut rng)
            .unwrap();

        assert_eq!(
            outcome.effect,
            SkillEffect::Heal {
                amount: 18,
                restored: 10
            }
        );
        assert_eq!(battle.player_health(), 70);
    }

    #[test]
    fn test_aoe_hits_only_living() {
        let mage = stats(PlayerClass::Mage, 3, 5, 10);
        let mut roster = goblins(3);
        roster[1].health = 0;
        let mut battle = Battle::new(&roster, mage, 50, 1.0);
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = battle.use_skill(&Skill::aoe("Meteor", 0.8), &mut rng).unwrap();

        assert_eq!(outcome.effect, SkillEffect::Aoe {
            hits: vec![(10, 12), (12, 12)]
        });
        assert_eq!(battle.opponents()[0].health, 28);
        assert_eq!(battle.opponents()[1].health, 0);
        assert_eq!(battle.pending_attackers().collect::<Vec<_>>(), vec![10, 12]);
    }

    #[test]
    fn test_roster_is_copied() {
        let roster = goblins(1);
        let warrior = stats(PlayerClass::Warrior, 40, 7, 3);
        let mut battle = Battle::new(&roster, warrior, 70, 1.0);
        let mut rng = StdRng::seed_from_u64(4);

        battle
            .use_skill(&Skill::damage("Power Strike", 1.5), &mut rng)
            .unwrap();

        assert_eq!(battle.opponents()[0].health, 0);
        assert_eq!(roster[0].health, 40);
    }

    #[test]
    fn test_victory_skips_opponents_turn() {
        let warrior = stats(PlayerClass::Warrior, 40, 7, 3);
        let mut battle = Battle::new(&goblins(1), warrior, 70, 1.0);
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = battle
            .use_skill(&Skill::damage("Power Strike", 1.5), &mut rng)
            .unwrap();

        assert_eq!(outcome.status, BattleStatus::Victory);
        assert_eq!(battle.opponent_attack(&mut rng), Err(BattleError::Over));
        assert_eq!(
            battle.take_result(),
            Some(BattleResult {
                outcome: BattleOutcome::Victory,
                final_player_health: 70
            })
        );
        assert_eq!(battle.take_result(), None);
    }

    #[test]
    fn test_acting_out_of_turn_is_rejected() {
        let warrior = stats(PlayerClass::Warrior, 8, 7, 3);
        let mut battle = Battle::new(&goblins(2), warrior, 70, 1.0);
        let mut rng = StdRng::seed_from_u64(6);

        assert_eq!(
            battle.opponent_attack(&mut rng),
            Err(BattleError::NotOpponentsTurn)
        );
        battle
            .use_skill(&Skill::damage("Shield Bash", 1.0), &mut rng)
            .unwrap();
        let before: Vec<u32> = battle.opponents().iter().map(|o| o.health).collect();
        assert_eq!(
            battle.use_skill(&Skill::damage("Shield Bash", 1.0), &mut rng),
            Err(BattleError::NotPlayerTurn)
        );
        let after: Vec<u32> = battle.opponents().iter().map(|o| o.health).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_opponents_attack_in_order_then_return_turn() {
        let warrior = stats(PlayerClass::Warrior, 1, 7, 3);
        let mut battle = Battle::new(&goblins(3), warrior, 70, 1.0);
        let mut rng = StdRng::seed_from_u64(7);

        battle
            .use_skill(&Skill::damage("Shield Bash", 1.0), &mut rng)
            .unwrap();
        let attacks = battle.resolve_opponents_turn(&mut rng).unwrap();

        assert_eq!(
            attacks.iter().map(|a| a.opponent_id).collect::<Vec<_>>(),
            vec![10, 11, 12]
        );
        assert!(attacks.iter().all(|a| (3..=7).contains(&a.damage)));
        assert!(attacks.last().unwrap().turn_finished);
        assert!(battle.is_player_turn());
        let taken: u32 = attacks.iter().map(|a| a.damage).sum();
        assert_eq!(battle.player_health(), 70 - taken);
    }

    #[test]
    fn test_defeat_stops_remaining_attacks() {
        let warrior = stats(PlayerClass::Warrior, 1, 7, 3);
        let mut battle = Battle::new(&goblins(3), warrior, 1, 1.0);
        let mut rng = StdRng::seed_from_u64(8);

        battle
            .use_skill(&Skill::damage("Shield Bash", 1.0), &mut rng)
            .unwrap();
        let attacks = battle.resolve_opponents_turn(&mut rng).unwrap();

        assert_eq!(attacks.len(), 1);
        assert_eq!(battle.status(), BattleStatus::Defeat);
        assert_eq!(battle.player_health(), 0);
        assert_eq!(
            battle.take_result().map(|r| r.outcome),
            Some(BattleOutcome::Defeat)
        );
        assert_eq!(battle.take_result(), None);
    }

    #[test]
    fn test_opponent_damage_floor() {
        assert_eq!(opponent_damage(6, 40), 1);
        assert_eq!(opponent_damage(10, 7), 7);
        assert_eq!(opponent_damage(6, 0), 6);
    }

    #[test]
    fn test_current_health_clamped_to_max() {
        let warrior = stats(PlayerClass::Warrior, 8, 7, 3);
        let battle = Battle::new(&goblins(1), warrior, 500, 1.0);
        assert_eq!(battle.player_health(), 70);
    }

    #[test]
    fn test_exactly_one_result_over_many_battles() {
        let ranger = stats(PlayerClass::Ranger, 6, 6, 6);
        let skills = PlayerClass::Ranger.skills();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut battle = Battle::new(&goblins(3), ranger, 60, 1.0);
            let mut results = 0;
            for round in 0..200 {
                let skill = &skills[round % skills.len()];
                if battle.use_skill(skill, &mut rng).is_err() {
                    break;
                }
                if battle.turn() == Turn::Opponents {
                    battle.resolve_opponents_turn(&mut rng).unwrap();
                }
                if battle.take_result().is_some() {
                    results += 1;
                }
            }
            assert_eq!(results, 1);
            let all_down = battle.opponents().iter().all(|o| o.health == 0);
            match battle.status() {
                BattleStatus::Victory => assert!(all_down && battle.player_health() > 0),
                BattleStatus::Defeat => assert!(!all_down && battle.player_health() == 0),
                BattleStatus::Playing => panic!("battle never finished"),
            }
        }
    }
}
