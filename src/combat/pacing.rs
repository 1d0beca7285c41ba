//! Presentation pacing for a battle.
//!
//! [`BattleSession`] wraps a [`Battle`] and spaces its steps out on a
//! virtual clock so the UI has time to play animations: the player's
//! wind-up, a pause, each opponent's wind-up and hit, and a settle delay
//! before the result is reported. The outcome of every step is still decided
//! by [`Battle`]; this module only decides *when* each step runs.

use super::logic::{Battle, BattleError, OpponentAttack, SkillEffect, SkillOutcome};
use super::types::*;
use crate::core::config::BattleTiming;
use crate::core::scheduler::Scheduler;
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    AwaitingInput,
    PlayerActing,
    OpponentsPreparing,
    OpponentActing,
    PlayerRecovering,
    BetweenAttacks,
    Settling,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    SkillUsed(SkillOutcome),
    OpponentAttacked(OpponentAttack),
    /// The opponents are done and the player may pick a skill again.
    TurnReturned,
    /// Emitted exactly once, after the settle delay.
    Finished(BattleResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    ResolveSkill(usize),
    OpponentWindup,
    OpponentStrike,
    Recover { opponent_id: u32, turn_finished: bool },
    ReturnTurn,
    ReportResult,
    ClearOpponentEffect { id: u32, key: u64 },
    ClearPlayerEffect { key: u64 },
}

#[derive(Debug, Clone)]
pub struct BattleSession {
    battle: Battle,
    skills: Vec<Skill>,
    timing: BattleTiming,
    timers: Scheduler<Step>,
    phase: BattlePhase,
    player_animation: AnimationState,
    player_effect: Option<EffectInfo>,
    next_effect_key: u64,
}

impl BattleSession {
    pub fn new(battle: Battle, skills: Vec<Skill>, timing: BattleTiming) -> Self {
        Self {
            battle,
            skills,
            timing,
            timers: Scheduler::new(),
            phase: BattlePhase::AwaitingInput,
            player_animation: AnimationState::Idle,
            player_effect: None,
            next_effect_key: 0,
        }
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn player_animation(&self) -> AnimationState {
        self.player_animation
    }

    pub fn player_effect(&self) -> Option<EffectInfo> {
        self.player_effect
    }

    /// Skill buttons are live only while waiting for input.
    pub fn accepts_input(&self) -> bool {
        self.phase == BattlePhase::AwaitingInput && self.battle.is_player_turn()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == BattlePhase::Finished
    }

    /// Queues the skill in `slot`. Rejected outside the player's turn.
    pub fn select_skill(&mut self, slot: usize) -> Result<(), BattleError> {
        if self.battle.status().is_over() {
            return Err(BattleError::Over);
        }
        if !self.accepts_input() {
            return Err(BattleError::NotPlayerTurn);
        }
        if slot >= self.skills.len() {
            return Err(BattleError::UnknownSkill(slot));
        }

        self.phase = BattlePhase::PlayerActing;
        self.player_animation = AnimationState::Attacking;
        self.timers
            .schedule(self.timing.player_windup_ms, Step::ResolveSkill(slot));
        Ok(())
    }

    /// Advances the virtual clock and runs every step that came due.
    pub fn update(&mut self, elapsed: Duration, rng: &mut impl Rng) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        self.timers.advance(elapsed);
        while let Some(step) = self.timers.pop_due() {
            if let Err(err) = self.run_step(step, rng, &mut events) {
                tracing::warn!(?step, %err, "battle step rejected");
            }
        }
        events
    }

    fn effect(&mut self, value: u32, kind: EffectKind) -> EffectInfo {
        self.next_effect_key += 1;
        EffectInfo {
            value,
            kind,
            key: self.next_effect_key,
        }
    }

    fn show_opponent_hit(&mut self, id: u32, amount: u32) {
        let effect = self.effect(amount, EffectKind::Damage);
        if let Some(opponent) = self.battle.opponent_mut(id) {
            opponent.effect = Some(effect);
            opponent.animation = AnimationState::Hit;
        }
        self.timers.schedule(
            self.timing.effect_duration_ms,
            Step::ClearOpponentEffect { id, key: effect.key },
        );
    }

    fn show_player_effect(&mut self, value: u32, kind: EffectKind) {
        let effect = self.effect(value, kind);
        self.player_effect = Some(effect);
        self.timers.schedule(
            self.timing.effect_duration_ms,
            Step::ClearPlayerEffect { key: effect.key },
        );
    }

    fn settle(&mut self) {
        self.phase = BattlePhase::Settling;
        self.timers
            .schedule(self.timing.settle_ms, Step::ReportResult);
    }

    fn run_step(
        &mut self,
        step: Step,
        rng: &mut impl Rng,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        match step {
            Step::ResolveSkill(slot) => {
                let skill = self
                    .skills
                    .get(slot)
                    .cloned()
                    .ok_or(BattleError::UnknownSkill(slot))?;
                let outcome = self.battle.use_skill(&skill, rng)?;

                match &outcome.effect {
                    SkillEffect::Damage { target, amount } => {
                        self.show_opponent_hit(*target, *amount);
                    }
                    SkillEffect::Aoe { hits } => {
                        for &(id, amount) in hits {
                            self.show_opponent_hit(id, amount);
                        }
                    }
                    SkillEffect::Heal { amount, .. } => {
                        self.show_player_effect(*amount, EffectKind::Heal);
                    }
                    SkillEffect::NoTarget => {}
                }
                self.player_animation = AnimationState::Idle;

                let victory = outcome.status.is_over();
                events.push(BattleEvent::SkillUsed(outcome));
                if victory {
                    self.settle();
                } else {
                    self.phase = BattlePhase::OpponentsPreparing;
                    self.timers
                        .schedule(self.timing.opponent_turn_delay_ms, Step::OpponentWindup);
                }
            }
            Step::OpponentWindup => {
                let attacker = self
                    .battle
                    .pending_attackers()
                    .next()
                    .ok_or(BattleError::NotOpponentsTurn)?;
                if let Some(opponent) = self.battle.opponent_mut(attacker) {
                    opponent.animation = AnimationState::Attacking;
                }
                self.phase = BattlePhase::OpponentActing;
                self.timers
                    .schedule(self.timing.opponent_windup_ms, Step::OpponentStrike);
            }
            Step::OpponentStrike => {
                let attack = self.battle.opponent_attack(rng)?;
                self.show_player_effect(attack.damage, EffectKind::Damage);
                self.player_animation = AnimationState::Hit;
                self.phase = BattlePhase::PlayerRecovering;
                self.timers.schedule(
                    self.timing.player_hit_recovery_ms,
                    Step::Recover {
                        opponent_id: attack.opponent_id,
                        turn_finished: attack.turn_finished,
                    },
                );
                events.push(BattleEvent::OpponentAttacked(attack));
            }
            Step::Recover {
                opponent_id,
                turn_finished,
            } => {
                self.player_animation = AnimationState::Idle;
                if let Some(opponent) = self.battle.opponent_mut(opponent_id) {
                    opponent.animation = AnimationState::Idle;
                }
                if self.battle.status().is_over() {
                    self.settle();
                } else {
                    self.phase = BattlePhase::BetweenAttacks;
                    let next = if turn_finished {
                        Step::ReturnTurn
                    } else {
                        Step::OpponentWindup
                    };
                    self.timers.schedule(self.timing.opponent_gap_ms, next);
                }
            }
            Step::ReturnTurn => {
                self.phase = BattlePhase::AwaitingInput;
                events.push(BattleEvent::TurnReturned);
            }
            Step::ReportResult => {
                if let Some(result) = self.battle.take_result() {
                    events.push(BattleEvent::Finished(result));
                }
                self.phase = BattlePhase::Finished;
                // Floating effects no longer matter once the result is out.
                self.timers.clear();
            }
            Step::ClearOpponentEffect { id, key } => {
                if let Some(opponent) = self.battle.opponent_mut(id) {
                    if opponent.effect.map(|e| e.key) == Some(key) {
                        opponent.effect = None;
                        if opponent.animation == AnimationState::Hit {
                            opponent.animation = AnimationState::Idle;
                        }
                    }
                }
            }
            Step::ClearPlayerEffect { key } => {
                if self.player_effect.map(|e| e.key) == Some(key) {
                    self.player_effect = None;
                }
            }
        }
        Ok(())
    }
}
