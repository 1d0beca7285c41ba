//! The top-level game: scenes, the active floor and the active battle.
//!
//! [`Game`] owns every piece of mutable state. The front end feeds it input
//! calls and [`Game::update`] with elapsed time, then renders from the
//! accessors and the returned [`GameEvent`]s.

use super::config::{ConfigError, GameConfig};
use super::constants::*;
use super::scheduler::FixedTimestep;
use crate::character::stamina::regenerate;
use crate::character::{Buff, Character, EffectiveStats, PlayerClass, StatAllocation};
use crate::combat::{
    spawn_opponents, Battle, BattleEvent, BattleOutcome, BattleResult, BattleSession,
};
use crate::dungeon::{check_entry, floors, generate_floor, FloorInfo, FloorLayout};
use crate::error::GameError;
use crate::exploration::{
    ExplorationEvent, ExplorationMap, InteractiveObject, MapEnemy, ObjectKind, Position,
};
use crate::items::{rewards_for, BattleRewards, EquipmentSlot};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    ClassSelection,
    Castle,
    DungeonSelection,
    Exploration,
    Combat,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObjectReward {
    Gold(u64),
    Buff(Buff),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SceneChanged(Scene),
    BattleStarted {
        enemy: MapEnemy,
        player_position: Position,
    },
    Battle(BattleEvent),
    BattleEnded {
        result: BattleResult,
        rewards: Option<BattleRewards>,
    },
    LeveledUp {
        level: u32,
        levels_gained: u32,
    },
    ObjectInteracted {
        object_id: u32,
        kind: ObjectKind,
        reward: ObjectReward,
    },
    FloorCleared {
        floor: u32,
    },
    StaminaRegenerated {
        gained: u32,
        stamina: u32,
    },
}

#[derive(Debug, Clone)]
struct ActiveFloor {
    number: u32,
    map: ExplorationMap,
}

#[derive(Debug, Clone)]
struct ActiveBattle {
    session: BattleSession,
    enemy_id: u32,
    rewards: BattleRewards,
    /// Where the player stood when the battle began.
    return_to: Position,
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    scene: Scene,
    character: Option<Character>,
    floor: Option<ActiveFloor>,
    battle: Option<ActiveBattle>,
    exploration_clock: FixedTimestep,
    stamina_clock: FixedTimestep,
}

impl Default for Game {
    fn default() -> Self {
        Self::from_checked(GameConfig::default())
    }
}

impl Game {
    /// Builds a game after validating `config`, so a bad hand-built config
    /// is reported here instead of failing mid-game.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_checked(config))
    }

    fn from_checked(config: GameConfig) -> Self {
        Self {
            config,
            scene: Scene::ClassSelection,
            character: None,
            floor: None,
            battle: None,
            exploration_clock: FixedTimestep::new(
                config.movement.tick_interval(),
                MAX_CATCH_UP_TICKS,
            ),
            stamina_clock: FixedTimestep::new(
                Duration::from_secs(config.stamina.poll_interval_secs),
                1,
            ),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    /// Direct access for scripted setups such as the simulator and tests.
    pub fn character_mut(&mut self) -> Option<&mut Character> {
        self.character.as_mut()
    }

    pub fn effective_stats(&self) -> Option<EffectiveStats> {
        self.character.as_ref().map(Character::effective_stats)
    }

    pub fn current_floor(&self) -> Option<u32> {
        self.floor.as_ref().map(|f| f.number)
    }

    pub fn map(&self) -> Option<&ExplorationMap> {
        self.floor.as_ref().map(|f| &f.map)
    }

    pub fn battle(&self) -> Option<&BattleSession> {
        self.battle.as_ref().map(|b| &b.session)
    }

    /// Rewards waiting on the current battle's victory.
    pub fn pending_rewards(&self) -> Option<&BattleRewards> {
        self.battle.as_ref().map(|b| &b.rewards)
    }

    pub fn floors(&self) -> Vec<FloorInfo> {
        match &self.character {
            Some(c) => floors(c.stats.cleared_floors, c.stats.stamina),
            None => Vec::new(),
        }
    }

    fn expect_scene(&self, scene: Scene) -> Result<(), GameError> {
        if self.scene == scene {
            Ok(())
        } else {
            Err(GameError::WrongScene(self.scene))
        }
    }

    fn character_ref(&self) -> Result<&Character, GameError> {
        self.character.as_ref().ok_or(GameError::NoCharacter)
    }

    fn character_mut_ref(&mut self) -> Result<&mut Character, GameError> {
        self.character.as_mut().ok_or(GameError::NoCharacter)
    }

    fn set_scene(&mut self, scene: Scene, events: &mut Vec<GameEvent>) {
        if self.scene == scene {
            return;
        }
        tracing::info!(from = ?self.scene, to = ?scene, "scene change");
        self.scene = scene;
        if scene == Scene::Exploration {
            self.exploration_clock.start();
        } else {
            self.exploration_clock.stop();
        }
        events.push(GameEvent::SceneChanged(scene));
    }

    // -- Castle and floor selection ------------------------------------

    pub fn select_class(
        &mut self,
        class: PlayerClass,
        now_ms: i64,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_scene(Scene::ClassSelection)?;
        let character = Character::new(class, now_ms, self.config.stamina.max_stamina);
        tracing::info!(class = class.name(), "character created");
        self.character = Some(character);
        self.stamina_clock.start();

        let mut events = Vec::new();
        self.set_scene(Scene::Castle, &mut events);
        Ok(events)
    }

    pub fn open_dungeon_selection(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.expect_scene(Scene::Castle)?;
        let mut events = Vec::new();
        self.set_scene(Scene::DungeonSelection, &mut events);
        Ok(events)
    }

    pub fn close_dungeon_selection(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.expect_scene(Scene::DungeonSelection)?;
        let mut events = Vec::new();
        self.set_scene(Scene::Castle, &mut events);
        Ok(events)
    }

    /// Pays the stamina cost of `floor` and enters a freshly generated layout.
    pub fn select_floor(
        &mut self,
        floor: u32,
        now_ms: i64,
        rng: &mut impl Rng,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_scene(Scene::DungeonSelection)?;
        let character = self.character_ref()?;
        let cost = check_entry(floor, character.stats.cleared_floors, character.stats.stamina)?;

        let layout = generate_floor(floor, rng, &self.config.movement);
        let stats = &mut self.character_mut_ref()?.stats;
        if stats.stamina >= stats.max_stamina {
            // Regeneration starts counting from the moment the bar drops.
            stats.last_regen_ms = now_ms;
        }
        stats.stamina -= cost;
        tracing::info!(floor, cost, stamina = stats.stamina, "entering floor");

        self.enter_layout(layout)
    }

    /// Enters a prepared layout without paying stamina.
    pub fn enter_layout(&mut self, layout: FloorLayout) -> Result<Vec<GameEvent>, GameError> {
        if !matches!(self.scene, Scene::Castle | Scene::DungeonSelection) {
            return Err(GameError::WrongScene(self.scene));
        }
        self.character_ref()?;

        let map = ExplorationMap::new(
            self.config.movement,
            layout.start,
            layout.enemies,
            layout.objects,
        );
        self.floor = Some(ActiveFloor {
            number: layout.floor,
            map,
        });

        let mut events = Vec::new();
        self.set_scene(Scene::Exploration, &mut events);
        Ok(events)
    }

    pub fn leave_floor(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.expect_scene(Scene::Exploration)?;
        self.floor = None;
        let mut events = Vec::new();
        self.set_scene(Scene::Castle, &mut events);
        Ok(events)
    }

    // -- Exploration input ----------------------------------------------

    fn active_map(&mut self) -> Result<&mut ExplorationMap, GameError> {
        self.expect_scene(Scene::Exploration)?;
        self.floor
            .as_mut()
            .map(|f| &mut f.map)
            .ok_or(GameError::WrongScene(self.scene))
    }

    pub fn click_map(&mut self, point: Position) -> Result<(), GameError> {
        self.active_map()?.click_map(point);
        Ok(())
    }

    pub fn click_enemy(&mut self, enemy_id: u32) -> Result<Vec<GameEvent>, GameError> {
        let event = self.active_map()?.click_enemy(enemy_id)?;
        let mut events = Vec::new();
        if let Some(ExplorationEvent::BattleStarted {
            enemy,
            player_position,
        }) = event
        {
            self.start_battle(enemy, player_position, &mut events)?;
        }
        Ok(events)
    }

    pub fn click_object(
        &mut self,
        object_id: u32,
        rng: &mut impl Rng,
    ) -> Result<Vec<GameEvent>, GameError> {
        let event = self.active_map()?.click_object(object_id)?;
        let mut events = Vec::new();
        if let Some(ExplorationEvent::ObjectInteracted { object }) = event {
            self.interact(&object, rng, &mut events)?;
        }
        Ok(events)
    }

    fn interact(
        &mut self,
        object: &InteractiveObject,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let rewards = self.config.rewards;
        self.character_ref()?;
        if !self.active_map()?.open_object(object.id)? {
            return Ok(());
        }
        let character = self.character_mut_ref()?;

        let reward = match object.kind {
            ObjectKind::Chest => {
                let gold = rng.gen_range(rewards.chest_gold_min..=rewards.chest_gold_max);
                character.gold += gold;
                ObjectReward::Gold(gold)
            }
            ObjectKind::Shrine => {
                let buff = Buff {
                    damage_multiplier: rewards.shrine_damage_multiplier,
                };
                character.stats.buff = Some(buff);
                ObjectReward::Buff(buff)
            }
        };
        tracing::info!(object = object.id, ?reward, "object used");

        events.push(GameEvent::ObjectInteracted {
            object_id: object.id,
            kind: object.kind,
            reward,
        });
        Ok(())
    }

    // -- Combat ---------------------------------------------------------

    fn start_battle(
        &mut self,
        enemy: MapEnemy,
        player_position: Position,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let timing = self.config.battle;
        let character = self.character_mut_ref()?;
        let class = character.class();
        let rewards = rewards_for(&enemy, class);
        let buff = character.stats.consume_buff();
        let player = character.effective_stats();

        let battle = Battle::new(
            &spawn_opponents(&enemy),
            player,
            player.current_health,
            buff,
        );
        tracing::info!(
            enemy = %enemy.name,
            opponents = battle.opponents().len(),
            buff,
            "battle started"
        );

        self.battle = Some(ActiveBattle {
            session: BattleSession::new(battle, class.skills().to_vec(), timing),
            enemy_id: enemy.id,
            rewards,
            return_to: player_position,
        });
        events.push(GameEvent::BattleStarted {
            enemy,
            player_position,
        });
        self.set_scene(Scene::Combat, events);
        Ok(())
    }

    pub fn select_skill(&mut self, slot: usize) -> Result<(), GameError> {
        self.expect_scene(Scene::Combat)?;
        let battle = self
            .battle
            .as_mut()
            .ok_or(GameError::WrongScene(self.scene))?;
        battle.session.select_skill(slot)?;
        Ok(())
    }

    fn finish_battle(
        &mut self,
        result: BattleResult,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let Some(battle) = self.battle.take() else {
            return Ok(());
        };
        let Some(floor) = self.floor.as_mut() else {
            return Err(GameError::WrongScene(self.scene));
        };
        let character = self.character.as_mut().ok_or(GameError::NoCharacter)?;
        tracing::info!(outcome = ?result.outcome, health = result.final_player_health, "battle ended");

        match result.outcome {
            BattleOutcome::Victory => {
                let rewards = battle.rewards;
                character.gold += rewards.gold;
                character.inventory.extend(rewards.loot.iter().cloned());
                floor.map.remove_enemy(battle.enemy_id);
                floor.map.place_player(battle.return_to);
                character.stats.current_health = result.final_player_health;
                let gain = character.gain_xp(rewards.xp);

                events.push(GameEvent::BattleEnded {
                    result,
                    rewards: Some(rewards),
                });
                if gain.levels_gained > 0 {
                    events.push(GameEvent::LeveledUp {
                        level: gain.new_level,
                        levels_gained: gain.levels_gained,
                    });
                }

                if floor.map.is_cleared() {
                    let number = floor.number;
                    character.stats.cleared_floors = character.stats.cleared_floors.max(number);
                    tracing::info!(floor = number, "floor cleared");
                    events.push(GameEvent::FloorCleared { floor: number });
                    self.floor = None;
                    self.set_scene(Scene::Castle, events);
                    return Ok(());
                }
            }
            BattleOutcome::Defeat => {
                floor.map.place_player(floor.map.start_position());
                let max_health = character.effective_stats().max_health;
                character.stats.current_health = (max_health / DEFEAT_HEALTH_DIVISOR).max(1);
                events.push(GameEvent::BattleEnded {
                    result,
                    rewards: None,
                });
            }
        }

        self.set_scene(Scene::Exploration, events);
        Ok(())
    }

    // -- Equipment and stats --------------------------------------------

    fn expect_out_of_combat(&self) -> Result<(), GameError> {
        if self.scene == Scene::Combat {
            Err(GameError::WrongScene(self.scene))
        } else {
            Ok(())
        }
    }

    pub fn equip(&mut self, item_id: u32) -> Result<(), GameError> {
        self.expect_out_of_combat()?;
        self.character_mut_ref()?.equip(item_id)?;
        Ok(())
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<(), GameError> {
        self.expect_out_of_combat()?;
        self.character_mut_ref()?.unequip(slot)?;
        Ok(())
    }

    pub fn allocate(&mut self, allocation: StatAllocation) -> Result<(), GameError> {
        self.expect_out_of_combat()?;
        self.character_mut_ref()?.allocate(allocation)?;
        Ok(())
    }

    // -- Time -----------------------------------------------------------

    /// Advances the game by `elapsed`. `now_ms` is wall-clock unix time,
    /// used only for stamina regeneration.
    pub fn update(&mut self, elapsed: Duration, now_ms: i64, rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.poll_stamina(elapsed, now_ms, &mut events);

        match self.scene {
            Scene::Exploration => self.run_exploration(elapsed, &mut events),
            Scene::Combat => self.run_battle(elapsed, rng, &mut events),
            _ => {}
        }
        events
    }

    fn poll_stamina(&mut self, elapsed: Duration, now_ms: i64, events: &mut Vec<GameEvent>) {
        if self.stamina_clock.advance(elapsed) == 0 {
            return;
        }
        let config = self.config.stamina;
        if let Some(character) = self.character.as_mut() {
            let gained = regenerate(&mut character.stats, now_ms, &config);
            if gained > 0 {
                tracing::debug!(gained, stamina = character.stats.stamina, "stamina regenerated");
                events.push(GameEvent::StaminaRegenerated {
                    gained,
                    stamina: character.stats.stamina,
                });
            }
        }
    }

    fn run_exploration(&mut self, elapsed: Duration, events: &mut Vec<GameEvent>) {
        let steps = self.exploration_clock.advance(elapsed);
        for _ in 0..steps {
            let Some(floor) = self.floor.as_mut() else {
                return;
            };
            if let Some(ExplorationEvent::BattleStarted {
                enemy,
                player_position,
            }) = floor.map.tick()
            {
                if let Err(err) = self.start_battle(enemy, player_position, events) {
                    tracing::warn!(%err, "could not start battle");
                }
                // Remaining ticks belong to a scene that just ended.
                return;
            }
        }
    }

    fn run_battle(&mut self, elapsed: Duration, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        let mut finished = None;
        for event in battle.session.update(elapsed, rng) {
            if let BattleEvent::Finished(result) = event {
                finished = Some(result);
            }
            events.push(GameEvent::Battle(event));
        }
        if let Some(result) = finished {
            if let Err(err) = self.finish_battle(result, events) {
                tracing::warn!(%err, "could not settle battle");
            }
        }
    }
}
