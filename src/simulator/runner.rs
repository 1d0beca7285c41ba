//! Auto-play driver built on the real [`Game`] API.
//!
//! Each run creates a character, walks the castle menus, pays for floors,
//! fights everything it meets with a simple skill policy and waits out
//! stamina when it runs dry. Statistics come from the emitted [`GameEvent`]s.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::character::{Character, PlayerClass, StatAllocation};
use crate::combat::{BattleOutcome, BattleSession, SkillKind};
use crate::core::game::{Game, GameEvent, ObjectReward, Scene};
use crate::exploration::ExplorationMap;
use crate::items::EquipmentSlot;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// Below this share of max health the policy heals.
pub const HEAL_THRESHOLD: f64 = 0.35;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let classes = config.classes_to_run();
    let mut all_runs = Vec::with_capacity(config.num_runs as usize * classes.len());

    for (class_idx, class) in classes.iter().enumerate() {
        for run_idx in 0..config.num_runs {
            let mut rng = match config.seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(
                    seed + class_idx as u64 * 1_000_000 + run_idx as u64,
                ),
                None => ChaCha8Rng::from_entropy(),
            };

            let run = simulate_single_run(*class, config, &mut rng);
            if config.verbosity >= 2 {
                println!(
                    "{} run {}/{} - Level {}, Floors {}, Wins {}, Losses {}, Gold {}",
                    class.name(),
                    run_idx + 1,
                    config.num_runs,
                    run.final_level,
                    run.floors_cleared,
                    run.victories,
                    run.defeats,
                    run.gold
                );
            }
            all_runs.push(run);
        }
    }

    SimReport::from_runs(all_runs, config.target_floor)
}

/// Plays one character until the target floor is cleared or the update
/// budget runs out.
pub fn simulate_single_run(class: PlayerClass, config: &SimConfig, rng: &mut ChaCha8Rng) -> RunStats {
    let mut stats = RunStats::new(class);
    let mut game = match Game::new(config.game) {
        Ok(game) => game,
        Err(err) => {
            tracing::warn!(%err, "rejected game config");
            return stats;
        }
    };
    let mut now_ms: i64 = 0;
    let tick = config.game.movement.tick_interval();
    let wait = Duration::from_secs(config.game.stamina.poll_interval_secs.max(1));

    if game.select_class(class, now_ms).is_err() {
        return stats;
    }

    while stats.updates < config.max_updates_per_run {
        let cleared = game.character().map_or(0, |c| c.stats.cleared_floors);
        if cleared >= config.target_floor {
            stats.reached_target = true;
            break;
        }

        let mut elapsed = tick;
        match game.scene() {
            Scene::ClassSelection => break,
            Scene::Castle => {
                apply_upkeep(&mut game, &mut stats);
                let _ = game.open_dungeon_selection();
                elapsed = Duration::ZERO;
            }
            Scene::DungeonSelection => {
                let target = (cleared + 1).min(config.target_floor);
                let can_enter = game
                    .floors()
                    .iter()
                    .any(|f| f.number == target && f.can_enter);
                if can_enter && game.select_floor(target, now_ms, rng).is_ok() {
                    elapsed = Duration::ZERO;
                } else {
                    elapsed = wait;
                    stats.seconds_waited += wait.as_secs();
                }
            }
            Scene::Exploration => {
                if let Some(map) = game.map() {
                    let action = plan_exploration(map);
                    let events = match action {
                        ExploreAction::Object(id) => game.click_object(id, rng),
                        ExploreAction::Enemy(id) => game.click_enemy(id),
                        ExploreAction::Leave => game.leave_floor(),
                    };
                    if let Ok(events) = events {
                        stats.record(&events);
                    }
                }
            }
            Scene::Combat => {
                if let Some(slot) = game.battle().and_then(choose_skill) {
                    let _ = game.select_skill(slot);
                }
            }
        }

        now_ms += elapsed.as_millis() as i64;
        let events = game.update(elapsed, now_ms, rng);
        stats.record(&events);
        stats.updates += 1;
    }

    if let Some(character) = game.character() {
        stats.final_level = character.stats.level;
        stats.floors_cleared = character.stats.cleared_floors;
        stats.gold = character.gold;
    }
    stats.seconds_played = (now_ms / 1000) as u64;
    stats
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreAction {
    Object(u32),
    Enemy(u32),
    Leave,
}

/// Nearest unopened object first, then the nearest enemy.
pub fn plan_exploration(map: &ExplorationMap) -> ExploreAction {
    let player = map.player_position();
    let nearest_object = map
        .objects()
        .iter()
        .filter(|o| !o.opened)
        .min_by(|a, b| {
            player
                .distance_to(a.position)
                .total_cmp(&player.distance_to(b.position))
        });
    if let Some(object) = nearest_object {
        return ExploreAction::Object(object.id);
    }

    map.enemies()
        .iter()
        .min_by(|a, b| {
            player
                .distance_to(a.position)
                .total_cmp(&player.distance_to(b.position))
        })
        .map_or(ExploreAction::Leave, |e| ExploreAction::Enemy(e.id))
}

/// Heal when low, sweep groups with area skills, otherwise hit hardest.
pub fn choose_skill(session: &BattleSession) -> Option<usize> {
    if !session.accepts_input() {
        return None;
    }
    let battle = session.battle();
    let skills = session.skills();
    let health = battle.player_health() as f64 / battle.player().max_health.max(1) as f64;
    let living = battle.opponents().iter().filter(|o| o.is_alive()).count();

    let find = |pred: fn(&SkillKind) -> bool| skills.iter().position(|s| pred(&s.kind));

    if health < HEAL_THRESHOLD {
        if let Some(slot) = find(|k| matches!(k, SkillKind::Heal { .. })) {
            return Some(slot);
        }
    }
    if living >= 2 {
        if let Some(slot) = find(|k| matches!(k, SkillKind::Aoe { .. })) {
            return Some(slot);
        }
    }

    skills
        .iter()
        .enumerate()
        .filter_map(|(slot, skill)| match skill.kind {
            SkillKind::Damage { multiplier } => Some((slot, multiplier.unwrap_or(1.0))),
            _ => None,
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(slot, _)| slot)
}

/// Equips upgrades and spends points, counting what the game accepted.
pub fn apply_upkeep(game: &mut Game, stats: &mut RunStats) {
    let Some(character) = game.character() else {
        return;
    };
    let (equips, allocation) = plan_upkeep(character);
    for item_id in equips {
        match game.equip(item_id) {
            Ok(()) => stats.upgrades_equipped += 1,
            Err(err) => tracing::debug!(%err, item_id, "equip skipped"),
        }
    }
    if let Some(allocation) = allocation {
        match game.allocate(allocation) {
            Ok(()) => stats.points_allocated += allocation.total().unwrap_or(0),
            Err(err) => tracing::debug!(%err, ?allocation, "allocation skipped"),
        }
    }
}

/// Items worth equipping and how to spend unallocated points.
pub fn plan_upkeep(character: &Character) -> (Vec<u32>, Option<StatAllocation>) {
    let mut equips = Vec::new();
    for slot in EquipmentSlot::all() {
        let current = character
            .equipment
            .get(slot)
            .map_or(0, |item| item.stats.total());
        let best = character
            .inventory
            .iter()
            .filter(|item| item.slot == slot)
            .max_by_key(|item| item.stats.total());
        if let Some(item) = best {
            if item.stats.total() > current {
                equips.push(item.id);
            }
        }
    }

    let points = character.stats.unallocated_points;
    let allocation = (points > 0).then(|| {
        let vit = points / 3;
        let rest = points - vit;
        match character.class() {
            PlayerClass::Warrior => StatAllocation::new(rest, vit, 0),
            PlayerClass::Mage => StatAllocation::new(0, vit, rest),
            PlayerClass::Ranger => StatAllocation::new(rest - rest / 2, vit, rest / 2),
        }
    });

    (equips, allocation)
}

impl RunStats {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::BattleEnded { result, .. } => match result.outcome {
                    BattleOutcome::Victory => self.victories += 1,
                    BattleOutcome::Defeat => self.defeats += 1,
                },
                GameEvent::ObjectInteracted {
                    reward: ObjectReward::Gold(gold),
                    ..
                } => self.chest_gold += gold,
                GameEvent::LeveledUp { levels_gained, .. } => self.level_ups += levels_gained,
                _ => {}
            }
        }
    }
}
