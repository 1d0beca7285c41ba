//! The live exploration scene: player, enemies and objects on one floor.

use super::engagement::{
    find_collision, respond_to_enemy_click, respond_to_object_click, ClickResponse,
};
use super::movement::{step_enemy, step_player};
use super::types::{InteractiveObject, MapEnemy, Position};
use crate::core::config::MovementConfig;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplorationError {
    #[error("no enemy with id {0} on this map")]
    UnknownEnemy(u32),
    #[error("no object with id {0} on this map")]
    UnknownObject(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExplorationEvent {
    /// The player engaged `enemy`, standing at `player_position`.
    BattleStarted {
        enemy: MapEnemy,
        player_position: Position,
    },
    ObjectInteracted { object: InteractiveObject },
}

#[derive(Debug, Clone)]
pub struct ExplorationMap {
    config: MovementConfig,
    start: Position,
    player: Position,
    target: Option<Position>,
    enemies: Vec<MapEnemy>,
    objects: Vec<InteractiveObject>,
}

impl ExplorationMap {
    pub fn new(
        config: MovementConfig,
        start: Position,
        enemies: Vec<MapEnemy>,
        objects: Vec<InteractiveObject>,
    ) -> Self {
        Self {
            config,
            start,
            player: start,
            target: Some(start),
            enemies,
            objects,
        }
    }

    pub fn player_position(&self) -> Position {
        self.player
    }

    pub fn target(&self) -> Option<Position> {
        self.target
    }

    pub fn start_position(&self) -> Position {
        self.start
    }

    pub fn enemies(&self) -> &[MapEnemy] {
        &self.enemies
    }

    pub fn objects(&self) -> &[InteractiveObject] {
        &self.objects
    }

    pub fn enemy(&self, id: u32) -> Option<&MapEnemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn is_cleared(&self) -> bool {
        self.enemies.is_empty()
    }

    /// One fixed tick: move the player, move the enemies, then check for
    /// collisions. At most one battle starts per tick.
    pub fn tick(&mut self) -> Option<ExplorationEvent> {
        if let Some(target) = self.target {
            self.player = step_player(self.player, target, &self.config);
        }

        for enemy in &mut self.enemies {
            enemy.position = step_enemy(enemy.position, self.player, &self.config);
        }

        find_collision(self.player, &self.enemies, &self.config).map(|index| {
            ExplorationEvent::BattleStarted {
                enemy: self.enemies[index].clone(),
                player_position: self.player,
            }
        })
    }

    pub fn set_target(&mut self, target: Position) {
        self.target = Some(target);
    }

    /// A click on empty ground, in map coordinates. The target is offset so
    /// the player's tile ends up centred on the click.
    pub fn click_map(&mut self, point: Position) {
        let half = self.config.tile_size / 2.0;
        self.target = Some(Position::new(point.x - half, point.y - half));
    }

    pub fn click_enemy(&mut self, id: u32) -> Result<Option<ExplorationEvent>, ExplorationError> {
        let enemy = self
            .enemy(id)
            .ok_or(ExplorationError::UnknownEnemy(id))?;

        match respond_to_enemy_click(self.player, enemy, &self.config) {
            ClickResponse::Act => Ok(Some(ExplorationEvent::BattleStarted {
                enemy: enemy.clone(),
                player_position: self.player,
            })),
            ClickResponse::WalkTo(position) => {
                self.target = Some(position);
                Ok(None)
            }
            ClickResponse::Ignore => Ok(None),
        }
    }

    pub fn click_object(&mut self, id: u32) -> Result<Option<ExplorationEvent>, ExplorationError> {
        let object = self
            .objects
            .iter()
            .find(|o| o.id == id)
            .ok_or(ExplorationError::UnknownObject(id))?;

        match respond_to_object_click(self.player, object, &self.config) {
            ClickResponse::Act => Ok(Some(ExplorationEvent::ObjectInteracted {
                object: object.clone(),
            })),
            ClickResponse::WalkTo(position) => {
                self.target = Some(position);
                Ok(None)
            }
            ClickResponse::Ignore => Ok(None),
        }
    }

    pub fn remove_enemy(&mut self, id: u32) -> Option<MapEnemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    /// Marks an object as used. Returns false if it was already opened.
    pub fn open_object(&mut self, id: u32) -> Result<bool, ExplorationError> {
        let object = self
            .objects
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(ExplorationError::UnknownObject(id))?;
        let first_time = !object.opened;
        object.opened = true;
        Ok(first_time)
    }

    /// Puts the player at `position` with no pending movement.
    pub fn place_player(&mut self, position: Position) {
        self.player = position;
        self.target = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exploration::types::ObjectKind;

    fn goblin(id: u32, x: f64, y: f64) -> MapEnemy {
        MapEnemy {
            id,
            name: "Goblin".to_string(),
            max_health: 30,
            position: Position::new(x, y),
            opponent_count: 1,
            xp_yield: 25,
            gold_yield: 10,
            loot: None,
            is_boss: false,
        }
    }

    fn map_with(enemies: Vec<MapEnemy>, objects: Vec<InteractiveObject>) -> ExplorationMap {
        ExplorationMap::new(
            MovementConfig::default(),
            Position::new(100.0, 100.0),
            enemies,
            objects,
        )
    }

    #[test]
    fn test_idle_map_tick_does_nothing() {
        let mut map = map_with(vec![goblin(1, 600.0, 400.0)], vec![]);
        assert!(map.tick().is_none());
        assert_eq!(map.player_position(), Position::new(100.0, 100.0));
        assert_eq!(map.enemies()[0].position, Position::new(600.0, 400.0));
    }

    #[test]
    fn test_auto_engage_on_next_tick() {
        let mut map = map_with(vec![goblin(1, 100.0, 132.0)], vec![]);
        match map.tick() {
            Some(ExplorationEvent::BattleStarted {
                enemy,
                player_position,
            }) => {
                assert_eq!(enemy.id, 1);
                assert_eq!(player_position, Position::new(100.0, 100.0));
            }
            other => panic!("expected battle, got {:?}", other),
        }
    }

    #[test]
    fn test_enemy_closes_distance_until_engaged() {
        let mut map = map_with(vec![goblin(1, 200.0, 100.0)], vec![]);
        let mut ticks = 0;
        let event = loop {
            ticks += 1;
            if let Some(event) = map.tick() {
                break event;
            }
            assert!(ticks < 200, "enemy never reached the player");
        };
        assert!(matches!(event, ExplorationEvent::BattleStarted { .. }));
        // (100 - 32) / 1.5 rounded up
        assert_eq!(ticks, 46);
    }

    #[test]
    fn test_click_map_centres_tile() {
        let mut map = map_with(vec![], vec![]);
        map.click_map(Position::new(300.0, 220.0));
        assert_eq!(map.target(), Some(Position::new(280.0, 200.0)));
    }

    #[test]
    fn test_click_far_enemy_sets_target() {
        let mut map = map_with(vec![goblin(7, 500.0, 500.0)], vec![]);
        assert_eq!(map.click_enemy(7), Ok(None));
        assert_eq!(map.target(), Some(Position::new(500.0, 500.0)));
    }

    #[test]
    fn test_click_adjacent_enemy_engages() {
        let mut map = map_with(vec![goblin(7, 150.0, 100.0)], vec![]);
        assert!(matches!(
            map.click_enemy(7),
            Ok(Some(ExplorationEvent::BattleStarted { .. }))
        ));
    }

    #[test]
    fn test_click_unknown_enemy() {
        let mut map = map_with(vec![], vec![]);
        assert_eq!(map.click_enemy(3), Err(ExplorationError::UnknownEnemy(3)));
    }

    #[test]
    fn test_object_interaction_is_one_shot() {
        let chest = InteractiveObject::new(1, ObjectKind::Chest, Position::new(120.0, 100.0));
        let mut map = map_with(vec![], vec![chest]);

        assert!(matches!(
            map.click_object(1),
            Ok(Some(ExplorationEvent::ObjectInteracted { .. }))
        ));
        assert_eq!(map.open_object(1), Ok(true));
        assert_eq!(map.click_object(1), Ok(None));
        assert_eq!(map.open_object(1), Ok(false));
    }

    #[test]
    fn test_remove_enemy() {
        let mut map = map_with(vec![goblin(1, 500.0, 500.0), goblin(2, 600.0, 500.0)], vec![]);
        assert_eq!(map.remove_enemy(1).map(|e| e.id), Some(1));
        assert!(map.remove_enemy(1).is_none());
        assert!(!map.is_cleared());
        map.remove_enemy(2);
        assert!(map.is_cleared());
    }

    #[test]
    fn test_place_player_clears_movement() {
        let mut map = map_with(vec![], vec![]);
        map.set_target(Position::new(500.0, 500.0));
        map.place_player(Position::new(50.0, 50.0));
        map.tick();
        assert_eq!(map.player_position(), Position::new(50.0, 50.0));
    }
}
