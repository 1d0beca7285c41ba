use crate::items::Item;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An enemy placed on the exploration map. Engaging it starts a battle
/// against `opponent_count` opponents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEnemy {
    pub id: u32,
    pub name: String,
    pub max_health: u32,
    pub position: Position,
    pub opponent_count: u32,
    pub xp_yield: u64,
    pub gold_yield: u64,
    pub loot: Option<Vec<Item>>,
    pub is_boss: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Chest,
    Shrine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub position: Position,
    pub opened: bool,
}

impl InteractiveObject {
    pub fn new(id: u32, kind: ObjectKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            opened: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn test_new_object_is_closed() {
        let chest = InteractiveObject::new(1, ObjectKind::Chest, Position::new(10.0, 10.0));
        assert!(!chest.opened);
    }
}
