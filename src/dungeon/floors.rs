//! Floor unlocks and stamina costs.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DungeonError {
    #[error("floor {0} does not exist")]
    InvalidFloor(u32),
    #[error("floor {floor} is locked, clear floor {} first", .floor - 1)]
    Locked { floor: u32 },
    #[error("floor needs {required} stamina, only {available} left")]
    InsufficientStamina { required: u32, available: u32 },
}

/// One row of the floor selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorInfo {
    pub number: u32,
    pub unlocked: bool,
    pub cleared: bool,
    pub cost: u32,
    pub can_enter: bool,
}

pub fn floor_cost(floor: u32) -> u32 {
    FLOOR_BASE_COST + FLOOR_COST_PER_LEVEL * floor
}

pub fn is_unlocked(floor: u32, cleared_floors: u32) -> bool {
    floor <= cleared_floors + 1
}

pub fn floors(cleared_floors: u32, stamina: u32) -> Vec<FloorInfo> {
    (1..=MAX_FLOORS)
        .map(|number| {
            let unlocked = is_unlocked(number, cleared_floors);
            let cost = floor_cost(number);
            FloorInfo {
                number,
                unlocked,
                cleared: number <= cleared_floors,
                cost,
                can_enter: unlocked && stamina >= cost,
            }
        })
        .collect()
}

/// Checks that `floor` may be entered and returns its stamina cost.
pub fn check_entry(floor: u32, cleared_floors: u32, stamina: u32) -> Result<u32, DungeonError> {
    if floor == 0 || floor > MAX_FLOORS {
        return Err(DungeonError::InvalidFloor(floor));
    }
    if !is_unlocked(floor, cleared_floors) {
        return Err(DungeonError::Locked { floor });
    }
    let cost = floor_cost(floor);
    if stamina < cost {
        return Err(DungeonError::InsufficientStamina {
            required: cost,
            available: stamina,
        });
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_costs() {
        assert_eq!(floor_cost(1), 7);
        assert_eq!(floor_cost(10), 25);
    }

    #[test]
    fn test_fresh_character_sees_only_first_floor() {
        let list = floors(0, 50);
        assert_eq!(list.len(), 10);
        assert!(list[0].unlocked && list[0].can_enter);
        assert!(!list[0].cleared);
        assert!(list[1..].iter().all(|f| !f.unlocked && !f.can_enter));
    }

    #[test]
    fn test_clearing_unlocks_next() {
        let list = floors(3, 50);
        assert!(list[2].cleared);
        assert!(list[3].unlocked);
        assert!(!list[4].unlocked);
    }

    #[test]
    fn test_low_stamina_blocks_entry() {
        let list = floors(0, 6);
        assert!(list[0].unlocked);
        assert!(!list[0].can_enter);
        assert_eq!(
            check_entry(1, 0, 6),
            Err(DungeonError::InsufficientStamina {
                required: 7,
                available: 6
            })
        );
    }

    #[test]
    fn test_entry_checks() {
        assert_eq!(check_entry(1, 0, 50), Ok(7));
        assert_eq!(check_entry(3, 1, 50), Err(DungeonError::Locked { floor: 3 }));
        assert_eq!(check_entry(0, 5, 50), Err(DungeonError::InvalidFloor(0)));
        assert_eq!(check_entry(11, 10, 50), Err(DungeonError::InvalidFloor(11)));
    }
}
