//! XP, leveling and stat point allocation.

use super::derived_stats::{max_health_for, EffectiveStats};
use super::stats::PlayerStats;
use crate::core::constants::*;
use crate::items::EquippedItems;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("cannot allocate {requested} points, only {available} available")]
    InsufficientPoints { requested: u32, available: u32 },
    #[error("allocation is empty")]
    NothingAllocated,
}

/// Points to move from the unallocated pool into each stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatAllocation {
    pub str: u32,
    pub vit: u32,
    pub int: u32,
}

impl StatAllocation {
    pub fn new(str: u32, vit: u32, int: u32) -> Self {
        Self { str, vit, int }
    }

    /// Points requested across all stats, or None if the sum overflows.
    pub fn total(&self) -> Option<u32> {
        self.str.checked_add(self.vit)?.checked_add(self.int)
    }
}

/// What a call to [`apply_xp`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGain {
    pub levels_gained: u32,
    pub new_level: u32,
}

pub fn next_threshold(threshold: u64) -> u64 {
    (threshold as f64 * XP_THRESHOLD_GROWTH).floor() as u64
}

/// Adds XP and levels up as many times as the total allows. Each level grants
/// stat and skill points; any level-up restores health to the effective max.
pub fn apply_xp(stats: &mut PlayerStats, equipment: &EquippedItems, amount: u64) -> XpGain {
    stats.xp += amount;

    let mut levels_gained = 0;
    while stats.xp_to_next_level > 0 && stats.xp >= stats.xp_to_next_level {
        stats.xp -= stats.xp_to_next_level;
        stats.xp_to_next_level = next_threshold(stats.xp_to_next_level);
        stats.level += 1;
        stats.unallocated_points += LEVEL_UP_STAT_POINTS;
        stats.skill_points += LEVEL_UP_SKILL_POINTS;
        levels_gained += 1;
    }

    if levels_gained > 0 {
        stats.current_health = EffectiveStats::calculate(stats, equipment).max_health;
        tracing::info!(
            level = stats.level,
            levels_gained,
            next = stats.xp_to_next_level,
            "level up"
        );
    }

    XpGain {
        levels_gained,
        new_level: stats.level,
    }
}

/// Spends unallocated points. Rejected as a whole if the pool is too small.
/// Health grows by the max-health gained from vitality, capped at the new max.
pub fn allocate_stats(
    stats: &mut PlayerStats,
    equipment: &EquippedItems,
    allocation: StatAllocation,
) -> Result<(), ProgressionError> {
    let Some(requested) = allocation.total() else {
        return Err(ProgressionError::InsufficientPoints {
            requested: u32::MAX,
            available: stats.unallocated_points,
        });
    };
    if requested == 0 {
        return Err(ProgressionError::NothingAllocated);
    }
    if requested > stats.unallocated_points {
        return Err(ProgressionError::InsufficientPoints {
            requested,
            available: stats.unallocated_points,
        });
    }

    stats.unallocated_points -= requested;
    stats.str = stats.str.saturating_add(allocation.str);
    stats.vit = stats.vit.saturating_add(allocation.vit);
    stats.int = stats.int.saturating_add(allocation.int);

    let max_health = EffectiveStats::calculate(stats, equipment).max_health;
    stats.current_health = stats
        .current_health
        .saturating_add(max_health_for(allocation.vit))
        .min(max_health);
    Ok(())
}
