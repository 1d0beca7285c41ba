//! Real-time stamina regeneration.
//!
//! Stamina refills one point per regen interval of wall-clock time. Callers
//! poll [`regenerate`] periodically with the current unix time in
//! milliseconds; partial intervals are carried over to the next poll.

use super::stats::PlayerStats;
use crate::core::config::StaminaConfig;

/// Credits whole intervals elapsed since the last regen step. Returns the
/// number of points actually added.
pub fn regenerate(stats: &mut PlayerStats, now_ms: i64, config: &StaminaConfig) -> u32 {
    if stats.stamina >= stats.max_stamina {
        // A full bar does not bank time.
        stats.last_regen_ms = now_ms;
        return 0;
    }

    let interval = config.regen_interval_ms();
    let elapsed = now_ms - stats.last_regen_ms;
    if interval <= 0 || elapsed < interval {
        return 0;
    }

    let intervals = elapsed / interval;
    let room = stats.max_stamina - stats.stamina;
    let gained = intervals.min(room as i64) as u32;

    stats.stamina += gained;
    if stats.stamina >= stats.max_stamina {
        stats.last_regen_ms = now_ms;
    } else {
        stats.last_regen_ms += intervals * interval;
    }

    gained
}

/// Milliseconds until the next point, or None when already full.
pub fn ms_until_next_point(stats: &PlayerStats, now_ms: i64, config: &StaminaConfig) -> Option<i64> {
    if stats.stamina >= stats.max_stamina {
        return None;
    }
    let elapsed = now_ms - stats.last_regen_ms;
    Some((config.regen_interval_ms() - elapsed).max(0))
}
