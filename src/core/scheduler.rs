//! Virtual-time timers.
//!
//! Nothing here reads the wall clock: time only moves when the owner calls
//! [`Scheduler::advance`] or [`FixedTimestep::advance`], which keeps battle
//! pacing and the exploration loop deterministic under test.

use std::time::Duration;

#[derive(Debug, Clone)]
struct Timer<T> {
    due_ms: u64,
    seq: u64,
    payload: T,
}

/// One-shot timers ordered by due time, then by scheduling order.
///
/// Due timers are drained one at a time with [`Scheduler::pop_due`] so a
/// handler may schedule follow-up timers that fall inside the same advance.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    horizon_ms: u64,
    next_seq: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            horizon_ms: 0,
            next_seq: 0,
            timers: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u64, payload: T) {
        let timer = Timer {
            due_ms: self.now_ms + delay_ms,
            seq: self.next_seq,
            payload,
        };
        self.next_seq += 1;
        self.timers.push(timer);
    }

    /// Moves the horizon forward. Timers due at or before it become poppable.
    pub fn advance(&mut self, elapsed: Duration) {
        self.horizon_ms = self.now_ms + elapsed.as_millis() as u64;
    }

    /// Pops the earliest timer due within the horizon and moves `now` to its
    /// due time. Once nothing is due, `now` catches up to the horizon.
    pub fn pop_due(&mut self) -> Option<T> {
        let next = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= self.horizon_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(index, _)| index);

        match next {
            Some(index) => {
                let timer = self.timers.swap_remove(index);
                self.now_ms = self.now_ms.max(timer.due_ms);
                Some(timer.payload)
            }
            None => {
                self.now_ms = self.now_ms.max(self.horizon_ms);
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }
}

/// Recurring fixed-rate timer, stopped by default.
///
/// While stopped, elapsed time is discarded rather than banked, so a loop
/// restarted after a scene change never fires a burst of stale ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    accumulated: Duration,
    running: bool,
    max_steps_per_advance: u32,
}

impl FixedTimestep {
    pub fn new(step: Duration, max_steps_per_advance: u32) -> Self {
        Self {
            step,
            accumulated: Duration::ZERO,
            running: false,
            max_steps_per_advance,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns how many whole steps elapsed. Steps past the catch-up limit
    /// are dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running || self.step.is_zero() {
            return 0;
        }
        self.accumulated += elapsed;
        let mut steps = 0;
        while self.accumulated >= self.step {
            self.accumulated -= self.step;
            steps += 1;
            if steps == self.max_steps_per_advance {
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(scheduler: &mut Scheduler<T>, elapsed_ms: u64) -> Vec<T> {
        scheduler.advance(Duration::from_millis(elapsed_ms));
        let mut fired = Vec::new();
        while let Some(payload) = scheduler.pop_due() {
            fired.push(payload);
        }
        fired
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(300, "late");
        scheduler.schedule(100, "early");
        scheduler.schedule(100, "early-second");

        assert!(drain(&mut scheduler, 50).is_empty());
        assert_eq!(drain(&mut scheduler, 100), vec!["early", "early-second"]);
        assert_eq!(drain(&mut scheduler, 500), vec!["late"]);
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.now_ms(), 650);
    }

    #[test]
    fn test_follow_up_within_same_advance() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(100, 1u32);
        scheduler.advance(Duration::from_millis(1000));

        let mut fired = Vec::new();
        while let Some(n) = scheduler.pop_due() {
            fired.push(n);
            if n < 3 {
                // scheduled relative to the popped timer's due time
                scheduler.schedule(200, n + 1);
            }
        }
        assert_eq!(fired, vec![1, 2, 3]);
        assert_eq!(scheduler.now_ms(), 1000);
    }

    #[test]
    fn test_zero_delay_fires_on_next_pop() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0, ());
        assert_eq!(drain(&mut scheduler, 0).len(), 1);
    }

    #[test]
    fn test_clear_drops_pending_timers() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10, 1);
        scheduler.schedule(20, 2);
        scheduler.clear();
        assert!(scheduler.is_idle());
        assert!(drain(&mut scheduler, 100).is_empty());
    }

    #[test]
    fn test_fixed_timestep_counts_steps() {
        let mut step = FixedTimestep::new(Duration::from_millis(10), 100);
        assert_eq!(step.advance(Duration::from_millis(50)), 0);

        step.start();
        assert_eq!(step.advance(Duration::from_millis(25)), 2);
        assert_eq!(step.advance(Duration::from_millis(5)), 1);
    }

    #[test]
    fn test_fixed_timestep_stop_discards_remainder() {
        let mut step = FixedTimestep::new(Duration::from_millis(10), 100);
        step.start();
        step.advance(Duration::from_millis(9));
        step.stop();
        assert!(!step.is_running());
        step.start();
        assert_eq!(step.advance(Duration::from_millis(1)), 0);
    }

    #[test]
    fn test_fixed_timestep_catch_up_limit() {
        let mut step = FixedTimestep::new(Duration::from_millis(10), 3);
        step.start();
        assert_eq!(step.advance(Duration::from_secs(5)), 3);
        assert_eq!(step.advance(Duration::from_millis(10)), 1);
    }
}
