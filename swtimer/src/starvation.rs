//! # Starvation Awareness
//!
//! Detects a tick source that has stopped advancing while timers are still
//! being queried, e.g. a gated clock or an interrupt that no longer fires.
//!
//! Every elapsed-time query reports the tick value it observed. If the value
//! stays the same for `invocation_limit` consecutive queries, the timer is
//! starving and the query fails. A limit of zero turns tracking off.
//!
//! Tracking is selected per timer through the [`StarvationGuard`] type
//! parameter. [`Untracked`] is zero-sized and compiles down to nothing.

use crate::error::TimerError;

/// Liveness check run on every elapsed-time query
pub trait StarvationGuard {
    /// Resets tracking when the timer starts at `start_tick`
    fn reset(&mut self, start_tick: u64);

    /// Records a query that observed `tick`
    ///
    /// # Errors
    ///
    /// Returns `TimerError::Starvation` once the tick source is considered
    /// stalled, and keeps returning it until the next `reset`.
    fn observe(&mut self, tick: u64) -> Result<(), TimerError>;

    /// Returns true if starvation has been raised since the last reset
    fn is_starved(&self) -> bool;
}

/// Counts consecutive queries that saw no tick advancement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarvationTracker {
    /// Queries without advancement before starvation is raised, 0 disables
    invocation_limit: u64,
    /// Consecutive queries without advancement, saturating
    invocation_count: u64,
    /// Tick observed at the previous query or at start
    last_tick_count: u64,
    /// Set once starvation has been raised
    starved: bool,
}

impl StarvationTracker {
    /// Creates a tracker, `invocation_limit == 0` disables tracking
    pub const fn new(invocation_limit: u64) -> Self {
        Self {
            invocation_limit,
            invocation_count: 0,
            last_tick_count: 0,
            starved: false,
        }
    }

    /// Returns true if the tracker has a non-zero limit
    pub fn is_enabled(&self) -> bool {
        self.invocation_limit != 0
    }

    pub fn invocation_limit(&self) -> u64 {
        self.invocation_limit
    }

    pub fn invocation_count(&self) -> u64 {
        self.invocation_count
    }

    fn count_invocation(&mut self, tick: u64) {
        if tick == self.last_tick_count {
            self.invocation_count = self.invocation_count.saturating_add(1);
        } else {
            self.invocation_count = 0;
        }
        self.last_tick_count = tick;
    }
}

impl StarvationGuard for StarvationTracker {
    fn reset(&mut self, start_tick: u64) {
        self.last_tick_count = start_tick;
        self.invocation_count = 0;
        self.starved = false;
    }

    fn observe(&mut self, tick: u64) -> Result<(), TimerError> {
        if !self.is_enabled() {
            return Ok(());
        }

        self.count_invocation(tick);

        if !self.starved && self.invocation_count >= self.invocation_limit {
            log::warn!(
                "tick source stalled at {} for {} queries",
                tick,
                self.invocation_count
            );
            self.starved = true;
        }

        if self.starved {
            return Err(TimerError::Starvation {
                invocations: self.invocation_count,
            });
        }
        Ok(())
    }

    fn is_starved(&self) -> bool {
        self.starved
    }
}

/// No starvation tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Untracked;

impl StarvationGuard for Untracked {
    #[inline(always)]
    fn reset(&mut self, _start_tick: u64) {}

    #[inline(always)]
    fn observe(&mut self, _tick: u64) -> Result<(), TimerError> {
        Ok(())
    }

    #[inline(always)]
    fn is_starved(&self) -> bool {
        false
    }
}
