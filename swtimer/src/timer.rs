//! # Elapsed Timer
//!
//! A software timer measuring the time since its last start on a shared
//! [`TickSource`].
//!
//! ## Wraparound
//!
//! The tick counter cycles modulo `mask + 1`. Elapsed ticks are computed
//! modulo the same period, which is exact as long as the counter wrapped at
//! most once between `start` and the query. Callers must query at least once
//! per wrap period; a longer gap silently loses whole periods.
//!
//! ## States
//!
//! ```text
//! Ready --start--> Running --elapsed--> Running
//!                     ^                    |
//!                     +------start------ Starved
//! ```

use core::time::Duration;

use hal::TimerDevice;
use swtimer_sys::{TickCounter, TickSource};

use crate::error::TimerError;
use crate::resolution::{Resolution, NS_PER_S};
use crate::starvation::{StarvationGuard, StarvationTracker, Untracked};

/// Lifecycle state of an [`ElapsedTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Constructed but never started
    Ready,
    /// Started, queries return elapsed time
    Running,
    /// Starvation was detected, `start` is needed to recover
    Starved,
}

/// Ticks from `start_tick` to `now` on a counter wrapping at `mask`
///
/// Equal to `now - start_tick` when `start_tick <= now` and to
/// `(mask - start_tick) + now + 1` otherwise. Values above `mask` are
/// reduced modulo the counter period instead of overflowing.
pub fn elapsed_ticks(mask: u64, start_tick: u64, now: u64) -> u64 {
    now.wrapping_sub(start_tick) & mask
}

/// Software timer bound to a tick source
///
/// The tick duration and mask are copied from the source when the timer is
/// created and never re-read.
///
/// # Examples
///
/// ```
/// use swtimer::{ElapsedTimer, Resolution};
/// use swtimer_sys::TickSource;
///
/// // 1 ms ticks on a 16-bit counter
/// let source = TickSource::new(1_000_000, 16).unwrap();
/// let mut timer = ElapsedTimer::new(&source, 10);
/// timer.start();
///
/// source.advance(1_500).unwrap();
/// assert_eq!(timer.elapsed(Resolution::Secs).unwrap(), 1);
/// assert_eq!(timer.elapsed(Resolution::Millis).unwrap(), 1_500);
/// ```
#[derive(Debug)]
pub struct ElapsedTimer<'a, D = TickCounter, S = StarvationTracker> {
    source: &'a TickSource<D>,
    start_tick: u64,
    tick_duration_ns: u64,
    mask: u64,
    started: bool,
    starvation: S,
}

impl<'a, D: TimerDevice> ElapsedTimer<'a, D, StarvationTracker> {
    /// Creates a timer with starvation tracking
    ///
    /// `invocation_limit` is the number of consecutive queries without tick
    /// advancement that count as starvation. Zero disables tracking.
    pub fn new(source: &'a TickSource<D>, invocation_limit: u64) -> Self {
        Self::with_guard(source, StarvationTracker::new(invocation_limit))
    }
}

impl<'a, D: TimerDevice> ElapsedTimer<'a, D, Untracked> {
    /// Creates a timer without starvation tracking
    pub fn untracked(source: &'a TickSource<D>) -> Self {
        Self::with_guard(source, Untracked)
    }
}

impl<'a, D: TimerDevice, S: StarvationGuard> ElapsedTimer<'a, D, S> {
    /// Creates a timer with the given starvation guard
    pub fn with_guard(source: &'a TickSource<D>, starvation: S) -> Self {
        Self {
            source,
            start_tick: 0,
            tick_duration_ns: source.tick_duration_ns(),
            mask: source.mask(),
            started: false,
            starvation,
        }
    }

    /// Starts (or restarts) the timer at the current tick
    pub fn start(&mut self) {
        self.start_tick = self.source.current();
        self.started = true;
        self.starvation.reset(self.start_tick);
        log::trace!("timer started at tick {}", self.start_tick);
    }

    /// Returns the time elapsed since the last start
    ///
    /// Before the first start, time is measured from tick 0.
    ///
    /// # Errors
    ///
    /// - `TimerError::Starvation` if the tick source has stopped advancing.
    ///   No duration is returned and the timer stays starved until restarted.
    /// - `TimerError::ConversionOverflow` if the result does not fit in `u64`.
    pub fn elapsed(&mut self, resolution: Resolution) -> Result<u64, TimerError> {
        let ticks = self.poll_elapsed_ticks()?;
        resolution
            .convert(ticks, self.tick_duration_ns)
            .ok_or(TimerError::ConversionOverflow { ticks, resolution })
    }

    /// Returns the time elapsed since the last start as a [`Duration`]
    ///
    /// Same semantics as [`ElapsedTimer::elapsed`], with nanosecond
    /// precision.
    pub fn elapsed_duration(&mut self) -> Result<Duration, TimerError> {
        let ticks = self.poll_elapsed_ticks()?;
        let nanos = u128::from(ticks) * u128::from(self.tick_duration_ns);
        let ns_per_s = u128::from(NS_PER_S);

        let secs = u64::try_from(nanos / ns_per_s).map_err(|_| TimerError::ConversionOverflow {
            ticks,
            resolution: Resolution::Secs,
        })?;
        Ok(Duration::new(secs, (nanos % ns_per_s) as u32))
    }

    /// Returns the lifecycle state
    pub fn state(&self) -> TimerState {
        if self.starvation.is_starved() {
            TimerState::Starved
        } else if self.started {
            TimerState::Running
        } else {
            TimerState::Ready
        }
    }

    /// Returns the tick captured by the last start
    pub fn start_tick(&self) -> u64 {
        self.start_tick
    }

    /// Returns the tick duration copied from the source
    pub fn tick_duration_ns(&self) -> u64 {
        self.tick_duration_ns
    }

    /// Returns the wraparound mask copied from the source
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Returns the starvation guard
    pub fn starvation(&self) -> &S {
        &self.starvation
    }

    fn poll_elapsed_ticks(&mut self) -> Result<u64, TimerError> {
        let now = self.source.current();
        let ticks = elapsed_ticks(self.mask, self.start_tick, now);
        self.starvation.observe(now)?;
        Ok(ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn test_elapsed_ticks_without_wrap() {
        assert_eq!(elapsed_ticks(255, 10, 250), 240);
        assert_eq!(elapsed_ticks(255, 42, 42), 0);
    }

    #[test]
    fn test_elapsed_ticks_with_wrap() {
        // (255 - 250) + 10 + 1
        assert_eq!(elapsed_ticks(255, 250, 10), 16);
        assert_eq!(elapsed_ticks(255, 255, 0), 1);
        assert_eq!(elapsed_ticks(u64::MAX, u64::MAX, 0), 1);
        assert_eq!(elapsed_ticks(u64::MAX, 1, 0), u64::MAX);
    }

    #[test]
    fn test_elapsed_ticks_matches_two_branch_formula() {
        for bits in 2u32..=64 {
            let mask = u64::MAX >> (64 - bits);
            let samples = [0, 1, mask / 3, mask / 2, mask - 1, mask];
            for &start in &samples {
                for &now in &samples {
                    let expected = if start <= now {
                        now - start
                    } else {
                        (mask - start) + now + 1
                    };
                    assert_eq!(elapsed_ticks(mask, start, now), expected);
                }
            }
        }
    }

    #[test]
    fn test_timer_copies_source_parameters() {
        let source = TickSource::new(250, 12).unwrap();
        let timer = ElapsedTimer::new(&source, 0);
        assert_eq!(timer.tick_duration_ns(), 250);
        assert_eq!(timer.mask(), 0xFFF);
        assert_eq!(timer.state(), TimerState::Ready);
    }

    #[test]
    fn test_start_captures_current_tick() {
        let source = TickSource::new(1_000, 16).unwrap();
        source.advance(40).unwrap();

        let mut timer = ElapsedTimer::new(&source, 0);
        timer.start();
        assert_eq!(timer.start_tick(), 40);
        assert_eq!(timer.state(), TimerState::Running);

        source.advance(60).unwrap();
        assert_eq!(timer.elapsed(Resolution::Tick), Ok(60));
    }

    #[test]
    fn test_elapsed_before_start_counts_from_zero() {
        let source = TickSource::new(1_000, 16).unwrap();
        source.advance(25).unwrap();

        let mut timer = ElapsedTimer::untracked(&source);
        assert_eq!(timer.elapsed(Resolution::Tick), Ok(25));
        assert_eq!(timer.state(), TimerState::Ready);
    }

    #[test]
    fn test_elapsed_resolutions() {
        let source = TickSource::new(1_000, 32).unwrap();
        let mut timer = ElapsedTimer::new(&source, 0);
        timer.start();
        source.advance(5_000).unwrap();

        assert_eq!(timer.elapsed(Resolution::Tick), Ok(5_000));
        assert_eq!(timer.elapsed(Resolution::Nanos), Ok(5_000_000));
        assert_eq!(timer.elapsed(Resolution::Micros), Ok(5_000));
        assert_eq!(timer.elapsed(Resolution::Millis), Ok(5));
        assert_eq!(timer.elapsed(Resolution::Secs), Ok(0));
    }

    #[test]
    fn test_elapsed_across_wraparound() {
        let source = TickSource::new(1, 8).unwrap();
        source.advance(250).unwrap();

        let mut timer = ElapsedTimer::new(&source, 0);
        timer.start();
        source.advance(16).unwrap();

        assert_eq!(source.current(), 10);
        assert_eq!(timer.elapsed(Resolution::Tick), Ok(16));
    }

    #[test]
    fn test_restart_resets_start_tick() {
        let source = TickSource::new(1, 16).unwrap();
        let mut timer = ElapsedTimer::new(&source, 0);
        timer.start();
        source.advance(100).unwrap();
        assert_eq!(timer.elapsed(Resolution::Tick), Ok(100));

        timer.start();
        assert_eq!(timer.elapsed(Resolution::Tick), Ok(0));
        source.advance(5).unwrap();
        assert_eq!(timer.elapsed(Resolution::Tick), Ok(5));
    }

    #[test]
    fn test_starvation_on_stalled_source() {
        let source = TickSource::new(1_000, 16).unwrap();
        let mut timer = ElapsedTimer::new(&source, 3);
        timer.start();

        assert_eq!(timer.elapsed(Resolution::Tick), Ok(0));
        assert_eq!(timer.elapsed(Resolution::Tick), Ok(0));
        assert_eq!(
            timer.elapsed(Resolution::Tick),
            Err(TimerError::Starvation { invocations: 3 })
        );
        assert_eq!(timer.state(), TimerState::Starved);

        // Stays faulted until restarted
        source.advance(1).unwrap();
        assert!(timer.elapsed(Resolution::Tick).is_err());
        assert!(timer.elapsed_duration().is_err());

        timer.start();
        assert_eq!(timer.state(), TimerState::Running);
        source.advance(1).unwrap();
        assert_eq!(timer.elapsed(Resolution::Tick), Ok(1));
    }

    #[test]
    fn test_advancing_source_does_not_starve() {
        let source = TickSource::new(1_000, 16).unwrap();
        let mut timer = ElapsedTimer::new(&source, 2);
        timer.start();

        for expected in 1..=100 {
            source.advance(1).unwrap();
            assert_eq!(timer.elapsed(Resolution::Tick), Ok(expected));
        }
    }

    #[test]
    fn test_untracked_timer_never_starves() {
        let source = TickSource::new(1_000, 16).unwrap();
        let mut timer = ElapsedTimer::untracked(&source);
        timer.start();
        for _ in 0..100 {
            assert_eq!(timer.elapsed(Resolution::Tick), Ok(0));
        }
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn test_conversion_overflow() {
        let source = TickSource::new(u64::MAX, 64).unwrap();
        let mut timer = ElapsedTimer::new(&source, 0);
        timer.start();
        source.advance(2).unwrap();

        assert_eq!(
            timer.elapsed(Resolution::Nanos),
            Err(TimerError::ConversionOverflow {
                ticks: 2,
                resolution: Resolution::Nanos,
            })
        );
        assert_eq!(timer.elapsed(Resolution::Tick), Ok(2));
        assert_eq!(
            timer.elapsed(Resolution::Secs),
            Ok(((2 * u128::from(u64::MAX)) / 1_000_000_000) as u64)
        );
    }

    #[test]
    fn test_elapsed_duration() {
        let source = TickSource::new(30_517, 24).unwrap();
        let mut timer = ElapsedTimer::new(&source, 0);
        timer.start();
        source.advance(65_536).unwrap();

        let expected_ns = 65_536u64 * 30_517;
        assert_eq!(timer.elapsed_duration(), Ok(Duration::from_nanos(expected_ns)));
    }

    #[test]
    fn test_polled_source() {
        let hw = Cell::new(0xFFF0u64);
        let source = TickSource::with_device(1_000, 16, || hw.get()).unwrap();
        let mut timer = ElapsedTimer::new(&source, 5);
        timer.start();

        hw.set(0x0010);
        assert_eq!(timer.elapsed(Resolution::Tick), Ok(0x20));
        assert_eq!(timer.elapsed(Resolution::Micros), Ok(0x20));
    }

    #[test]
    fn test_guard_is_free_when_untracked() {
        let source = TickSource::new(1, 8).unwrap();
        let tracked = ElapsedTimer::new(&source, 1);
        let untracked = ElapsedTimer::untracked(&source);
        assert!(core::mem::size_of_val(&untracked) < core::mem::size_of_val(&tracked));
        assert!(tracked.starvation().is_enabled());
    }
}
