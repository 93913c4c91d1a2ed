//! Simulated timer devices
//!
//! Both devices take `&self` for every operation, so a test can keep
//! driving a device after handing it to a tick source (reach it again
//! through `TickSource::device`).

use std::cell::Cell;

use hal::TimerDevice;

/// Simulated free-running hardware counter
///
/// The counter has a fixed width and wraps to zero when it overflows, just
/// like a hardware timer register. It only advances when told to.
///
/// # Examples
///
/// ```
/// use sim_timer::SimTimerDevice;
/// use hal::TimerDevice;
///
/// let timer = SimTimerDevice::new(8);
/// timer.advance_ticks(200);
/// assert_eq!(timer.poll_ticks(), 200);
///
/// timer.advance_ticks(100);
/// assert_eq!(timer.poll_ticks(), 44);
/// ```
#[derive(Debug, Clone)]
pub struct SimTimerDevice {
    /// Current counter value, always within `mask`
    ticks: Cell<u64>,
    /// `2^width_bits - 1`
    mask: u64,
}

impl SimTimerDevice {
    /// Creates a counter of `width_bits` bits starting at 0
    ///
    /// # Panics
    ///
    /// Panics if `width_bits` is not in `1..=64`.
    pub fn new(width_bits: u8) -> Self {
        Self::with_initial_ticks(width_bits, 0)
    }

    /// Creates a counter starting at `ticks`
    ///
    /// Useful for tests that start close to a wraparound.
    ///
    /// # Panics
    ///
    /// Panics if `width_bits` is not in `1..=64` or `ticks` does not fit.
    pub fn with_initial_ticks(width_bits: u8, ticks: u64) -> Self {
        assert!(
            (1..=64).contains(&width_bits),
            "Counter width must be 1..=64 bits, got {}",
            width_bits
        );
        let mask = u64::MAX >> (64 - u32::from(width_bits));
        assert!(
            ticks <= mask,
            "Initial ticks {} do not fit in {} bits",
            ticks,
            width_bits
        );

        Self {
            ticks: Cell::new(ticks),
            mask,
        }
    }

    /// Advances the counter by `delta`, wrapping at the counter width
    pub fn advance_ticks(&self, delta: u64) {
        self.ticks
            .set(self.ticks.get().wrapping_add(delta) & self.mask);
    }

    /// Sets the counter to `ticks`, reduced to the counter width
    pub fn set_ticks(&self, ticks: u64) {
        self.ticks.set(ticks & self.mask);
    }

    /// Returns the current counter value
    pub fn current_ticks(&self) -> u64 {
        self.ticks.get()
    }

    /// Returns the wraparound mask
    pub fn mask(&self) -> u64 {
        self.mask
    }
}

impl TimerDevice for SimTimerDevice {
    fn poll_ticks(&self) -> u64 {
        self.ticks.get()
    }
}

/// Timer device replaying scripted counter values
///
/// Each poll returns the next value; once the script is exhausted the last
/// value repeats, which models a counter that has stopped. Values may wrap
/// (decrease), since they are raw counter readings.
///
/// # Examples
///
/// ```
/// use sim_timer::ScriptedTimerDevice;
/// use hal::TimerDevice;
///
/// let timer = ScriptedTimerDevice::new(vec![250, 255, 3]);
///
/// assert_eq!(timer.poll_ticks(), 250);
/// assert_eq!(timer.poll_ticks(), 255);
/// assert_eq!(timer.poll_ticks(), 3);
/// assert_eq!(timer.poll_ticks(), 3); // Stays at last value
/// ```
#[derive(Debug)]
pub struct ScriptedTimerDevice {
    /// Scripted values to return
    ticks: Vec<u64>,
    /// Index of the next value
    index: Cell<usize>,
}

impl ScriptedTimerDevice {
    /// Creates a device with scripted tick values
    pub fn new(ticks: Vec<u64>) -> Self {
        Self {
            ticks,
            index: Cell::new(0),
        }
    }

    /// Returns the number of scripted values not yet returned
    pub fn remaining(&self) -> usize {
        self.ticks.len().saturating_sub(self.index.get())
    }
}

impl TimerDevice for ScriptedTimerDevice {
    fn poll_ticks(&self) -> u64 {
        let index = self.index.get();
        match self.ticks.get(index) {
            Some(&value) => {
                self.index.set(index + 1);
                value
            }
            None => self.ticks.last().copied().unwrap_or(0),
        }
    }
}
