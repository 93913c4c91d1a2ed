//! # Timer Device
//!
//! Hardware abstraction for a free-running tick counter.
//!
//! ## Philosophy
//!
//! **The counter belongs to the hardware; time belongs to the software.**
//!
//! This trait exposes the raw value of a hardware counter. It does NOT:
//! - Convert ticks to durations (tick rate is configured by the timer system)
//! - Hide wraparound (a counter of N bits cycles modulo 2^N)
//! - Block or sleep (polling only)
//! - Schedule callbacks or alarms
//!
//! ## Design Principles
//!
//! 1. **Non-blocking**: Always returns immediately, may run in interrupt context
//! 2. **Raw**: Returns the counter as-is, wraparound handling is up to the caller
//! 3. **Shared**: Polling takes `&self`, so one device can serve many timers
//!
//! Implementations that need mutable state use interior mutability.

/// Hardware timer device trait
///
/// Provides access to the current value of a hardware tick counter.
///
/// # Implementation Notes
///
/// - Must not block
/// - Counter width and tick rate are implementation-defined
/// - The value may wrap around to zero when the counter overflows
///
/// Any `Fn() -> u64` closure is a timer device, which makes it easy to poll
/// a memory-mapped counter register or a value captured from elsewhere.
///
/// # Examples
///
/// ```
/// use hal::TimerDevice;
///
/// let counter = core::cell::Cell::new(42u64);
/// let device = || counter.get();
///
/// assert_eq!(device.poll_ticks(), 42);
/// counter.set(43);
/// assert_eq!(device.poll_ticks(), 43);
/// ```
pub trait TimerDevice {
    /// Returns the current counter value
    fn poll_ticks(&self) -> u64;
}

impl<F> TimerDevice for F
where
    F: Fn() -> u64,
{
    fn poll_ticks(&self) -> u64 {
        self()
    }
}
