//! # Tick Source
//!
//! The canonical tick counter that software timers run on.
//!
//! A tick source is either **self-advancing** (a software counter stepped by
//! [`TickSource::advance`], typically from a periodic interrupt) or
//! **polled** (the value of a free-running hardware counter read through a
//! [`TimerDevice`]). The mode is part of the type: only
//! `TickSource<TickCounter>` has `advance`, so a polled source can never be
//! stepped by mistake.
//!
//! ## Sharing
//!
//! Timers hold `&TickSource`, and `advance` takes `&self`. The software
//! counter lives in a [`Cell`], which makes a self-advancing source `!Sync`:
//! sharing it with another thread or interrupt priority requires the caller
//! to wrap it in a lock or critical section.

use core::cell::Cell;

use hal::TimerDevice;

use crate::config::{counter_mask, TickSourceConfig};
use crate::error::TickSourceError;

/// Software counter for self-advancing tick sources
///
/// The value is always within the mask of the source that owns it.
#[derive(Debug, Default)]
pub struct TickCounter {
    ticks: Cell<u64>,
}

impl TickCounter {
    /// Creates a counter at zero
    pub const fn new() -> Self {
        Self {
            ticks: Cell::new(0),
        }
    }

    /// Returns the counter value
    pub fn get(&self) -> u64 {
        self.ticks.get()
    }
}

impl TimerDevice for TickCounter {
    fn poll_ticks(&self) -> u64 {
        self.ticks.get()
    }
}

/// A tick counter of fixed width and tick duration
///
/// # Examples
///
/// ```
/// use swtimer_sys::TickSource;
///
/// // 1 µs ticks on an 8-bit counter
/// let source = TickSource::new(1_000, 8).unwrap();
/// source.advance(250).unwrap();
/// source.advance(10).unwrap();
/// assert_eq!(source.current(), 4);
/// ```
#[derive(Debug)]
pub struct TickSource<D = TickCounter> {
    /// Where the current tick value comes from
    device: D,
    /// Validated counter description
    config: TickSourceConfig,
    /// `2^width_bits - 1`
    mask: u64,
}

impl TickSource<TickCounter> {
    /// Creates a self-advancing tick source starting at tick 0
    ///
    /// # Errors
    ///
    /// Returns `TickSourceError::InvalidConfiguration` if `tick_duration_ns`
    /// is zero or `width_bits` is outside `2..=64`.
    pub fn new(tick_duration_ns: u64, width_bits: u8) -> Result<Self, TickSourceError> {
        Self::with_device(tick_duration_ns, width_bits, TickCounter::new())
    }

    /// Advances the counter by `ticks`, wrapping at the counter width
    ///
    /// # Errors
    ///
    /// Returns `TickSourceError::InvalidArgument` if `ticks` is zero. The
    /// counter is left unchanged.
    pub fn advance(&self, ticks: u64) -> Result<(), TickSourceError> {
        if ticks == 0 {
            return Err(TickSourceError::InvalidArgument);
        }

        let counter = &self.device.ticks;
        counter.set(counter.get().wrapping_add(ticks) & self.mask);
        Ok(())
    }
}

impl<D: TimerDevice> TickSource<D> {
    /// Creates a tick source that polls `device` for the current tick
    ///
    /// # Errors
    ///
    /// Returns `TickSourceError::InvalidConfiguration` if `tick_duration_ns`
    /// is zero or `width_bits` is outside `2..=64`.
    pub fn with_device(
        tick_duration_ns: u64,
        width_bits: u8,
        device: D,
    ) -> Result<Self, TickSourceError> {
        let config = TickSourceConfig {
            tick_duration_ns,
            width_bits,
        };
        Self::from_config(config, device)
    }

    /// Creates a tick source from a config
    ///
    /// The config is validated here, so configs deserialized from untrusted
    /// input are safe to pass in.
    pub fn from_config(config: TickSourceConfig, device: D) -> Result<Self, TickSourceError> {
        if let Err(err) = config.validate() {
            log::debug!("rejected tick source config {:?}: {}", config, err);
            return Err(err.into());
        }

        Ok(Self {
            device,
            mask: counter_mask(config.width_bits),
            config,
        })
    }

    /// Returns the current tick value
    ///
    /// Polled sources return the device value as-is.
    pub fn current(&self) -> u64 {
        self.device.poll_ticks()
    }

    /// Returns the duration of one tick in nanoseconds
    pub fn tick_duration_ns(&self) -> u64 {
        self.config.tick_duration_ns
    }

    /// Returns the wraparound mask, `2^width_bits - 1`
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Returns the counter width in bits
    pub fn width_bits(&self) -> u8 {
        self.config.width_bits
    }

    /// Returns the config this source was built from
    pub fn config(&self) -> TickSourceConfig {
        self.config
    }

    /// Returns the device behind this source
    pub fn device(&self) -> &D {
        &self.device
    }
}
