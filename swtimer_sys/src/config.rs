//! Tick source configuration
//!
//! A [`TickSourceConfig`] describes the hardware counter a tick source runs
//! on: how long one tick lasts and how many bits the counter has. Configs
//! are plain data so they can be kept in board descriptions and loaded with
//! serde.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Narrowest supported counter, in bits
pub const TIMER_BITS_MIN: u8 = 2;

/// Widest supported counter, in bits
pub const TIMER_BITS_MAX: u8 = 64;

/// Nanoseconds in one second
pub const NS_PER_SECOND: u64 = 1_000_000_000;

/// Static description of a tick counter
///
/// # Examples
///
/// ```
/// use swtimer_sys::TickSourceConfig;
///
/// // 32 kHz RTC with a 24-bit counter
/// let config = TickSourceConfig::from_frequency_hz(32_768, 24).unwrap();
/// assert_eq!(config.tick_duration_ns, 30_517);
/// assert_eq!(config.mask(), 0x00FF_FFFF);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TickSourceConfig {
    /// Duration of one tick in nanoseconds
    pub tick_duration_ns: u64,
    /// Counter width in bits, from 2 to 64
    pub width_bits: u8,
}

impl TickSourceConfig {
    /// Creates and validates a config
    pub fn new(tick_duration_ns: u64, width_bits: u8) -> Result<Self, ConfigError> {
        let config = Self {
            tick_duration_ns,
            width_bits,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a config for a counter running at `hz`
    ///
    /// The tick duration is rounded down to whole nanoseconds, so counters
    /// whose period is not an integer number of nanoseconds (e.g. 32768 Hz)
    /// accumulate a small drift when converted to wall time.
    pub fn from_frequency_hz(hz: u64, width_bits: u8) -> Result<Self, ConfigError> {
        if hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        if hz > NS_PER_SECOND {
            return Err(ConfigError::FrequencyTooHigh(hz));
        }

        Self::new(NS_PER_SECOND / hz, width_bits)
    }

    /// Checks the config against the supported ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_duration_ns == 0 {
            return Err(ConfigError::ZeroTickDuration);
        }
        if !(TIMER_BITS_MIN..=TIMER_BITS_MAX).contains(&self.width_bits) {
            return Err(ConfigError::WidthOutOfRange(self.width_bits));
        }
        Ok(())
    }

    /// Returns the wraparound mask, `2^width_bits - 1`
    ///
    /// Only meaningful for a validated config; widths above 64 saturate.
    pub fn mask(&self) -> u64 {
        counter_mask(self.width_bits)
    }
}

/// Mask with the low `width_bits` bits set
pub(crate) const fn counter_mask(width_bits: u8) -> u64 {
    if width_bits >= 64 {
        u64::MAX
    } else {
        (1u64 << width_bits) - 1
    }
}
