//! Time resolutions for elapsed-time queries

use core::fmt;

use serde::{Deserialize, Serialize};

/// Nanoseconds in one microsecond
pub const NS_PER_US: u64 = 1_000;

/// Nanoseconds in one millisecond
pub const NS_PER_MS: u64 = 1_000_000;

/// Nanoseconds in one second
pub const NS_PER_S: u64 = 1_000_000_000;

/// Unit in which elapsed time is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Raw timer ticks
    Tick,
    /// Nanoseconds
    Nanos,
    /// Microseconds
    Micros,
    /// Milliseconds
    Millis,
    /// Seconds
    Secs,
}

impl Resolution {
    /// Nanoseconds in one unit, `None` for raw ticks
    pub const fn ns_per_unit(self) -> Option<u64> {
        match self {
            Resolution::Tick => None,
            Resolution::Nanos => Some(1),
            Resolution::Micros => Some(NS_PER_US),
            Resolution::Millis => Some(NS_PER_MS),
            Resolution::Secs => Some(NS_PER_S),
        }
    }

    /// Converts a tick count to this resolution, rounding down
    ///
    /// The product `ticks * tick_duration_ns` is formed in 128 bits, so only
    /// a result that itself exceeds `u64::MAX` fails. Returns `None` in that
    /// case.
    pub fn convert(self, ticks: u64, tick_duration_ns: u64) -> Option<u64> {
        match self.ns_per_unit() {
            None => Some(ticks),
            Some(ns_per_unit) => {
                let nanos = u128::from(ticks) * u128::from(tick_duration_ns);
                u64::try_from(nanos / u128::from(ns_per_unit)).ok()
            }
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tick => write!(f, "ticks"),
            Self::Nanos => write!(f, "ns"),
            Self::Micros => write!(f, "us"),
            Self::Millis => write!(f, "ms"),
            Self::Secs => write!(f, "s"),
        }
    }
}
