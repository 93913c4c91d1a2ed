//! Tick source error types

use thiserror::Error;

/// Reasons a tick source configuration is rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// One tick must last at least one nanosecond
    #[error("tick duration must be non-zero")]
    ZeroTickDuration,

    /// Counter width outside the supported range
    #[error("timer width of {0} bits is outside 2..=64")]
    WidthOutOfRange(u8),

    /// A counter frequency of zero has no tick duration
    #[error("counter frequency must be non-zero")]
    ZeroFrequency,

    /// Ticks shorter than one nanosecond cannot be represented
    #[error("counter frequency of {0} Hz gives ticks shorter than 1 ns")]
    FrequencyTooHigh(u64),
}

/// Errors that can occur when creating or driving a tick source
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TickSourceError {
    /// The source cannot be built with the given parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Advancing by zero ticks is a caller error
    #[error("Invalid argument: cannot advance by zero ticks")]
    InvalidArgument,
}
