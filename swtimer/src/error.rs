//! Elapsed timer error types

use thiserror::Error;

use crate::resolution::Resolution;

/// Errors that can occur when querying an elapsed timer
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The tick source stopped advancing while the timer was being queried
    ///
    /// The timer stays starved until it is started again.
    #[error("Timer starvation: tick source did not advance across {invocations} queries")]
    Starvation { invocations: u64 },

    /// The elapsed time does not fit in 64 bits at the requested resolution
    #[error("Elapsed time of {ticks} ticks overflows u64 in {resolution}")]
    ConversionOverflow { ticks: u64, resolution: Resolution },
}
