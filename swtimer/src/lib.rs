//! # Software Timers
//!
//! Elapsed-time timers multiplexed over one [`swtimer_sys::TickSource`].
//!
//! ## Philosophy
//!
//! **A timer is a start tick and a subtraction.**
//!
//! Any number of [`ElapsedTimer`]s can borrow the same tick source. Each one
//! remembers the tick it was started at and, when queried, converts the
//! ticks since then into the requested [`Resolution`].
//!
//! ## Features
//!
//! - Wraparound-aware elapsed ticks for counters of 2 to 64 bits
//! - Conversion to ticks, ns, µs, ms and s with floor division
//! - Optional starvation awareness: a query fails if the tick source stopped
//!   advancing across too many consecutive queries
//!
//! ## Example
//!
//! ```
//! use swtimer::{ElapsedTimer, Resolution, TimerError};
//! use swtimer_sys::TickSource;
//!
//! let source = TickSource::new(1_000, 32).unwrap();
//!
//! let mut fast = ElapsedTimer::new(&source, 3);
//! let mut slow = ElapsedTimer::untracked(&source);
//! fast.start();
//! slow.start();
//!
//! source.advance(2_000).unwrap();
//! assert_eq!(fast.elapsed(Resolution::Micros), Ok(2_000));
//! assert_eq!(slow.elapsed(Resolution::Millis), Ok(2));
//!
//! // The tick source stalls
//! assert!(fast.elapsed(Resolution::Tick).is_ok());
//! assert!(fast.elapsed(Resolution::Tick).is_ok());
//! assert!(matches!(
//!     fast.elapsed(Resolution::Tick),
//!     Err(TimerError::Starvation { .. })
//! ));
//! ```
//!
//! ## Non-Goals
//!
//! No expiry callbacks, alarms or timer wheels. Timers only measure.

#![cfg_attr(not(test), no_std)]

pub mod error;
pub mod resolution;
pub mod starvation;
pub mod timer;

pub use error::TimerError;
pub use resolution::{Resolution, NS_PER_MS, NS_PER_S, NS_PER_US};
pub use starvation::{StarvationGuard, StarvationTracker, Untracked};
pub use timer::{elapsed_ticks, ElapsedTimer, TimerState};
