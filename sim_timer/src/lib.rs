//! # Simulated Timer Hardware
//!
//! Deterministic stand-ins for hardware tick counters.
//!
//! ## Philosophy
//!
//! **Determinism enables thorough testing.**
//!
//! Real counters advance on their own. These devices only change when a test
//! tells them to, so wraparound, stalls and long gaps between queries can be
//! reproduced exactly on the host.
//!
//! ## Devices
//!
//! - [`SimTimerDevice`]: a free-running counter of a given width, advanced
//!   explicitly and wrapping like the real thing
//! - [`ScriptedTimerDevice`]: replays a fixed sequence of counter values

pub mod timer;

pub use timer::{ScriptedTimerDevice, SimTimerDevice};
