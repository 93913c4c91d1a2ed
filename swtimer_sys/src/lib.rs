//! # Software Timer System
//!
//! The tick source that software timers are multiplexed over.
//!
//! ## Philosophy
//!
//! **One hardware counter, many software timers.**
//!
//! A [`TickSource`] owns the canonical tick counter: its width (and hence
//! wraparound period), the duration of one tick, and where the current value
//! comes from. Timers built on it only read.
//!
//! ## Modes
//!
//! - **Self-advancing**: `TickSource::new` keeps a software counter that the
//!   caller steps with `advance`, e.g. from a periodic interrupt.
//! - **Polled**: `TickSource::with_device` reads a free-running hardware
//!   counter through a [`hal::TimerDevice`].
//!
//! ## Non-Goals
//!
//! This crate does NOT read hardware registers, manage interrupts or
//! schedule callbacks.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod source;

pub use config::{TickSourceConfig, NS_PER_SECOND, TIMER_BITS_MAX, TIMER_BITS_MIN};
pub use error::{ConfigError, TickSourceError};
pub use hal::TimerDevice;
pub use source::{TickCounter, TickSource};
