//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines the hardware seam for software timers.
//!
//! ## Philosophy
//!
//! **Hardware timer channels are scarce; software timers are not.**
//!
//! A single hardware counter is enough to run any number of software timers.
//! The HAL describes that counter as a trait so the timer system never reads
//! registers or touches interrupts itself.
//!
//! ## Design Principles
//!
//! 1. **No architecture-specific assumptions**: Any counter that can be polled works
//! 2. **Trait-based**: Polling goes through [`TimerDevice`]
//! 3. **Testable**: Devices can be simulated for host-side tests

#![cfg_attr(not(test), no_std)]

pub mod timer;

pub use timer::TimerDevice;
