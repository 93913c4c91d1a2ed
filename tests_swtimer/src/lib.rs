//! Software Timer Test Utilities
//!
//! Shared helpers for the integration tests in `tests/`.
//!
//! ## Test Philosophy
//!
//! - **Deterministic time**: Counters only move when a test moves them
//! - **Real wraparound**: Simulated counters wrap at their configured width
//! - **Many timers, one counter**: Timers are always built over a shared source

use sim_timer::{ScriptedTimerDevice, SimTimerDevice};
use swtimer_sys::{TickSource, TickSourceConfig};

/// Polled tick source over a simulated free-running counter
///
/// The counter has the same width as the source. Drive it through
/// `source.device()`.
pub fn sim_source(tick_duration_ns: u64, width_bits: u8) -> TickSource<SimTimerDevice> {
    sim_source_at(tick_duration_ns, width_bits, 0)
}

/// Like [`sim_source`], with the counter starting at `initial_ticks`
pub fn sim_source_at(
    tick_duration_ns: u64,
    width_bits: u8,
    initial_ticks: u64,
) -> TickSource<SimTimerDevice> {
    let device = SimTimerDevice::with_initial_ticks(width_bits, initial_ticks);
    TickSource::with_device(tick_duration_ns, width_bits, device)
        .expect("Failed to create simulated tick source")
}

/// Polled tick source replaying `ticks`
pub fn scripted_source(
    tick_duration_ns: u64,
    width_bits: u8,
    ticks: Vec<u64>,
) -> TickSource<ScriptedTimerDevice> {
    TickSource::with_device(tick_duration_ns, width_bits, ScriptedTimerDevice::new(ticks))
        .expect("Failed to create scripted tick source")
}

/// Parses a tick source config from JSON
pub fn config_from_json(json: &str) -> TickSourceConfig {
    serde_json::from_str(json).expect("Failed to parse tick source config")
}
