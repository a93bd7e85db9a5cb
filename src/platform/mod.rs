//! Platform abstraction layer
//!
//! The pieces a front-end needs to drive a `Session`, independent of the
//! browser or the native headless runner:
//! - Input events
//! - A deterministic tick clock
//! - The fixed-step accumulator that turns frame time into ticks

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::ticks_to_ms;

/// Longest frame delta the accumulator will accept (seconds)
const MAX_FRAME_DT: f64 = 0.1;

/// A discrete input collected between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Close / Escape
    Quit,
    /// Click, tap, Space
    Flap,
    /// Toggle the demo player
    ToggleAutopilot,
    /// Any other key
    Key,
}

impl InputEvent {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Self {
        match key {
            " " | "Enter" | "ArrowUp" => InputEvent::Flap,
            "Escape" => InputEvent::Quit,
            "i" | "I" => InputEvent::ToggleAutopilot,
            _ => InputEvent::Key,
        }
    }
}

/// Source of tick timestamps
pub trait Clock {
    /// Milliseconds since the clock started. Never decreases.
    fn now_ms(&self) -> u64;

    /// Move to the next scheduled tick and return its timestamp
    fn next_tick(&mut self) -> u64;
}

/// Monotonic clock that advances only when the simulation ticks.
///
/// Real-time pacing happens outside (requestAnimationFrame plus
/// `FixedStep` in the browser), so a slow frame never skews spawn timing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickClock {
    ticks: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for TickClock {
    fn now_ms(&self) -> u64 {
        ticks_to_ms(self.ticks)
    }

    fn next_tick(&mut self) -> u64 {
        self.ticks += 1;
        self.now_ms()
    }
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f64,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame's worth of real time and return how many ticks to run.
    ///
    /// Long frames are clamped and capped at `MAX_SUBSTEPS`; time beyond the
    /// cap is dropped rather than carried into later frames.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        let step = SIM_DT as f64;
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            self.accumulator -= step;
            substeps += 1;
        }
        if self.accumulator >= step {
            log::warn!(
                "Dropping {:.1}ms of simulation time",
                self.accumulator * 1000.0
            );
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Forget any partial step (e.g. after a screen change)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
