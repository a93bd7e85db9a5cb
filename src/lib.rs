//! Flappy - a fixed-timestep arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `session`: Title / play / game-over flow around one simulation at a time
//! - `platform`: Input events, clocks and the fixed-step accumulator
//! - `renderer`: WebGPU rendering pipeline
//! - `config`: Immutable game configuration

pub mod config;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use highscores::HighScores;
pub use session::{Control, Screen, Session};

/// Timing constants shared by the simulation and its drivers
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 120;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Milliseconds elapsed after `ticks` fixed steps (floored, like a millisecond clock)
#[inline]
pub fn ticks_to_ms(ticks: u64) -> u64 {
    ticks * 1000 / consts::TICK_RATE as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_to_ms() {
        assert_eq!(ticks_to_ms(0), 0);
        assert_eq!(ticks_to_ms(120), 1000);
        assert_eq!(ticks_to_ms(180), 1500);
        assert_eq!(ticks_to_ms(181), 1508);
    }
}
