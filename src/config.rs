//! Game configuration
//!
//! One immutable value handed to every simulation instance. There is no
//! runtime configuration surface; `GameConfig::default()` is the game.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nominal avatar sprite size before scaling
pub const BIRD_BASE_SIZE: Vec2 = Vec2::new(50.0, 35.0);

/// Avatar bounding-box size for a sprite scale (whole pixels, like the sprite)
pub fn scaled_bird_size(scale: f32) -> Vec2 {
    (BIRD_BASE_SIZE * scale).floor()
}

/// Reasons a configuration is rejected at startup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("playfield must have a positive size, got {width}x{height}")]
    EmptyPlayfield { width: f32, height: f32 },
    #[error("gap range is empty: {min}..={max}")]
    EmptyGapRange { min: i32, max: i32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("spawn interval must be at least 1ms")]
    ZeroSpawnInterval,
}

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Playfield width in pixels
    pub screen_width: f32,
    /// Playfield height in pixels
    pub screen_height: f32,

    /// Velocity added to the avatar every tick (pixels/tick²)
    pub gravity: f32,
    /// Upward velocity set by a flap (pixels/tick)
    pub flap_power: f32,
    /// Fixed horizontal centre of the avatar
    pub bird_x: f32,
    /// Sprite scale factor applied to `BIRD_BASE_SIZE`
    pub bird_scale: f32,

    /// Pipe width in pixels
    pub pipe_width: f32,
    /// Vertical distance between the two anchors of a pair
    pub pipe_gap: f32,
    /// Lowest anchor for the bottom pipe (inclusive)
    pub gap_min: i32,
    /// Highest anchor for the bottom pipe (inclusive)
    pub gap_max: i32,
    /// A pair spawns once strictly more than this many ms have passed
    pub spawn_interval_ms: u64,
    /// Leftward pipe movement (pixels/tick)
    pub pipe_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 800.0,

            gravity: 0.5,
            flap_power: 10.0,
            bird_x: 100.0,
            bird_scale: 2.0,

            pipe_width: 100.0,
            pipe_gap: 200.0,
            gap_min: 250,
            gap_max: 500,
            spawn_interval_ms: 1500,
            pipe_speed: 5.0,
        }
    }
}

impl GameConfig {
    /// Avatar bounding-box size after scaling
    pub fn bird_size(&self) -> Vec2 {
        scaled_bird_size(self.bird_scale)
    }

    /// Avatar spawn point: fixed x, vertically centred
    pub fn bird_start(&self) -> Vec2 {
        Vec2::new(self.bird_x, (self.screen_height / 2.0).floor())
    }

    /// Pipes are as tall as the playfield
    pub fn pipe_height(&self) -> f32 {
        self.screen_height
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ConfigError::EmptyPlayfield {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.gap_min > self.gap_max {
            return Err(ConfigError::EmptyGapRange {
                min: self.gap_min,
                max: self.gap_max,
            });
        }
        for (name, value) in [
            ("bird_scale", self.bird_scale),
            ("pipe_width", self.pipe_width),
            ("pipe_speed", self.pipe_speed),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        Ok(())
    }
}
