//! The player avatar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::{GameConfig, scaled_bird_size};

/// Degrees of sprite tilt per unit of vertical velocity
const TILT_PER_VELOCITY: f32 = 3.0;

/// The bird. Its x never changes; only y and vertical velocity evolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Centre of the bounding box
    pub pos: Vec2,
    /// Vertical velocity in pixels/tick (positive = downward)
    pub vel_y: f32,
    /// Bounding-box size
    pub size: Vec2,
}

impl Bird {
    /// Place a resting bird centred on `(center_x, center_y)`
    pub fn new(center_x: f32, center_y: f32, scale: f32) -> Self {
        Self {
            pos: Vec2::new(center_x, center_y),
            vel_y: 0.0,
            size: scaled_bird_size(scale),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let start = config.bird_start();
        Self::new(start.x, start.y, config.bird_scale)
    }

    /// Apply one tick of gravity. Position is not clamped.
    pub fn integrate(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y.round();
    }

    /// Replace the current velocity with an upward kick
    pub fn flap(&mut self, power: f32) {
        self.vel_y = -power;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Sprite rotation in degrees, counter-clockwise positive (nose up when rising)
    pub fn tilt_degrees(&self) -> f32 {
        -self.vel_y * TILT_PER_VELOCITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_bird() {
        let bird = Bird::new(100.0, 400.0, 2.0);
        assert_eq!(bird.pos, Vec2::new(100.0, 400.0));
        assert_eq!(bird.vel_y, 0.0);
        assert_eq!(bird.size, Vec2::new(100.0, 70.0));
        assert_eq!(bird.rect().top, 365.0);
        assert_eq!(bird.rect().bottom(), 435.0);
    }

    #[test]
    fn test_size_follows_config() {
        for scale in [1.0, 1.5, 2.0, 3.3] {
            let config = GameConfig {
                bird_scale: scale,
                ..GameConfig::default()
            };
            let bird = Bird::from_config(&config);
            assert_eq!(bird.size, config.bird_size());
            assert_eq!(bird.size, bird.size.floor());
        }
    }

    #[test]
    fn test_integrate_rounds_velocity() {
        let mut bird = Bird::new(100.0, 400.0, 1.0);
        bird.integrate(0.5); // vel 0.5 rounds to 1
        assert_eq!(bird.vel_y, 0.5);
        assert_eq!(bird.pos.y, 401.0);
        bird.integrate(0.5); // vel 1.0
        assert_eq!(bird.pos.y, 402.0);
        bird.integrate(0.5); // vel 1.5 rounds to 2
        assert_eq!(bird.pos.y, 404.0);
        assert_eq!(bird.pos.x, 100.0);
    }

    #[test]
    fn test_flap_and_tilt() {
        let mut bird = Bird::new(100.0, 400.0, 1.0);
        bird.flap(10.0);
        assert_eq!(bird.vel_y, -10.0);
        assert_eq!(bird.tilt_degrees(), 30.0);

        // Rising moves the bird up
        bird.integrate(0.5);
        assert_eq!(bird.vel_y, -9.5);
        assert!(bird.pos.y < 400.0);
    }

    proptest! {
        #[test]
        fn prop_flap_resets_velocity(prior in -50.0f32..50.0, power in 0.1f32..30.0) {
            let mut bird = Bird::new(100.0, 400.0, 1.0);
            bird.vel_y = prior;
            bird.flap(power);
            prop_assert_eq!(bird.vel_y, -power);
        }

        #[test]
        fn prop_gravity_is_monotonic(gravity in 0.05f32..2.0, ticks in 1usize..200) {
            let mut bird = Bird::new(100.0, 400.0, 1.0);
            let start_y = bird.pos.y;
            let mut last_vel = bird.vel_y;
            let mut last_y = bird.pos.y;
            for _ in 0..ticks {
                bird.integrate(gravity);
                prop_assert!(bird.vel_y > last_vel);
                prop_assert!(bird.pos.y >= last_y);
                last_vel = bird.vel_y;
                last_y = bird.pos.y;
            }
            // Velocity has passed 0.5 by now, so the bird has moved down
            if gravity * ticks as f32 >= 0.6 {
                prop_assert!(bird.pos.y > start_y);
            }
        }
    }
}
