//! Pipe obstacles
//!
//! Pipes are spawned in pairs sharing one x and one gap. A top pipe hangs
//! from above with its bottom edge at `anchor_y`; a bottom pipe rises from
//! below with its top edge at `anchor_y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Which side of the playfield a pipe is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Hangs from the ceiling
    Top,
    /// Rises from the floor
    Bottom,
}

/// A single rectangular barrier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Spawn pair this pipe belongs to
    pub pair: u32,
    /// Horizontal centre
    pub x: f32,
    /// Edge facing the gap (fixed after construction)
    pub anchor_y: f32,
    pub orientation: Orientation,
    pub width: f32,
    pub height: f32,
}

impl Pipe {
    pub fn new(
        pair: u32,
        x: f32,
        anchor_y: f32,
        orientation: Orientation,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            pair,
            x,
            anchor_y,
            orientation,
            width,
            height,
        }
    }

    /// Scroll left by `speed` pixels
    #[inline]
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Fully scrolled past the left edge of the playfield
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right_edge() < 0.0
    }

    pub fn rect(&self) -> Rect {
        let size = Vec2::new(self.width, self.height);
        match self.orientation {
            Orientation::Top => Rect::from_mid_bottom(self.x, self.anchor_y, size),
            Orientation::Bottom => Rect::from_mid_top(self.x, self.anchor_y, size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_anchors() {
        let top = Pipe::new(1, 800.0, 150.0, Orientation::Top, 100.0, 800.0);
        assert_eq!(top.rect().bottom(), 150.0);
        assert_eq!(top.rect().left, 750.0);

        let bottom = Pipe::new(1, 800.0, 350.0, Orientation::Bottom, 100.0, 800.0);
        assert_eq!(bottom.rect().top, 350.0);
        assert_eq!(bottom.rect().height, 800.0);
    }

    #[test]
    fn test_advance_and_right_edge() {
        let mut pipe = Pipe::new(1, 60.0, 300.0, Orientation::Bottom, 100.0, 800.0);
        assert_eq!(pipe.right_edge(), 110.0);
        pipe.advance(5.0);
        assert_eq!(pipe.x, 55.0);
        assert_eq!(pipe.anchor_y, 300.0);
        assert_eq!(pipe.right_edge(), 105.0);
    }

    #[test]
    fn test_offscreen_is_strict() {
        let mut pipe = Pipe::new(1, -50.0, 300.0, Orientation::Top, 100.0, 800.0);
        // Right edge exactly on the boundary stays
        assert!(!pipe.is_offscreen());
        pipe.advance(5.0);
        assert!(pipe.is_offscreen());
    }
}
