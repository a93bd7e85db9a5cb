//! Axis-aligned rectangles for the playfield
//!
//! Screen space: x grows to the right, y grows downward. A rectangle is
//! stored as its top-left corner plus size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let min = center - size / 2.0;
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// Rectangle whose bottom edge is centred on `(center_x, bottom)`
    pub fn from_mid_bottom(center_x: f32, bottom: f32, size: Vec2) -> Self {
        Self::new(center_x - size.x / 2.0, bottom - size.y, size.x, size.y)
    }

    /// Rectangle whose top edge is centred on `(center_x, top)`
    pub fn from_mid_top(center_x: f32, top: f32, size: Vec2) -> Self {
        Self::new(center_x - size.x / 2.0, top, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True when the two rectangles share a region of non-zero area.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_anchors() {
        let size = Vec2::new(100.0, 800.0);

        let r = Rect::from_mid_bottom(800.0, 150.0, size);
        assert_eq!(r.left, 750.0);
        assert_eq!(r.right(), 850.0);
        assert_eq!(r.bottom(), 150.0);
        assert_eq!(r.top, -650.0);

        let r = Rect::from_mid_top(800.0, 350.0, size);
        assert_eq!(r.top, 350.0);
        assert_eq!(r.bottom(), 1150.0);

        let r = Rect::from_center(Vec2::new(100.0, 400.0), Vec2::new(50.0, 35.0));
        assert_eq!(r.center(), Vec2::new(100.0, 400.0));
        assert_eq!(r.top, 382.5);
        assert_eq!(r.bottom(), 417.5);
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Contained
        assert!(a.intersects(&Rect::new(2.0, 2.0, 1.0, 1.0)));
        // Shares only an edge
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Overlaps on x only
        assert!(!a.intersects(&Rect::new(5.0, 20.0, 10.0, 10.0)));
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_rect_intersects_itself(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
        ) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(r.intersects(&r));
        }
    }
}
