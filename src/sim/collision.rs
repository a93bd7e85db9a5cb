//! Collision detection
//!
//! Everything is an axis-aligned box, so a crash is either a box overlap with
//! a pipe or the bird's box reaching the ceiling or floor.

use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::pipe::Pipe;
use super::rect::Rect;

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Hit a pipe of the given pair
    Pipe { pair: u32 },
    /// Top of the bird reached the top of the playfield
    Ceiling,
    /// Bottom of the bird reached the bottom of the playfield
    Floor,
}

#[inline]
pub fn bird_hits_pipe(bird: &Rect, pipe: &Pipe) -> bool {
    bird.intersects(&pipe.rect())
}

/// Ceiling/floor check. Touching the boundary counts as leaving.
pub fn out_of_bounds(bird: &Rect, screen_height: f32) -> Option<CrashCause> {
    if bird.top <= 0.0 {
        Some(CrashCause::Ceiling)
    } else if bird.bottom() >= screen_height {
        Some(CrashCause::Floor)
    } else {
        None
    }
}

/// First crash this tick, if any. Pipes are checked in spawn order before the
/// playfield bounds.
pub fn check_collisions(bird: &Bird, pipes: &[Pipe], screen_height: f32) -> Option<CrashCause> {
    let rect = bird.rect();
    pipes
        .iter()
        .find(|pipe| bird_hits_pipe(&rect, pipe))
        .map(|pipe| CrashCause::Pipe { pair: pipe.pair })
        .or_else(|| out_of_bounds(&rect, screen_height))
}
