//! Idle/demo mode - the game plays itself
//!
//! Aims for the centre of the next gap the bird has not yet cleared and
//! flaps once the bird is falling below it.

use super::pipe::Orientation;
use super::state::GameState;

/// Vertical centre of the next gap ahead of (or around) the bird
pub fn next_gap_center(state: &GameState) -> Option<f32> {
    let bird_left = state.bird.rect().left;
    state
        .pipes
        .iter()
        .filter(|p| p.orientation == Orientation::Bottom && p.right_edge() >= bird_left)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|p| p.anchor_y - state.config.pipe_gap / 2.0)
}

/// Whether the demo player should flap this tick
pub fn wants_flap(state: &GameState) -> bool {
    let config = &state.config;
    let bird = &state.bird;
    if bird.vel_y < 0.0 {
        // Still rising from the last flap
        return false;
    }

    let target = next_gap_center(state).unwrap_or(config.screen_height / 2.0);
    let margin = config.pipe_gap / 5.0;
    let next_y = bird.pos.y + (bird.vel_y + config.gravity).round();
    next_y > target + margin
}
