//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Clock time comes in through `TickInput`, never read directly
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bird;
pub mod collision;
pub mod pipe;
pub mod rect;
pub mod state;
pub mod tick;

pub use bird::Bird;
pub use collision::{CrashCause, check_collisions};
pub use pipe::{Orientation, Pipe};
pub use rect::Rect;
pub use state::{BirdFrame, Frame, GameEvent, GamePhase, GameState, PipeFrame};
pub use tick::{TickInput, tick};
