//! Game state and core simulation types
//!
//! One `GameState` is one round: it goes NotStarted -> Running -> Ended
//! exactly once. Playing again means building a new instance.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::collision::CrashCause;
use super::pipe::{Orientation, Pipe};
use super::rect::Rect;
use crate::config::GameConfig;

/// Lifecycle of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Built but not yet ticking (title screen is up)
    NotStarted,
    /// Active gameplay
    Running,
    /// Crashed. Terminal for this instance.
    Ended,
}

/// Things that happened during the last tick, for logging and presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new pair entered at the right edge
    PairSpawned { pair: u32, gap_y: f32 },
    /// At least one pipe left the playfield; carries the new score
    Scored { score: u32 },
    /// The round ended
    Crashed { cause: CrashCause },
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed of the gap RNG, for reproducing a round
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Live pipes in spawn order
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Clock time of the last spawn (or of `start`)
    pub last_spawn_ms: u64,
    /// Ticks simulated while running
    pub time_ticks: u64,
    /// How the round ended, once it has
    pub crash: Option<CrashCause>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_pair: u32,
}

impl GameState {
    /// Build a round that has not started yet
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let bird = Bird::from_config(&config);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            bird,
            pipes: Vec::new(),
            score: 0,
            last_spawn_ms: 0,
            time_ticks: 0,
            crash: None,
            events: Vec::new(),
            next_pair: 1,
        }
    }

    /// Enter `Running`. The spawn timer starts counting from `now_ms`.
    /// Has no effect once the round has started.
    pub fn start(&mut self, now_ms: u64) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        self.phase = GamePhase::Running;
        self.last_spawn_ms = now_ms;
        log::info!("Round started (seed {})", self.seed);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Append a bottom/top pair at the right edge around a random gap
    pub fn spawn_pair(&mut self, now_ms: u64) -> u32 {
        let pair = self.next_pair;
        self.next_pair += 1;

        let gap_y = self
            .rng
            .random_range(self.config.gap_min..=self.config.gap_max) as f32;
        let x = self.config.screen_width;
        let width = self.config.pipe_width;
        let height = self.config.pipe_height();

        self.pipes
            .push(Pipe::new(pair, x, gap_y, Orientation::Bottom, width, height));
        self.pipes.push(Pipe::new(
            pair,
            x,
            gap_y - self.config.pipe_gap,
            Orientation::Top,
            width,
            height,
        ));
        self.last_spawn_ms = now_ms;
        self.events.push(GameEvent::PairSpawned { pair, gap_y });
        log::debug!("Spawned pair {} with gap at {}", pair, gap_y);
        pair
    }

    /// End the round. Only the first call has any effect.
    pub fn end(&mut self, cause: CrashCause) {
        if self.phase == GamePhase::Ended {
            return;
        }
        self.phase = GamePhase::Ended;
        self.crash = Some(cause);
        self.events.push(GameEvent::Crashed { cause });
        log::info!(
            "Round over: {:?} after {} ticks, score {}",
            cause,
            self.time_ticks,
            self.score
        );
    }

    /// Geometry and score for drawing
    pub fn snapshot(&self) -> Frame {
        Frame {
            phase: self.phase,
            score: self.score,
            running: self.is_running(),
            playfield: [self.config.screen_width, self.config.screen_height],
            bird: BirdFrame {
                rect: self.bird.rect(),
                tilt_degrees: self.bird.tilt_degrees(),
            },
            pipes: self
                .pipes
                .iter()
                .map(|p| PipeFrame {
                    rect: p.rect(),
                    orientation: p.orientation,
                })
                .collect(),
        }
    }
}

/// Avatar as the presentation layer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdFrame {
    pub rect: Rect,
    pub tilt_degrees: f32,
}

/// Pipe as the presentation layer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeFrame {
    pub rect: Rect,
    pub orientation: Orientation,
}

/// Per-tick report handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub score: u32,
    pub running: bool,
    pub playfield: [f32; 2],
    pub bird: BirdFrame,
    pub pipes: Vec<PipeFrame>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(GameConfig::default(), 1);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird.pos.x, 100.0);
        assert_eq!(state.bird.pos.y, 400.0);
    }

    #[test]
    fn test_start_only_once() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.start(250);
        assert!(state.is_running());
        assert_eq!(state.last_spawn_ms, 250);

        state.start(9000);
        assert_eq!(state.last_spawn_ms, 250);

        state.end(CrashCause::Floor);
        state.start(10_000);
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_spawn_pair_geometry() {
        let config = GameConfig::default();
        let mut state = GameState::new(config.clone(), 42);
        let pair = state.spawn_pair(1600);

        assert_eq!(state.pipes.len(), 2);
        assert_eq!(state.last_spawn_ms, 1600);
        let bottom = &state.pipes[0];
        let top = &state.pipes[1];
        assert_eq!(bottom.orientation, Orientation::Bottom);
        assert_eq!(top.orientation, Orientation::Top);
        assert_eq!(bottom.pair, pair);
        assert_eq!(top.pair, pair);
        assert_eq!(bottom.x, config.screen_width);
        assert_eq!(top.x, bottom.x);
        assert_eq!(bottom.anchor_y - top.anchor_y, config.pipe_gap);
        assert!(bottom.anchor_y >= config.gap_min as f32);
        assert!(bottom.anchor_y <= config.gap_max as f32);
        assert_eq!(
            state.events,
            vec![GameEvent::PairSpawned {
                pair,
                gap_y: bottom.anchor_y
            }]
        );
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = GameState::new(GameConfig::default(), 99);
        let mut b = GameState::new(GameConfig::default(), 99);
        for t in 0..20 {
            a.spawn_pair(t);
            b.spawn_pair(t);
        }
        let gaps_a: Vec<f32> = a.pipes.iter().map(|p| p.anchor_y).collect();
        let gaps_b: Vec<f32> = b.pipes.iter().map(|p| p.anchor_y).collect();
        assert_eq!(gaps_a, gaps_b);
    }

    #[test]
    fn test_end_is_terminal() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.start(0);
        state.end(CrashCause::Ceiling);
        state.end(CrashCause::Floor);
        assert_eq!(state.crash, Some(CrashCause::Ceiling));
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn test_snapshot() {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.start(0);
        state.spawn_pair(0);
        let frame = state.snapshot();
        assert!(frame.running);
        assert_eq!(frame.pipes.len(), 2);
        assert_eq!(frame.bird.rect, state.bird.rect());
        assert_eq!(frame.playfield, [800.0, 800.0]);

        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"score\":0"));
    }
}
