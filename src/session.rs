//! Screen flow around the simulation
//!
//! A session shows a title screen, plays one round, shows the result, and
//! on the next key press builds a fresh round. Each round is a brand-new
//! `GameState`; nothing from the previous one is reused except the config.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::highscores::HighScores;
use crate::platform::{Clock, InputEvent, TickClock};
use crate::sim::autopilot;
use crate::sim::{CrashCause, Frame, GameState, TickInput, tick};

/// Which screen is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Waiting for any input to start the round
    Title,
    /// Round in progress
    Playing,
    /// Round lost; waiting for any input to play again
    GameOver,
}

/// What the driver should do after handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Outcome of one finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub seed: u64,
    pub score: u32,
    pub ticks: u64,
    pub crash: Option<CrashCause>,
    /// Leaderboard position, if the score made it
    pub rank: Option<usize>,
}

pub struct Session {
    config: GameConfig,
    pub screen: Screen,
    /// The current round
    pub game: GameState,
    pub high_scores: HighScores,
    /// 1-based number of the current round
    pub round: u32,
    /// Demo player drives the bird and dismisses screens
    pub autopilot: bool,
    /// Finished rounds, oldest first
    pub results: Vec<RoundSummary>,
    clock: TickClock,
    seeds: Pcg32,
    pending_flap: bool,
}

impl Session {
    /// Validate the config and put up the title screen for round 1
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut seeds = Pcg32::seed_from_u64(seed);
        let game = GameState::new(config.clone(), seeds.random());
        log::info!("Session started with seed {}", seed);
        Ok(Self {
            config,
            screen: Screen::Title,
            game,
            high_scores: HighScores::new(),
            round: 1,
            autopilot: false,
            results: Vec::new(),
            clock: TickClock::new(),
            seeds,
            pending_flap: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Apply one batch of input events. Quit wins over everything else.
    ///
    /// A screen change ends the batch: whatever follows the key that left
    /// the title or game-over screen is discarded.
    pub fn handle_events(&mut self, events: &[InputEvent]) -> Control {
        if events.contains(&InputEvent::Quit) {
            log::info!("Quit requested");
            return Control::Quit;
        }

        for event in events {
            let screen = self.screen;
            match (screen, event) {
                (_, InputEvent::ToggleAutopilot) => {
                    self.autopilot = !self.autopilot;
                    log::info!("Autopilot: {}", self.autopilot);
                }
                (Screen::Title, InputEvent::Flap | InputEvent::Key) => self.begin_round(),
                (Screen::Playing, InputEvent::Flap) => self.pending_flap = true,
                (Screen::GameOver, InputEvent::Flap | InputEvent::Key) => self.next_round(),
                _ => {}
            }
            if self.screen != screen {
                break;
            }
        }
        Control::Continue
    }

    /// Run one fixed tick of whatever screen is up
    pub fn step(&mut self) {
        match self.screen {
            Screen::Title => {
                if self.autopilot {
                    self.begin_round();
                }
            }
            Screen::Playing => {
                let flap = self.pending_flap || (self.autopilot && autopilot::wants_flap(&self.game));
                self.pending_flap = false;

                let input = TickInput {
                    flap,
                    now_ms: self.clock.next_tick(),
                };
                tick(&mut self.game, &input);

                if !self.game.is_running() {
                    self.finish_round();
                }
            }
            Screen::GameOver => {
                if self.autopilot {
                    self.next_round();
                }
            }
        }
    }

    /// What to draw right now
    pub fn frame(&self) -> Frame {
        self.game.snapshot()
    }

    /// Summary of the round that just ended
    pub fn last_result(&self) -> Option<&RoundSummary> {
        self.results.last()
    }

    fn begin_round(&mut self) {
        self.pending_flap = false;
        self.game.start(self.clock.now_ms());
        self.screen = Screen::Playing;
    }

    fn finish_round(&mut self) {
        let score = self.game.score;
        let ticks = self.game.time_ticks;
        let rank = self.high_scores.add_score(score, self.round, ticks);
        log::info!(
            "Round {} ended with score {} (best {:?})",
            self.round,
            score,
            self.high_scores.top_score()
        );
        self.results.push(RoundSummary {
            round: self.round,
            seed: self.game.seed,
            score,
            ticks,
            crash: self.game.crash,
            rank,
        });
        self.screen = Screen::GameOver;
    }

    fn next_round(&mut self) {
        self.round += 1;
        self.game = GameState::new(self.config.clone(), self.seeds.random());
        self.screen = Screen::Title;
    }
}
