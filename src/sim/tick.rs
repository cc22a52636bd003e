//! Input handling and the fixed-interval frame loop
//!
//! Key presses and clicks are applied immediately. Everything time-driven
//! (duck motion, flap/fall animation, flashing prompts, the intro delay)
//! happens in `step`, one frame interval at a time.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Session};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Discrete key presses the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Escape,
    Left,
    Right,
    Up,
    Down,
}

/// One external input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Input {
    Key(Key),
    Click { x: f32, y: f32 },
}

impl Session {
    /// Dispatch one input
    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::Key(key) => self.handle_key(key),
            Input::Click { x, y } => self.handle_click(x, y),
        }
    }

    /// Apply a key press to the screen state machine. Keys with no
    /// transition in the current state are ignored.
    pub fn handle_key(&mut self, key: Key) {
        match (self.state, key) {
            (GameState::Title, Key::Enter) => {
                self.stop_flashing();
                self.selection = Default::default();
                self.set_state(GameState::BackgroundSelection);
            }
            (GameState::Title, Key::Escape) => {
                log::info!("Exit requested");
                self.exit_requested = true;
                self.emit(GameEvent::Exit);
            }

            (GameState::BackgroundSelection, Key::Escape) => self.enter_title(),
            // Waiting on the intro jingle; the level is already on its way
            (GameState::BackgroundSelection, _) if self.intro_delay.is_pending() => {}
            (GameState::BackgroundSelection, Key::Left) => {
                self.selection.background = self.selection.background.prev();
            }
            (GameState::BackgroundSelection, Key::Right) => {
                self.selection.background = self.selection.background.next();
            }
            (GameState::BackgroundSelection, Key::Up) => {
                self.selection.crosshair = self.selection.crosshair.prev();
            }
            (GameState::BackgroundSelection, Key::Down) => {
                self.selection.crosshair = self.selection.crosshair.next();
            }
            (GameState::BackgroundSelection, Key::Enter) => {
                log::info!(
                    "Starting game with background {} and crosshair {}",
                    self.selection.background.get(),
                    self.selection.crosshair.get()
                );
                self.current_level = 1;
                self.emit(GameEvent::StopMusic);
                self.emit(GameEvent::Sound(SoundEffect::Intro));
                let now = self.clock.now();
                self.intro_delay.schedule(now, INTRO_DELAY_MS);
            }

            (GameState::LevelCompleted, Key::Enter) => {
                self.current_level += 1;
                self.start_level();
            }

            (GameState::GameOver | GameState::GameCompleted, Key::Enter) => {
                self.current_level = 1;
                self.start_level();
            }
            (GameState::GameOver | GameState::GameCompleted, Key::Escape) => self.enter_title(),

            _ => {}
        }
    }

    /// Pointer click at window coordinates. Only shoots while playing with
    /// ammo left; the gunshot sounds whether or not anything is hit.
    pub fn handle_click(&mut self, x: f32, y: f32) {
        if self.state != GameState::Playing || self.level.ammo == 0 {
            return;
        }

        self.emit(GameEvent::Sound(SoundEffect::Gunshot));
        let now = self.clock.now();
        for id in self.level.register_shot(x, y, now) {
            self.emit(GameEvent::Sound(SoundEffect::DuckFalls));
            self.emit(GameEvent::DuckShot { id });
        }
    }

    /// Advance the clock by one frame interval and run everything due
    pub fn step(&mut self) {
        let now = self.clock.advance(FRAME_MS);

        if self.intro_delay.fire(now) {
            self.start_level();
        }

        if self.flashing.fire(now) {
            self.prompt_visible = !self.prompt_visible;
        }

        self.level.advance_ducks(now);

        if self.frame_loop.fire(now) {
            self.frame_tick();
        }
    }

    /// Run `n` steps
    pub fn step_n(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// One frame loop iteration: move ducks, then check for the round ending
    fn frame_tick(&mut self) {
        if self.state != GameState::Playing {
            self.frame_loop.stop();
            return;
        }

        self.level.update_ducks();

        if self.level.all_dead() {
            self.complete_level();
        } else if self.level.ammo == 0 {
            self.game_over();
        }
    }
}
