//! Autopilot for headless runs
//!
//! Plays one full run through the same inputs a player would give: walks the
//! menus, shoots at ducks with a configurable hit rate, presses ENTER through
//! level transitions, and exits from the title screen once the run is over.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::play_area_max;
use crate::settings::DemoSettings;
use crate::sim::{GameState, Input, Key, Session};

/// Random miss points tried before giving up on finding empty sky
const MISS_ATTEMPTS: usize = 8;

pub struct Autopilot {
    settings: DemoSettings,
    rng: Pcg32,
    /// State seen on the previous poll, and when it was entered
    seen: Option<(GameState, u64)>,
    last_action_ms: u64,
    /// Keys already sent on the current selection screen
    menu_keys: u32,
    run_over: bool,
}

impl Autopilot {
    pub fn new(settings: DemoSettings, seed: u64) -> Self {
        Self {
            settings,
            rng: Pcg32::seed_from_u64(seed),
            seen: None,
            last_action_ms: 0,
            menu_keys: 0,
            run_over: false,
        }
    }

    /// True once the autopilot has seen a run end
    pub fn run_over(&self) -> bool {
        self.run_over
    }

    /// Decide the input for this frame, if any
    pub fn poll(&mut self, session: &Session) -> Option<Input> {
        let now = session.now();
        let state = session.state;

        let entered = match self.seen {
            Some((seen, at)) if seen == state => at,
            _ => {
                self.seen = Some((state, now));
                self.menu_keys = 0;
                now
            }
        };
        let since_entered = now.saturating_sub(entered);
        let since_action = now.saturating_sub(self.last_action_ms);
        let key_ready = since_entered >= self.settings.key_delay_ms
            && since_action >= self.settings.key_delay_ms;

        let input = match state {
            GameState::Title if key_ready => {
                if self.run_over {
                    Some(Input::Key(Key::Escape))
                } else {
                    Some(Input::Key(Key::Enter))
                }
            }
            GameState::BackgroundSelection if key_ready && !session.intro_pending() => {
                self.menu_keys += 1;
                Some(Input::Key(match self.menu_keys {
                    1 => Key::Right,
                    2 => Key::Down,
                    _ => Key::Enter,
                }))
            }
            GameState::Playing if since_action >= self.settings.shot_interval_ms => {
                Some(self.aim(session))
            }
            GameState::LevelCompleted if key_ready => Some(Input::Key(Key::Enter)),
            GameState::GameOver | GameState::GameCompleted if key_ready => {
                log::info!("Autopilot run over: {}", state.as_str());
                self.run_over = true;
                Some(Input::Key(Key::Escape))
            }
            _ => None,
        };

        if input.is_some() {
            self.last_action_ms = now;
        }
        input
    }

    /// Pick a click: a live duck's center, or empty sky on a deliberate miss
    fn aim(&mut self, session: &Session) -> Input {
        let alive: Vec<Vec2> = session
            .level
            .ducks
            .iter()
            .filter(|d| d.alive)
            .map(|d| d.pos + DUCK_SIZE / 2.0)
            .collect();

        if !alive.is_empty() && self.rng.random::<f32>() < self.settings.accuracy {
            let target = alive[self.rng.random_range(0..alive.len())];
            return Input::Click {
                x: target.x,
                y: target.y,
            };
        }

        let max = play_area_max(0.0);
        let mut point = Vec2::ZERO;
        for _ in 0..MISS_ATTEMPTS {
            point = Vec2::new(
                self.rng.random::<f32>() * max.x,
                self.rng.random::<f32>() * max.y,
            );
            if !session.level.ducks.iter().any(|d| d.contains(point.x, point.y)) {
                break;
            }
        }
        Input::Click {
            x: point.x,
            y: point.y,
        }
    }
}
