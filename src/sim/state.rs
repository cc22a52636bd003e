//! Game state and session context
//!
//! Everything the simulation mutates lives in `Session`. Collaborators never
//! reach in to change it; they read it to draw and drain `GameEvent`s to
//! play sounds.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::timer::{Clock, OneShot, Periodic};
use crate::audio::{MusicTrack, SoundEffect};
use crate::consts::*;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Title,
    BackgroundSelection,
    Playing,
    LevelCompleted,
    GameOver,
    GameCompleted,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Title => "Title",
            GameState::BackgroundSelection => "BackgroundSelection",
            GameState::Playing => "Playing",
            GameState::LevelCompleted => "LevelCompleted",
            GameState::GameOver => "GameOver",
            GameState::GameCompleted => "GameCompleted",
        }
    }

    /// End-of-round screens that show a flashing banner
    pub fn is_end_screen(&self) -> bool {
        matches!(
            self,
            GameState::LevelCompleted | GameState::GameOver | GameState::GameCompleted
        )
    }
}

/// Background scene id, 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackgroundId(u8);

/// Crosshair id, 1..=7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrosshairId(u8);

macro_rules! cycling_id {
    ($name:ident, $count:expr) => {
        impl $name {
            pub const COUNT: u8 = $count;

            /// Returns None outside 1..=COUNT
            pub fn new(id: u8) -> Option<Self> {
                (1..=Self::COUNT).contains(&id).then_some(Self(id))
            }

            pub fn get(&self) -> u8 {
                self.0
            }

            /// Next id, wrapping from COUNT back to 1
            pub fn next(self) -> Self {
                Self(self.0 % Self::COUNT + 1)
            }

            /// Previous id, wrapping from 1 to COUNT
            pub fn prev(self) -> Self {
                Self(if self.0 > 1 { self.0 - 1 } else { Self::COUNT })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self(1)
            }
        }
    };
}

cycling_id!(BackgroundId, 6);
cycling_id!(CrosshairId, 7);

/// Background and crosshair picked on the selection screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub background: BackgroundId,
    pub crosshair: CrosshairId,
}

/// Notifications for the audio/render collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fire-and-forget sound effect
    Sound(SoundEffect),
    /// Replace the current music track
    Music { track: MusicTrack, looped: bool },
    StopMusic,
    StateChanged { from: GameState, to: GameState },
    LevelStarted { level: u32, ducks: u32, ammo: u32 },
    DuckShot { id: u32 },
    /// ESC on the title screen
    Exit,
}

/// The whole game: screen state, selection, current round and timers
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the RNG was built from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub clock: Clock,
    pub state: GameState,
    pub selection: Selection,
    /// 1-based level number; meaningful once a round has started
    pub current_level: u32,
    pub level: Level,
    /// Visibility of the flashing prompt (title) or banner lines (end screens)
    pub prompt_visible: bool,
    /// Set once ESC is pressed on the title screen
    pub exit_requested: bool,
    pub(crate) frame_loop: Periodic,
    pub(crate) flashing: Periodic,
    pub(crate) intro_delay: OneShot,
    events: Vec<GameEvent>,
}

impl Session {
    /// A fresh session on the title screen
    pub fn new(seed: u64) -> Self {
        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: Clock::default(),
            state: GameState::Title,
            selection: Selection::default(),
            current_level: 1,
            level: Level::default(),
            prompt_visible: true,
            exit_requested: false,
            frame_loop: Periodic::new(FRAME_MS),
            flashing: Periodic::new(FLASH_MS),
            intro_delay: OneShot::default(),
            events: Vec::new(),
        };
        session.enter_title();
        session
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn frame_loop_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn intro_pending(&self) -> bool {
        self.intro_delay.is_pending()
    }

    /// Queue an event for collaborators
    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at queued events without draining
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn set_state(&mut self, to: GameState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        if to != GameState::Playing {
            self.frame_loop.stop();
        }
        log::info!("State {} -> {}", from.as_str(), to.as_str());
        self.emit(GameEvent::StateChanged { from, to });
    }

    /// Restart the flashing prompt in its visible phase
    pub(crate) fn start_flashing(&mut self) {
        self.prompt_visible = true;
        self.flashing.start(self.clock.now());
    }

    pub(crate) fn stop_flashing(&mut self) {
        self.prompt_visible = true;
        self.flashing.stop();
    }

    /// Title screen: flashing prompt and looping title music
    pub(crate) fn enter_title(&mut self) {
        self.intro_delay.cancel();
        self.set_state(GameState::Title);
        self.start_flashing();
        self.emit(GameEvent::Music {
            track: MusicTrack::Title,
            looped: true,
        });
    }

    /// Build the current level's roster and start the frame loop
    pub(crate) fn start_level(&mut self) {
        let now = self.clock.now();
        self.stop_flashing();
        self.level = Level::start(self.current_level, &mut self.rng, now);
        self.set_state(GameState::Playing);
        self.frame_loop.start(now);
        self.emit(GameEvent::LevelStarted {
            level: self.level.index,
            ducks: self.level.ducks.len() as u32,
            ammo: self.level.ammo,
        });
    }

    /// Every duck is down
    pub(crate) fn complete_level(&mut self) {
        self.frame_loop.stop();
        if self.current_level >= TOTAL_LEVELS {
            self.set_state(GameState::GameCompleted);
            self.emit(GameEvent::Sound(SoundEffect::GameCompleted));
        } else {
            self.set_state(GameState::LevelCompleted);
            self.emit(GameEvent::Sound(SoundEffect::LevelCompleted));
        }
        self.start_flashing();
    }

    /// Out of ammo with ducks still flying
    pub(crate) fn game_over(&mut self) {
        self.frame_loop.stop();
        self.set_state(GameState::GameOver);
        self.emit(GameEvent::Sound(SoundEffect::GameOver));
        self.start_flashing();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_on_title() {
        let mut session = Session::new(1);
        assert_eq!(session.state, GameState::Title);
        assert!(session.prompt_visible);
        assert!(!session.frame_loop_running());
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Music {
                track: MusicTrack::Title,
                looped: true
            }]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_background_wraps() {
        let first = BackgroundId::default();
        assert_eq!(first.get(), 1);
        assert_eq!(first.prev().get(), 6);
        assert_eq!(first.prev().next(), first);

        let mut id = first;
        for _ in 0..BackgroundId::COUNT {
            id = id.next();
        }
        assert_eq!(id, first);
    }

    #[test]
    fn test_crosshair_wraps() {
        let last = CrosshairId::new(7).unwrap();
        assert_eq!(last.next().get(), 1);
        assert_eq!(CrosshairId::default().prev(), last);
        assert!(CrosshairId::new(0).is_none());
        assert!(CrosshairId::new(8).is_none());
    }

    #[test]
    fn test_set_state_same_state_is_silent() {
        let mut session = Session::new(1);
        session.drain_events();
        session.set_state(GameState::Title);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_final_level_completes_game() {
        let mut session = Session::new(3);
        session.current_level = TOTAL_LEVELS;
        session.start_level();
        session.drain_events();

        session.complete_level();
        assert_eq!(session.state, GameState::GameCompleted);
        assert!(!session.frame_loop_running());
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::Sound(SoundEffect::GameCompleted))
        );
    }
}
