//! Game instance holding the session and its collaborators
//!
//! Feeds elapsed time to the session in fixed frame intervals, routes
//! session events to audio, and hands a scene view to the renderer.

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::*;
use crate::render::{Renderer, SceneView};
use crate::sim::{GameEvent, GameState, Input, Session};

/// Running totals for a session, for logs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub shots: u32,
    pub ducks_shot: u32,
    pub levels_cleared: u32,
    pub games_over: u32,
    pub games_completed: u32,
}

pub struct App<R: Renderer> {
    pub session: Session,
    pub audio: AudioManager,
    pub renderer: R,
    pub stats: RunStats,
    accumulator: u64,
}

impl<R: Renderer> App<R> {
    pub fn new(session: Session, audio: AudioManager, renderer: R) -> Self {
        let mut app = Self {
            session,
            audio,
            renderer,
            stats: RunStats::default(),
            accumulator: 0,
        };
        app.dispatch_events();
        app
    }

    /// Apply one input right away
    pub fn input(&mut self, input: Input) {
        self.session.handle_input(input);
        self.dispatch_events();
    }

    /// Run as many frame intervals as `elapsed_ms` covers, then draw
    pub fn update(&mut self, elapsed_ms: u64) {
        self.accumulator += elapsed_ms;

        let mut substeps = 0;
        while self.accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
            self.session.step();
            self.accumulator -= FRAME_MS;
            substeps += 1;
            self.dispatch_events();
        }
        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(FRAME_MS);
        }

        self.render();
    }

    pub fn render(&mut self) {
        let view = SceneView::build(&self.session);
        self.renderer.present(&view);
    }

    pub fn should_exit(&self) -> bool {
        self.session.exit_requested
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Sound(effect) => {
                    if effect == SoundEffect::Gunshot {
                        self.stats.shots += 1;
                    }
                    self.audio.play(effect);
                }
                GameEvent::Music { track, looped } => self.audio.play_music(track, looped),
                GameEvent::StopMusic => self.audio.stop_music(),
                GameEvent::StateChanged { to, .. } => match to {
                    GameState::LevelCompleted => self.stats.levels_cleared += 1,
                    GameState::GameCompleted => {
                        self.stats.levels_cleared += 1;
                        self.stats.games_completed += 1;
                    }
                    GameState::GameOver => self.stats.games_over += 1,
                    _ => {}
                },
                GameEvent::LevelStarted { level, ducks, ammo } => {
                    log::debug!("Level {level}: {ducks} ducks, {ammo} ammo");
                }
                GameEvent::DuckShot { id } => {
                    self.stats.ducks_shot += 1;
                    log::debug!("Duck {id} down");
                }
                GameEvent::Exit => log::info!("Exiting"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use crate::audio::{LogBackend, MusicTrack};
    use crate::render::HeadlessRenderer;
    use crate::sim::Key;

    fn app(seed: u64) -> App<HeadlessRenderer> {
        let audio = AudioManager::new(Box::new(LogBackend::default()), AssetCatalog::default());
        App::new(Session::new(seed), audio, HeadlessRenderer::default())
    }

    #[test]
    fn test_title_music_starts_on_launch() {
        let app = app(1);
        assert_eq!(app.audio.current_music(), Some(MusicTrack::Title));
    }

    #[test]
    fn test_starting_game_stops_music() {
        let mut app = app(1);
        app.input(Input::Key(Key::Enter));
        assert_eq!(app.audio.current_music(), Some(MusicTrack::Title));
        app.input(Input::Key(Key::Enter));
        assert_eq!(app.audio.current_music(), None);
    }

    #[test]
    fn test_accumulator_runs_whole_frames() {
        let mut app = app(1);
        app.update(10);
        assert_eq!(app.session.now(), 0);
        app.update(10);
        assert_eq!(app.session.now(), FRAME_MS);
        assert_eq!(app.renderer.frames_presented(), 2);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut app = app(1);
        app.update(10_000);
        assert_eq!(app.session.now(), FRAME_MS * MAX_SUBSTEPS as u64);
        app.update(0);
        assert_eq!(app.session.now(), FRAME_MS * (MAX_SUBSTEPS as u64 + 1));
    }

    #[test]
    fn test_stats_track_a_lost_round() {
        let mut app = app(3);
        app.input(Input::Key(Key::Enter));
        app.input(Input::Key(Key::Enter));
        while app.session.state != GameState::Playing {
            app.update(FRAME_MS);
        }
        for _ in 0..3 {
            app.input(Input::Click { x: -1.0, y: -1.0 });
        }
        app.update(FRAME_MS);
        assert_eq!(app.session.state, GameState::GameOver);
        assert_eq!(
            app.stats,
            RunStats {
                shots: 3,
                games_over: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_exit_from_title() {
        let mut app = app(1);
        assert!(!app.should_exit());
        app.input(Input::Key(Key::Escape));
        assert!(app.should_exit());
    }
}
