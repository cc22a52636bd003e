//! Audio system over a pluggable playback backend
//!
//! The simulation only names sounds. `AudioManager` maps them to files,
//! applies volume and mute, and keeps at most one music track playing.
//! Playback failures are logged and skipped.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::AssetCatalog;
use crate::consts::VOLUME;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Every click while playing, hit or miss
    Gunshot,
    /// A duck was hit
    DuckFalls,
    /// Jingle before level 1
    Intro,
    /// All ducks down, more levels to go
    LevelCompleted,
    /// Final level cleared
    GameCompleted,
    /// Out of ammo
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 6] = [
        SoundEffect::Gunshot,
        SoundEffect::DuckFalls,
        SoundEffect::Intro,
        SoundEffect::LevelCompleted,
        SoundEffect::GameCompleted,
        SoundEffect::GameOver,
    ];
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTrack {
    Title,
}

/// Handle to a clip started by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipHandle(pub u64);

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("could not open {path}: {reason}")]
    Open { path: String, reason: String },
    #[error("audio device unavailable")]
    NoDevice,
}

/// Something that can play audio files
pub trait AudioBackend {
    /// Start playing `path`. Looped clips run until stopped.
    fn play(&mut self, path: &Path, volume: f32, looped: bool) -> Result<ClipHandle, AudioError>;
    /// Stop a clip. Unknown or finished handles are ignored.
    fn stop(&mut self, clip: ClipHandle);
}

/// Backend that plays nothing and only logs
#[derive(Debug, Default)]
pub struct LogBackend {
    next_handle: u64,
}

impl AudioBackend for LogBackend {
    fn play(&mut self, path: &Path, volume: f32, looped: bool) -> Result<ClipHandle, AudioError> {
        self.next_handle += 1;
        log::debug!(
            "audio: play {} (volume {:.3}{})",
            path.display(),
            volume,
            if looped { ", looped" } else { "" }
        );
        Ok(ClipHandle(self.next_handle))
    }

    fn stop(&mut self, clip: ClipHandle) {
        log::debug!("audio: stop clip {}", clip.0);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    catalog: AssetCatalog,
    volume: f32,
    muted: bool,
    music: Option<(MusicTrack, ClipHandle)>,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, catalog: AssetCatalog) -> Self {
        Self {
            backend,
            catalog,
            volume: VOLUME,
            muted: false,
            music: None,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio. Muting also stops the current track.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_music();
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub fn current_music(&self) -> Option<MusicTrack> {
        self.music.map(|(track, _)| track)
    }

    /// Play a sound effect once
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let path = self.catalog.sound(effect);
        if let Err(e) = self.backend.play(&path, vol, false) {
            log::warn!("Could not play sound {:?}: {}", effect, e);
        }
    }

    /// Replace the current music track
    pub fn play_music(&mut self, track: MusicTrack, looped: bool) {
        self.stop_music();

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let path = self.catalog.music(track);
        match self.backend.play(&path, vol, looped) {
            Ok(handle) => self.music = Some((track, handle)),
            Err(e) => log::warn!("Could not play music {:?}: {}", track, e),
        }
    }

    /// Stop the current track, if any
    pub fn stop_music(&mut self) {
        if let Some((_, handle)) = self.music.take() {
            self.backend.stop(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play { path: PathBuf, looped: bool },
        Stop(u64),
    }

    /// Backend that records calls into a shared log
    #[derive(Default)]
    struct RecordingBackend {
        pub calls: Rc<RefCell<Vec<Call>>>,
        pub fail: bool,
        next: u64,
    }

    impl AudioBackend for RecordingBackend {
        fn play(
            &mut self,
            path: &Path,
            _volume: f32,
            looped: bool,
        ) -> Result<ClipHandle, AudioError> {
            if self.fail {
                return Err(AudioError::NoDevice);
            }
            self.next += 1;
            self.calls.borrow_mut().push(Call::Play {
                path: path.to_path_buf(),
                looped,
            });
            Ok(ClipHandle(self.next))
        }

        fn stop(&mut self, clip: ClipHandle) {
            self.calls.borrow_mut().push(Call::Stop(clip.0));
        }
    }

    fn manager() -> (AudioManager, Rc<RefCell<Vec<Call>>>) {
        let backend = RecordingBackend::default();
        let calls = backend.calls.clone();
        (
            AudioManager::new(Box::new(backend), AssetCatalog::new("a")),
            calls,
        )
    }

    #[test]
    fn test_play_sound_resolves_path() {
        let (mut audio, calls) = manager();
        audio.play(SoundEffect::Gunshot);
        assert_eq!(
            calls.borrow().as_slice(),
            &[Call::Play {
                path: PathBuf::from("a/effects/Gunshot.mp3"),
                looped: false
            }]
        );
    }

    #[test]
    fn test_music_replaces_previous_track() {
        let (mut audio, calls) = manager();
        audio.play_music(MusicTrack::Title, true);
        audio.play_music(MusicTrack::Title, true);
        assert_eq!(
            calls.borrow().as_slice(),
            &[
                Call::Play {
                    path: PathBuf::from("a/effects/Title.mp3"),
                    looped: true
                },
                Call::Stop(1),
                Call::Play {
                    path: PathBuf::from("a/effects/Title.mp3"),
                    looped: true
                },
            ]
        );
        assert_eq!(audio.current_music(), Some(MusicTrack::Title));
    }

    #[test]
    fn test_stop_music_is_idempotent() {
        let (mut audio, calls) = manager();
        audio.stop_music();
        audio.play_music(MusicTrack::Title, true);
        audio.stop_music();
        audio.stop_music();
        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(audio.current_music(), None);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let (mut audio, calls) = manager();
        audio.set_muted(true);
        audio.play(SoundEffect::Intro);
        audio.play_music(MusicTrack::Title, true);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_backend_failure_is_not_fatal() {
        let backend = RecordingBackend {
            fail: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Box::new(backend), AssetCatalog::default());
        audio.play(SoundEffect::GameOver);
        audio.play_music(MusicTrack::Title, false);
        assert_eq!(audio.current_music(), None);
    }
}
