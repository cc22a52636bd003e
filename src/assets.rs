//! Asset lookup tables
//!
//! Every image and sound the game uses is addressed by a typed key. Paths
//! are resolved against a single asset root; missing files are reported,
//! never fatal.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::audio::{MusicTrack, SoundEffect};
use crate::sim::{BackgroundId, CrosshairId, DuckColor};

/// Highest duck sprite index on disk (1-6 flight, 7-8 falling)
pub const DUCK_SPRITE_COUNT: u8 = 8;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing asset: {}", .0.display())]
    Missing(PathBuf),
    #[error("duck sprite index {0} out of range 1..=8")]
    BadSpriteIndex(u8),
}

/// Directory per duck color
fn duck_dir(color: DuckColor) -> &'static str {
    match color {
        DuckColor::Black => "duck_black",
        DuckColor::Blue => "duck_blue",
        DuckColor::Red => "duck_red",
    }
}

/// File name per sound effect
fn effect_file(effect: SoundEffect) -> &'static str {
    match effect {
        SoundEffect::Gunshot => "Gunshot.mp3",
        SoundEffect::DuckFalls => "DuckFalls.mp3",
        SoundEffect::Intro => "Intro.mp3",
        SoundEffect::LevelCompleted => "LevelCompleted.mp3",
        SoundEffect::GameCompleted => "GameCompleted.mp3",
        SoundEffect::GameOver => "GameOver.mp3",
    }
}

fn music_file(track: MusicTrack) -> &'static str {
    match track {
        MusicTrack::Title => "Title.mp3",
    }
}

/// Resolves typed asset keys to paths under `root`
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    root: PathBuf,
}

impl AssetCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Duck sprite for a color and 1-based sprite index
    pub fn duck_sprite(&self, color: DuckColor, index: u8) -> Result<PathBuf, AssetError> {
        if !(1..=DUCK_SPRITE_COUNT).contains(&index) {
            return Err(AssetError::BadSpriteIndex(index));
        }
        Ok(self.root.join(duck_dir(color)).join(format!("{index}.png")))
    }

    pub fn background(&self, id: BackgroundId) -> PathBuf {
        self.root.join("background").join(format!("{}.png", id.get()))
    }

    /// Foreground layer drawn over the ducks; paired with the background
    pub fn foreground(&self, id: BackgroundId) -> PathBuf {
        self.root.join("foreground").join(format!("{}.png", id.get()))
    }

    pub fn crosshair(&self, id: CrosshairId) -> PathBuf {
        self.root.join("crosshair").join(format!("{}.png", id.get()))
    }

    pub fn title_screen(&self) -> PathBuf {
        self.root.join("welcome").join("1.png")
    }

    pub fn favicon(&self) -> PathBuf {
        self.root.join("favicon").join("1.png")
    }

    pub fn sound(&self, effect: SoundEffect) -> PathBuf {
        self.root.join("effects").join(effect_file(effect))
    }

    pub fn music(&self, track: MusicTrack) -> PathBuf {
        self.root.join("effects").join(music_file(track))
    }

    /// Every path the game may load
    pub fn all_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.title_screen(), self.favicon()];

        for color in DuckColor::ALL {
            for index in 1..=DUCK_SPRITE_COUNT {
                paths.push(self.root.join(duck_dir(color)).join(format!("{index}.png")));
            }
        }

        let mut background = BackgroundId::default();
        for _ in 0..BackgroundId::COUNT {
            paths.push(self.background(background));
            paths.push(self.foreground(background));
            background = background.next();
        }

        let mut crosshair = CrosshairId::default();
        for _ in 0..CrosshairId::COUNT {
            paths.push(self.crosshair(crosshair));
            crosshair = crosshair.next();
        }

        paths.extend(SoundEffect::ALL.iter().map(|&e| self.sound(e)));
        paths.push(self.music(MusicTrack::Title));
        paths
    }

    /// Check which assets are missing on disk
    pub fn verify(&self) -> Vec<AssetError> {
        self.all_paths()
            .into_iter()
            .filter(|p| !p.is_file())
            .map(AssetError::Missing)
            .collect()
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new("assets")
    }
}
