//! Duck Hunt - A small arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ducks, levels, screen state machine, timers)
//! - `audio`: Sound effect and music management over a pluggable backend
//! - `assets`: Typed asset lookup tables
//! - `render`: Scene view model handed to the renderer
//! - `settings`: Runtime configuration
//! - `app`: Wires a session to its collaborators
//! - `demo`: Autopilot input source for headless runs

pub mod app;
pub mod assets;
pub mod audio;
pub mod demo;
pub mod render;
pub mod settings;
pub mod sim;

pub use app::App;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Global scale factor applied to the 256x240 play field
    pub const SCALE: f32 = 3.0;
    /// Default audio volume
    pub const VOLUME: f32 = 0.025;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 256.0 * SCALE;
    pub const WINDOW_HEIGHT: f32 = 240.0 * SCALE;

    /// Duck sprites are square
    pub const DUCK_SIZE: f32 = 60.0 * SCALE;
    /// Crosshair preview size on the selection screen
    pub const CROSSHAIR_PREVIEW_SIZE: f32 = 30.0 * SCALE;

    /// Number of levels in a full run
    pub const TOTAL_LEVELS: u32 = 6;
    /// Ducks per level are capped at this
    pub const MAX_DUCKS: u32 = 3;
    /// Shots granted per duck
    pub const AMMO_PER_DUCK: u32 = 3;

    /// Fixed frame loop interval (~60 Hz)
    pub const FRAME_MS: u64 = 16;
    /// Maximum frame ticks per `App::update` to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Wing flap animation period
    pub const FLAP_MS: u64 = 200;
    /// Falling sprite switches from frame 7 to frame 8
    pub const FALL_FRAME_MS: u64 = 500;
    /// Falling duck is pinned to the ground row
    pub const FALL_GROUND_MS: u64 = 1000;
    /// Intro jingle plays before level 1 starts
    pub const INTRO_DELAY_MS: u64 = 2000;
    /// Flashing prompt toggle period
    pub const FLASH_MS: u64 = 500;
}

/// Largest top-left position that keeps a sprite of `size` inside the window
#[inline]
pub fn play_area_max(size: f32) -> Vec2 {
    Vec2::new(consts::WINDOW_WIDTH - size, consts::WINDOW_HEIGHT - size)
}
