//! Scene view model
//!
//! `SceneView::build` flattens a session into what a renderer needs to draw
//! one frame: which screen, which sprites where, and the label texts. The
//! renderer itself is a collaborator behind the `Renderer` trait.

use serde::Serialize;

use crate::consts::*;
use crate::sim::{BackgroundId, CrosshairId, DuckColor, GameState, Session};

pub const TITLE_PROMPT: &str = "PRESS ENTER TO PLAY\nPRESS ESC TO EXIT";
pub const SELECTION_INSTRUCTIONS: &str =
    "USE ARROW KEYS TO NAVIGATE\nPRESS ENTER TO START\nPRESS ESC TO EXIT";

/// One duck, ready to blit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuckSprite {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Sprite index 1..=8
    pub frame: u8,
    pub color: DuckColor,
}

/// End-of-round message. `lines[0]` is always shown; the rest flash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub lines: Vec<&'static str>,
    pub flashing_visible: bool,
    pub tone: BannerTone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BannerTone {
    Win,
    Lose,
}

impl Banner {
    fn for_state(state: GameState, flashing_visible: bool) -> Option<Self> {
        let (lines, tone) = match state {
            GameState::LevelCompleted => (
                vec!["YOU WIN!", "Press ENTER to play next level"],
                BannerTone::Win,
            ),
            GameState::GameCompleted => (
                vec![
                    "You have completed the game!",
                    "Press ENTER to play again",
                    "Press ESC to exit",
                ],
                BannerTone::Win,
            ),
            GameState::GameOver => (
                vec!["GAME OVER!", "Press ENTER to play again", "Press ESC to exit"],
                BannerTone::Lose,
            ),
            _ => return None,
        };
        Some(Self {
            lines,
            flashing_visible,
            tone,
        })
    }

    /// Lines to draw this frame
    pub fn visible_lines(&self) -> Vec<&'static str> {
        if self.flashing_visible {
            self.lines.clone()
        } else {
            self.lines.iter().take(1).copied().collect()
        }
    }
}

/// What to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SceneView {
    Title {
        prompt_visible: bool,
    },
    Selection {
        background: BackgroundId,
        crosshair: CrosshairId,
        crosshair_size: f32,
        instructions: &'static str,
    },
    Game {
        background: BackgroundId,
        crosshair: CrosshairId,
        /// Back to front: background, ducks, foreground, labels
        ducks: Vec<DuckSprite>,
        level_label: String,
        ammo_label: String,
        banner: Option<Banner>,
    },
}

impl SceneView {
    pub fn build(session: &Session) -> Self {
        match session.state {
            GameState::Title => SceneView::Title {
                prompt_visible: session.prompt_visible,
            },
            GameState::BackgroundSelection => SceneView::Selection {
                background: session.selection.background,
                crosshair: session.selection.crosshair,
                crosshair_size: CROSSHAIR_PREVIEW_SIZE,
                instructions: SELECTION_INSTRUCTIONS,
            },
            state => SceneView::Game {
                background: session.selection.background,
                crosshair: session.selection.crosshair,
                ducks: session
                    .level
                    .ducks
                    .iter()
                    .map(|d| {
                        let sprite = d.sprite();
                        DuckSprite {
                            x: d.pos.x,
                            y: d.pos.y,
                            size: DUCK_SIZE,
                            flip_x: sprite.flip_x,
                            flip_y: sprite.flip_y,
                            frame: sprite.index,
                            color: d.color,
                        }
                    })
                    .collect(),
                level_label: format!("Level {}/{}", session.level.index, TOTAL_LEVELS),
                ammo_label: format!("Ammo Left: {}", session.level.ammo),
                banner: Banner::for_state(state, session.prompt_visible),
            },
        }
    }

    /// Short name of the screen, for logs
    pub fn screen_name(&self) -> &'static str {
        match self {
            SceneView::Title { .. } => "title",
            SceneView::Selection { .. } => "selection",
            SceneView::Game { banner: None, .. } => "game",
            SceneView::Game { banner: Some(_), .. } => "game (round over)",
        }
    }
}

/// Draws scene views
pub trait Renderer {
    fn present(&mut self, view: &SceneView);
}

/// Renderer with no window; logs screen changes and keeps the last frame
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    last: Option<SceneView>,
    frames: u64,
}

impl HeadlessRenderer {
    pub fn last_frame(&self) -> Option<&SceneView> {
        self.last.as_ref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn present(&mut self, view: &SceneView) {
        self.frames += 1;
        let changed = self
            .last
            .as_ref()
            .is_none_or(|last| last.screen_name() != view.screen_name());
        if changed {
            match view {
                SceneView::Game {
                    level_label,
                    ammo_label,
                    banner,
                    ..
                } => {
                    let headline = banner.as_ref().map(|b| b.lines[0]).unwrap_or("");
                    log::info!("render: {} | {} | {}", level_label, ammo_label, headline);
                }
                other => log::info!("render: {} screen", other.screen_name()),
            }
        }
        self.last = Some(view.clone());
    }
}
