//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed frame interval only, time comes from the session clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod duck;
pub mod level;
pub mod state;
pub mod tick;
pub mod timer;

pub use duck::{Duck, DuckColor, SpriteFrame};
pub use level::{FlightPattern, Level, duck_count_for_level};
pub use state::{BackgroundId, CrosshairId, GameEvent, GameState, Selection, Session};
pub use tick::{Input, Key};
pub use timer::{Clock, OneShot, Periodic};
