//! Level setup, ammo bookkeeping and shot resolution

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::duck::{Duck, DuckColor};
use crate::consts::*;
use crate::play_area_max;

/// The six flight directions handed out to ducks in spawn order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPattern {
    Left,
    Right,
    DownRight,
    DownLeft,
    UpRight,
    UpLeft,
}

impl FlightPattern {
    pub const ALL: [FlightPattern; 6] = [
        FlightPattern::Left,
        FlightPattern::Right,
        FlightPattern::DownRight,
        FlightPattern::DownLeft,
        FlightPattern::UpRight,
        FlightPattern::UpLeft,
    ];

    /// Pattern for the `i`-th duck of a level
    pub fn for_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    /// Velocity in pixels per frame tick (screen y grows downward)
    pub fn velocity(&self) -> Vec2 {
        let straight = 3.0 * SCALE;
        let diagonal = 2.0 * SCALE;
        match self {
            FlightPattern::Left => Vec2::new(-straight, 0.0),
            FlightPattern::Right => Vec2::new(straight, 0.0),
            FlightPattern::DownRight => Vec2::new(diagonal, diagonal),
            FlightPattern::DownLeft => Vec2::new(-diagonal, diagonal),
            FlightPattern::UpRight => Vec2::new(diagonal, -diagonal),
            FlightPattern::UpLeft => Vec2::new(-diagonal, -diagonal),
        }
    }
}

/// Number of ducks flying in level `n` (1-based)
pub fn duck_count_for_level(n: u32) -> u32 {
    n.min(MAX_DUCKS)
}

/// One round of play: the duck roster and the ammo left to shoot them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// 1-based level number
    pub index: u32,
    pub ammo: u32,
    /// Spawn order, which is also hit-test order
    pub ducks: Vec<Duck>,
    next_id: u32,
}

impl Default for Level {
    /// An empty roster; the session holds one of these until the first level starts
    fn default() -> Self {
        Self {
            index: 0,
            ammo: 0,
            ducks: Vec::new(),
            next_id: 1,
        }
    }
}

impl Level {
    /// Build level `n`, replacing any previous roster
    pub fn start<R: Rng>(n: u32, rng: &mut R, now: u64) -> Self {
        let count = duck_count_for_level(n);
        let mut level = Self {
            index: n,
            ammo: count * AMMO_PER_DUCK,
            ducks: Vec::with_capacity(count as usize),
            next_id: 1,
        };

        let max = play_area_max(DUCK_SIZE);
        for i in 0..count as usize {
            let color = DuckColor::ALL[rng.random_range(0..DuckColor::ALL.len())];
            let pos = Vec2::new(rng.random::<f32>() * max.x, rng.random::<f32>() * max.y);
            let pattern = FlightPattern::for_index(i);
            let id = level.next_duck_id();
            level
                .ducks
                .push(Duck::new(id, color, pos, pattern.velocity(), now));
        }

        log::info!(
            "Level {} starting with {} ducks and {} ammo",
            n,
            level.ducks.len(),
            level.ammo
        );
        level
    }

    /// Allocate a new duck ID
    pub fn next_duck_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// True when no duck is left alive (vacuously true for an empty roster)
    pub fn all_dead(&self) -> bool {
        self.ducks.iter().all(|d| !d.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.ducks.iter().filter(|d| d.alive).count()
    }

    /// Fire one shot at (px, py). Spends a round whether or not anything is
    /// hit, and downs every live duck under the point. Returns the IDs shot.
    pub fn register_shot(&mut self, px: f32, py: f32, now: u64) -> Vec<u32> {
        self.ammo = self.ammo.saturating_sub(1);

        let hits: Vec<u32> = self
            .ducks
            .iter_mut()
            .filter(|d| d.alive && d.contains(px, py))
            .filter_map(|d| d.shoot(now).then_some(d.id))
            .collect();

        log::debug!(
            "Shot at ({:.0}, {:.0}): {} hit, {} ammo left",
            px,
            py,
            hits.len(),
            self.ammo
        );
        hits
    }

    /// Move every duck one frame tick
    pub fn update_ducks(&mut self) {
        for duck in &mut self.ducks {
            duck.update();
        }
    }

    /// Fire due animation timers on every duck
    pub fn advance_ducks(&mut self, now: u64) {
        for duck in &mut self.ducks {
            duck.advance(now);
        }
    }
}
