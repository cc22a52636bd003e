//! Duck entity: linear flight with edge reflection, flap and fall animation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::timer::{OneShot, Periodic};
use crate::consts::*;
use crate::play_area_max;

/// Vertical speed below which a duck counts as flying horizontally
pub const HORIZONTAL_EPSILON: f32 = 0.1;

/// Animation frame shown right after a hit
pub const FALL_START_FRAME: u8 = 7;
/// Animation frame shown for the second half of the fall
pub const FALL_END_FRAME: u8 = 8;

/// Duck plumage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuckColor {
    Black,
    Blue,
    Red,
}

impl DuckColor {
    pub const ALL: [DuckColor; 3] = [DuckColor::Black, DuckColor::Blue, DuckColor::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            DuckColor::Black => "black",
            DuckColor::Blue => "blue",
            DuckColor::Red => "red",
        }
    }
}

/// Which sprite to draw for a duck, and how to mirror it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteFrame {
    /// Sprite index 1..=8 (1-3 diagonal flight, 4-6 horizontal flight, 7-8 falling)
    pub index: u8,
    pub flip_x: bool,
    pub flip_y: bool,
}

/// A duck entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Duck {
    pub id: u32,
    pub color: DuckColor,
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Pixels per frame tick
    pub vel: Vec2,
    /// 1..=3 while flying, 7..=8 while falling
    pub animation_frame: u8,
    pub alive: bool,
    pub falling: bool,
    flap: Periodic,
    fall_frame: OneShot,
    fall_ground: OneShot,
}

impl Duck {
    /// Spawn a live duck and start its wing flap at `now`
    pub fn new(id: u32, color: DuckColor, pos: Vec2, vel: Vec2, now: u64) -> Self {
        let mut flap = Periodic::new(FLAP_MS);
        flap.start(now);
        Self {
            id,
            color,
            pos,
            vel,
            animation_frame: 1,
            alive: true,
            falling: false,
            flap,
            fall_frame: OneShot::default(),
            fall_ground: OneShot::default(),
        }
    }

    /// Advance one frame tick: move, then reflect off the window edges
    pub fn update(&mut self) {
        if !self.alive || self.falling {
            return;
        }

        self.pos += self.vel;

        let max = play_area_max(DUCK_SIZE);
        if self.pos.x <= 0.0 || self.pos.x >= max.x {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(0.0, max.x);
        }
        if self.pos.y <= 0.0 || self.pos.y >= max.y {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(0.0, max.y);
        }
    }

    /// Kill the duck and start its fall. Returns false if it was already down.
    pub fn shoot(&mut self, now: u64) -> bool {
        if !self.alive || self.falling {
            return false;
        }
        self.alive = false;
        self.falling = true;
        self.animation_frame = FALL_START_FRAME;
        self.flap.stop();
        self.fall_frame.schedule(now, FALL_FRAME_MS);
        self.fall_ground.schedule(now, FALL_GROUND_MS);
        true
    }

    /// Inclusive bounding box hit test
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.pos.x
            && px <= self.pos.x + DUCK_SIZE
            && py >= self.pos.y
            && py <= self.pos.y + DUCK_SIZE
    }

    /// Fire any due animation timers
    pub fn advance(&mut self, now: u64) {
        if self.flap.fire(now) && self.alive && !self.falling {
            self.animation_frame = (self.animation_frame % 3) + 1;
        }
        if self.fall_frame.fire(now) {
            self.animation_frame = FALL_END_FRAME;
        }
        if self.fall_ground.fire(now) {
            self.pos.y = WINDOW_HEIGHT - DUCK_SIZE;
        }
    }

    /// True once the fall timeline has run to the ground
    pub fn landed(&self) -> bool {
        self.falling && !self.fall_frame.is_pending() && !self.fall_ground.is_pending()
    }

    /// Flying horizontally (uses the side-on frame set, never flipped vertically)
    pub fn is_horizontal(&self) -> bool {
        self.vel.y.abs() < HORIZONTAL_EPSILON
    }

    /// Sprite selection. Horizontal flight uses frames 4-6 and diagonal
    /// flight 1-3; falling ducks show 7-8. The mirror flags follow the
    /// velocity in every state, falling included.
    pub fn sprite(&self) -> SpriteFrame {
        let horizontal = self.is_horizontal();
        let index = if self.falling || !horizontal {
            self.animation_frame
        } else {
            self.animation_frame + 3
        };
        SpriteFrame {
            index,
            flip_x: self.vel.x < 0.0,
            flip_y: !horizontal && self.vel.y >= 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn duck_at(x: f32, y: f32, vx: f32, vy: f32) -> Duck {
        Duck::new(1, DuckColor::Blue, Vec2::new(x, y), Vec2::new(vx, vy), 0)
    }

    #[test]
    fn test_update_moves_by_velocity() {
        let mut duck = duck_at(100.0, 100.0, 6.0, -6.0);
        duck.update();
        assert_eq!(duck.pos, Vec2::new(106.0, 94.0));
        assert_eq!(duck.vel, Vec2::new(6.0, -6.0));
    }

    #[test]
    fn test_reflects_off_right_edge() {
        let max = play_area_max(DUCK_SIZE);
        let mut duck = duck_at(max.x - 2.0, 100.0, 9.0, 0.0);
        duck.update();
        assert_eq!(duck.pos.x, max.x);
        assert_eq!(duck.vel.x, -9.0);
        // Other axis untouched
        assert_eq!(duck.vel.y, 0.0);
    }

    #[test]
    fn test_reflects_off_top_edge() {
        let mut duck = duck_at(100.0, 3.0, 6.0, -6.0);
        duck.update();
        assert_eq!(duck.pos.y, 0.0);
        assert_eq!(duck.vel, Vec2::new(6.0, 6.0));
    }

    #[test]
    fn test_dead_duck_does_not_move() {
        let mut duck = duck_at(100.0, 100.0, 6.0, 6.0);
        assert!(duck.shoot(0));
        duck.update();
        assert_eq!(duck.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_shoot_is_idempotent() {
        let mut duck = duck_at(100.0, 100.0, 6.0, 6.0);
        assert!(duck.shoot(0));
        assert!(!duck.alive);
        assert!(duck.falling);
        assert_eq!(duck.animation_frame, FALL_START_FRAME);

        duck.advance(FALL_FRAME_MS);
        assert!(!duck.shoot(FALL_FRAME_MS));
        assert_eq!(duck.animation_frame, FALL_END_FRAME);
    }

    #[test]
    fn test_fall_timeline() {
        let mut duck = duck_at(100.0, 100.0, 6.0, 6.0);
        duck.shoot(1000);

        duck.advance(1499);
        assert_eq!(duck.animation_frame, FALL_START_FRAME);
        duck.advance(1500);
        assert_eq!(duck.animation_frame, FALL_END_FRAME);
        assert_eq!(duck.pos.y, 100.0);
        assert!(!duck.landed());

        duck.advance(2000);
        assert_eq!(duck.pos.y, WINDOW_HEIGHT - DUCK_SIZE);
        assert!(duck.landed());
    }

    #[test]
    fn test_flap_cycles_three_frames() {
        let mut duck = duck_at(100.0, 100.0, 6.0, 6.0);
        let mut frames = Vec::new();
        for step in 1..=4 {
            duck.advance(step * FLAP_MS);
            frames.push(duck.animation_frame);
        }
        assert_eq!(frames, vec![2, 3, 1, 2]);
    }

    #[test]
    fn test_flap_stops_when_shot() {
        let mut duck = duck_at(100.0, 100.0, 6.0, 6.0);
        duck.shoot(10);
        duck.advance(FLAP_MS);
        assert_eq!(duck.animation_frame, FALL_START_FRAME);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let duck = duck_at(100.0, 200.0, 0.0, 0.0);
        assert!(duck.contains(100.0, 200.0));
        assert!(duck.contains(100.0 + DUCK_SIZE, 200.0 + DUCK_SIZE));
        assert!(!duck.contains(99.9, 250.0));
        assert!(!duck.contains(150.0, 200.0 + DUCK_SIZE + 0.1));
    }

    #[test]
    fn test_sprite_horizontal_left() {
        let duck = duck_at(100.0, 100.0, -9.0, 0.0);
        let sprite = duck.sprite();
        assert_eq!(sprite.index, 4);
        assert!(sprite.flip_x);
        assert!(!sprite.flip_y);
    }

    #[test]
    fn test_sprite_diagonal_down_right() {
        let duck = duck_at(100.0, 100.0, 6.0, 6.0);
        let sprite = duck.sprite();
        assert_eq!(sprite.index, 1);
        assert!(!sprite.flip_x);
        assert!(sprite.flip_y);
    }

    #[test]
    fn test_sprite_diagonal_up_left() {
        let duck = duck_at(100.0, 100.0, -6.0, -6.0);
        let sprite = duck.sprite();
        assert_eq!(sprite.index, 1);
        assert!(sprite.flip_x);
        assert!(!sprite.flip_y);
    }

    #[test]
    fn test_sprite_falling_keeps_mirroring() {
        let mut duck = duck_at(100.0, 100.0, -6.0, 6.0);
        duck.shoot(0);
        let sprite = duck.sprite();
        assert_eq!(sprite.index, FALL_START_FRAME);
        assert!(sprite.flip_x);
        assert!(sprite.flip_y);

        let mut duck = duck_at(100.0, 100.0, 9.0, 0.0);
        duck.shoot(0);
        assert_eq!(duck.sprite().index, FALL_START_FRAME);
    }

    proptest! {
        #[test]
        fn prop_update_stays_in_bounds(
            x in 0.0f32..(WINDOW_WIDTH - DUCK_SIZE),
            y in 0.0f32..(WINDOW_HEIGHT - DUCK_SIZE),
            vx in -12.0f32..12.0,
            vy in -12.0f32..12.0,
            ticks in 1usize..400,
        ) {
            let mut duck = duck_at(x, y, vx, vy);
            let max = play_area_max(DUCK_SIZE);
            for _ in 0..ticks {
                duck.update();
                prop_assert!(duck.pos.x >= 0.0 && duck.pos.x <= max.x);
                prop_assert!(duck.pos.y >= 0.0 && duck.pos.y <= max.y);
            }
        }

        #[test]
        fn prop_reflection_only_negates(
            x in 0.0f32..(WINDOW_WIDTH - DUCK_SIZE),
            y in 0.0f32..(WINDOW_HEIGHT - DUCK_SIZE),
            vx in -12.0f32..12.0,
            vy in -12.0f32..12.0,
        ) {
            let mut duck = duck_at(x, y, vx, vy);
            duck.update();
            prop_assert_eq!(duck.vel.x.abs(), vx.abs());
            prop_assert_eq!(duck.vel.y.abs(), vy.abs());
        }
    }
}
