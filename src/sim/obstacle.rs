//! Gated obstacles
//!
//! A top and a bottom barrier separated by a fixed gap. Each obstacle keeps
//! the speed it was spawned with; later difficulty changes only affect new
//! obstacles.

use rand::Rng;

use super::collision::Rect;
use crate::consts::*;

/// A paired top/bottom barrier
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Pixels per frame, fixed at spawn
    pub speed: f32,
    pub width: f32,
    pub gap: f32,
    pub top_height: f32,
    pub bottom_height: f32,
    /// Set once when the actor crosses the midpoint
    pub passed: bool,
    /// Collision trims (see `bounds`)
    pub top_trim: f32,
    pub bottom_trim: f32,
}

impl Obstacle {
    /// Spawn at the right edge with a random gap position
    pub fn new<R: Rng>(speed: f32, rng: &mut R) -> Self {
        let max_top = (SCREEN_HEIGHT - OBSTACLE_GAP - OBSTACLE_MARGIN) as i32;
        let top_height = rng.random_range(OBSTACLE_MARGIN as i32..=max_top) as f32;
        Self::with_top_height(speed, top_height)
    }

    /// Spawn at the right edge with a chosen top height (clamped to the legal range)
    pub fn with_top_height(speed: f32, top_height: f32) -> Self {
        let mut obstacle = Self {
            x: SCREEN_WIDTH,
            speed,
            width: OBSTACLE_WIDTH,
            gap: OBSTACLE_GAP,
            top_height: 0.0,
            bottom_height: 0.0,
            passed: false,
            top_trim: TOP_HITBOX_TRIM,
            bottom_trim: BOTTOM_HITBOX_TRIM,
        };
        obstacle.set_top_height(top_height);
        obstacle
    }

    /// Move the gap; the bottom segment follows so the column still fills the screen
    pub fn set_top_height(&mut self, top_height: f32) {
        let max_top = SCREEN_HEIGHT - self.gap - OBSTACLE_MARGIN;
        self.top_height = top_height.clamp(OBSTACLE_MARGIN, max_top);
        self.bottom_height = SCREEN_HEIGHT - self.top_height - self.gap;
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    /// Horizontal midpoint used for pass detection
    pub fn midpoint(&self) -> f32 {
        self.x + (self.width / 2.0).floor()
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether the right edge has scrolled past the left side of the screen
    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }

    /// Top of the gap in screen space
    pub fn gap_top(&self) -> f32 {
        self.top_height
    }

    /// Bottom of the gap in screen space
    pub fn gap_bottom(&self) -> f32 {
        SCREEN_HEIGHT - self.bottom_height
    }

    /// Collision rects (top, bottom).
    ///
    /// Shorter than the drawn barriers by the trim amounts, which makes the
    /// hitbox more forgiving than the art.
    pub fn bounds(&self) -> (Rect, Rect) {
        let top = Rect::new(self.x, 0.0, self.width, self.top_height - self.top_trim);
        let bottom = Rect::new(
            self.x,
            self.gap_bottom(),
            self.width,
            self.bottom_height - self.bottom_trim,
        );
        (top, bottom)
    }
}
