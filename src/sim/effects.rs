//! Ephemeral visual effects
//!
//! Each effect owns its expiry rule; owners prune them. None of these
//! affect gameplay.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// A wind streak left behind the actor
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Ellipse height; width is twice this. Shrinks once lifetime runs out.
    pub size: f32,
    /// Base leftward speed per frame
    pub speed: f32,
    /// Frames left before the particle starts shrinking
    pub lifetime: i32,
}

impl Particle {
    pub fn new<R: Rng>(pos: Vec2, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(pos.x, pos.y + rng.random_range(-2..=2) as f32),
            size: rng.random_range(2..=4) as f32,
            speed: rng.random_range(4.0..6.0),
            lifetime: rng.random_range(30..=60),
        }
    }

    /// Drift left (faster when the actor moves fast), jitter vertically, age.
    pub fn update<R: Rng>(&mut self, speed_factor: f32, rng: &mut R) {
        self.pos.x -= self.speed + speed_factor.abs() * PARTICLE_DRAG_FACTOR;
        self.pos.y += rng.random_range(-0.2..0.2);
        self.lifetime -= 1;
        if self.lifetime < 0 {
            self.size -= PARTICLE_SHRINK;
        }
    }

    /// Whether there is anything left to draw
    pub fn is_visible(&self) -> bool {
        self.size > 0.0
    }
}

/// A score token that floats up and fades out
#[derive(Debug, Clone)]
pub struct FloatingIndicator {
    pub pos: Vec2,
    /// Creation time (seconds of game time)
    pub born_at: f32,
    /// Seconds until fully transparent
    pub duration: f32,
    pub alpha: u8,
}

impl FloatingIndicator {
    /// Spawned at `pos`, lifted a further 40 px so it clears the actor
    pub fn new(pos: Vec2, now: f32) -> Self {
        Self {
            pos: Vec2::new(pos.x, pos.y - 40.0),
            born_at: now,
            duration: INDICATOR_DURATION,
            alpha: 255,
        }
    }

    pub fn update(&mut self, now: f32) {
        self.pos.y -= INDICATOR_RISE;

        let elapsed = (now - self.born_at).max(0.0);
        self.alpha = if elapsed >= self.duration {
            0
        } else {
            let faded = (elapsed / self.duration * 255.0) as i32;
            (255 - faded).clamp(0, 255) as u8
        };
    }

    pub fn is_expired(&self) -> bool {
        self.alpha == 0
    }
}

/// Screen-wide vignette whose opacity flickers around a baseline
#[derive(Debug, Clone, Default)]
pub struct AmbientOverlay {
    /// Offset from the baseline alpha, within ±OVERLAY_FLICKER
    pub flicker: i32,
}

impl AmbientOverlay {
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        self.flicker = rng.random_range(-OVERLAY_FLICKER..=OVERLAY_FLICKER);
    }

    /// Alpha applied to the whole overlay this frame
    pub fn alpha(&self) -> u8 {
        (OVERLAY_BASE_ALPHA + self.flicker).clamp(0, 255) as u8
    }
}
