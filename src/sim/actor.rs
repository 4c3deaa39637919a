//! The player-controlled actor
//!
//! Falls under gravity, jumps on a flap, leaves a short motion-blur history
//! and a stream of wind particles behind it.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use super::effects::Particle;
use crate::consts::*;

/// Which sprite the actor shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Rising,
    Neutral,
    Falling,
}

/// Pose for a velocity and the seconds since the last flap.
///
/// First window after a flap shows the rising sprite, the second the neutral
/// one; after that, or whenever the actor is not moving up, it is falling.
pub fn pose_for(velocity: f32, since_flap: Option<f32>) -> Pose {
    if velocity >= 0.0 {
        return Pose::Falling;
    }
    match since_flap {
        Some(t) if t < POSE_WINDOW => Pose::Rising,
        Some(t) if t < 2.0 * POSE_WINDOW => Pose::Neutral,
        _ => Pose::Falling,
    }
}

/// Motion blur sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub velocity: f32,
}

/// The actor entity
#[derive(Debug, Clone)]
pub struct Actor {
    /// Top-left of the sprite; x is fixed for the whole round
    pub pos: Vec2,
    /// Vertical velocity, positive = down
    pub velocity: f32,
    pub gravity: f32,
    pub lift: f32,
    /// Sprite size on screen
    pub size: Vec2,
    pub pose: Pose,
    /// Game time of the last flap
    pub last_flap: Option<f32>,
    /// Recent samples, oldest first
    pub history: VecDeque<TrailPoint>,
    pub particles: Vec<Particle>,
    /// Chance of a particle per frame while falling
    pub falling_particle_chance: f64,
}

impl Actor {
    pub fn new(size: Vec2, gravity: f32, lift: f32) -> Self {
        Self {
            pos: Vec2::new(ACTOR_X, ACTOR_START_Y),
            velocity: 0.0,
            gravity,
            lift,
            size,
            pose: Pose::Neutral,
            last_flap: None,
            history: VecDeque::with_capacity(HISTORY_LEN + 1),
            particles: Vec::new(),
            falling_particle_chance: FALLING_PARTICLE_CHANCE,
        }
    }

    /// Advance one frame.
    ///
    /// `now` is game time in seconds; `particle_cap` bounds live particles
    /// (0 disables them).
    pub fn update<R: Rng>(&mut self, rng: &mut R, now: f32, particle_cap: usize) {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;

        self.history.push_back(TrailPoint {
            pos: self.pos,
            velocity: self.velocity,
        });
        while self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }

        // Always emit while rising, sometimes while falling
        let emit = self.velocity < 0.0 || rng.random_bool(self.falling_particle_chance);
        if emit && self.particles.len() < particle_cap {
            let origin = Vec2::new(self.pos.x - 20.0, self.pos.y + self.size.y / 2.0);
            self.particles.push(Particle::new(origin, rng));
        }

        for particle in &mut self.particles {
            particle.update(self.velocity, rng);
        }
        self.particles.retain(Particle::is_visible);

        let since_flap = self.last_flap.map(|t| now - t);
        self.pose = pose_for(self.velocity, since_flap);
    }

    /// Flap: velocity is overwritten, not added to
    pub fn jump(&mut self, now: f32) {
        self.velocity = self.lift;
        self.last_flap = Some(now);
    }

    /// Collision rect from position and sprite size
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Rotation in degrees, counter-clockwise positive (nose up while rising)
    pub fn tilt_degrees(&self) -> f32 {
        (-self.velocity * 3.0).clamp(-MAX_TILT, MAX_TILT)
    }
}
