//! Data-driven game balance
//!
//! Defaults reproduce the classic feel; a JSON file can override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay constants that shape difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Velocity set by a flap (negative = up)
    pub lift: f32,
    /// Obstacle speed at the start of every round
    pub base_speed: f32,
    /// Speed multiplier applied per milestone reached
    pub speed_growth: f32,
    /// Points between speed increases
    pub speed_milestone: u32,
    /// Distance from the right edge the newest obstacle must travel before the next spawns
    pub spawn_distance: f32,
    /// Pixels shaved off the top barrier's collision rect
    pub top_hitbox_trim: f32,
    /// Pixels shaved off the bottom barrier's collision rect
    pub bottom_hitbox_trim: f32,
    /// Chance per frame of emitting a wind particle while falling
    pub falling_particle_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            lift: LIFT,
            base_speed: BASE_SPEED,
            speed_growth: SPEED_GROWTH,
            speed_milestone: SPEED_MILESTONE,
            spawn_distance: SPAWN_DISTANCE,
            top_hitbox_trim: TOP_HITBOX_TRIM,
            bottom_hitbox_trim: BOTTOM_HITBOX_TRIM,
            falling_particle_chance: FALLING_PARTICLE_CHANCE,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Clamp values that would break the simulation's arithmetic
    fn sanitize(&mut self) {
        if self.speed_milestone == 0 {
            log::warn!("speed_milestone of 0 is invalid, using {}", SPEED_MILESTONE);
            self.speed_milestone = SPEED_MILESTONE;
        }
        self.falling_particle_chance = self.falling_particle_chance.clamp(0.0, 1.0);
        self.top_hitbox_trim = self.top_hitbox_trim.clamp(0.0, OBSTACLE_MARGIN);
        self.bottom_hitbox_trim = self.bottom_hitbox_trim.clamp(0.0, OBSTACLE_MARGIN);
    }

    /// Obstacle speed for a score, if the score sits exactly on a milestone
    pub fn speed_for_score(&self, score: u32) -> Option<f32> {
        if score == 0 || score % self.speed_milestone != 0 {
            return None;
        }
        let tier = (score / self.speed_milestone) as i32;
        Some(self.base_speed * self.speed_growth.powi(tier))
    }
}
