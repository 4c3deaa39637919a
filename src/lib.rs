//! Coin Flap - a side-scrolling flap-through-the-gates arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, obstacles, effects, scoring)
//! - `renderer`: Draw-command generation against a fixed 1280x720 canvas
//! - `platform`: Input, frame pacing and render-surface abstractions
//! - `game`: Session controller tying input, simulation, audio and rendering together
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod cli;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{AssetError, ConfigError, GameError};
pub use game::{Game, RunReport};
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical canvas dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Target frame cadence
    pub const TARGET_FPS: u32 = 30;
    /// Nominal frame delta in seconds
    pub const FRAME_DT: f32 = 1.0 / TARGET_FPS as f32;

    /// Actor defaults - x never changes during a round
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_START_Y: f32 = SCREEN_HEIGHT / 2.0;
    /// Sprite width as a fraction of screen width (height follows the image aspect)
    pub const ACTOR_WIDTH_RATIO: f32 = 0.075;
    pub const GRAVITY: f32 = 0.6;
    pub const LIFT: f32 = -8.0;
    /// Motion blur samples kept behind the actor
    pub const HISTORY_LEN: usize = 4;
    /// Length of each pose window after a flap (seconds)
    pub const POSE_WINDOW: f32 = 0.5;
    /// Tilt clamp in degrees
    pub const MAX_TILT: f32 = 30.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 192.0; // 15% of screen width
    pub const OBSTACLE_GAP: f32 = 180.0; // 25% of screen height
    pub const OBSTACLE_MARGIN: f32 = 50.0;
    /// Collision rects are shorter than the art by these amounts
    pub const TOP_HITBOX_TRIM: f32 = 15.0;
    pub const BOTTOM_HITBOX_TRIM: f32 = 25.0;
    /// New obstacle once the newest one is this far from the right edge
    pub const SPAWN_DISTANCE: f32 = 500.0;

    /// Difficulty
    pub const BASE_SPEED: f32 = 3.0;
    pub const SPEED_GROWTH: f32 = 1.4;
    pub const SPEED_MILESTONE: u32 = 15;

    /// Score pulse: magnification and decay window (seconds)
    pub const SCORE_PULSE_SCALE: f32 = 1.3;
    pub const SCORE_PULSE_DURATION: f32 = 0.3;

    /// Floating indicator
    pub const INDICATOR_RISE: f32 = 2.0;
    pub const INDICATOR_DURATION: f32 = 1.0;
    pub const INDICATOR_WIDTH_RATIO: f32 = 0.045;

    /// Ambient overlay flicker
    pub const OVERLAY_BASE_ALPHA: i32 = 150;
    pub const OVERLAY_FLICKER: i32 = 10;

    /// Particles
    pub const DEFAULT_PARTICLE_CAP: usize = 64;
    pub const FALLING_PARTICLE_CHANCE: f64 = 0.3;
    pub const PARTICLE_SHRINK: f32 = 0.1;
    pub const PARTICLE_DRAG_FACTOR: f32 = 0.15;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
