//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-locked physics, injected game time
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod backdrop;
pub mod collision;
pub mod effects;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use actor::{Actor, Pose, TrailPoint, pose_for};
pub use backdrop::Backdrop;
pub use collision::Rect;
pub use effects::{AmbientOverlay, FloatingIndicator, Particle};
pub use obstacle::Obstacle;
pub use state::{CrashCause, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, score_scale, tick, update_difficulty};
