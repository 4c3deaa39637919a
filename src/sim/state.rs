//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything that changes during play:
//! the actor, the active obstacles, the effects and the session counters.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::backdrop::Backdrop;
use super::effects::{AmbientOverlay, FloatingIndicator};
use super::obstacle::Obstacle;
use crate::consts::DEFAULT_PARTICLE_CAP;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Round over; waiting for a flap to start the next one
    AwaitingRestart,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    /// Flew above the top of the screen
    Ceiling,
    /// Fell below the bottom of the screen
    Floor,
    /// Hit a barrier
    Obstacle,
}

impl CrashCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrashCause::Ceiling => "ceiling",
            CrashCause::Floor => "floor",
            CrashCause::Obstacle => "obstacle",
        }
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Actor flapped
    Flapped,
    /// Obstacle cleared; carries the new score
    Scored { score: u32 },
    /// Speed milestone reached
    SpeedUp { score: u32, speed: f32 },
    /// Round ended
    Crashed {
        cause: CrashCause,
        score: u32,
        best: u32,
        speed: f32,
    },
    /// New round started
    Restarted { round: u32 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Game time in seconds (sum of frame deltas)
    pub time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Sprite size the actor collides with
    pub actor_size: Vec2,
    pub actor: Actor,
    /// Active obstacles, oldest first. Never empty while playing.
    pub obstacles: Vec<Obstacle>,
    pub indicators: Vec<FloatingIndicator>,
    pub overlay: AmbientOverlay,
    pub backdrop: Backdrop,
    pub score: u32,
    pub best_score: u32,
    /// Speed given to newly spawned obstacles
    pub speed: f32,
    /// HUD score magnification (1.0 when idle)
    pub score_scale: f32,
    pub(crate) score_pulse_at: Option<f32>,
    /// 1-based index of the current round
    pub round: u32,
    /// Live particle budget (0 disables particles)
    pub particle_cap: usize,
    /// Whether the overlay flickers
    pub flicker: bool,
    /// How the last round ended
    pub last_crash: Option<CrashCause>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning, actor_size: Vec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let speed = tuning.base_speed;
        let actor = Self::make_actor(&tuning, actor_size);
        let first = Self::make_obstacle(&tuning, speed, &mut rng);

        Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            time: 0.0,
            time_ticks: 0,
            actor_size,
            actor,
            obstacles: vec![first],
            indicators: Vec::new(),
            overlay: AmbientOverlay::default(),
            backdrop: Backdrop::new(speed),
            score: 0,
            best_score: 0,
            speed,
            score_scale: 1.0,
            score_pulse_at: None,
            round: 1,
            particle_cap: DEFAULT_PARTICLE_CAP,
            flicker: true,
            last_crash: None,
            events: Vec::new(),
            tuning,
        }
    }

    fn make_actor(tuning: &Tuning, size: Vec2) -> Actor {
        let mut actor = Actor::new(size, tuning.gravity, tuning.lift);
        actor.falling_particle_chance = tuning.falling_particle_chance;
        actor
    }

    fn make_obstacle(tuning: &Tuning, speed: f32, rng: &mut Pcg32) -> Obstacle {
        let mut obstacle = Obstacle::new(speed, rng);
        obstacle.top_trim = tuning.top_hitbox_trim;
        obstacle.bottom_trim = tuning.bottom_hitbox_trim;
        obstacle
    }

    /// Append an obstacle at the right edge moving at the current speed
    pub fn spawn_obstacle(&mut self) {
        let obstacle = Self::make_obstacle(&self.tuning, self.speed, &mut self.rng);
        self.obstacles.push(obstacle);
    }

    /// Most recently spawned obstacle
    pub fn newest_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    /// End the round: record the best score and wait for a restart
    pub fn end_round(&mut self, cause: CrashCause) {
        self.best_score = self.best_score.max(self.score);
        self.phase = GamePhase::AwaitingRestart;
        self.last_crash = Some(cause);
        self.events.push(GameEvent::Crashed {
            cause,
            score: self.score,
            best: self.best_score,
            speed: self.speed,
        });
    }

    /// Start a fresh round: new actor, one obstacle at base speed, score 0.
    /// Best score, backdrop and lingering indicators carry over.
    pub fn restart(&mut self) {
        self.speed = self.tuning.base_speed;
        self.actor = Self::make_actor(&self.tuning, self.actor_size);
        self.obstacles.clear();
        self.spawn_obstacle();
        self.score = 0;
        self.score_scale = 1.0;
        self.score_pulse_at = None;
        self.phase = GamePhase::Playing;
        self.round += 1;
        self.events.push(GameEvent::Restarted { round: self.round });
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
