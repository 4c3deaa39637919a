//! Session controller
//!
//! Owns the simulation state and everything around it: routes input into
//! ticks, turns simulation events into audio cues and leaderboard entries,
//! and hands a draw list to the render surface every frame.

use serde::Serialize;

use crate::assets::Sprites;
use crate::audio::{AudioManager, Cue};
use crate::highscores::{HighScoreEntry, HighScores};
use crate::platform::{FramePacer, InputEvent, InputSource, RenderSurface};
use crate::renderer::{DrawList, FrameRenderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Frames averaged by the FPS counter
const FPS_WINDOW: usize = 60;

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub frames: u64,
    /// Rounds that ended in a crash
    pub rounds: u32,
    pub best_score: u32,
    /// Score of the round in progress when the run stopped
    pub score: u32,
    pub final_speed: f32,
    pub leaderboard: Vec<HighScoreEntry>,
}

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    pub high_scores: HighScores,
    /// Let the computer fly
    pub autopilot: bool,
    sprites: Sprites,
    audio: AudioManager,
    renderer: FrameRenderer,
    // FPS tracking
    clock: f64,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
    frames: u64,
    rounds: u32,
}

impl Game {
    /// Set up a session and start the ambient loop
    pub fn new(
        seed: u64,
        tuning: Tuning,
        settings: Settings,
        sprites: Sprites,
        mut audio: AudioManager,
    ) -> Self {
        let mut state = GameState::new(seed, tuning, sprites.actor);
        state.particle_cap = settings.max_particles();
        state.flicker = settings.effective_flicker();
        audio.apply_settings(&settings);
        audio.play(Cue::Ambient);
        log::info!(
            "Session started (seed {}, quality {})",
            seed,
            settings.quality.as_str()
        );

        Self {
            state,
            settings,
            high_scores: HighScores::new(),
            autopilot: false,
            sprites,
            audio,
            renderer: FrameRenderer::new(),
            clock: 0.0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
            frames: 0,
            rounds: 0,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    /// Advance one frame. Returns `None` once a quit event arrives.
    pub fn frame(&mut self, events: &[InputEvent], dt: f32) -> Option<DrawList> {
        if events.contains(&InputEvent::Quit) {
            log::info!("Quit requested after {} frames", self.frames);
            return None;
        }

        let input = TickInput {
            flap: events.contains(&InputEvent::Flap),
            quit: false,
            autopilot: self.autopilot,
        };
        tick(&mut self.state, &input, dt);
        self.frames += 1;

        let events = self.state.drain_events();
        self.audio.dispatch(&events);
        for event in &events {
            self.record(event);
        }

        self.track_fps(dt);
        let fps = self.settings.show_fps.then_some(self.fps);
        Some(
            self.renderer
                .render(&self.state, &self.sprites, &self.settings, fps),
        )
    }

    fn record(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Crashed { score, speed, .. } => {
                self.rounds += 1;
                if let Some(rank) = self.high_scores.add_score(score, speed, self.state.round) {
                    log::debug!("Round {} placed #{} on the leaderboard", self.state.round, rank);
                }
            }
            GameEvent::SpeedUp { score, speed } => {
                log::debug!("Speed up at {} BTC: {:.2}", score, speed);
            }
            GameEvent::Restarted { round } => log::debug!("Round {} started", round),
            GameEvent::Flapped | GameEvent::Scored { .. } => {}
        }
    }

    fn track_fps(&mut self, dt: f32) {
        self.clock += dt as f64;
        self.frame_times[self.frame_index] = self.clock;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest holds the oldest sample
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = self.clock - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    /// Run until quit or `max_frames` frames have been shown
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        surface: &mut dyn RenderSurface,
        pacer: &mut dyn FramePacer,
        max_frames: Option<u64>,
    ) -> RunReport {
        let mut frame = 0u64;
        while max_frames.is_none_or(|max| frame < max) {
            let events = input.poll(frame);
            let dt = pacer.wait();
            let Some(list) = self.frame(&events, dt) else {
                break;
            };
            surface.present(list);
            frame += 1;
        }

        let report = self.report();
        log::info!(
            "Run finished: {} frames, {} rounds, best {} BTC",
            report.frames,
            report.rounds,
            report.best_score
        );
        report
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            seed: self.state.seed,
            frames: self.frames,
            rounds: self.rounds,
            best_score: self.state.best_score,
            score: match self.state.phase {
                GamePhase::Playing => self.state.score,
                GamePhase::AwaitingRestart => 0,
            },
            final_speed: self.state.speed,
            leaderboard: self.high_scores.entries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::BuiltinAssets;
    use crate::audio::tests::RecordingSink;
    use crate::platform::{HeadlessSurface, Key, RawInput, ScriptedInput, Unpaced};
    use crate::consts::FRAME_DT;

    fn game(sink: &RecordingSink) -> Game {
        let sprites = Sprites::load(&BuiltinAssets).unwrap();
        let audio = AudioManager::new(Box::new(sink.clone()));
        Game::new(11, Tuning::default(), Settings::default(), sprites, audio)
    }

    fn cues(sink: &RecordingSink) -> Vec<Cue> {
        sink.log.borrow().iter().map(|(c, _)| *c).collect()
    }

    #[test]
    fn test_ambient_plays_once_at_start() {
        let sink = RecordingSink::default();
        let mut g = game(&sink);
        assert_eq!(cues(&sink), vec![Cue::Ambient]);
        for _ in 0..5 {
            g.frame(&[], FRAME_DT);
        }
        assert_eq!(cues(&sink), vec![Cue::Ambient]);
    }

    #[test]
    fn test_flap_plays_cue() {
        let sink = RecordingSink::default();
        let mut g = game(&sink);
        g.frame(&[InputEvent::Flap], FRAME_DT);
        assert_eq!(cues(&sink), vec![Cue::Ambient, Cue::Flap]);
        // Ambient at 0.8 master: 0.05 * 0.8
        assert!((sink.log.borrow()[0].1 - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_quit_stops_run() {
        let sink = RecordingSink::default();
        let mut g = game(&sink);
        let mut input = ScriptedInput::new().quit_at(10);
        let mut surface = HeadlessSurface::new();
        let report = g.run(&mut input, &mut surface, &mut Unpaced::new(FRAME_DT), None);
        assert_eq!(report.frames, 10);
        assert_eq!(surface.frames, 10);
    }

    #[test]
    fn test_quit_while_awaiting_restart() {
        let sink = RecordingSink::default();
        let mut g = game(&sink);
        // No input: the actor falls out of the bottom well before frame 100
        let mut input = ScriptedInput::new().quit_at(100);
        let mut surface = HeadlessSurface::new();
        let report = g.run(&mut input, &mut surface, &mut Unpaced::new(FRAME_DT), Some(500));

        assert_eq!(report.frames, 100);
        assert_eq!(report.rounds, 1);
        assert_eq!(g.state.phase, GamePhase::AwaitingRestart);
        // Zero never reaches the leaderboard
        assert!(report.leaderboard.is_empty());
        let texts = surface.last.as_ref().map(|l| l.texts()).unwrap_or_default();
        assert_eq!(texts.first().copied(), Some("Game Over"));
    }

    #[test]
    fn test_flap_restarts_after_crash() {
        let sink = RecordingSink::default();
        let mut g = game(&sink);
        g.state.actor.pos.y = 800.0;
        g.frame(&[], FRAME_DT);
        assert_eq!(g.state.phase, GamePhase::AwaitingRestart);

        g.state.score = 3;
        g.frame(&[], FRAME_DT);
        assert_eq!(g.state.phase, GamePhase::AwaitingRestart);

        g.frame(&[InputEvent::Flap], FRAME_DT);
        assert_eq!(g.state.phase, GamePhase::Playing);
        assert_eq!(g.state.score, 0);
        assert_eq!(g.state.round, 2);
    }

    #[test]
    fn test_scored_round_reaches_leaderboard() {
        let sink = RecordingSink::default();
        let mut g = game(&sink);
        g.state.score = 7;
        g.state.actor.pos.y = -50.0;
        g.frame(&[], FRAME_DT);
        assert_eq!(g.high_scores.top_score(), Some(7));
        assert_eq!(g.high_scores.entries[0].round, 1);
        assert_eq!(g.report().best_score, 7);
    }

    #[test]
    fn test_speed_up_is_silent_bookkeeping() {
        let sink = RecordingSink::default();
        let mut g = game(&sink);
        g.state.score = 15;
        g.frame(&[], FRAME_DT);
        assert!((g.state.speed - 4.2).abs() < 1e-4);
        assert_eq!(cues(&sink), vec![Cue::Ambient]);
        assert_eq!(g.report().rounds, 0);
        assert!(g.high_scores.is_empty());
    }

    #[test]
    fn test_held_space_flaps_once_per_press() {
        let sink = RecordingSink::default();
        let mut g = game(&sink);
        let mut input = ScriptedInput::new()
            .at(0, RawInput::KeyDown(Key::Space))
            .at(1, RawInput::KeyDown(Key::Space))
            .at(2, RawInput::KeyUp(Key::Space))
            .tap(3, Key::Space);
        let mut surface = HeadlessSurface::new();
        g.run(&mut input, &mut surface, &mut Unpaced::new(FRAME_DT), Some(5));
        assert_eq!(cues(&sink), vec![Cue::Ambient, Cue::Flap, Cue::Flap]);
    }

    #[test]
    fn test_fps_counter() {
        let sink = RecordingSink::default();
        let mut g = game(&sink);
        g.settings.show_fps = true;
        g.autopilot = true;
        let mut last = None;
        for _ in 0..FPS_WINDOW {
            last = g.frame(&[], FRAME_DT);
        }
        assert_eq!(g.fps(), 30);
        let texts = last.as_ref().map(|l| l.texts()).unwrap_or_default();
        assert_eq!(texts.last().copied(), Some("30 FPS"));
    }

    #[test]
    fn test_settings_reach_simulation() {
        let sink = RecordingSink::default();
        let sprites = Sprites::load(&BuiltinAssets).unwrap();
        let settings = Settings {
            reduced_motion: true,
            particles: false,
            ..Settings::default()
        };
        let audio = AudioManager::new(Box::new(sink.clone()));
        let g = Game::new(1, Tuning::default(), settings, sprites, audio);
        assert_eq!(g.state.particle_cap, 0);
        assert!(!g.state.flicker);
    }
}
