//! End-to-end session scenarios driven through the public API

use coin_flap::assets::{BuiltinAssets, Sprites};
use coin_flap::audio::AudioManager;
use coin_flap::consts::*;
use coin_flap::platform::{HeadlessSurface, ScriptedInput, Unpaced};
use coin_flap::sim::{CrashCause, GamePhase, GameState, Obstacle, TickInput, tick};
use coin_flap::{Game, Settings, Tuning};
use glam::Vec2;

fn new_state(seed: u64) -> GameState {
    let mut state = GameState::new(seed, Tuning::default(), Vec2::new(96.0, 72.0));
    state.particle_cap = 0;
    state
}

/// Keep every gap centred and the actor parked inside it
fn hover(state: &mut GameState) {
    for o in &mut state.obstacles {
        o.set_top_height(270.0);
    }
    state.actor.pos.y = 324.0;
    state.actor.velocity = 0.0;
}

fn hover_until(state: &mut GameState, score: u32) {
    let idle = TickInput::default();
    for _ in 0..50_000 {
        if state.score >= score {
            return;
        }
        hover(state);
        tick(state, &idle, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing, "crashed at score {}", state.score);
    }
    panic!("never reached score {score}");
}

#[test]
fn speed_steps_up_at_each_milestone() {
    let mut state = new_state(2024);
    assert_eq!(state.score, 0);
    assert_eq!(state.obstacles.len(), 1);
    assert_eq!(state.obstacles[0].speed, BASE_SPEED);

    hover_until(&mut state, 15);
    assert_eq!(state.score, 15);
    assert!((state.speed - 4.2).abs() < 1e-4, "speed {}", state.speed);

    hover_until(&mut state, 30);
    assert_eq!(state.score, 30);
    assert!((state.speed - 5.88).abs() < 1e-4, "speed {}", state.speed);
}

#[test]
fn leaving_the_top_ends_the_round_and_flap_restarts() {
    let mut state = new_state(7);
    state.best_score = 3;
    state.score = 5;
    state.actor.pos.y = -1.0;
    state.actor.velocity = 0.0;

    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert_eq!(state.phase, GamePhase::AwaitingRestart);
    assert_eq!(state.last_crash, Some(CrashCause::Ceiling));
    assert_eq!(state.best_score, 5);

    let flap = TickInput {
        flap: true,
        ..Default::default()
    };
    tick(&mut state, &flap, FRAME_DT);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 0);
    assert_eq!(state.best_score, 5);
    assert_eq!(state.obstacles.len(), 1);
    assert_eq!(state.obstacles[0].speed, BASE_SPEED);
    assert_eq!(state.obstacles[0].x, SCREEN_WIDTH);
}

#[test]
fn obstacle_scrolls_off_and_is_retired() {
    let mut obstacle = Obstacle::with_top_height(5.0, 200.0);
    assert_eq!(obstacle.x, SCREEN_WIDTH);
    obstacle.update();
    assert_eq!(obstacle.x, 1275.0);

    for _ in 1..256 {
        obstacle.update();
    }
    assert!(obstacle.x <= 0.0);

    // Retired once the right edge has left the screen
    let mut active = vec![obstacle];
    while active.iter().all(|o| !o.is_offscreen()) {
        for o in &mut active {
            o.update();
        }
    }
    active.retain(|o| !o.is_offscreen());
    assert!(active.is_empty());
}

#[test]
fn same_seed_same_session() {
    let run = |seed| {
        let mut state = new_state(seed);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..3_000 {
            tick(&mut state, &input, FRAME_DT);
        }
        (
            state.score,
            state.best_score,
            state.round,
            state.actor.pos.y,
            state.obstacles.iter().map(|o| o.top_height).collect::<Vec<_>>(),
        )
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn headless_autopilot_run_reports() {
    let sprites = Sprites::load(&BuiltinAssets).unwrap();
    let mut game = Game::new(
        5,
        Tuning::default(),
        Settings::default(),
        sprites,
        AudioManager::default(),
    );
    game.autopilot = true;

    let mut surface = HeadlessSurface::new();
    let report = game.run(
        &mut ScriptedInput::new(),
        &mut surface,
        &mut Unpaced::new(FRAME_DT),
        Some(900),
    );

    assert_eq!(report.frames, 900);
    assert_eq!(surface.frames, 900);
    // The ambient overlay mesh goes out with every playing frame
    assert!(surface.mesh_bytes > 0);
    assert_eq!(surface.mesh_bytes % 24, 0);
    assert_eq!(report.seed, 5);
    assert!(report.best_score >= report.leaderboard.first().map_or(0, |e| e.score));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["frames"], 900);
    assert!(json["leaderboard"].is_array());
}
