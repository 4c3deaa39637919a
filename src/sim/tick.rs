//! Per-frame simulation step
//!
//! Core game loop that advances the state by one frame. Physics is
//! frame-locked; timers read the injected game clock (`dt`).

use glam::Vec2;

use super::effects::FloatingIndicator;
use super::state::{CrashCause, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::lerp;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (also restarts after a crash)
    pub flap: bool,
    /// Quit requested; the session shell stops before ticking
    pub quit: bool,
    /// Demo mode - the simulation flies itself
    pub autopilot: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time += dt;
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.autopilot {
        input.flap |= autopilot_wants_flap(state);
    }

    if state.phase == GamePhase::AwaitingRestart {
        if input.flap {
            log::info!("Round {} starting", state.round + 1);
            state.restart();
        }
        return;
    }

    let now = state.time;

    // Input and actor
    if input.flap {
        state.actor.jump(now);
        state.events.push(GameEvent::Flapped);
    }
    state.actor.update(&mut state.rng, now, state.particle_cap);
    state.backdrop.update(state.speed, state.actor.velocity);

    // Spawn, scroll and retire obstacles
    let spawn_line = SCREEN_WIDTH - state.tuning.spawn_distance;
    if state.newest_obstacle().is_none_or(|o| o.x < spawn_line) {
        state.spawn_obstacle();
    }
    for obstacle in &mut state.obstacles {
        obstacle.update();
    }
    state.obstacles.retain(|o| !o.is_offscreen());
    debug_assert!(!state.obstacles.is_empty(), "spawn rule keeps one obstacle alive");

    // Collisions and scoring; every obstacle is checked even after a hit
    let actor_rect = state.actor.bounds();
    let actor_x = state.actor.pos.x;
    let mut collided = false;
    for obstacle in &mut state.obstacles {
        let (top, bottom) = obstacle.bounds();
        if actor_rect.intersects(&top) || actor_rect.intersects(&bottom) {
            collided = true;
        }

        if !obstacle.passed && actor_x > obstacle.midpoint() {
            obstacle.passed = true;
            state.score += 1;
            state.events.push(GameEvent::Scored { score: state.score });
            state.score_pulse_at = Some(now);
            state.indicators.push(FloatingIndicator::new(
                Vec2::new(actor_x, state.actor.pos.y - 20.0),
                now,
            ));
        }
    }

    // Effects: last frame's expired indicators go first, so the final
    // zero-alpha frame is still handed to the renderer once
    state.indicators.retain(|i| !i.is_expired());
    for indicator in &mut state.indicators {
        indicator.update(now);
    }
    if state.flicker {
        state.overlay.update(&mut state.rng);
    }

    state.score_scale = score_scale(state.score_pulse_at, now);
    update_difficulty(state);

    // Terminal conditions
    let y = state.actor.pos.y;
    let cause = if y < 0.0 {
        Some(CrashCause::Ceiling)
    } else if y > SCREEN_HEIGHT {
        Some(CrashCause::Floor)
    } else if collided {
        Some(CrashCause::Obstacle)
    } else {
        None
    };
    if let Some(cause) = cause {
        log::info!(
            "Round {} over ({}): score {}, best {}",
            state.round,
            cause.as_str(),
            state.score,
            state.score.max(state.best_score)
        );
        state.end_round(cause);
    }
}

/// HUD score magnification: decays linearly from the pulse scale back to 1.0
pub fn score_scale(pulse_at: Option<f32>, now: f32) -> f32 {
    match pulse_at {
        Some(t) if now - t < SCORE_PULSE_DURATION => {
            let progress = ((now - t) / SCORE_PULSE_DURATION).max(0.0);
            lerp(SCORE_PULSE_SCALE, 1.0, progress)
        }
        _ => 1.0,
    }
}

/// Recompute obstacle speed when the score sits on a milestone.
///
/// The speed is derived from the score alone, so repeating this at the same
/// score never compounds.
pub fn update_difficulty(state: &mut GameState) {
    if let Some(speed) = state.tuning.speed_for_score(state.score) {
        if speed != state.speed {
            log::info!("Score {}: speed {:.2} -> {:.2}", state.score, state.speed, speed);
            state.events.push(GameEvent::SpeedUp {
                score: state.score,
                speed,
            });
        }
        state.speed = speed;
    }
}

/// Demo pilot: aims for the middle of the next gap, restarts immediately
fn autopilot_wants_flap(state: &GameState) -> bool {
    if state.phase == GamePhase::AwaitingRestart {
        return true;
    }

    let actor = &state.actor;
    let target_center = state
        .obstacles
        .iter()
        .find(|o| o.right() > actor.pos.x)
        .map(|o| (o.gap_top() + o.gap_bottom()) / 2.0)
        .unwrap_or(SCREEN_HEIGHT / 2.0);

    // Predict where the actor's centre will be next frame
    let next_center = actor.pos.y + actor.size.y / 2.0 + actor.velocity + actor.gravity;
    next_center > target_center + 10.0 && actor.velocity > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let mut s = GameState::new(12345, Tuning::default(), Vec2::new(96.0, 72.0));
        s.particle_cap = 0;
        s
    }

    /// Hold the actor in the middle of a centred gap
    fn hover(state: &mut GameState) {
        for o in &mut state.obstacles {
            o.set_top_height(270.0);
        }
        state.actor.pos.y = 324.0;
        state.actor.velocity = 0.0;
    }

    #[test]
    fn test_flap_emits_event_and_sets_lift() {
        let mut s = state();
        let input = TickInput {
            flap: true,
            ..Default::default()
        };
        tick(&mut s, &input, FRAME_DT);
        assert!((s.actor.velocity - (LIFT + GRAVITY)).abs() < 0.0001);
        assert_eq!(s.drain_events(), vec![GameEvent::Flapped]);
    }

    #[test]
    fn test_spawn_when_newest_passes_threshold() {
        let mut s = state();
        s.obstacles[0].x = SCREEN_WIDTH - SPAWN_DISTANCE - 1.0;
        hover(&mut s);
        tick(&mut s, &TickInput::default(), FRAME_DT);
        assert_eq!(s.obstacles.len(), 2);
        assert_eq!(s.obstacles[1].x, SCREEN_WIDTH - 3.0);
    }

    #[test]
    fn test_no_spawn_before_threshold() {
        let mut s = state();
        s.obstacles[0].x = SCREEN_WIDTH - SPAWN_DISTANCE + 10.0;
        hover(&mut s);
        tick(&mut s, &TickInput::default(), FRAME_DT);
        assert_eq!(s.obstacles.len(), 1);
    }

    #[test]
    fn test_offscreen_obstacles_removed_in_order() {
        let mut s = state();
        s.obstacles[0].x = -OBSTACLE_WIDTH + 1.0;
        s.spawn_obstacle();
        s.obstacles[1].x = 600.0;
        s.spawn_obstacle();
        s.obstacles[2].x = 1000.0;
        hover(&mut s);
        tick(&mut s, &TickInput::default(), FRAME_DT);
        let xs: Vec<f32> = s.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![597.0, 997.0]);
    }

    #[test]
    fn test_score_once_per_obstacle_after_midpoint() {
        let mut s = state();
        hover(&mut s);
        // midpoint lands just right of the actor after the first scroll
        s.obstacles[0].x = ACTOR_X - 96.0 + 3.0;
        s.obstacles[0].speed = 1.0;
        tick(&mut s, &TickInput::default(), FRAME_DT);
        assert_eq!(s.score, 0, "midpoint still right of the actor");

        for _ in 0..10 {
            hover(&mut s);
            tick(&mut s, &TickInput::default(), FRAME_DT);
        }
        assert_eq!(s.score, 1);
        assert!(s.obstacles[0].passed);
        assert_eq!(s.indicators.len(), 1);
        let scored = s
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .count();
        assert_eq!(scored, 1);
    }

    #[test]
    fn test_score_pulse_decays() {
        assert_eq!(score_scale(None, 5.0), 1.0);
        assert!((score_scale(Some(1.0), 1.0) - 1.3).abs() < 0.0001);
        assert!((score_scale(Some(1.0), 1.15) - 1.15).abs() < 0.0001);
        assert_eq!(score_scale(Some(1.0), 1.3), 1.0);
        assert_eq!(score_scale(Some(1.0), 2.0), 1.0);
    }

    #[test]
    fn test_difficulty_idempotent() {
        let mut s = state();
        s.score = 15;
        update_difficulty(&mut s);
        let once = s.speed;
        update_difficulty(&mut s);
        assert_eq!(s.speed, once);
        assert!((once - 4.2).abs() < 0.0001);

        let speedups = s
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::SpeedUp { .. }))
            .count();
        assert_eq!(speedups, 1);
    }

    #[test]
    fn test_speed_holds_between_milestones() {
        let mut s = state();
        s.score = 15;
        update_difficulty(&mut s);
        s.score = 22;
        update_difficulty(&mut s);
        assert!((s.speed - 4.2).abs() < 0.0001);
    }

    #[test]
    fn test_existing_obstacles_keep_spawn_speed() {
        let mut s = state();
        s.score = 15;
        update_difficulty(&mut s);
        assert_eq!(s.obstacles[0].speed, 3.0);
        s.spawn_obstacle();
        assert!((s.obstacles[1].speed - 4.2).abs() < 0.0001);
    }

    #[test]
    fn test_ceiling_ends_round() {
        let mut s = state();
        s.best_score = 3;
        s.score = 7;
        s.actor.pos.y = -1.0 - GRAVITY;
        s.actor.velocity = 0.0;
        tick(&mut s, &TickInput::default(), FRAME_DT);
        assert_eq!(s.phase, GamePhase::AwaitingRestart);
        assert_eq!(s.best_score, 7);
        assert_eq!(s.last_crash, Some(CrashCause::Ceiling));
    }

    #[test]
    fn test_floor_ends_round() {
        let mut s = state();
        s.actor.pos.y = SCREEN_HEIGHT;
        tick(&mut s, &TickInput::default(), FRAME_DT);
        assert_eq!(s.last_crash, Some(CrashCause::Floor));
    }

    #[test]
    fn test_collision_ends_round() {
        let mut s = state();
        s.obstacles[0].set_top_height(400.0);
        s.obstacles[0].x = ACTOR_X + 10.0;
        s.actor.pos.y = 100.0;
        s.actor.velocity = 0.0;
        tick(&mut s, &TickInput::default(), FRAME_DT);
        assert_eq!(s.phase, GamePhase::AwaitingRestart);
        assert_eq!(s.last_crash, Some(CrashCause::Obstacle));
    }

    #[test]
    fn test_hit_and_pass_in_same_frame() {
        let mut s = state();
        hover(&mut s);
        // Passed this frame: midpoint 52 -> 49, actor in the gap
        s.obstacles[0].x = ACTOR_X - 96.0 + 2.0;
        // Checked first, and its top barrier covers the actor
        let mut wall = Obstacle::with_top_height(BASE_SPEED, 400.0);
        wall.x = ACTOR_X + 13.0;
        s.obstacles.insert(0, wall);

        tick(&mut s, &TickInput::default(), FRAME_DT);

        assert!(s.obstacles[1].passed);
        assert_eq!(s.score, 1);
        assert_eq!(s.best_score, 1);
        assert_eq!(s.phase, GamePhase::AwaitingRestart);
        assert_eq!(s.last_crash, Some(CrashCause::Obstacle));
        let events = s.drain_events();
        let scored = events
            .iter()
            .position(|e| matches!(e, GameEvent::Scored { score: 1 }));
        let crashed = events
            .iter()
            .position(|e| matches!(e, GameEvent::Crashed { best: 1, .. }));
        assert!(scored.is_some() && scored < crashed);
    }

    #[test]
    fn test_forgiving_hitbox_edge() {
        let mut s = state();
        // Top barrier art ends at 200 but collides only down to 185
        s.obstacles[0].set_top_height(200.0);
        s.obstacles[0].x = ACTOR_X + 10.0;
        s.obstacles[0].speed = 0.0;
        s.actor.pos.y = 190.0 - GRAVITY;
        s.actor.velocity = 0.0;
        tick(&mut s, &TickInput::default(), FRAME_DT);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_awaiting_restart_ignores_time_until_flap() {
        let mut s = state();
        s.score = 5;
        s.end_round(CrashCause::Floor);
        let y = s.actor.pos.y;
        for _ in 0..10 {
            tick(&mut s, &TickInput::default(), FRAME_DT);
        }
        assert_eq!(s.phase, GamePhase::AwaitingRestart);
        assert_eq!(s.actor.pos.y, y);

        let flap = TickInput {
            flap: true,
            ..Default::default()
        };
        tick(&mut s, &flap, FRAME_DT);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.obstacles[0].speed, BASE_SPEED);
    }

    #[test]
    fn test_indicator_lingers_one_frame_at_zero_alpha() {
        let mut s = state();
        hover(&mut s);
        s.indicators
            .push(FloatingIndicator::new(Vec2::new(50.0, 300.0), 0.0));
        s.time = INDICATOR_DURATION;
        tick(&mut s, &TickInput::default(), FRAME_DT);
        assert_eq!(s.indicators.len(), 1);
        assert!(s.indicators[0].is_expired());

        hover(&mut s);
        tick(&mut s, &TickInput::default(), FRAME_DT);
        assert!(s.indicators.is_empty());
    }

    #[test]
    fn test_autopilot_restarts() {
        let mut s = state();
        s.end_round(CrashCause::Floor);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut s, &input, FRAME_DT);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_autopilot_keeps_ticking_across_rounds() {
        let mut s = state();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut s, &input, FRAME_DT);
        }
        assert_eq!(s.time_ticks, 300);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut s1 = GameState::new(99999, Tuning::default(), Vec2::new(96.0, 72.0));
        let mut s2 = GameState::new(99999, Tuning::default(), Vec2::new(96.0, 72.0));

        let flap = TickInput {
            flap: true,
            ..Default::default()
        };
        let idle = TickInput::default();
        for i in 0..400 {
            let input = if i % 14 == 0 { &flap } else { &idle };
            tick(&mut s1, input, FRAME_DT);
            tick(&mut s2, input, FRAME_DT);
        }

        assert_eq!(s1.time_ticks, s2.time_ticks);
        assert_eq!(s1.score, s2.score);
        assert_eq!(s1.actor.pos, s2.actor.pos);
        assert_eq!(s1.actor.particles.len(), s2.actor.particles.len());
        let h1: Vec<f32> = s1.obstacles.iter().map(|o| o.top_height).collect();
        let h2: Vec<f32> = s2.obstacles.iter().map(|o| o.top_height).collect();
        assert_eq!(h1, h2);
    }
}
