//! Per-tick simulation update
//!
//! Drives the phase machine once per frame. While playing, the order is:
//! player, viewport bounds, corridor collision, corridor scroll, hazard
//! spawn and movement, hazard collision, bubbles.

use super::collision::{contained_in, intersects};
use super::corridor::border_bounds;
use super::spawner::{Spawner, shark_speed};
use super::state::{CrashCause, GameEvent, GamePhase, GameState, Variant};
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Ascend is being held
    pub ascend: bool,
    /// Start a run (edge-triggered, already consumed by the caller)
    pub activate: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::WaitingToStart => {
            if input.activate {
                state.phase = GamePhase::Playing;
                state.player.ascend = input.ascend;
                state.events.push(GameEvent::Started);
                log::debug!("Run started");
            }
        }
        GamePhase::Playing => tick_playing(state, input, dt),
        GamePhase::Ended => tick_ended(state, dt),
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    let variant = state.variant();
    let view = state.view();

    // Never index into a dry strip
    if variant.has_corridor() && state.corridor.is_exhausted() {
        log::warn!("Corridor strip exhausted, ending run");
        state.end_session(CrashCause::CorridorExhausted);
        return;
    }

    state.player.ascend = input.ascend;
    state.player.update(&variant.player_tuning(), dt);

    let player_rect = state.player.body.hit_rect();
    if !contained_in(&player_rect, &state.view_rect()) {
        state.end_session(CrashCause::OutOfBounds);
        return;
    }

    let score = state.player.score;
    if variant.has_corridor() {
        state.bounds = border_bounds(score, view.y);

        if state.corridor.collides(&player_rect) {
            state.end_session(CrashCause::Border);
            return;
        }

        let bounds = state.bounds;
        let GameState { corridor, rng, .. } = state;
        corridor.update(score, bounds, view, rng);
    }

    {
        let follow = state.config.follow_radius();
        let difficulty = state.config.difficulty;
        let bounds = state.bounds;
        let GameState {
            spawner,
            hazards,
            rng,
            ..
        } = state;

        match variant {
            Variant::Corridor => {
                spawner.spawn_missiles(hazards, score, bounds, view, dt, rng);
            }
            Variant::Diver => {
                spawner.spawn_sharks(hazards, shark_speed(difficulty), view, rng);
            }
        }
        spawner.advance(hazards, &player_rect, follow, dt, rng);
    }

    if let Some(i) = state
        .hazards
        .iter()
        .position(|h| intersects(&h.hit_rect(), &player_rect))
    {
        let hazard = state.hazards.remove(i);
        state.end_session(CrashCause::Hazard(hazard.kind));
        return;
    }
    Spawner::cull(&mut state.hazards);

    if variant.has_corridor() {
        state.update_bubbles(dt);
    }
}

fn tick_ended(state: &mut GameState, dt: f32) {
    if let Some(explosion) = state.explosion.as_mut() {
        explosion.update(dt);
    }

    state.end_timer += dt;
    if state.end_timer >= END_DELAY {
        let final_score = state.player.score;
        state.new_session();
        state.events.push(GameEvent::SessionReset { final_score });
    }
}
