//! Obstacle spawner
//!
//! Missiles arrive on a real-time timer that shortens with score, sharks
//! arrive as soon as the previous one has opened up enough room. All vertical
//! drift randomness for sharks is owned here rather than by each shark.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, circle_overlaps_rect};
use super::corridor::BorderBounds;
use super::entity::{Hazard, HazardKind};
use crate::consts::*;

/// Seconds between missile spawns at a given score
pub fn spawn_interval(score: u64) -> f32 {
    let ms = SPAWN_BASE_MS - (score as f32 / SPAWN_SCORE_DIVISOR).floor();
    ms.max(SPAWN_FLOOR_MS) / 1000.0
}

/// Missile speed for a score and a uniform roll in [0, 1)
///
/// The random bonus range widens with score; the result is capped.
pub fn missile_speed(score: u64, roll: f64) -> f32 {
    let bonus = (roll * score as f64 / MISSILE_SPEED_DIVISOR as f64).floor() as f32;
    (MISSILE_BASE_SPEED + bonus).min(MISSILE_MAX_SPEED)
}

/// Shark swim speed (units per second) for a difficulty setting
pub fn shark_speed(difficulty: f32) -> f32 {
    SHARK_SPEED_FACTOR * difficulty
}

/// Hazard spawner state for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds since the last missile
    elapsed: f32,
    /// The first hazard of a session takes a fixed lane
    spawned_any: bool,
    /// Last vertical drift handed to a shark
    prev_drift: Option<f32>,
    next_id: u32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self {
            next_id: self.next_id,
            ..Self::default()
        };
    }

    fn next_hazard_id(&mut self) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }

    /// Spawn a missile if the timer ran out
    pub fn spawn_missiles(
        &mut self,
        hazards: &mut Vec<Hazard>,
        score: u64,
        bounds: BorderBounds,
        view: Vec2,
        dt: f32,
        rng: &mut impl Rng,
    ) -> bool {
        self.elapsed += dt;
        if self.elapsed <= spawn_interval(score) {
            return false;
        }
        self.elapsed = 0.0;

        let y = if self.spawned_any {
            // Stay inside the widest the borders can currently reach
            let band = (view.y - bounds.max * 2.0).max(0.0);
            rng.random::<f32>() * band + bounds.max
        } else {
            view.y / 2.0
        };
        self.spawned_any = true;

        let speed = missile_speed(score, rng.random::<f64>());
        let id = self.next_hazard_id();
        hazards.push(Hazard::missile(
            id,
            Vec2::new(view.x + MISSILE_SPAWN_OFFSET, y),
            speed,
        ));
        log::trace!("Missile {} spawned at y={:.0} speed={}", id, y, speed);
        true
    }

    /// Keep sharks spaced a tenth of the screen apart
    pub fn spawn_sharks(
        &mut self,
        hazards: &mut Vec<Hazard>,
        speed: f32,
        view: Vec2,
        rng: &mut impl Rng,
    ) -> bool {
        let spacing = view.x / SHARKS_ON_SCREEN;
        let due = hazards
            .last()
            .is_none_or(|newest| newest.x() < view.x - spacing);
        if !due {
            return false;
        }

        let y = if self.spawned_any {
            rng.random_range(0.0..=(view.y - SHARK_TILE_HEIGHT).max(0.0))
        } else {
            view.y / 2.0
        };
        self.spawned_any = true;

        let id = self.next_hazard_id();
        hazards.push(Hazard::shark(id, Vec2::new(view.x, y), speed));
        true
    }

    /// Next vertical wander for a shark
    ///
    /// A sign change from the previous drift is usually undone, so sharks
    /// keep wandering the same way for a while instead of jittering.
    fn next_drift(&mut self, rng: &mut impl Rng) -> f32 {
        let mut r = rng.random::<f32>() * (rng.random_range(0..10) - 5) as f32;
        let prev = *self.prev_drift.get_or_insert(r);

        if prev < 0.0 && r > 0.0 {
            if rng.random_range(0..11) <= 9 {
                r = -r;
            }
        } else if prev > 0.0 && r < 0.0 && rng.random_range(0..11) >= 1 {
            r = -r;
        }

        self.prev_drift = Some(r);
        r
    }

    /// Move every live hazard one tick
    ///
    /// `follow_radius` enables sharks steering toward the player when the
    /// player is inside their follow circle and still ahead of them.
    pub fn advance(
        &mut self,
        hazards: &mut [Hazard],
        player: &Rect,
        follow_radius: Option<f32>,
        dt: f32,
        rng: &mut impl Rng,
    ) {
        for hazard in hazards.iter_mut() {
            let drift = match hazard.kind {
                HazardKind::Missile => 0.0,
                HazardKind::Shark => {
                    let steer = follow_radius.map_or(0.0, |r| steer_toward(hazard, player, r));
                    self.next_drift(rng) + steer
                }
            };
            hazard.advance(dt, drift);
        }
    }

    /// Drop hazards that are well past the left edge
    pub fn cull(hazards: &mut Vec<Hazard>) -> usize {
        let before = hazards.len();
        hazards.retain(|h| !h.is_gone());
        before - hazards.len()
    }
}

/// Vertical steering for a shark chasing the player
fn steer_toward(shark: &Hazard, player: &Rect, radius: f32) -> f32 {
    let center = shark.hit_rect().center();
    if center.x <= player.x || !circle_overlaps_rect(center, radius, player) {
        return 0.0;
    }
    let step = SHARK_STEER_FACTOR * (shark.speed / 150.0);
    let y = shark.body.pos.y;
    if player.y > y {
        step
    } else if player.y < y {
        -step
    } else {
        0.0
    }
}
