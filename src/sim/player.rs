//! Player controller
//!
//! Turns the "ascend held" intent into vertical motion and accrues score
//! against real time rather than frame count.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::consts::*;

/// How a held ascend input acts on vertical velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Thrust {
    /// Subtract this much per tick while held
    Accelerate(f32),
    /// Set velocity to minus this while held
    Impulse(f32),
}

/// Movement and scoring parameters for one game variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    pub thrust: Thrust,
    /// Added to velocity per tick when not ascending
    pub gravity: f32,
    /// Velocity is clamped to [-max_speed, max_speed]
    pub max_speed: f32,
    /// Position change per unit of velocity
    pub scale: f32,
    /// Seconds of play per score step
    pub score_interval: f32,
    pub score_step: u64,
}

impl PlayerTuning {
    pub fn helicopter() -> Self {
        Self {
            thrust: Thrust::Accelerate(PLAYER_ACCEL),
            gravity: PLAYER_ACCEL,
            max_speed: PLAYER_MAX_SPEED,
            scale: PLAYER_SCALE,
            score_interval: SCORE_INTERVAL,
            score_step: 1,
        }
    }

    pub fn diver() -> Self {
        Self {
            thrust: Thrust::Impulse(DIVER_SWIM_IMPULSE),
            gravity: DIVER_GRAVITY,
            max_speed: PLAYER_MAX_SPEED,
            scale: 1.0,
            score_interval: DIVER_SCORE_INTERVAL,
            score_step: DIVER_SCORE_STEP,
        }
    }
}

/// The player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub score: u64,
    /// Ascend intent for the current tick
    pub ascend: bool,
    /// Real time accumulated toward the next score step
    score_timer: f32,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            body: Body::new(pos, size),
            score: 0,
            ascend: false,
            score_timer: 0.0,
        }
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.body.vel.y
    }

    /// Advance one tick
    pub fn update(&mut self, tuning: &PlayerTuning, dt: f32) {
        self.score_timer += dt;
        while self.score_timer >= tuning.score_interval {
            self.score_timer -= tuning.score_interval;
            self.score += tuning.score_step;
        }

        let vel = &mut self.body.vel.y;
        match (self.ascend, tuning.thrust) {
            (true, Thrust::Accelerate(step)) => *vel -= step,
            (true, Thrust::Impulse(speed)) => *vel = -speed,
            (false, _) => *vel += tuning.gravity,
        }
        *vel = vel.clamp(-tuning.max_speed, tuning.max_speed);

        self.body.pos.y += self.body.vel.y * tuning.scale;
    }

    /// Stop vertical motion (crash or reset)
    pub fn reset_velocity(&mut self) {
        self.body.vel = Vec2::ZERO;
    }

    /// Back to the start position with a fresh score
    pub fn reset(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.reset_velocity();
        self.score = 0;
        self.ascend = false;
        self.score_timer = 0.0;
    }
}
