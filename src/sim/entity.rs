//! Entities: a shared movable body plus kind-specific payloads

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Movable rectangle shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in world space
    pub pos: Vec2,
    /// Per-tick displacement
    pub vel: Vec2,
    /// Footprint, fixed at creation
    pub size: Vec2,
    /// Width trimmed off the footprint for collision purposes
    pub hit_inset: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            hit_inset: 0.0,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_hit_inset(mut self, inset: f32) -> Self {
        self.hit_inset = inset;
        self
    }

    /// Full footprint
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Effective collision box (narrowed width, same height)
    pub fn hit_rect(&self) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y,
            (self.size.x - self.hit_inset).max(0.0),
            self.size.y,
        )
    }

    /// Apply one tick of velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Which edge of the screen a corridor segment hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
}

/// One tile of the top or bottom border
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub edge: Edge,
    pub body: Body,
}

impl Segment {
    /// Create a segment whose extent from its edge is `height`
    pub fn new(edge: Edge, x: f32, height: f32, view_height: f32) -> Self {
        let y = match edge {
            Edge::Top => 0.0,
            Edge::Bottom => view_height - height,
        };
        let body = Body::new(Vec2::new(x, y), Vec2::new(SEGMENT_WIDTH, height))
            .with_velocity(Vec2::new(-SCROLL_SPEED, 0.0));
        Self { edge, body }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.body.pos.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.body.size.y
    }
}

/// Hazard kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Missile,
    Shark,
}

/// A moving obstacle that ends the session on contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub body: Body,
    /// Missiles: units per tick. Sharks: units per second.
    pub speed: f32,
    pub anim_frame: u32,
    anim_timer: f32,
}

impl Hazard {
    pub fn missile(id: u32, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind: HazardKind::Missile,
            body: Body::new(pos, Vec2::new(MISSILE_WIDTH, MISSILE_HEIGHT))
                .with_velocity(Vec2::new(-speed, 0.0))
                .with_hit_inset(HAZARD_HIT_INSET),
            speed,
            anim_frame: 0,
            anim_timer: 0.0,
        }
    }

    pub fn shark(id: u32, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind: HazardKind::Shark,
            body: Body::new(pos, Vec2::new(SHARK_WIDTH, SHARK_HEIGHT))
                .with_hit_inset(HAZARD_HIT_INSET),
            speed,
            anim_frame: 0,
            anim_timer: 0.0,
        }
    }

    /// Move one tick. `drift` is the vertical offset chosen by the spawner.
    pub fn advance(&mut self, dt: f32, drift: f32) {
        match self.kind {
            HazardKind::Missile => {
                self.body.integrate();
                // Faster missiles flicker faster
                self.step_animation(dt, (100.0 - self.speed).max(1.0) / 1000.0, MISSILE_FRAMES);
            }
            HazardKind::Shark => {
                self.body.pos.x -= self.speed * dt;
                self.body.pos.y += drift;
                self.step_animation(dt, SHARK_FRAME_TIME, u32::MAX);
            }
        }
    }

    fn step_animation(&mut self, dt: f32, frame_time: f32, frames: u32) {
        self.anim_timer += dt;
        while self.anim_timer >= frame_time {
            self.anim_timer -= frame_time;
            self.anim_frame = self.anim_frame.wrapping_add(1) % frames;
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.body.pos.x
    }

    pub fn hit_rect(&self) -> Rect {
        self.body.hit_rect()
    }

    /// True once the hazard has travelled far enough past the left edge
    pub fn is_gone(&self) -> bool {
        match self.kind {
            HazardKind::Missile => self.x() < MISSILE_REMOVE_X,
            HazardKind::Shark => self.x() < -SHARK_TILE_WIDTH,
        }
    }
}

/// Crash feedback: plays once, then stays hidden
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub frame: u32,
    timer: f32,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            frame: 0,
            timer: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.finished() {
            return;
        }
        self.timer += dt;
        while self.timer >= EXPLOSION_FRAME_TIME && !self.finished() {
            self.timer -= EXPLOSION_FRAME_TIME;
            self.frame += 1;
        }
    }

    pub fn finished(&self) -> bool {
        self.frame >= EXPLOSION_FRAMES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missile_hit_rect_is_narrowed() {
        let missile = Hazard::missile(1, Vec2::new(100.0, 50.0), 10.0);
        let hit = missile.hit_rect();
        assert_eq!(hit.w, MISSILE_WIDTH - HAZARD_HIT_INSET);
        assert_eq!(hit.h, MISSILE_HEIGHT);
        assert_eq!(missile.body.rect().w, MISSILE_WIDTH);
    }

    #[test]
    fn test_missile_advances_by_speed() {
        let mut missile = Hazard::missile(1, Vec2::new(100.0, 50.0), 13.0);
        missile.advance(1.0 / 30.0, 0.0);
        assert_eq!(missile.x(), 87.0);
        assert_eq!(missile.body.pos.y, 50.0);
    }

    #[test]
    fn test_shark_moves_per_second() {
        let mut shark = Hazard::shark(1, Vec2::new(500.0, 200.0), 300.0);
        shark.advance(0.5, 2.0);
        assert_eq!(shark.x(), 350.0);
        assert_eq!(shark.body.pos.y, 202.0);
    }

    #[test]
    fn test_bottom_segment_hangs_from_bottom_edge() {
        let seg = Segment::new(Edge::Bottom, 40.0, 25.0, 1000.0);
        assert_eq!(seg.body.pos.y, 975.0);
        assert_eq!(seg.body.rect().bottom(), 1000.0);
        let top = Segment::new(Edge::Top, 40.0, 25.0, 1000.0);
        assert_eq!(top.body.pos.y, 0.0);
    }

    #[test]
    fn test_explosion_plays_once() {
        let mut explosion = Explosion::new(Vec2::ZERO);
        for _ in 0..100 {
            explosion.update(0.01);
        }
        assert!(explosion.finished());
        assert_eq!(explosion.frame, EXPLOSION_FRAMES);
    }
}
