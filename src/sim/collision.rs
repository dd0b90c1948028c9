//! Collision detection for axis-aligned rectangles
//!
//! Everything in the world collides as a box. Hazards hand in their narrowed
//! hit box, so the predicates here never need to know about sprites.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner plus extent, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle from a corner and a size vector
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Standard AABB overlap test
///
/// Edges that merely touch do not count as a hit.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Check that `inner` lies entirely inside `outer`
pub fn contained_in(inner: &Rect, outer: &Rect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

/// Check whether a circle overlaps a rectangle
///
/// Used for a shark's follow range around its centre.
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = Vec2::new(
        center.x.clamp(rect.x, rect.right()),
        center.y.clamp(rect.y, rect.bottom()),
    );
    closest.distance_squared(center) < radius * radius
}
