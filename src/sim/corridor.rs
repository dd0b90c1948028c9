//! Procedural border generator
//!
//! Two independent strips of fixed-width tiles scroll left. Whenever the
//! oldest tile scrolls off, a new one is appended on the right whose height
//! follows the strip's trend by exactly one unit, so the boundary snakes
//! smoothly between the score-dependent min/max thresholds. Every so often a
//! randomly sized tile is slipped in to break the pattern.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, intersects};
use super::entity::{Edge, Segment};
use crate::consts::*;

/// Height thresholds the strips oscillate between
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderBounds {
    pub min: f32,
    pub max: f32,
}

impl BorderBounds {
    /// Thresholds at session start
    pub fn initial() -> Self {
        Self {
            min: MIN_BORDER_BASE,
            max: MAX_BORDER_BASE,
        }
    }
}

/// Thresholds for a given score
///
/// Both grow with score; max is capped at a quarter of the viewport so the
/// borders can never close more than half of the screen, and min never
/// passes max.
pub fn border_bounds(score: u64, view_height: f32) -> BorderBounds {
    let progress = (score / BORDER_PROGRESS_DENOM) as f32;
    let max = (MAX_BORDER_BASE + progress).min(view_height / 4.0);
    let min = (MIN_BORDER_BASE + progress).min(max);
    BorderBounds { min, max }
}

/// One continuously regenerating border strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strip {
    pub edge: Edge,
    segments: VecDeque<Segment>,
    /// Trend of newly appended tiles
    growing: bool,
    /// Highest multiple of the break interval already served
    last_break: u64,
}

impl Strip {
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            segments: VecDeque::new(),
            growing: true,
            last_break: 0,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn newest(&self) -> Option<&Segment> {
        self.segments.back()
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Pre-fill across the viewport plus a small overrun, trending upward
    pub fn fill(&mut self, view: Vec2, start_height: f32) {
        self.segments.clear();
        self.growing = true;
        self.last_break = 0;

        let mut height = start_height;
        let mut i = 0u32;
        while (i as f32) * SEGMENT_SPACING < view.x + SEGMENT_OVERRUN {
            let x = i as f32 * SEGMENT_SPACING;
            self.segments
                .push_back(Segment::new(self.edge, x, height, view.y));
            height += 1.0;
            i += 1;
        }
    }

    fn append(&mut self, height: f32, view_height: f32) {
        let x = self
            .segments
            .back()
            .map(|s| s.x() + SEGMENT_SPACING)
            .unwrap_or(0.0);
        self.segments
            .push_back(Segment::new(self.edge, x, height, view_height));
    }

    /// Insert a randomly sized tile once per positive multiple of `interval`
    ///
    /// A score that jumps past a multiple in one tick still gets its tile.
    /// Returns true if a tile was inserted.
    pub fn break_pattern(
        &mut self,
        score: u64,
        interval: u64,
        bounds: BorderBounds,
        view_height: f32,
        rng: &mut impl Rng,
    ) -> bool {
        let multiple = score / interval;
        if multiple <= self.last_break || self.is_empty() {
            return false;
        }
        self.last_break = multiple;
        let height = rng.random_range(bounds.min as i32..=bounds.max as i32) as f32;
        self.append(height, view_height);
        true
    }

    /// Scroll one tick and recycle tiles that went off the left edge
    pub fn advance(&mut self, bounds: BorderBounds, view_height: f32) {
        for segment in self.segments.iter_mut() {
            segment.body.integrate();
        }

        while self
            .segments
            .front()
            .is_some_and(|s| s.x() < SEGMENT_REMOVE_X)
        {
            self.segments.pop_front();
            let Some(newest) = self.segments.back() else {
                break;
            };
            let height = newest.height();
            if height >= bounds.max {
                self.growing = false;
            }
            if height <= bounds.min {
                self.growing = true;
            }
            let next = if self.growing { height + 1.0 } else { height - 1.0 };
            self.append(next, view_height);
        }
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        self.segments
            .iter()
            .any(|s| intersects(&s.body.hit_rect(), rect))
    }
}

/// Top and bottom strips together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub top: Strip,
    pub bottom: Strip,
}

impl Default for Corridor {
    fn default() -> Self {
        Self::new()
    }
}

impl Corridor {
    /// Empty corridor (diver variant, or before the first reset)
    pub fn new() -> Self {
        Self {
            top: Strip::new(Edge::Top),
            bottom: Strip::new(Edge::Bottom),
        }
    }

    /// Refill both strips for a fresh session
    pub fn reset(&mut self, view: Vec2) {
        self.top.fill(view, TOP_START_HEIGHT);
        self.bottom.fill(view, MIN_BORDER_BASE);
    }

    /// Either strip ran dry
    pub fn is_exhausted(&self) -> bool {
        self.top.is_empty() || self.bottom.is_empty()
    }

    /// One tick of pattern breaks plus scrolling
    pub fn update(&mut self, score: u64, bounds: BorderBounds, view: Vec2, rng: &mut impl Rng) {
        if self
            .top
            .break_pattern(score, TOP_BREAK_INTERVAL, bounds, view.y, rng)
        {
            log::trace!("Top border pattern break at score {}", score);
        }
        if self
            .bottom
            .break_pattern(score, BOTTOM_BREAK_INTERVAL, bounds, view.y, rng)
        {
            log::trace!("Bottom border pattern break at score {}", score);
        }

        self.top.advance(bounds, view.y);
        self.bottom.advance(bounds, view.y);
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        self.top.collides(rect) || self.bottom.collides(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEW: Vec2 = Vec2::new(VIEW_WIDTH, VIEW_HEIGHT);

    fn heights(strip: &Strip) -> Vec<f32> {
        strip.segments().map(|s| s.height()).collect()
    }

    #[test]
    fn test_initial_fill_covers_viewport() {
        let mut corridor = Corridor::new();
        corridor.reset(VIEW);

        // i * 20 < 2560 + 40 gives 130 tiles
        assert_eq!(corridor.top.len(), 130);
        assert_eq!(corridor.bottom.len(), 130);
        assert_eq!(heights(&corridor.top)[0], TOP_START_HEIGHT);
        assert_eq!(heights(&corridor.bottom)[0], MIN_BORDER_BASE);
        assert!(corridor.top.is_growing());

        let last = corridor.top.newest().unwrap();
        assert!(last.x() + SEGMENT_WIDTH >= VIEW_WIDTH);
    }

    #[test]
    fn test_steady_state_heights_step_by_one() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut corridor = Corridor::new();
        corridor.reset(VIEW);
        let len = corridor.top.len();

        // Score 39 never triggers a pattern break
        let bounds = border_bounds(39, VIEW.y);
        for _ in 0..2000 {
            corridor.update(39, bounds, VIEW, &mut rng);
            assert_eq!(corridor.top.len(), len);
            for strip in [&corridor.top, &corridor.bottom] {
                let h = heights(strip);
                for pair in h.windows(2) {
                    assert_eq!((pair[0] - pair[1]).abs(), 1.0);
                }
            }
        }
    }

    #[test]
    fn test_trend_flips_between_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut corridor = Corridor::new();
        corridor.reset(VIEW);
        let bounds = BorderBounds::initial();

        // Run long enough for the tall initial fill to scroll away
        for _ in 0..4000 {
            corridor.update(1, bounds, VIEW, &mut rng);
        }
        for h in heights(&corridor.top) {
            assert!(h >= bounds.min - 1.0 && h <= bounds.max + 1.0, "height {h}");
        }
        for h in heights(&corridor.bottom) {
            assert!(h >= bounds.min - 1.0 && h <= bounds.max + 1.0, "height {h}");
        }
    }

    #[test]
    fn test_pattern_break_once_per_multiple() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut corridor = Corridor::new();
        corridor.reset(VIEW);
        let len = corridor.top.len();
        let bounds = border_bounds(50, VIEW.y);

        // Score sits at 50 for several ticks: only one extra tile
        for _ in 0..3 {
            corridor.top.break_pattern(50, TOP_BREAK_INTERVAL, bounds, VIEW.y, &mut rng);
        }
        assert_eq!(corridor.top.len(), len + 1);
        let extra = corridor.top.newest().unwrap().height();
        assert!(extra >= bounds.min && extra <= bounds.max);

        // Nothing below the first multiple
        assert!(!corridor.bottom.break_pattern(0, BOTTOM_BREAK_INTERVAL, bounds, VIEW.y, &mut rng));
        assert!(!corridor.bottom.break_pattern(39, BOTTOM_BREAK_INTERVAL, bounds, VIEW.y, &mut rng));
    }

    #[test]
    fn test_pattern_break_when_score_skips_multiple() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut corridor = Corridor::new();
        corridor.reset(VIEW);
        let bounds = border_bounds(40, VIEW.y);
        let strip = &mut corridor.bottom;

        // 39 -> 41 never lands on 40
        assert!(!strip.break_pattern(39, BOTTOM_BREAK_INTERVAL, bounds, VIEW.y, &mut rng));
        assert!(strip.break_pattern(41, BOTTOM_BREAK_INTERVAL, bounds, VIEW.y, &mut rng));
        assert!(!strip.break_pattern(42, BOTTOM_BREAK_INTERVAL, bounds, VIEW.y, &mut rng));
        assert!(!strip.break_pattern(79, BOTTOM_BREAK_INTERVAL, bounds, VIEW.y, &mut rng));
        assert!(strip.break_pattern(82, BOTTOM_BREAK_INTERVAL, bounds, VIEW.y, &mut rng));

        // A refill starts counting from scratch
        strip.fill(VIEW, MIN_BORDER_BASE);
        assert!(strip.break_pattern(40, BOTTOM_BREAK_INTERVAL, bounds, VIEW.y, &mut rng));
    }

    #[test]
    fn test_border_bounds() {
        let b = border_bounds(0, VIEW_HEIGHT);
        assert_eq!(b, BorderBounds::initial());

        let b = border_bounds(100, VIEW_HEIGHT);
        assert_eq!(b.max, 35.0);
        assert_eq!(b.min, 10.0);

        // Cap at a quarter of the screen
        let b = border_bounds(1_000_000, VIEW_HEIGHT);
        assert_eq!(b.max, VIEW_HEIGHT / 4.0);
        assert!(b.min <= b.max);
    }

    #[test]
    fn test_collides_with_top_tile() {
        let mut corridor = Corridor::new();
        corridor.reset(VIEW);
        // First top tile is 10 tall at x = 0
        assert!(corridor.collides(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!corridor.collides(&Rect::new(5.0, 600.0, 10.0, 10.0)));
    }

    #[test]
    fn test_strip_with_single_tile_runs_dry() {
        let mut strip = Strip::new(Edge::Top);
        strip.append(10.0, VIEW.y);
        for _ in 0..10 {
            strip.advance(BorderBounds::initial(), VIEW.y);
        }
        assert!(strip.is_empty());
    }
}
