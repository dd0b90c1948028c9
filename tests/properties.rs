//! Property tests for the simulation's invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use dodgy_dive::consts::*;
use dodgy_dive::sim::{
    Corridor, GamePhase, GameState, Player, PlayerTuning, Rect, SessionConfig, TickInput,
    border_bounds, intersects, missile_speed, spawn_interval, tick,
};

fn rect() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..300.0, 0.0f32..300.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn intersects_is_symmetric(a in rect(), b in rect()) {
        prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
    }

    #[test]
    fn border_bounds_grow_and_stay_capped(score in 0u64..1_000_000, step in 1u64..500) {
        let low = border_bounds(score, VIEW_HEIGHT);
        let high = border_bounds(score + step, VIEW_HEIGHT);
        prop_assert!(high.max >= low.max);
        prop_assert!(high.min >= low.min);
        prop_assert!(high.max <= VIEW_HEIGHT / 4.0);
        prop_assert!(high.min <= high.max);
    }

    #[test]
    fn velocity_stays_clamped(inputs in proptest::collection::vec(any::<bool>(), 1..300)) {
        for tuning in [PlayerTuning::helicopter(), PlayerTuning::diver()] {
            let mut player = Player::new(Vec2::new(PLAYER_X, VIEW_HEIGHT / 2.0), Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT));
            for &held in &inputs {
                player.ascend = held;
                player.update(&tuning, 1.0 / 30.0);
                prop_assert!(player.velocity().abs() <= tuning.max_speed);
            }
        }
    }

    #[test]
    fn missile_speed_is_bounded_and_monotone(score in 0u64..100_000, extra in 0u64..10_000, roll in 0.0f64..1.0) {
        let slow = missile_speed(score, roll);
        let fast = missile_speed(score + extra, roll);
        prop_assert!(slow >= MISSILE_BASE_SPEED);
        prop_assert!(fast <= MISSILE_MAX_SPEED);
        prop_assert!(fast >= slow);
    }

    #[test]
    fn spawn_interval_never_below_floor(score in 0u64..10_000_000) {
        prop_assert!(spawn_interval(score) >= SPAWN_FLOOR_MS / 1000.0);
        prop_assert!(spawn_interval(score) <= SPAWN_BASE_MS / 1000.0);
    }

    #[test]
    fn corridor_never_runs_dry(seed in any::<u64>(), start in 0u64..5_000, ticks in 1usize..600) {
        let view = Vec2::new(VIEW_WIDTH, VIEW_HEIGHT);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut corridor = Corridor::new();
        corridor.reset(view);
        for i in 0..ticks {
            let score = start + i as u64;
            corridor.update(score, border_bounds(score, view.y), view, &mut rng);
            prop_assert!(!corridor.is_exhausted());
        }
        for segment in corridor.top.segments().chain(corridor.bottom.segments()) {
            prop_assert!(segment.height() >= 1.0);
        }
    }

    #[test]
    fn same_seed_same_session(seed in any::<u64>(), inputs in proptest::collection::vec(any::<bool>(), 1..200)) {
        let mut a = GameState::new(SessionConfig::diver(seed));
        let mut b = GameState::new(SessionConfig::diver(seed));
        for &held in &inputs {
            let input = TickInput { ascend: held, activate: true };
            tick(&mut a, &input, 1.0 / 30.0);
            tick(&mut b, &input, 1.0 / 30.0);
        }
        prop_assert_eq!(a.phase, b.phase);
        prop_assert_eq!(a.score(), b.score());
        prop_assert_eq!(a.player.body.pos, b.player.body.pos);
        prop_assert_eq!(a.hazards.len(), b.hazards.len());
        prop_assert!(a.phase != GamePhase::WaitingToStart || a.score() == 0);
    }
}
