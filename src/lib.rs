//! Dodgy Dive - side-scrolling obstacle dodging, corridor and diver variants
//!
//! Core modules:
//! - `sim`: Simulation (entities, corridor, spawner, collisions, phase machine)
//! - `game`: Session driver wiring the simulation to persistence and audio
//! - `scheduler`: Dedicated frame thread running update then render
//! - `platform`: Input intents shared with the input context
//! - `persistence` / `highscores`: Best score storage
//! - `renderer` / `audio`: Narrow collaborator interfaces
//! - `settings`: Persisted configuration

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use game::Game;
pub use highscores::HighScores;
pub use scheduler::FrameScheduler;
pub use settings::Settings;

/// Game configuration constants
///
/// World units are pixels of the reference viewport; y grows downward.
pub mod consts {
    /// Reference viewport
    pub const VIEW_WIDTH: f32 = 2560.0;
    pub const VIEW_HEIGHT: f32 = 1440.0;

    /// Default frame rate of the frame scheduler
    pub const TARGET_FPS: u32 = 30;
    /// Largest frame delta fed to the simulation (prevents catch-up bursts)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Horizontal scroll per tick for corridor segments (negative = leftward)
    pub const SCROLL_SPEED: f32 = 5.0;

    /// Corridor segment geometry
    pub const SEGMENT_WIDTH: f32 = 60.0;
    pub const SEGMENT_SPACING: f32 = 20.0;
    /// A segment left of this x has scrolled off and is recycled
    pub const SEGMENT_REMOVE_X: f32 = -20.0;
    /// Initial fill runs past the right edge by this much
    pub const SEGMENT_OVERRUN: f32 = 40.0;
    pub const TOP_START_HEIGHT: f32 = 10.0;

    /// Border height thresholds: base + score / PROGRESS_DENOM
    pub const MIN_BORDER_BASE: f32 = 5.0;
    pub const MAX_BORDER_BASE: f32 = 30.0;
    pub const BORDER_PROGRESS_DENOM: u64 = 20;
    /// Pattern-breaking insertions every N points
    pub const TOP_BREAK_INTERVAL: u64 = 50;
    pub const BOTTOM_BREAK_INTERVAL: u64 = 40;

    /// Missiles (corridor variant)
    pub const MISSILE_WIDTH: f32 = 45.0;
    pub const MISSILE_HEIGHT: f32 = 15.0;
    pub const MISSILE_FRAMES: u32 = 13;
    pub const MISSILE_BASE_SPEED: f32 = 7.0;
    pub const MISSILE_SPEED_DIVISOR: f32 = 30.0;
    pub const MISSILE_MAX_SPEED: f32 = 40.0;
    /// Missiles spawn this far past the right edge
    pub const MISSILE_SPAWN_OFFSET: f32 = 10.0;
    /// Missiles are dropped once fully past this x (an extra margin past the edge)
    pub const MISSILE_REMOVE_X: f32 = -100.0;
    /// Spawn interval: BASE - score / DIVISOR milliseconds, never below FLOOR
    pub const SPAWN_BASE_MS: f32 = 2000.0;
    pub const SPAWN_SCORE_DIVISOR: f32 = 4.0;
    pub const SPAWN_FLOOR_MS: f32 = 500.0;

    /// Every hazard's collision width is its body width minus this
    pub const HAZARD_HIT_INSET: f32 = 10.0;

    /// Helicopter (corridor variant)
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 65.0;
    pub const PLAYER_HEIGHT: f32 = 25.0;
    pub const PLAYER_MAX_SPEED: f32 = 14.0;
    pub const PLAYER_ACCEL: f32 = 1.0;
    pub const PLAYER_SCALE: f32 = 2.0;
    /// One point every 100 ms
    pub const SCORE_INTERVAL: f32 = 0.1;

    /// Diver (diver variant)
    pub const DIVER_WIDTH: f32 = 118.0;
    pub const DIVER_HEIGHT: f32 = 56.0;
    pub const DIVER_GRAVITY: f32 = 0.125;
    pub const DIVER_SWIM_IMPULSE: f32 = 2.0;
    /// Ten points every second
    pub const DIVER_SCORE_INTERVAL: f32 = 1.0;
    pub const DIVER_SCORE_STEP: u64 = 10;

    /// Sharks (diver variant)
    pub const SHARK_WIDTH: f32 = 170.0;
    pub const SHARK_HEIGHT: f32 = 60.0;
    pub const SHARK_TILE_WIDTH: f32 = 207.0;
    pub const SHARK_TILE_HEIGHT: f32 = 133.0;
    pub const SHARK_FRAME_TIME: f32 = 0.15;
    pub const SHARK_SPEED_FACTOR: f32 = 1.25;
    pub const SHARKS_ON_SCREEN: f32 = 10.0;
    pub const SHARK_FOLLOW_FACTOR: f32 = 1.3;
    pub const SHARK_STEER_FACTOR: f32 = 1.15;
    pub const DEFAULT_DIFFICULTY: f32 = 175.0;

    /// Time spent in the ended phase before the session resets
    pub const END_DELAY: f32 = 2.5;

    /// Bubble trail
    pub const BUBBLE_INTERVAL: f32 = 0.12;
    pub const BUBBLE_SPEED: f32 = 10.0;
    pub const BUBBLE_REMOVE_X: f32 = -10.0;

    /// Explosion animation
    pub const EXPLOSION_SIZE: f32 = 100.0;
    pub const EXPLOSION_FRAMES: u32 = 25;
    pub const EXPLOSION_FRAME_TIME: f32 = 0.01;
    pub const EXPLOSION_RISE: f32 = 30.0;
}
