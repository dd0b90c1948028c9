//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform,
//! rendering and storage dependencies:
//! - Real time only enters as the `dt` handed to `tick`
//! - Seeded RNG only, one per session
//! - Stable iteration order (spawn order for hazards, left to right for tiles)

pub mod collision;
pub mod corridor;
pub mod entity;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, contained_in, intersects};
pub use corridor::{BorderBounds, Corridor, Strip, border_bounds};
pub use entity::{Body, Edge, Explosion, Hazard, HazardKind, Segment};
pub use player::{Player, PlayerTuning, Thrust};
pub use spawner::{Spawner, missile_speed, shark_speed, spawn_interval};
pub use state::{CrashCause, GameEvent, GamePhase, GameState, SessionConfig, Variant};
pub use tick::{TickInput, tick};
