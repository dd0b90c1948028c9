//! Game state and core simulation types
//!
//! A `GameState` is one play session: it owns every entity, the seeded RNG,
//! and the phase machine's timers. Entities never outlive it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::corridor::{BorderBounds, Corridor};
use super::entity::{Body, Explosion, Hazard, HazardKind};
use super::player::{Player, PlayerTuning};
use super::spawner::Spawner;
use crate::consts::*;

/// Which game is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Helicopter through a scrolling corridor, dodging missiles
    #[default]
    Corridor,
    /// Diver sinking through open water, dodging sharks
    Diver,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Corridor => "corridor",
            Variant::Diver => "diver",
        }
    }

    pub fn has_corridor(&self) -> bool {
        matches!(self, Variant::Corridor)
    }

    pub fn player_tuning(&self) -> PlayerTuning {
        match self {
            Variant::Corridor => PlayerTuning::helicopter(),
            Variant::Diver => PlayerTuning::diver(),
        }
    }

    pub fn player_size(&self) -> Vec2 {
        match self {
            Variant::Corridor => Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            Variant::Diver => Vec2::new(DIVER_WIDTH, DIVER_HEIGHT),
        }
    }

    pub fn player_start(&self, view: Vec2) -> Vec2 {
        match self {
            Variant::Corridor => Vec2::new(PLAYER_X, view.y / 2.0),
            Variant::Diver => Vec2::new(view.x / 4.0, view.y / 2.0),
        }
    }
}

/// Everything needed to set up a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub variant: Variant,
    pub view: Vec2,
    pub seed: u64,
    /// Diver variant: shark speed scale
    pub difficulty: f32,
    /// Diver variant: sharks chase the diver when close
    pub shark_follow: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Corridor,
            view: Vec2::new(VIEW_WIDTH, VIEW_HEIGHT),
            seed: 0,
            difficulty: DEFAULT_DIFFICULTY,
            shark_follow: false,
        }
    }
}

impl SessionConfig {
    pub fn corridor(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn diver(seed: u64) -> Self {
        Self {
            variant: Variant::Diver,
            seed,
            ..Self::default()
        }
    }

    /// Radius of a shark's follow circle, if following is on
    pub fn follow_radius(&self) -> Option<f32> {
        self.shark_follow
            .then_some(SHARK_FOLLOW_FACTOR * self.difficulty)
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Static scene, waiting for an activate input
    WaitingToStart,
    /// Entities simulate, collisions checked, score accrues
    Playing,
    /// Crash feedback plays; entities frozen until the reset
    Ended,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Border,
    Hazard(HazardKind),
    OutOfBounds,
    /// A corridor strip ran dry
    CorridorExhausted,
}

/// Notable things that happened during a tick, for collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Crashed { cause: CrashCause, score: u64 },
    /// The ended phase is over and a fresh session is waiting to start
    SessionReset { final_score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SessionConfig,
    pub phase: GamePhase,
    pub player: Player,
    pub corridor: Corridor,
    /// Live hazards, oldest first
    pub hazards: Vec<Hazard>,
    /// Bubble trail (visual only)
    pub bubbles: Vec<Body>,
    pub explosion: Option<Explosion>,
    pub bounds: BorderBounds,
    /// Best score as last read from persistence
    pub best: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub spawner: Spawner,
    bubble_timer: f32,
    /// Seconds spent in the ended phase
    pub(crate) end_timer: f32,
    /// The only randomness source of the session
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session waiting to start, with the corridor already filled
    pub fn new(config: SessionConfig) -> Self {
        let variant = config.variant;
        let mut state = Self {
            config,
            phase: GamePhase::WaitingToStart,
            player: Player::new(variant.player_start(config.view), variant.player_size()),
            corridor: Corridor::new(),
            hazards: Vec::new(),
            bubbles: Vec::new(),
            explosion: None,
            bounds: BorderBounds::initial(),
            best: 0,
            time_ticks: 0,
            events: Vec::new(),
            spawner: Spawner::new(),
            bubble_timer: 0.0,
            end_timer: 0.0,
            rng: Pcg32::seed_from_u64(config.seed),
        };
        state.new_session();
        state
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    #[inline]
    pub fn view(&self) -> Vec2 {
        self.config.view
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.player.score
    }

    /// The whole viewport as a rectangle
    pub fn view_rect(&self) -> Rect {
        Rect::from_pos_size(Vec2::ZERO, self.config.view)
    }

    /// Reset everything for a new run and wait for activation
    pub fn new_session(&mut self) {
        let view = self.config.view;
        let variant = self.config.variant;

        self.hazards.clear();
        self.bubbles.clear();
        self.explosion = None;
        self.spawner.reset();
        self.bounds = BorderBounds::initial();
        self.bubble_timer = 0.0;
        self.end_timer = 0.0;

        self.player.reset(variant.player_start(view));
        if variant.has_corridor() {
            self.corridor.reset(view);
        }
        self.phase = GamePhase::WaitingToStart;
        log::debug!("New {} session ready", variant.as_str());
    }

    /// Move a crashed run into the ended phase
    pub fn end_session(&mut self, cause: CrashCause) {
        self.phase = GamePhase::Ended;
        self.end_timer = 0.0;
        self.player.reset_velocity();
        self.player.ascend = false;
        self.explosion = Some(Explosion::new(
            self.player.body.pos - Vec2::new(0.0, EXPLOSION_RISE),
        ));
        let score = self.player.score;
        self.events.push(GameEvent::Crashed { cause, score });
        log::debug!("Run ended ({:?}) at score {}", cause, score);
    }

    /// Spawn and scroll bubbles behind the player
    pub(crate) fn update_bubbles(&mut self, dt: f32) {
        self.bubble_timer += dt;
        if self.bubble_timer > BUBBLE_INTERVAL {
            self.bubble_timer = 0.0;
            let pos = self.player.body.pos + Vec2::new(0.0, 10.0);
            self.bubbles.push(
                Body::new(pos, Vec2::ZERO).with_velocity(Vec2::new(-BUBBLE_SPEED, 0.0)),
            );
        }
        for bubble in self.bubbles.iter_mut() {
            bubble.integrate();
        }
        self.bubbles.retain(|b| b.pos.x >= BUBBLE_REMOVE_X);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
