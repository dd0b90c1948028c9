//! Game settings and preferences
//!
//! Persisted as JSON next to the score files. Missing fields fall back to
//! their defaults, so older settings files keep loading.

use std::fs;
use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::consts::{DEFAULT_DIFFICULTY, TARGET_FPS, VIEW_HEIGHT, VIEW_WIDTH};
use crate::persistence::{BestScoreFile, LeaderboardFile, ScoreStore};
use crate::sim::{SessionConfig, Variant};

/// Settings file name inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_DEMO_SECONDS: f32 = 10.0;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which game to run
    pub variant: Variant,

    // === Simulation ===
    /// Frames per second of the frame thread
    pub target_fps: u32,
    /// Fixed RNG seed; a fresh one per launch when unset
    pub seed: Option<u64>,
    /// Viewport size in world units
    pub view_width: f32,
    pub view_height: f32,
    /// Shark speed scale (diver variant)
    pub difficulty: f32,
    /// Sharks steer toward a nearby diver
    pub shark_follow: bool,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Headless ===
    /// How long the headless binary plays before exiting
    pub demo_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Corridor,

            target_fps: TARGET_FPS,
            seed: None,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            difficulty: DEFAULT_DIFFICULTY,
            shark_follow: false,

            music_volume: 0.5,
            sfx_volume: 1.0,
            muted: false,

            demo_seconds: DEFAULT_DEMO_SECONDS,
        }
    }
}

impl Settings {
    /// Session setup derived from these settings
    ///
    /// `fallback_seed` is used when no fixed seed is configured.
    pub fn session_config(&self, fallback_seed: u64) -> SessionConfig {
        SessionConfig {
            variant: self.variant,
            view: Vec2::new(self.view_width, self.view_height),
            seed: self.seed.unwrap_or(fallback_seed),
            difficulty: self.difficulty,
            shark_follow: self.shark_follow,
        }
    }

    /// How long the headless binary runs
    ///
    /// Negative values mean no time at all; values too large for a
    /// `Duration` fall back to the default.
    pub fn demo_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.demo_seconds.max(0.0)).unwrap_or_else(|_| {
            log::warn!(
                "demo_seconds {} out of range, using {}",
                self.demo_seconds,
                DEFAULT_DEMO_SECONDS
            );
            Duration::from_secs_f32(DEFAULT_DEMO_SECONDS)
        })
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.music_volume.clamp(0.0, 1.0)
        }
    }

    /// Effective effects volume (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// The score store each variant keeps its scores in
    pub fn score_store(&self, data_dir: &Path) -> Box<dyn ScoreStore> {
        match self.variant {
            Variant::Corridor => Box::new(BestScoreFile::in_dir(data_dir)),
            Variant::Diver => Box::new(LeaderboardFile::in_dir(data_dir)),
        }
    }

    /// Load settings from a JSON file, defaults if missing or unreadable
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
