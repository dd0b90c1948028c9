//! Audio cues
//!
//! The simulation never plays sound itself. `Game` maps session events to
//! `SoundEffect`s and hands them to an `AudioSink`.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Background track starts with a run
    Music,
    /// Background track stops on a crash
    MusicStop,
    /// Helicopter hit a wall or missile
    Explosion,
    /// Diver caught by a shark
    Crunch,
    /// Finished run beat the stored best
    NewBest,
}

impl SoundEffect {
    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::Music | SoundEffect::MusicStop)
    }
}

/// Anything that can play the game's sound cues
pub trait AudioSink: Send {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio backend for headless runs: logs each cue at its effective volume
#[derive(Debug, Clone)]
pub struct LogAudio {
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: usize,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            music_volume: 0.5,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            music_volume: settings.effective_music_volume(),
            sfx_volume: settings.effective_sfx_volume(),
            muted: settings.muted,
            played: 0,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Volume a cue would play at
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        }
    }

    /// Cues that were audible
    pub fn played(&self) -> usize {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        // MusicStop must always get through so a muted sink still stops
        if vol <= 0.0 && effect != SoundEffect::MusicStop {
            return;
        }
        self.played += 1;
        log::debug!("Audio {:?} at volume {:.2}", effect, vol);
    }
}
