//! Rendering interface
//!
//! Drawing backends are out of scope for the core; a `Renderer` receives a
//! read-only view of the session once per frame, after the update. The two
//! backends here are for headless runs and tests.

use crate::Result;
use crate::sim::{GamePhase, GameState, Variant};

/// Draws the current session state
pub trait Renderer {
    fn render(&mut self, state: &GameState) -> Result<()>;
}

/// Overlay text for the current state, top line first
pub fn hud_lines(state: &GameState) -> Vec<String> {
    match state.variant() {
        Variant::Corridor => {
            let mut lines = vec![
                format!("SCORE: {}", state.score()),
                format!("BEST: {}", state.best),
            ];
            if state.phase == GamePhase::WaitingToStart {
                lines.push("PRESS TO START".to_string());
                lines.push("PRESS AND HOLD TO GO UP".to_string());
                lines.push("RELEASE TO GO DOWN".to_string());
            }
            lines
        }
        Variant::Diver => vec![format!(
            "Hi-Score: {} | Score: {:07}",
            state.best,
            state.score()
        )],
    }
}

/// Logs a one-line summary of each frame at trace level
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &GameState) -> Result<()> {
        self.frames += 1;
        let pos = state.player.body.pos;
        log::trace!(
            "frame {} {:?} player=({:.1}, {:.1}) hazards={} segments={}/{} | {}",
            self.frames,
            state.phase,
            pos.x,
            pos.y,
            state.hazards.len(),
            state.corridor.top.len(),
            state.corridor.bottom.len(),
            hud_lines(state).join(" | ")
        );
        Ok(())
    }
}

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SessionConfig;

    #[test]
    fn test_corridor_hud_shows_instructions_until_started() {
        let mut state = GameState::new(SessionConfig::corridor(1));
        state.best = 88;
        let lines = hud_lines(&state);
        assert_eq!(lines[0], "SCORE: 0");
        assert_eq!(lines[1], "BEST: 88");
        assert_eq!(lines.len(), 5);

        state.phase = GamePhase::Playing;
        assert_eq!(hud_lines(&state).len(), 2);
    }

    #[test]
    fn test_diver_hud_pads_score() {
        let mut state = GameState::new(SessionConfig::diver(1));
        state.best = 300;
        state.player.score = 40;
        assert_eq!(hud_lines(&state), vec!["Hi-Score: 300 | Score: 0000040"]);
    }

    #[test]
    fn test_log_renderer_counts_frames() {
        let state = GameState::new(SessionConfig::corridor(1));
        let mut renderer = LogRenderer::new();
        renderer.render(&state).unwrap();
        renderer.render(&state).unwrap();
        assert_eq!(renderer.frames(), 2);
    }
}
