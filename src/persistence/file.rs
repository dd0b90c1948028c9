//! File-backed score stores
//!
//! Writes go to a sibling `.tmp` file first and are renamed over the target,
//! so a crash mid-write never leaves a truncated score behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::ScoreStore;
use crate::highscores::HighScores;
use crate::{Error, Result};

/// File name of the single best score
pub const BEST_SCORE_FILE: &str = "hi-score.txt";
/// File name of the top-5 leaderboard
pub const LEADERBOARD_FILE: &str = "scoreboard.json";

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Single best score as a plain-text integer
#[derive(Debug, Clone)]
pub struct BestScoreFile {
    path: PathBuf,
}

impl BestScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default file inside a data directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(BEST_SCORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for BestScoreFile {
    fn load_best(&self) -> Result<u64> {
        if !self.path.exists() {
            return Ok(0);
        }
        let text = fs::read_to_string(&self.path)?;
        let token = text.split_whitespace().next().unwrap_or("");
        token.parse().map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save_best(&mut self, score: u64) -> Result<()> {
        write_atomic(&self.path, &format!("{}\n", score))
    }
}

/// Top-5 leaderboard as JSON
#[derive(Debug, Clone)]
pub struct LeaderboardFile {
    path: PathBuf,
}

impl LeaderboardFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(LEADERBOARD_FILE))
    }

    /// Read the whole leaderboard (empty if the file doesn't exist yet)
    pub fn load_scores(&self) -> Result<HighScores> {
        if !self.path.exists() {
            return Ok(HighScores::new());
        }
        let json = fs::read_to_string(&self.path)?;
        let scores: HighScores = serde_json::from_str(&json)?;
        log::debug!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    fn add(&mut self, score: u64) -> Result<()> {
        let mut scores = self.load_scores().unwrap_or_else(|e| {
            log::warn!("Scoreboard unreadable, starting fresh: {}", e);
            HighScores::new()
        });
        if let Some(rank) = scores.add_score(score, now_secs()) {
            write_atomic(&self.path, &serde_json::to_string_pretty(&scores)?)?;
            log::info!("Score {} placed #{} ({} entries)", score, rank, scores.entries.len());
        }
        Ok(())
    }
}

impl ScoreStore for LeaderboardFile {
    fn load_best(&self) -> Result<u64> {
        Ok(self.load_scores()?.top_score().unwrap_or(0))
    }

    fn save_best(&mut self, score: u64) -> Result<()> {
        self.add(score)
    }

    fn submit(&mut self, score: u64) -> Result<()> {
        self.add(score)
    }
}
