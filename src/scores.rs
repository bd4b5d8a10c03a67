/// Highscore table: a fixed-size, descending list plus its on-disk store.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GameError, Result};

pub const NUM_HIGHSCORES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highscore {
    pub name: String,
    pub score: u32,
    /// Set on the entry added by the latest game, for display emphasis.
    #[serde(default)]
    pub recent: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreTable {
    pub entries: Vec<Highscore>,
}

/// Name prefix earned by a score.
pub fn rank_title(score: u32) -> &'static str {
    match score {
        s if s > 15000 => "Captain",
        s if s > 10000 => "Lieutenant",
        s if s > 5000 => "Ensign",
        _ => "Cadet",
    }
}

impl HighscoreTable {
    /// The table a fresh install starts with: 1500 to 15000 in steps of 1500,
    /// held by randomly numbered cadets.
    pub fn defaults<R: Rng>(rng: &mut R) -> Self {
        let mut entries: Vec<Highscore> = (0..NUM_HIGHSCORES as u32)
            .map(|i| Highscore {
                name: format!("Cadet {}", rng.gen_range(1000..=7500)),
                score: 1500 * (i + 1),
                recent: false,
            })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    /// Insert a finished game's score. Earlier entries win ties; the table
    /// keeps its size, so the lowest entry falls off. Returns the new entry's
    /// position if it made the table.
    pub fn add_score(&mut self, score: u32, pilot: &str) -> Option<usize> {
        for entry in &mut self.entries {
            entry.recent = false;
        }
        self.entries.push(Highscore {
            name: format!("{} {}", rank_title(score), pilot),
            score,
            recent: true,
        });
        // Stable, so the new entry sorts after equal scores already listed.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(NUM_HIGHSCORES);
        self.entries.iter().position(|e| e.recent)
    }

    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].score >= w[1].score)
    }

    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

// ── Persistence ──────────────────────────────────────────────────────────────

pub trait ScoreStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<HighscoreTable>>;

    fn save(&self, table: &HighscoreTable) -> Result<()>;
}

/// Keeps the table as pretty-printed JSON in one file.
#[derive(Clone, Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> GameError {
        GameError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> GameError {
        GameError::Scores {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> Result<Option<HighscoreTable>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let mut table: HighscoreTable =
            serde_json::from_str(&text).map_err(|e| self.json_error(e))?;
        table.entries.sort_by(|a, b| b.score.cmp(&a.score));
        table.entries.truncate(NUM_HIGHSCORES);
        debug!(path = %self.path.display(), entries = table.entries.len(), "highscores loaded");
        Ok(Some(table))
    }

    fn save(&self, table: &HighscoreTable) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let text = serde_json::to_string_pretty(table).map_err(|e| self.json_error(e))?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "highscores saved");
        Ok(())
    }
}

/// Store that keeps nothing; for headless runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullScoreStore;

impl ScoreStore for NullScoreStore {
    fn load(&self) -> Result<Option<HighscoreTable>> {
        Ok(None)
    }

    fn save(&self, _table: &HighscoreTable) -> Result<()> {
        Ok(())
    }
}
