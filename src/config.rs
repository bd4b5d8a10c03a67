/// Runtime configuration, read from an optional YAML file.
///
/// Every field has a default, so a missing file and an empty document both
/// give a playable setup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

fn default_tick_millis() -> u64 {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("space_shooter.log")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// RNG seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    #[serde(default)]
    pub scores_path: Option<PathBuf>,
    #[serde(default)]
    pub pilot_name: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_millis: default_tick_millis(),
            scores_path: None,
            pilot_name: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// `scores_path`, else `$HOME/.space_shooter/scores.json`, else a file in
    /// the working directory.
    pub fn resolved_scores_path(&self) -> PathBuf {
        if let Some(path) = &self.scores_path {
            return path.clone();
        }
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".space_shooter").join("scores.json"),
            None => PathBuf::from("space_shooter_scores.json"),
        }
    }

    /// `pilot_name`, else `$USER`, else "Pilot".
    pub fn resolved_pilot_name(&self) -> String {
        self.pilot_name
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Pilot".to_string())
    }
}
