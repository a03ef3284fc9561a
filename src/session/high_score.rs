//! High score persistence

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default location of the persisted high score
pub const HIGH_SCORE_FILE: &str = "config/high_score.json";

/// Storage for the all-time high score
pub trait HighScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> Result<(), String>;
}

#[derive(Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// High score kept in a small JSON file
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonHighScoreStore {
    fn default() -> Self {
        Self::new(HIGH_SCORE_FILE)
    }
}

impl HighScoreStore for JsonHighScoreStore {
    fn load(&self) -> u32 {
        if !self.path.exists() {
            return 0;
        }
        let parsed = fs::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|s| serde_json::from_str::<HighScoreFile>(&s).map_err(|e| e.to_string()));
        match parsed {
            Ok(file) => file.high_score,
            Err(e) => {
                warn!("Failed to load high score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&HighScoreFile { high_score: score })
            .map_err(|e| format!("Failed to serialize high score: {}", e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        fs::write(&self.path, json)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}

/// In-process store for tests and scenarios
#[derive(Debug, Default, Clone)]
pub struct MemoryHighScoreStore {
    pub score: u32,
    pub saves: u32,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) -> Result<(), String> {
        self.score = score;
        self.saves += 1;
        Ok(())
    }
}
