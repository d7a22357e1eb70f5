//! High-score persistence as a small JSON document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "fruit-drop";
const FILENAME: &str = "highscore.json";

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
    /// Whether the last finished game set the stored score
    #[serde(default)]
    pub new_record: bool,
}

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/fruit-drop/highscore.json`, or the working directory when the
    /// platform has no data dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(FILENAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored high score; 0 when the file is missing or unreadable.
    pub fn load(&self) -> u32 {
        match self.read_record() {
            Ok(record) => record.high_score,
            Err(err) => {
                if self.path.exists() {
                    log::warn!("ignoring high score file {}: {err:#}", self.path.display());
                } else {
                    log::debug!("no high score file at {}", self.path.display());
                }
                0
            }
        }
    }

    pub fn read_record(&self) -> Result<HighScoreRecord> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        let record = serde_json::from_str(&raw)
            .with_context(|| format!("parse {}", self.path.display()))?;
        Ok(record)
    }

    /// Write the record, creating parent directories as needed.
    pub fn save(&self, high_score: u32, new_record: bool) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("create {}", dir.display()))?;
            }
        }
        let record = HighScoreRecord {
            high_score,
            new_record,
        };
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        log::info!(
            "saved high score {high_score} (new record: {new_record}) to {}",
            self.path.display()
        );
        Ok(())
    }

    /// Persist a finished game. Only a new record touches the file; returns whether it wrote.
    pub fn record_game(&self, final_score: u32, new_record: bool) -> Result<bool> {
        if !new_record {
            return Ok(false);
        }
        self.save(final_score, true)?;
        Ok(true)
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
