//! JSON file persistence for the item pool and bonus-mode high scores.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quiz_core::{ItemPool, PoolStore, StoreError};
use serde::{Deserialize, Serialize};

/// Saved next to the progress file.
pub const HIGH_SCORES_FILE: &str = "high_scores.json";

/// Best results from the bonus modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScores {
    /// Most countries named in a single border chain.
    #[serde(default)]
    pub longest_route_high_score: usize,
}

/// Stores the pool as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn high_scores_path(&self) -> PathBuf {
        self.path.with_file_name(HIGH_SCORES_FILE)
    }

    pub fn load_high_scores(&self) -> Result<HighScores, StoreError> {
        Ok(read_optional(&self.high_scores_path())?.unwrap_or_default())
    }

    /// Keep `score` if it beats the saved chain record. Returns the record as
    /// it stood before this run.
    pub fn record_longest_route(&self, score: usize) -> Result<usize, StoreError> {
        let mut scores = self.load_high_scores()?;
        let previous = scores.longest_route_high_score;
        if score > previous {
            scores.longest_route_high_score = score;
            write_atomic(&self.high_scores_path(), &serde_json::to_string_pretty(&scores)?)?;
            tracing::info!(previous, score, "new longest route high score");
        }
        Ok(previous)
    }

    pub fn clear_high_scores(&self) -> Result<(), StoreError> {
        remove_if_present(&self.high_scores_path())
    }
}

impl PoolStore for JsonFileStore {
    fn load(&self) -> Result<Option<ItemPool>, StoreError> {
        read_optional(&self.path)
    }

    fn save(&self, pool: &ItemPool) -> Result<(), StoreError> {
        write_atomic(&self.path, &serde_json::to_string_pretty(pool)?)?;
        tracing::debug!(path = %self.path.display(), items = pool.len(), "saved progress");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        remove_if_present(&self.path)
    }
}

/// `None` when the file does not exist yet.
fn read_optional<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&json)?))
}

fn write_atomic(path: &Path, json: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write then rename so an interrupted save never leaves half a file.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn remove_if_present(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
