//! Common test utilities for integration tests.
//!
//! Each test gets its own temporary directory holding the dataset and the
//! saved-progress file, so tests never touch the real data directory.

pub mod fixtures;

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use quiz_core::FixedClock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tempfile::TempDir;

use flag_quiz::config::{Config, DEFAULT_POLICY};
use flag_quiz::{data, JsonFileStore, QuizSession};

pub type TestSession = QuizSession<JsonFileStore, FixedClock, StdRng>;

pub struct TestContext {
    dir: TempDir,
    pub config: Config,
}

impl TestContext {
    /// Write `dataset` to a fresh temp directory and point a config at it.
    pub fn new(dataset: &Value) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_path = dir.path().join("flags.json");
        std::fs::write(&data_path, serde_json::to_string_pretty(dataset).unwrap())
            .expect("Failed to write dataset");

        let config = Config {
            data_path,
            state_path: dir.path().join("state").join("progress.json"),
            strict: false,
            seed: Some(42),
            policy: DEFAULT_POLICY.to_string(),
        };
        Self { dir, config }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.config.state_path)
    }

    /// Open a session over the saved progress at a fixed time.
    pub fn session_at(&self, now: DateTime<Utc>) -> TestSession {
        let records = data::load_records(&self.config.data_path).expect("Failed to load dataset");
        QuizSession::open(
            &records,
            self.store(),
            FixedClock::new(now),
            StdRng::seed_from_u64(self.config.seed.unwrap_or_default()),
        )
        .expect("Failed to open session")
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}
