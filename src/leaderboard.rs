//! Leaderboard record storage.
//!
//! The store is an append-only flat table of `{username, team, score}` rows
//! with application-level uniqueness on username. `append` is an atomic
//! insert-if-absent: checking for a free name and writing the record happen
//! under one lock, so a lost race surfaces as [`Error::Conflict`] instead of
//! a silently duplicated or dropped row. Ordering is not the store's job;
//! `read_all` returns insertion order and the rank engine does the rest.

use crate::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One persisted leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Unique display name
    pub username: String,
    /// Team the player competes for
    pub team: String,
    /// Seconds survived before blinking
    pub score: f64,
}

impl ScoreRecord {
    /// Create a new record
    #[must_use]
    pub fn new(username: impl Into<String>, team: impl Into<String>, score: f64) -> Self {
        Self {
            username: username.into(),
            team: team.into(),
            score,
        }
    }
}

/// Boundary contract for leaderboard persistence.
///
/// `append` must be durable before any later `read_all` on the same handle;
/// callers rely on read-your-writes to show the fresh ranking.
pub trait LeaderboardStore: Send + Sync {
    /// Insert a record if its username is absent, else fail with
    /// [`Error::Conflict`]
    fn append(&self, record: ScoreRecord) -> Result<()>;

    /// All records in insertion order
    fn read_all(&self) -> Result<Vec<ScoreRecord>>;

    /// Whether a record for the username exists
    fn contains(&self, username: &str) -> Result<bool> {
        Ok(self
            .read_all()?
            .iter()
            .any(|record| record.username == username))
    }
}

/// In-memory store for tests and single-process play
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<ScoreRecord>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardStore for MemoryStore {
    fn append(&self, record: ScoreRecord) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| Error::Store("leaderboard lock poisoned".to_string()))?;
        if records.iter().any(|r| r.username == record.username) {
            return Err(Error::Conflict(record.username));
        }
        debug!("appending record for '{}'", record.username);
        records.push(record);
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<ScoreRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| Error::Store("leaderboard lock poisoned".to_string()))?;
        Ok(records.clone())
    }
}

/// Flat-file store keeping the record table as a JSON array.
///
/// The whole table is rewritten on every append; fine for a leaderboard
/// measured in rows, and it keeps the file a plain flat table with no
/// schema versioning.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or create) a store backed by the given file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            info!("creating leaderboard file {}", path.display());
            Self::write_records(&path, &[])?;
        }
        let store = Self {
            path,
            lock: Mutex::new(()),
        };
        // Fail early on an unreadable or corrupt table
        store.read_all()?;
        Ok(store)
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_records(path: &Path) -> Result<Vec<ScoreRecord>> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Store(format!("failed to parse {}: {e}", path.display())))
    }

    fn write_records(path: &Path, records: &[ScoreRecord]) -> Result<()> {
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| Error::Store(format!("failed to serialize records: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl LeaderboardStore for JsonFileStore {
    fn append(&self, record: ScoreRecord) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Store("leaderboard lock poisoned".to_string()))?;
        let mut records = Self::load_records(&self.path)?;
        if records.iter().any(|r| r.username == record.username) {
            return Err(Error::Conflict(record.username));
        }
        info!(
            "recording {:.2}s for '{}' (team {})",
            record.score, record.username, record.team
        );
        records.push(record);
        Self::write_records(&self.path, &records)
    }

    fn read_all(&self) -> Result<Vec<ScoreRecord>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Store("leaderboard lock poisoned".to_string()))?;
        Self::load_records(&self.path)
    }
}
