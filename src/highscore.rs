//! Persistent high-score table.
//!
//! The table is a JSON array of records kept sorted by score, highest first,
//! and never longer than its configured maximum.  Disk problems are logged and
//! swallowed: the in-memory list is always the authority for the running
//! process.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::MAX_HIGH_SCORES;
use crate::error::Result;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u32,
    pub player: String,
    #[serde(rename = "date")]
    pub timestamp: String,
    pub laser_style: u8,
}

impl HighScoreRecord {
    /// A record stamped with the current local time.
    pub fn now(score: u32, player: &str, laser_style: u8) -> Self {
        HighScoreRecord {
            score,
            player: player.to_string(),
            timestamp: chrono::Local::now().format(DATE_FORMAT).to_string(),
            laser_style,
        }
    }
}

/// Aggregate figures over the stored table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreStats {
    pub count: usize,
    pub best: u32,
    /// Integer mean, rounded down.
    pub average: u32,
    pub total: u64,
}

#[derive(Clone, Debug)]
pub struct HighScoreStore {
    /// `None` keeps the table in memory only.
    path: Option<PathBuf>,
    records: Vec<HighScoreRecord>,
    max_len: usize,
}

impl HighScoreStore {
    /// Load the table at `path`.  A missing or unreadable file yields an
    /// empty table.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        Self::load_with_capacity(path, MAX_HIGH_SCORES)
    }

    pub fn load_with_capacity(path: impl Into<PathBuf>, max_len: usize) -> Self {
        let path = path.into();
        let records = match read_records(&path) {
            Ok(records) => {
                tracing::info!(path = %path.display(), count = records.len(), "loaded high scores");
                records
            }
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), "ignoring unreadable high-score file: {e}");
                } else {
                    tracing::info!(path = %path.display(), "no high-score file yet");
                }
                Vec::new()
            }
        };

        let mut store = HighScoreStore {
            path: Some(path),
            records,
            max_len,
        };
        store.normalize();
        store
    }

    /// A table that is never read from or written to disk.
    pub fn ephemeral(max_len: usize) -> Self {
        HighScoreStore {
            path: None,
            records: Vec::new(),
            max_len,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn records(&self) -> &[HighScoreRecord] {
        &self.records
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Record a finished game stamped with the current time.  See
    /// [`add_record`](Self::add_record).
    pub fn add(&mut self, score: u32, player: &str, laser_style: u8) -> bool {
        if score == 0 {
            return false;
        }
        self.add_record(HighScoreRecord::now(score, player, laser_style))
    }

    /// Insert `record` in score order, trim to the maximum length and persist.
    ///
    /// Returns whether the record is still in the table afterwards.  Zero
    /// scores are rejected without touching the table.  Ties keep earlier
    /// records ahead of the new one, so a tie at the cutoff of a full table
    /// does not make it.
    pub fn add_record(&mut self, record: HighScoreRecord) -> bool {
        if record.score == 0 {
            return false;
        }

        let position = self.records.partition_point(|r| r.score >= record.score);
        self.records.insert(position, record);
        self.records.truncate(self.max_len);
        self.persist();

        position < self.max_len
    }

    /// Best stored score, or 0 for an empty table.
    pub fn top_score(&self) -> u32 {
        self.records.first().map(|r| r.score).unwrap_or(0)
    }

    pub fn is_new_record(&self, score: u32) -> bool {
        self.records.is_empty() || score > self.top_score()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
        tracing::info!("high scores cleared");
    }

    pub fn statistics(&self) -> ScoreStats {
        let count = self.records.len();
        let total: u64 = self.records.iter().map(|r| u64::from(r.score)).sum();
        let average = if count == 0 {
            0
        } else {
            (total / count as u64) as u32
        };
        ScoreStats {
            count,
            best: self.top_score(),
            average,
            total,
        }
    }

    /// Re-establish ordering and length after loading foreign data.
    fn normalize(&mut self) {
        self.records.sort_by(|a, b| b.score.cmp(&a.score));
        self.records.truncate(self.max_len);
    }

    /// Write the table, logging instead of failing.
    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match write_records(path, &self.records) {
            Ok(()) => tracing::info!(path = %path.display(), count = self.records.len(), "saved high scores"),
            Err(e) => tracing::warn!(path = %path.display(), "failed to save high scores: {e}"),
        }
    }
}

fn read_records(path: &Path) -> Result<Vec<HighScoreRecord>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Writes land in a sibling temp file first, then replace `path` by rename.
fn write_records(path: &Path, records: &[HighScoreRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
