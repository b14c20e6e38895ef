//! File-backed score store
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic replace (write tmp, then rename over the save file)
//! - Missing file loads as an empty leaderboard

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::highscores::{HighScores, ScoreEntry, ScoreStore, StoreError};

/// Current envelope version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    scores: HighScores,
}

/// Leaderboard persisted as JSON on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    scores: HighScores,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing scores if present
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let scores = match fs::read_to_string(&path) {
            Ok(json) => {
                let envelope: Envelope = serde_json::from_str(&json)?;
                if envelope.version != SAVE_VERSION {
                    return Err(StoreError::Version(envelope.version));
                }
                log::info!(
                    "Loaded {} high scores from {}",
                    envelope.scores.entries.len(),
                    path.display()
                );
                envelope.scores
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", path.display());
                HighScores::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, scores })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, scores: &HighScores) -> Result<(), StoreError> {
        let envelope = Envelope {
            version: SAVE_VERSION,
            scores: scores.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High scores saved ({} entries)", scores.entries.len());
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn save_score(&mut self, entry: ScoreEntry) -> Result<Option<usize>, StoreError> {
        // Only commit in memory once the file write succeeded
        let mut next = self.scores.clone();
        let rank = next.save_score(entry)?;
        self.flush(&next)?;
        self.scores = next;
        Ok(rank)
    }

    fn scores(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        self.scores.scores()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            score,
            date: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("scores.json")).unwrap();
        assert!(store.scores().unwrap().is_empty());
    }

    #[test]
    fn test_saved_scores_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.save_score(entry("sari", 30)).unwrap(), Some(1));
        assert_eq!(store.save_score(entry("dewi", 70)).unwrap(), Some(1));
        assert!(!path.with_extension("tmp").exists());

        let reopened = JsonFileStore::open(&path).unwrap();
        let scores = reopened.scores().unwrap();
        assert_eq!(scores, vec![entry("dewi", 70), entry("sari", 30)]);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, r#"{ "version": 9, "scores": { "entries": [] } }"#).unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Version(9))
        ));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_failed_write_leaves_scores_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so the tmp write fails
        let path = dir.path().join("missing").join("scores.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(matches!(
            store.save_score(entry("eko", 10)),
            Err(StoreError::Io(_))
        ));
        assert!(store.scores().unwrap().is_empty());
    }
}
