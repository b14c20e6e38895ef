//! High score leaderboard
//!
//! `ScoreStore` is the seam the quiz hands finished runs to. `HighScores` is
//! the in-memory leaderboard: score-descending, top 10.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single submitted result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    /// Submission date (`YYYY-MM-DD`)
    pub date: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store unavailable: {0}")]
    Unavailable(String),
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score store data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("unsupported save version {0}")]
    Version(u32),
}

/// Persistence collaborator for finished runs
pub trait ScoreStore {
    /// Persist a finished run, returning the leaderboard rank it reached
    /// (1-indexed) when the store ranks entries
    fn save_score(&mut self, entry: ScoreEntry) -> Result<Option<usize>, StoreError>;

    /// Saved entries in the store's display order
    fn scores(&self) -> Result<Vec<ScoreEntry>, StoreError>;
}

/// High score leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new entry (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Equal scores keep submission order
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }
}

impl ScoreStore for HighScores {
    fn save_score(&mut self, entry: ScoreEntry) -> Result<Option<usize>, StoreError> {
        let name = entry.name.clone();
        let score = entry.score;
        let rank = self.add(entry);
        match rank {
            Some(rank) => log::info!("{} placed #{} with {}", name, rank, score),
            None => log::info!("{} scored {}, below the leaderboard", name, score),
        }
        Ok(rank)
    }

    fn scores(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self.entries.clone())
    }
}
