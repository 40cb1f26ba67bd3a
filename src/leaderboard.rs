//! High score leaderboard
//!
//! Persisted as JSON. Every finished run is recorded as a (name, score)
//! entry; the top 10 are what a display shows.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Number of entries shown by `top`
pub const MAX_ENTRIES: usize = 10;

/// Name recorded when the player leaves it blank
pub const DEFAULT_NAME: &str = "Player";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

/// Leaderboard sorted by descending score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would be shown in the top table
    pub fn qualifies(&self, score: u64) -> bool {
        self.potential_rank(score) <= MAX_ENTRIES
    }

    /// Rank a score would achieve (1-indexed)
    pub fn potential_rank(&self, score: u64) -> usize {
        let rank = self.entries.iter().position(|e| score > e.score);
        rank.unwrap_or(self.entries.len()) + 1
    }

    /// Record an end-of-run result. Returns the rank achieved (1-indexed).
    pub fn add_entry(&mut self, name: &str, score: u64) -> usize {
        let name = name.trim();
        let entry = LeaderboardEntry {
            name: if name.is_empty() {
                DEFAULT_NAME.to_string()
            } else {
                name.to_string()
            },
            score,
        };

        // Ties keep the earlier entry ahead
        let rank = self.potential_rank(score);
        self.entries.insert(rank - 1, entry);
        rank
    }

    /// The best `MAX_ENTRIES` results
    pub fn top(&self) -> &[LeaderboardEntry] {
        &self.entries[..self.entries.len().min(MAX_ENTRIES)]
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load from `path`. A missing file is an empty leaderboard; an unreadable
    /// or corrupt file is an error so existing scores are never discarded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No leaderboard at {}, starting fresh", path.display());
            return Ok(Self::new());
        }

        let json = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut board: Self =
            serde_json::from_str(&json).map_err(|source| PersistenceError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        // Hand-edited files may be unsorted
        board.entries.sort_by(|a, b| b.score.cmp(&a.score));

        log::info!("Loaded {} leaderboard entries", board.entries.len());
        Ok(board)
    }

    /// Write to `path`, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let io_err = |source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)?;

        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cyborg-platform-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_add_entry_sorted() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_entry("a", 500), 1);
        assert_eq!(board.add_entry("b", 900), 1);
        assert_eq!(board.add_entry("c", 700), 2);
        assert_eq!(board.add_entry("d", 700), 3);

        let scores: Vec<u64> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 700, 700, 500]);
        assert_eq!(board.entries()[1].name, "c");
        assert_eq!(board.top_score(), Some(900));
    }

    #[test]
    fn test_zero_score_is_recorded() {
        let mut board = Leaderboard::new();
        assert!(board.qualifies(0));
        assert_eq!(board.add_entry("Ada", 0), 1);
        assert_eq!(board.entries().len(), 1);
        assert_eq!(board.top_score(), Some(0));
    }

    #[test]
    fn test_every_result_is_kept() {
        let mut board = Leaderboard::new();
        for i in 1..=MAX_ENTRIES as u64 {
            board.add_entry("p", i * 100);
        }
        assert!(!board.qualifies(100));
        assert_eq!(board.potential_rank(150), 10);

        assert_eq!(board.add_entry("Bob", 5), MAX_ENTRIES + 1);
        assert_eq!(board.entries().len(), MAX_ENTRIES + 1);
        assert_eq!(board.entries().last().map(|e| e.name.as_str()), Some("Bob"));

        assert_eq!(board.top().len(), MAX_ENTRIES);
        assert_eq!(board.top().last().map(|e| e.score), Some(100));
    }

    #[test]
    fn test_blank_name_defaults() {
        let mut board = Leaderboard::new();
        board.add_entry("   ", 10);
        board.add_entry(" Ada ", 20);
        assert_eq!(board.entries()[0].name, "Ada");
        assert_eq!(board.entries()[1].name, DEFAULT_NAME);
    }

    #[test]
    fn test_clear() {
        let mut board = Leaderboard::new();
        board.add_entry("a", 10);
        board.clear();
        assert!(board.is_empty());
        assert_eq!(board.top_score(), None);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let board = Leaderboard::open(temp_path("does-not-exist.json"));
        assert!(board.is_ok_and(|b| b.is_empty()));
    }

    #[test]
    fn test_save_and_reopen() {
        let path = temp_path("nested/leaderboard.json");
        let mut board = Leaderboard::new();
        for i in 0..12 {
            board.add_entry("a", i * 25);
        }
        assert!(board.save(&path).is_ok());

        let loaded = Leaderboard::open(&path).ok();
        assert_eq!(loaded.map(|b| b.entries().to_vec()), Some(board.entries().to_vec()));
        assert_eq!(board.entries().len(), 12);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt.json");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&path, "{ not json").ok();

        let result = Leaderboard::open(&path);
        assert!(matches!(result, Err(PersistenceError::Corrupt { .. })));
        let _ = fs::remove_file(&path);
    }
}
