//! Error types for level loading and persistence

use std::path::PathBuf;

use thiserror::Error;

/// Fatal load-time configuration problems. No partial level is ever built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("terrain definition contains no collision blocks")]
    EmptyTerrain,

    #[error("unknown tile '{tile}' at row {row}, column {column}")]
    UnknownTile { row: usize, column: usize, tile: char },

    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Leaderboard save/load failures.
///
/// Saving reports this as a status; the simulation keeps running.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("leaderboard io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("leaderboard at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode leaderboard: {0}")]
    Encode(#[from] serde_json::Error),
}
