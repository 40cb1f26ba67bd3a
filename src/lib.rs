//! Cyborg Platform - a 2D side-scrolling platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, AI, animation)
//! - `input`: Held keys and edge-triggered input events
//! - `controller`: Phase machine and fixed-step scheduler
//! - `score`: Run scoring from kill/death/elapsed events
//! - `leaderboard`: Persisted (name, score) table
//! - `settings`: JSON configuration

pub mod controller;
pub mod error;
pub mod input;
pub mod leaderboard;
pub mod score;
pub mod settings;
pub mod sim;

pub use controller::{Controller, FrameReport, HudSnapshot, RunSummary, Snapshot};
pub use error::{ConfigError, PersistenceError};
pub use input::{InputEvent, InputState, Key};
pub use leaderboard::Leaderboard;
pub use score::ScoreTracker;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum slices per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the scheduler will accept (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;
    /// Frame deltas this close to a whole number of slices are snapped to it
    pub const FRAME_SNAP_TOLERANCE: f64 = 0.0005;

    /// Viewport defaults
    pub const VIEW_WIDTH: i32 = 1280;
    pub const VIEW_HEIGHT: i32 = 720;

    /// Terrain tiles are square
    pub const TILE_SIZE: i32 = 48;

    /// Crossing this x wins the run
    pub const WIN_X: i32 = 8000;
    /// Falling below this y kills any entity
    pub const DEATH_Y: i32 = 900;

    /// Default downward acceleration per slice
    pub const DEFAULT_ACCELERATION: f64 = 0.5;
}
