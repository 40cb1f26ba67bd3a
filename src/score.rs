//! Run scoring
//!
//! Faster runs score higher: the time component is `10000 × 120 / t`
//! (with `t` floored at one second), plus a bonus per kill and a penalty per
//! death. The total never drops below zero.

use serde::{Deserialize, Serialize};

/// Completion time (seconds) that earns exactly [`MAX_TIME_SCORE`]
pub const PAR_TIME: f64 = 120.0;
pub const MAX_TIME_SCORE: f64 = 10_000.0;
pub const KILL_POINTS: i64 = 150;
pub const DEATH_PENALTY: i64 = 250;

/// Score collaborator fed by the controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
    elapsed_secs: f64,
    kills: u32,
    deaths: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything for a new run
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add elapsed time and recompute. Negative deltas are ignored.
    pub fn update(&mut self, dt_secs: f64) {
        if dt_secs > 0.0 {
            self.elapsed_secs += dt_secs;
        }
        self.recalc();
    }

    pub fn on_kill(&mut self) {
        self.kills += 1;
        self.recalc();
    }

    pub fn on_death(&mut self) {
        self.deaths += 1;
        self.recalc();
    }

    fn recalc(&mut self) {
        let t = self.elapsed_secs.max(1.0);
        let time_score = (MAX_TIME_SCORE * PAR_TIME / t).round() as i64;
        let total = time_score + self.kills as i64 * KILL_POINTS
            - self.deaths as i64 * DEATH_PENALTY;
        self.score = total.max(0) as u64;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }
}
