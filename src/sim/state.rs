//! Game state and core simulation types
//!
//! Everything one slice reads or writes lives here, so a slice is a pure
//! function of `(GameState, TickInput)`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::camera::camera_offset;
use super::enemy::{ENEMY_HEALTH, Enemy};
use super::player::Player;
use super::terrain::Terrain;
use crate::consts::SIM_DT_MS;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    #[default]
    Menu,
    /// Active gameplay
    Running,
    /// Slices are frozen
    Paused,
    /// Run ended in a win
    GameOver,
}

/// Fixed enemy placements for a run
pub const ENEMY_SPAWNS: [(i32, i32); 13] = [
    (1475, 230),
    (2570, 196),
    (2750, 320),
    (3060, 470),
    (4219, 100),
    (4900, 530),
    (4970, 530),
    (5040, 539),
    (6397, 196),
    (6540, 520),
    (6600, 520),
    (6660, 520),
    (6720, 520),
];

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub terrain: Terrain,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Live bullets in firing order
    pub bullets: Vec<Bullet>,
    pub camera_offset: i32,
    pub view_width: i32,
    /// Enemies reaped this run
    pub kills: u32,
    /// Player deaths this run
    pub deaths: u32,
    /// Set once the player crosses the finish line
    pub won: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh run on `terrain`, with every entity at its spawn point
    pub fn new(terrain: Terrain, view_width: i32) -> Self {
        let mut state = Self {
            terrain,
            player: Player::spawn(0.0),
            enemies: Vec::new(),
            bullets: Vec::new(),
            camera_offset: 0,
            view_width,
            kills: 0,
            deaths: 0,
            won: false,
            time_ticks: 0,
        };
        state.spawn_entities();
        state
    }

    /// Replace the player, enemies and bullets with fresh spawns.
    /// Terrain and run counters are kept.
    pub fn spawn_entities(&mut self) {
        let now_ms = self.now_ms();
        self.player = Player::spawn(now_ms);
        self.enemies = ENEMY_SPAWNS
            .iter()
            .map(|&(x, y)| Enemy::new(IVec2::new(x, y), ENEMY_HEALTH, now_ms))
            .collect();
        self.bullets.clear();
        self.update_camera();
    }

    /// Simulation time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.time_ticks as f64 * SIM_DT_MS
    }

    pub fn update_camera(&mut self) {
        let desired = self.player.desired_camera_x(self.view_width);
        self.camera_offset = camera_offset(desired, self.view_width, self.terrain.width());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::CHECKPOINT;

    #[test]
    fn test_new_state_spawns_everything() {
        let state = GameState::new(Terrain::empty(9600), 1280);
        assert_eq!(state.player.body.pos, CHECKPOINT);
        assert_eq!(state.enemies.len(), ENEMY_SPAWNS.len());
        assert!(state.enemies.iter().all(|e| e.body.health == ENEMY_HEALTH));
        assert!(state.bullets.is_empty());
        assert_eq!(state.camera_offset, 0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_respawn_keeps_counters() {
        let mut state = GameState::new(Terrain::empty(9600), 1280);
        state.kills = 4;
        state.deaths = 1;
        state.enemies.clear();
        state.bullets.push(Bullet::new(IVec2::new(10, 10), 10));
        state.player.body.pos.x = 5000;

        state.spawn_entities();
        assert_eq!(state.kills, 4);
        assert_eq!(state.deaths, 1);
        assert_eq!(state.enemies.len(), 13);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.body.pos, CHECKPOINT);
    }

    #[test]
    fn test_demo_level_spawns_are_clear() {
        let terrain = Terrain::load(concat!(env!("CARGO_MANIFEST_DIR"), "/levels/demo.txt"));
        assert!(terrain.is_ok());
        let Ok(terrain) = terrain else { return };
        assert!(terrain.width() > crate::consts::WIN_X);

        let state = GameState::new(terrain, 1280);
        assert!(!state.terrain.overlaps(&state.player.body.terrain_box()));
        for enemy in &state.enemies {
            assert!(!state.terrain.overlaps(&enemy.body.terrain_box()));
        }
    }

    #[test]
    fn test_now_ms_follows_ticks() {
        let mut state = GameState::new(Terrain::empty(9600), 1280);
        state.time_ticks = 60;
        assert!((state.now_ms() - 1000.0).abs() < 1e-9);
    }
}
