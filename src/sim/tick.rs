//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one slice. Order within a slice:
//! player, win/death check, shooting, enemies, bullets, reaping, camera.

use log::debug;
use serde::{Deserialize, Serialize};

use super::entity::Facing;
use super::player::Player;
use super::state::GameState;

/// Ammo awarded for every reaped enemy
pub const KILL_AMMO_REWARD: i32 = 2;

/// Keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Unused slot kept for input layouts with a fourth key
    pub reserved: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub held: HeldKeys,
    /// Last direction pressed, for facing when no direction is held
    pub last_direction: Facing,
    /// One-shot jump request
    pub jump: bool,
    /// One-shot shoot request
    pub shoot: bool,
}

/// Advance the game state by one fixed slice
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    let now_ms = state.now_ms();

    state.player.update(input, &state.terrain, now_ms);

    if state.player.has_won() {
        state.won = true;
        state.update_camera();
        return;
    }
    if state.player.is_dead() {
        state.deaths += 1;
        debug!(
            "player died at ({}, {}), respawning (deaths: {})",
            state.player.body.pos.x, state.player.body.pos.y, state.deaths
        );
        state.spawn_entities();
        return;
    }

    if input.shoot {
        let facing = Player::facing(&input.held, input.last_direction);
        if let Some(bullet) = state.player.try_shoot(facing, now_ms) {
            state.bullets.push(bullet);
        }
    }

    for enemy in &mut state.enemies {
        enemy.update(&mut state.player, &state.terrain, now_ms);
    }

    let GameState {
        bullets,
        enemies,
        terrain,
        ..
    } = state;
    bullets.retain_mut(|bullet| !bullet.update(enemies, terrain, now_ms));

    reap_enemies(state);
    state.update_camera();
}

/// Remove dead enemies, crediting the player for each one
fn reap_enemies(state: &mut GameState) {
    let mut reaped = 0;
    state.enemies.retain(|enemy| {
        let dead = enemy.is_dead();
        if dead {
            debug!("enemy reaped at ({}, {})", enemy.body.pos.x, enemy.body.pos.y);
            reaped += 1;
        }
        !dead
    });
    state.kills += reaped;
    state.player.body.ammo += KILL_AMMO_REWARD * reaped as i32;
}
