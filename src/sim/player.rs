//! The player-controlled cyborg
//!
//! Input-driven horizontal motion with wall damping, double jump with
//! variable height, cooldown-limited shooting, knockback damage and win
//! detection.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::animation::{Animator, Sprite, SpriteSheet};
use super::bullet::Bullet;
use super::entity::{self, Body, EntityState, Facing, Pose};
use super::terrain::Terrain;
use super::tick::{HeldKeys, TickInput};
use crate::consts::{DEATH_Y, DEFAULT_ACCELERATION, WIN_X};

pub const PLAYER_HEALTH: i32 = 3;
pub const PLAYER_AMMO: i32 = 10;
pub const PLAYER_HITBOX: i32 = 30;
pub const PLAYER_SIZE: IVec2 = IVec2::new(48, 48);
/// Respawn point
pub const CHECKPOINT: IVec2 = IVec2::new(20, 300);

/// Horizontal speed cap (pixels per slice)
pub const MAX_RUN_SPEED: i32 = 5;
/// Ground jump plus one air jump
pub const MAX_JUMPS: u8 = 2;
/// Lowest acceleration reachable while holding jump
pub const MIN_JUMP_ACCELERATION: f64 = 0.25;
/// Acceleration removed per slice while holding jump
pub const JUMP_ACCELERATION_STEP: f64 = 0.02;

/// Invincibility after taking a hit
pub const DAMAGE_WINDOW_MS: f64 = 1000.0;
pub const KNOCKBACK_SPEED: i32 = 4;
pub const KNOCKBACK_VELOCITY: f64 = -6.0;

/// Minimum time between shots
pub const SHOT_COOLDOWN_MS: f64 = 500.0;
pub const BULLET_SPEED: i32 = 10;
/// Muzzle offsets from the player's top-left corner
pub const MUZZLE_FORWARD_X: i32 = 47;
pub const MUZZLE_BACKWARD_X: i32 = -25;
pub const MUZZLE_Y: i32 = 10;

const IDLE_FRAME_MS: f64 = 250.0;
const RUN_FRAME_MS: f64 = 180.0;
const AERIAL_FRAME: usize = 5;
const HURT_FRAME: usize = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub checkpoint: IVec2,
    /// Time of the last shot while the cooldown is running
    pub last_shot_at: Option<f64>,
    won: bool,
    animator: Animator,
}

impl Player {
    pub fn new(pos: IVec2, health: i32, now_ms: f64) -> Self {
        Self {
            body: Body::new(pos, PLAYER_SIZE, PLAYER_HITBOX, health, PLAYER_AMMO),
            checkpoint: CHECKPOINT,
            last_shot_at: None,
            won: false,
            animator: Animator::new(Sprite::new(SpriteSheet::PlayerIdle, 0), now_ms),
        }
    }

    /// Fresh player at the checkpoint
    pub fn spawn(now_ms: f64) -> Self {
        Self::new(CHECKPOINT, PLAYER_HEALTH, now_ms)
    }

    /// Advance one slice
    pub fn update(&mut self, input: &TickInput, terrain: &Terrain, now_ms: f64) {
        self.apply_gravity(terrain);
        self.update_horizontal(&input.held, terrain);
        self.handle_jump(input.jump);
        self.update_jump_acceleration(&input.held);
        self.update_timers(now_ms);
        self.check_win();
        self.update_state(&input.held, input.last_direction);
        self.animate(now_ms);
    }

    fn apply_gravity(&mut self, terrain: &Terrain) {
        entity::apply_gravity(&mut self.body, terrain);
        if self.body.grounded {
            self.body.jump_counter = 0;
        }
    }

    fn update_horizontal(&mut self, held: &HeldKeys, terrain: &Terrain) {
        let body = &mut self.body;
        let candidate = body.terrain_box().offset(body.speed, 0);

        if terrain.overlaps(&candidate) {
            // Wall: bleed off speed without moving
            body.speed /= 2;
            return;
        }

        body.pos.x += body.speed;

        if held.left && body.speed > -MAX_RUN_SPEED {
            body.speed -= 1;
        }
        if held.right && body.speed < MAX_RUN_SPEED {
            body.speed += 1;
        }
        // No coasting, except while knocked back
        if held.left == held.right && !body.is_damaged() {
            body.speed = 0;
        }
    }

    fn handle_jump(&mut self, requested: bool) {
        if requested && self.body.jump_counter < MAX_JUMPS {
            entity::jump(&mut self.body);
            self.body.jump_counter += 1;
        }
    }

    /// Holding jump while rising lowers gravity for a higher jump
    fn update_jump_acceleration(&mut self, held: &HeldKeys) {
        let body = &mut self.body;
        if body.grounded || !held.jump || body.velocity > 0.0 {
            body.acceleration = DEFAULT_ACCELERATION;
        }
        if held.jump && body.acceleration > MIN_JUMP_ACCELERATION {
            body.acceleration =
                (body.acceleration - JUMP_ACCELERATION_STEP).max(MIN_JUMP_ACCELERATION);
        }
    }

    fn update_timers(&mut self, now_ms: f64) {
        self.body.expire_damage(now_ms, DAMAGE_WINDOW_MS);
        if let Some(at) = self.last_shot_at {
            if now_ms - at > SHOT_COOLDOWN_MS {
                self.last_shot_at = None;
            }
        }
    }

    fn check_win(&mut self) {
        if self.body.pos.x > WIN_X {
            self.won = true;
        }
    }

    /// Facing from held keys, falling back to the last pressed direction
    pub fn facing(held: &HeldKeys, last_direction: Facing) -> Facing {
        match (held.left, held.right) {
            (false, true) => Facing::Forward,
            (true, false) => Facing::Backward,
            _ => last_direction,
        }
    }

    pub fn is_moving(held: &HeldKeys) -> bool {
        held.left || held.right
    }

    pub fn just_shot(&self) -> bool {
        self.last_shot_at.is_some()
    }

    /// Pose priority: shooting > hurt > aerial > running > idle
    fn update_state(&mut self, held: &HeldKeys, last_direction: Facing) {
        let pose = if self.just_shot() {
            Pose::Shooting
        } else if self.body.is_damaged() {
            Pose::Hurt
        } else if !self.body.grounded {
            Pose::Aerial
        } else if Self::is_moving(held) {
            Pose::Running
        } else {
            Pose::Idle
        };

        self.body.state = EntityState {
            facing: Self::facing(held, last_direction),
            pose,
        };
    }

    fn animate(&mut self, now_ms: f64) {
        match self.body.state.pose {
            Pose::Idle => self.animator.cycle(SpriteSheet::PlayerIdle, IDLE_FRAME_MS, now_ms),
            Pose::Running | Pose::Walking => {
                self.animator.cycle(SpriteSheet::PlayerRun, RUN_FRAME_MS, now_ms)
            }
            Pose::Aerial => {
                if self.body.velocity < 0.0 {
                    self.animator
                        .show(Sprite::new(SpriteSheet::PlayerRun, AERIAL_FRAME));
                }
            }
            Pose::Hurt => self
                .animator
                .show(Sprite::new(SpriteSheet::PlayerHurt, HURT_FRAME)),
            Pose::Shooting => self.animator.show(Sprite::new(SpriteSheet::PlayerShoot, 0)),
        }
    }

    pub fn sprite(&self) -> Sprite {
        self.animator.current()
    }

    /// Fire a bullet if the cooldown has elapsed and ammo remains
    pub fn try_shoot(&mut self, facing: Facing, now_ms: f64) -> Option<Bullet> {
        if self.just_shot() || self.body.ammo <= 0 {
            return None;
        }

        self.body.ammo -= 1;
        self.last_shot_at = Some(now_ms);

        let muzzle_x = match facing {
            Facing::Forward => MUZZLE_FORWARD_X,
            Facing::Backward => MUZZLE_BACKWARD_X,
        };
        let pos = self.body.pos + IVec2::new(muzzle_x, MUZZLE_Y);
        Some(Bullet::new(pos, BULLET_SPEED * facing.sign()))
    }

    /// Take one hit from a source at `source_x`, unless still invincible
    pub fn damage(&mut self, source_x: i32, now_ms: f64) {
        if self.body.is_damaged() {
            return;
        }
        self.body.health -= 1;
        self.body.damaged_at = Some(now_ms);
        self.body.speed = if self.body.pos.x < source_x {
            -KNOCKBACK_SPEED
        } else {
            KNOCKBACK_SPEED
        };
        self.body.velocity = KNOCKBACK_VELOCITY;
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn is_dead(&self) -> bool {
        self.body.pos.y > DEATH_Y || self.body.health <= 0
    }

    /// Camera x that centers the player's hitbox in the view
    pub fn desired_camera_x(&self, view_width: i32) -> i32 {
        self.body.pos.x - (view_width - self.body.hitbox_width) / 2
    }
}
