//! Enemy AI: distance-gated chase, single jump, contact damage

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::animation::{Animator, Sprite, SpriteSheet};
use super::entity::{self, Body, EntityState, Facing, Pose};
use super::player::Player;
use super::terrain::Terrain;
use crate::consts::DEATH_Y;

/// Every enemy starts with this much health
pub const ENEMY_HEALTH: i32 = 2;
pub const ENEMY_HITBOX: i32 = 30;
pub const ENEMY_SIZE: IVec2 = IVec2::new(48, 48);

/// Chase starts within this distance of the player
pub const AGGRO_RANGE: f64 = 400.0;
/// Chase only when vertically within this band of the player
pub const SAME_LEVEL_BAND: i32 = 100;
/// Within this distance the enemy runs
pub const RUN_RANGE: f64 = 200.0;
pub const WALK_MAX_SPEED: i32 = 1;
pub const RUN_MAX_SPEED: i32 = 3;
/// Horizontal band around the player where the enemy stops
pub const STOP_BAND: i32 = 20;
/// Minimum horizontal gap before a close-range jump
pub const JUMP_GAP: i32 = 40;
pub const MAX_JUMPS: u8 = 1;

pub const DAMAGE_WINDOW_MS: f64 = 300.0;
pub const HURT_VELOCITY: f64 = -6.0;

const IDLE_FRAME_MS: f64 = 250.0;
const MOVE_FRAME_MS: f64 = 180.0;
const AERIAL_FRAME: usize = 4;

/// Poses an enemy can take. Enemies never shoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyPose {
    #[default]
    Idle,
    Walking,
    Running,
    Aerial,
    Hurt,
}

impl From<EnemyPose> for Pose {
    fn from(pose: EnemyPose) -> Self {
        match pose {
            EnemyPose::Idle => Pose::Idle,
            EnemyPose::Walking => Pose::Walking,
            EnemyPose::Running => Pose::Running,
            EnemyPose::Aerial => Pose::Aerial,
            EnemyPose::Hurt => Pose::Hurt,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    /// Chasing at the higher speed cap
    pub running: bool,
    pub facing: Facing,
    pose: EnemyPose,
    animator: Animator,
}

impl Enemy {
    /// Spawn an enemy. The requested health is ignored: enemies always
    /// start with [`ENEMY_HEALTH`].
    pub fn new(pos: IVec2, _requested_health: i32, now_ms: f64) -> Self {
        Self {
            body: Body::new(pos, ENEMY_SIZE, ENEMY_HITBOX, ENEMY_HEALTH, 0),
            running: false,
            facing: Facing::Forward,
            pose: EnemyPose::Idle,
            animator: Animator::new(Sprite::new(SpriteSheet::EnemyIdle, 0), now_ms),
        }
    }

    /// Advance one slice against the player and terrain
    pub fn update(&mut self, player: &mut Player, terrain: &Terrain, now_ms: f64) {
        self.apply_gravity(terrain);

        let dist = self.distance_from(player);
        if self.should_chase(player, dist) {
            self.chase(player, dist, terrain);
            self.handle_jump(player, dist);
            if self.collides_player(player) {
                player.damage(self.body.pos.x, now_ms);
            }
        } else {
            self.body.speed = 0;
            self.running = false;
        }

        if self.body.is_damaged() {
            self.body.speed /= 2;
        }
        self.body.expire_damage(now_ms, DAMAGE_WINDOW_MS);
        self.update_state();
        self.animate(now_ms);
    }

    fn apply_gravity(&mut self, terrain: &Terrain) {
        entity::apply_gravity(&mut self.body, terrain);
        if self.body.grounded {
            self.body.jump_counter = 0;
        }
    }

    /// Same-level heuristic, not line of sight
    pub fn should_chase(&self, player: &Player, dist: f64) -> bool {
        dist <= AGGRO_RANGE && (self.body.pos.y - player.body.pos.y).abs() < SAME_LEVEL_BAND
    }

    fn chase(&mut self, player: &Player, dist: f64, terrain: &Terrain) {
        self.running = dist <= RUN_RANGE;
        let max_speed = if self.running {
            RUN_MAX_SPEED
        } else {
            WALK_MAX_SPEED
        };

        let body = &mut self.body;
        let candidate = body.terrain_box().offset(body.speed, 0);
        if terrain.overlaps(&candidate) {
            return;
        }
        body.pos.x += body.speed;

        let dx = player.body.pos.x - body.pos.x;
        if dx < 0 {
            self.facing = Facing::Backward;
        } else if dx > 0 {
            self.facing = Facing::Forward;
        }

        if dx.abs() < STOP_BAND {
            body.speed = 0;
        } else if dx < 0 {
            if body.speed > -max_speed {
                body.speed -= 1;
            }
        } else if body.speed < max_speed {
            body.speed += 1;
        }
    }

    fn handle_jump(&mut self, player: &Player, dist: f64) {
        let body = &mut self.body;
        let closing_in =
            dist <= RUN_RANGE && (body.pos.x - player.body.pos.x).abs() > JUMP_GAP;
        if (!body.grounded || closing_in)
            && body.jump_counter < MAX_JUMPS
            && player.body.pos.y < body.pos.y
        {
            entity::jump(body);
            body.jump_counter += 1;
        }
    }

    pub fn distance_from(&self, player: &Player) -> f64 {
        entity::distance(self.body.pos, player.body.pos)
    }

    pub fn collides_player(&self, player: &Player) -> bool {
        super::collision::overlaps(&self.body.sprite_box(), &player.body.sprite_box())
    }

    pub fn is_moving(&self) -> bool {
        self.body.speed != 0
    }

    /// Pose priority: hurt > aerial > running > walking > idle
    fn update_state(&mut self) {
        self.pose = if self.body.is_damaged() {
            EnemyPose::Hurt
        } else if !self.body.grounded {
            EnemyPose::Aerial
        } else if self.is_moving() && self.running {
            EnemyPose::Running
        } else if self.is_moving() {
            EnemyPose::Walking
        } else {
            EnemyPose::Idle
        };
        self.body.state = EntityState {
            facing: self.facing,
            pose: self.pose.into(),
        };
    }

    pub fn pose(&self) -> EnemyPose {
        self.pose
    }

    fn animate(&mut self, now_ms: f64) {
        match self.pose {
            EnemyPose::Idle => self.animator.cycle(SpriteSheet::EnemyIdle, IDLE_FRAME_MS, now_ms),
            EnemyPose::Walking => {
                self.animator.cycle(SpriteSheet::EnemyWalk, MOVE_FRAME_MS, now_ms)
            }
            EnemyPose::Running => {
                self.animator.cycle(SpriteSheet::EnemyRun, MOVE_FRAME_MS, now_ms)
            }
            EnemyPose::Aerial => {
                if self.body.velocity < 0.0 {
                    self.animator.show(Sprite::new(SpriteSheet::EnemyRun, AERIAL_FRAME));
                }
            }
            EnemyPose::Hurt => self.animator.show(Sprite::new(SpriteSheet::EnemyHurt, 0)),
        }
    }

    pub fn sprite(&self) -> Sprite {
        self.animator.current()
    }

    /// Take one hit, unless still inside the damage window
    pub fn damage(&mut self, now_ms: f64) {
        if self.body.is_damaged() {
            return;
        }
        self.body.health -= 1;
        self.body.damaged_at = Some(now_ms);
        self.body.velocity = HURT_VELOCITY;
    }

    pub fn is_dead(&self) -> bool {
        self.body.health <= 0 || self.body.pos.y > DEATH_Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::PLAYER_HEALTH;
    use crate::sim::terrain::{MapBlock, TileKind};

    fn floor(width_tiles: i32) -> Terrain {
        let blocks = (0..width_tiles)
            .map(|i| MapBlock {
                pos: IVec2::new(i * 48, 148),
                kind: TileKind::FrameTopMid,
            })
            .collect();
        Terrain::from_blocks(blocks, width_tiles * 48)
    }

    fn grounded(mut enemy: Enemy) -> Enemy {
        enemy.body.grounded = true;
        enemy.body.velocity = 1.0;
        enemy
    }

    #[test]
    fn test_requested_health_is_ignored() {
        let enemy = Enemy::new(IVec2::new(0, 0), 5, 0.0);
        assert_eq!(enemy.body.health, ENEMY_HEALTH);
        let enemy = Enemy::new(IVec2::new(0, 0), 1, 0.0);
        assert_eq!(enemy.body.health, 2);
    }

    #[test]
    fn test_distance_from_player() {
        let enemy = Enemy::new(IVec2::new(0, 0), 2, 0.0);
        let player = Player::new(IVec2::new(3, 4), PLAYER_HEALTH, 0.0);
        assert_eq!(enemy.distance_from(&player), 5.0);
    }

    #[test]
    fn test_chase_at_walking_speed() {
        let terrain = floor(20);
        let mut player = Player::new(IVec2::new(0, 100), PLAYER_HEALTH, 0.0);
        let mut enemy = grounded(Enemy::new(IVec2::new(300, 100), 2, 0.0));

        assert!(enemy.should_chase(&player, enemy.distance_from(&player)));
        enemy.update(&mut player, &terrain, 16.0);
        assert!(!enemy.running);
        assert_eq!(enemy.body.speed, -1);
        assert_eq!(enemy.facing, Facing::Backward);

        // Speed never exceeds the walking cap
        for i in 2..10 {
            enemy.update(&mut player, &terrain, i as f64 * 16.0);
            assert!(enemy.body.speed >= -WALK_MAX_SPEED);
        }
    }

    #[test]
    fn test_runs_when_close() {
        let terrain = floor(20);
        let mut player = Player::new(IVec2::new(500, 100), PLAYER_HEALTH, 0.0);
        let mut enemy = grounded(Enemy::new(IVec2::new(350, 100), 2, 0.0));
        for i in 0..6 {
            enemy.update(&mut player, &terrain, i as f64 * 16.0);
        }
        assert!(enemy.running);
        assert_eq!(enemy.body.speed, RUN_MAX_SPEED);
        assert_eq!(enemy.facing, Facing::Forward);
        assert_eq!(enemy.pose(), EnemyPose::Running);
        assert_eq!(enemy.body.state.pose, Pose::Running);
    }

    #[test]
    fn test_ignores_player_out_of_range() {
        let terrain = floor(20);
        let mut player = Player::new(IVec2::new(0, 100), PLAYER_HEALTH, 0.0);
        let mut enemy = grounded(Enemy::new(IVec2::new(401, 100), 2, 0.0));
        enemy.body.speed = 2;
        enemy.update(&mut player, &terrain, 16.0);
        assert_eq!(enemy.body.speed, 0);
        assert!(!enemy.running);
        assert_eq!(enemy.pose(), EnemyPose::Idle);
    }

    #[test]
    fn test_ignores_player_on_other_level() {
        let player = Player::new(IVec2::new(300, 100), PLAYER_HEALTH, 0.0);
        let below = Enemy::new(IVec2::new(300, 200), 2, 0.0);
        let above = Enemy::new(IVec2::new(300, 0), 2, 0.0);
        assert!(!below.should_chase(&player, below.distance_from(&player)));
        assert!(!above.should_chase(&player, above.distance_from(&player)));
        let near = Enemy::new(IVec2::new(300, 199), 2, 0.0);
        assert!(near.should_chase(&player, near.distance_from(&player)));
    }

    #[test]
    fn test_stops_near_player() {
        let terrain = floor(20);
        let mut player = Player::new(IVec2::new(310, 0), PLAYER_HEALTH, 0.0);
        let mut enemy = grounded(Enemy::new(IVec2::new(300, 60), 2, 0.0));
        enemy.body.speed = 2;
        enemy.update(&mut player, &terrain, 16.0);
        // Moved by the old speed, then snapped inside the band
        assert_eq!(enemy.body.pos.x, 302);
        assert_eq!(enemy.body.speed, 0);
    }

    #[test]
    fn test_blocked_by_wall() {
        let mut blocks = floor(20).blocks().to_vec();
        blocks.push(MapBlock {
            pos: IVec2::new(240, 100),
            kind: TileKind::Box,
        });
        let terrain = Terrain::from_blocks(blocks, 960);
        let mut player = Player::new(IVec2::new(0, 100), PLAYER_HEALTH, 0.0);
        let mut enemy = grounded(Enemy::new(IVec2::new(288, 100), 2, 0.0));
        enemy.body.speed = -1;
        enemy.update(&mut player, &terrain, 16.0);
        assert_eq!(enemy.body.pos.x, 288);
        assert_eq!(enemy.body.speed, -1);
    }

    #[test]
    fn test_jumps_toward_higher_player() {
        let terrain = floor(20);
        let mut player = Player::new(IVec2::new(400, 40), PLAYER_HEALTH, 0.0);
        let mut enemy = grounded(Enemy::new(IVec2::new(300, 100), 2, 0.0));
        enemy.update(&mut player, &terrain, 16.0);
        assert_eq!(enemy.body.velocity, entity::FIRST_JUMP_VELOCITY);
        assert_eq!(enemy.body.jump_counter, 1);

        // Single jump only: no further impulse while airborne
        let mut last_velocity = enemy.body.velocity;
        for i in 2..6 {
            enemy.update(&mut player, &terrain, i as f64 * 16.0);
            assert!(!enemy.body.grounded);
            assert_eq!(enemy.body.jump_counter, MAX_JUMPS);
            assert!(enemy.body.velocity > last_velocity);
            last_velocity = enemy.body.velocity;
        }
    }

    #[test]
    fn test_no_jump_when_player_below() {
        let terrain = floor(20);
        let mut player = Player::new(IVec2::new(400, 100), PLAYER_HEALTH, 0.0);
        let mut enemy = grounded(Enemy::new(IVec2::new(300, 100), 2, 0.0));
        enemy.update(&mut player, &terrain, 16.0);
        assert_eq!(enemy.body.jump_counter, 0);
    }

    #[test]
    fn test_contact_damages_player_only() {
        let terrain = floor(20);
        let mut player = Player::new(IVec2::new(110, 100), PLAYER_HEALTH, 0.0);
        let mut enemy = grounded(Enemy::new(IVec2::new(100, 100), 2, 0.0));
        assert!(enemy.collides_player(&player));

        enemy.update(&mut player, &terrain, 16.0);
        assert_eq!(player.body.health, PLAYER_HEALTH - 1);
        assert_eq!(player.body.speed, 4);
        assert_eq!(enemy.body.health, ENEMY_HEALTH);

        // Invincibility holds on the next contact
        enemy.update(&mut player, &terrain, 32.0);
        assert_eq!(player.body.health, PLAYER_HEALTH - 1);
    }

    #[test]
    fn test_damage_window() {
        let mut enemy = Enemy::new(IVec2::new(0, 0), 2, 0.0);
        enemy.damage(0.0);
        assert_eq!(enemy.body.health, 1);
        assert!(enemy.body.is_damaged());
        assert_eq!(enemy.body.velocity, HURT_VELOCITY);

        enemy.damage(100.0);
        assert_eq!(enemy.body.health, 1);
    }

    #[test]
    fn test_damage_halves_speed_and_expires() {
        let terrain = floor(20);
        let mut player = Player::new(IVec2::new(0, 100), PLAYER_HEALTH, 0.0);
        let mut enemy = grounded(Enemy::new(IVec2::new(100, 100), 2, 0.0));
        enemy.body.speed = -3;
        enemy.running = true;
        enemy.damage(0.0);
        enemy.update(&mut player, &terrain, 16.0);
        assert_eq!(enemy.pose(), EnemyPose::Hurt);
        assert_eq!(enemy.body.state.pose, Pose::Hurt);
        assert_eq!(enemy.sprite().sheet, SpriteSheet::EnemyHurt);
        // -3 moved, accelerated to -3 (capped), halved
        assert_eq!(enemy.body.speed, -1);

        enemy.update(&mut player, &terrain, 301.0);
        assert!(!enemy.body.is_damaged());
    }

    #[test]
    fn test_death_conditions() {
        let mut enemy = Enemy::new(IVec2::new(0, 0), 2, 0.0);
        assert!(!enemy.is_dead());
        enemy.body.health = 0;
        assert!(enemy.is_dead());
        enemy.body.health = 2;
        enemy.body.pos.y = 901;
        assert!(enemy.is_dead());
    }
}
