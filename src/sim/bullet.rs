//! Straight-line projectile fired by the player

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::animation::{Sprite, SpriteSheet};
use super::collision::{Rect, overlaps};
use super::enemy::Enemy;
use super::entity::{self, Body};
use super::terrain::Terrain;

pub const BULLET_SIZE: IVec2 = IVec2::new(10, 10);
/// Bullets are removed once they travel this far
pub const BULLET_RANGE: f64 = 600.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Gravity is never applied; `speed` is horizontal and signed
    pub body: Body,
    /// Spawn point, for range tracking
    pub origin: IVec2,
}

impl Bullet {
    pub fn new(pos: IVec2, speed: i32) -> Self {
        let mut body = Body::new(pos, BULLET_SIZE, BULLET_SIZE.x, 1, 0);
        body.speed = speed;
        body.acceleration = 0.0;
        Self { body, origin: pos }
    }

    /// Advance one slice. Returns true when the bullet must be removed.
    ///
    /// The candidate position is tested against terrain first, then against
    /// every enemy; each overlapping enemy takes one hit. A blocked bullet
    /// never moves into the obstacle.
    pub fn update(&mut self, enemies: &mut [Enemy], terrain: &Terrain, now_ms: f64) -> bool {
        let candidate = self.body.sprite_box().offset(self.body.speed, 0);

        if terrain.overlaps(&candidate) || hit_enemies(&candidate, enemies, now_ms) {
            return true;
        }

        self.body.pos.x += self.body.speed;
        self.travelled() >= BULLET_RANGE
    }

    /// Straight-line distance from the spawn point
    pub fn travelled(&self) -> f64 {
        entity::distance(self.origin, self.body.pos)
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::new(SpriteSheet::Bullet, 0)
    }
}

/// Damage every enemy overlapping `rect`; true if any did
fn hit_enemies(rect: &Rect, enemies: &mut [Enemy], now_ms: f64) -> bool {
    let mut hit = false;
    for enemy in enemies.iter_mut() {
        if overlaps(rect, &enemy.body.sprite_box()) {
            enemy.damage(now_ms);
            hit = true;
        }
    }
    hit
}
