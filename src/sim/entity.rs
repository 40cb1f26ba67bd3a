//! Shared physics record for players, enemies and bullets
//!
//! Vertical motion is predict-then-commit: the body is only moved when the
//! candidate box is clear of terrain, so a body is never observed partially
//! inside a block.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::terrain::Terrain;
use crate::consts::DEFAULT_ACCELERATION;

/// Impulse of a first jump (negative is up)
pub const FIRST_JUMP_VELOCITY: f64 = -8.0;
/// Impulse of a second (air) jump
pub const SECOND_JUMP_VELOCITY: f64 = -6.0;

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Toward +x
    #[default]
    Forward,
    /// Toward -x
    Backward,
}

impl Facing {
    /// +1 for forward, -1 for backward
    pub fn sign(self) -> i32 {
        match self {
            Facing::Forward => 1,
            Facing::Backward => -1,
        }
    }
}

/// Logical state label used for animation and behavior decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Idle,
    Walking,
    Running,
    Aerial,
    Hurt,
    Shooting,
}

/// Facing plus logical state, recomputed every slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityState {
    pub facing: Facing,
    pub pose: Pose,
}

/// Physics and status common to every entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in world pixels
    pub pos: IVec2,
    /// Sprite extent, used for entity-vs-entity tests
    pub size: IVec2,
    /// Width of the terrain collision box (height is the sprite height)
    pub hitbox_width: i32,
    /// Vertical velocity (pixels per slice, positive is down)
    pub velocity: f64,
    /// Vertical acceleration added per free-falling slice
    pub acceleration: f64,
    /// Horizontal speed (pixels per slice, sign is direction)
    pub speed: i32,
    pub health: i32,
    pub ammo: i32,
    /// Recomputed from a fresh terrain test every slice
    pub grounded: bool,
    /// Simulation time (ms) damage was taken, while the damage window is open
    pub damaged_at: Option<f64>,
    pub jump_counter: u8,
    /// Where the last jump started (for effects)
    pub jump_origin: Option<IVec2>,
    pub state: EntityState,
}

impl Body {
    pub fn new(pos: IVec2, size: IVec2, hitbox_width: i32, health: i32, ammo: i32) -> Self {
        Self {
            pos,
            size,
            hitbox_width,
            velocity: 0.0,
            acceleration: DEFAULT_ACCELERATION,
            speed: 0,
            health,
            ammo,
            grounded: false,
            damaged_at: None,
            jump_counter: 0,
            jump_origin: None,
            state: EntityState::default(),
        }
    }

    /// Box tested against terrain
    pub fn terrain_box(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.hitbox_width, self.size.y)
    }

    /// Full sprite box tested against other entities
    pub fn sprite_box(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }

    pub fn is_damaged(&self) -> bool {
        self.damaged_at.is_some()
    }

    /// Close the damage window once more than `window_ms` has passed
    pub fn expire_damage(&mut self, now_ms: f64, window_ms: f64) {
        if let Some(at) = self.damaged_at {
            if now_ms - at > window_ms {
                self.damaged_at = None;
            }
        }
    }
}

/// Apply one slice of gravity against terrain.
///
/// Clear path: commit `y + velocity`, accelerate, mark airborne.
/// Blocked path: a fast fall is damped (`/ 1.5`); an upward hit on a ceiling
/// bounces back at a quarter of the speed; anything else lands.
pub fn apply_gravity(body: &mut Body, terrain: &Terrain) {
    let next_y = (body.pos.y as f64 + body.velocity) as i32;
    let candidate = body.terrain_box().offset(0, next_y - body.pos.y);

    if !terrain.overlaps(&candidate) {
        body.pos.y = next_y;
        body.velocity += body.acceleration;
        body.grounded = false;
    } else {
        if body.velocity > 1.5 {
            body.velocity /= 1.5;
        }
        if body.velocity < 0.0 {
            body.velocity = -(body.velocity / 4.0);
        } else {
            body.grounded = true;
        }
    }
}

/// Apply a jump impulse: full strength on the first jump, weaker on the second
pub fn jump(body: &mut Body) {
    body.velocity = if body.jump_counter == 1 {
        SECOND_JUMP_VELOCITY
    } else {
        FIRST_JUMP_VELOCITY
    };
    body.jump_origin = Some(body.pos);
}

/// Euclidean distance between two top-left corners
pub fn distance(a: IVec2, b: IVec2) -> f64 {
    a.as_dvec2().distance(b.as_dvec2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::{MapBlock, TileKind};

    fn body_at(x: i32, y: i32) -> Body {
        Body::new(IVec2::new(x, y), IVec2::new(48, 48), 30, 3, 0)
    }

    fn floor_at(y: i32) -> Terrain {
        let blocks = (0..10)
            .map(|i| MapBlock {
                pos: IVec2::new(i * 48, y),
                kind: TileKind::FrameTopMid,
            })
            .collect();
        Terrain::from_blocks(blocks, 480)
    }

    #[test]
    fn test_free_fall() {
        let terrain = Terrain::empty(480);
        let mut body = body_at(0, 0);
        body.velocity = 2.0;
        apply_gravity(&mut body, &terrain);
        assert_eq!(body.pos.y, 2);
        assert_eq!(body.velocity, 2.5);
        assert!(!body.grounded);
    }

    #[test]
    fn test_fractional_velocity_truncates() {
        let terrain = Terrain::empty(480);
        let mut body = body_at(0, 10);
        body.velocity = 0.5;
        apply_gravity(&mut body, &terrain);
        assert_eq!(body.pos.y, 10);
        assert_eq!(body.velocity, 1.0);
    }

    #[test]
    fn test_landing_damps_fast_fall() {
        // Feet at 148, floor top at 150: a 9px step would enter the floor
        let terrain = floor_at(150);
        let mut body = body_at(0, 100);
        body.velocity = 9.0;
        apply_gravity(&mut body, &terrain);
        assert_eq!(body.pos.y, 100);
        assert_eq!(body.velocity, 6.0);
        assert!(body.grounded);
    }

    #[test]
    fn test_resting_on_floor_is_grounded() {
        let terrain = floor_at(148);
        let mut body = body_at(0, 100);
        body.velocity = 0.5;
        apply_gravity(&mut body, &terrain);
        // 100 + 0.5 truncates to 100, which does not overlap: free slice
        assert!(!body.grounded);
        assert_eq!(body.velocity, 1.0);

        apply_gravity(&mut body, &terrain);
        assert!(body.grounded);
        assert_eq!(body.pos.y, 100);
        assert_eq!(body.velocity, 1.0);
    }

    #[test]
    fn test_ceiling_bump_inverts_velocity() {
        // Ceiling block spans 0..48, body top at 50
        let terrain = floor_at(0);
        let mut body = body_at(0, 50);
        body.velocity = -8.0;
        apply_gravity(&mut body, &terrain);
        assert_eq!(body.pos.y, 50);
        assert_eq!(body.velocity, 2.0);
        assert!(!body.grounded);
    }

    #[test]
    fn test_hitbox_width_limits_terrain_box() {
        // Block starts at x=30: sprite overlaps it but the 30px hitbox does not
        let terrain = Terrain::from_blocks(
            vec![MapBlock {
                pos: IVec2::new(30, 0),
                kind: TileKind::Box,
            }],
            96,
        );
        let body = body_at(0, 0);
        assert!(!terrain.overlaps(&body.terrain_box()));
        assert!(terrain.overlaps(&body.sprite_box()));
    }

    #[test]
    fn test_jump_impulses() {
        let mut body = body_at(10, 20);
        jump(&mut body);
        assert_eq!(body.velocity, FIRST_JUMP_VELOCITY);
        assert_eq!(body.jump_origin, Some(IVec2::new(10, 20)));

        body.jump_counter = 1;
        jump(&mut body);
        assert_eq!(body.velocity, SECOND_JUMP_VELOCITY);
    }

    #[test]
    fn test_damage_window_expiry() {
        let mut body = body_at(0, 0);
        body.damaged_at = Some(1000.0);
        body.expire_damage(1300.0, 300.0);
        assert!(body.is_damaged());
        body.expire_damage(1300.5, 300.0);
        assert!(!body.is_damaged());
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(IVec2::new(0, 0), IVec2::new(3, 4)), 5.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn gravity_without_terrain_commits_prediction(
                y in -1000i32..1000,
                velocity in -20.0f64..20.0,
                acceleration in 0.25f64..0.5,
            ) {
                let terrain = Terrain::empty(480);
                let mut body = body_at(0, y);
                body.velocity = velocity;
                body.acceleration = acceleration;
                body.grounded = true;
                apply_gravity(&mut body, &terrain);
                prop_assert_eq!(body.pos.y, (y as f64 + velocity) as i32);
                prop_assert_eq!(body.velocity, velocity + acceleration);
                prop_assert!(!body.grounded);
            }
        }
    }
}
