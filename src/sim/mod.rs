//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Time is passed in, never read from a clock
//! - Stable iteration order (spawn order for enemies, firing order for bullets)
//! - No rendering or platform dependencies

pub mod animation;
pub mod bullet;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod player;
pub mod state;
pub mod terrain;
pub mod tick;

pub use animation::{Animator, Sprite, SpriteSheet};
pub use bullet::Bullet;
pub use camera::camera_offset;
pub use collision::{Rect, overlaps};
pub use enemy::{Enemy, EnemyPose};
pub use entity::{Body, EntityState, Facing, Pose};
pub use player::Player;
pub use state::{ENEMY_SPAWNS, GamePhase, GameState};
pub use terrain::{MapBlock, Terrain, TileKind};
pub use tick::{HeldKeys, TickInput, tick};
