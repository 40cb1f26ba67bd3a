//! Sprite frame selection driven by logical state and simulation time

use serde::{Deserialize, Serialize};

/// Sprite sheets the display collaborator knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteSheet {
    PlayerIdle,
    PlayerRun,
    PlayerHurt,
    PlayerShoot,
    EnemyIdle,
    EnemyWalk,
    EnemyRun,
    EnemyHurt,
    Bullet,
}

impl SpriteSheet {
    /// Number of frames in the sheet
    pub const fn frame_count(self) -> usize {
        match self {
            SpriteSheet::PlayerIdle => 4,
            SpriteSheet::PlayerRun => 6,
            SpriteSheet::PlayerHurt => 2,
            SpriteSheet::PlayerShoot => 1,
            SpriteSheet::EnemyIdle => 8,
            SpriteSheet::EnemyWalk => 8,
            SpriteSheet::EnemyRun => 7,
            SpriteSheet::EnemyHurt => 1,
            SpriteSheet::Bullet => 1,
        }
    }
}

/// A single frame of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub sheet: SpriteSheet,
    pub frame: usize,
}

impl Sprite {
    pub const fn new(sheet: SpriteSheet, frame: usize) -> Self {
        Self { sheet, frame }
    }
}

/// Frame cursor shared by all cyclic states of one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animator {
    cursor: usize,
    last_advance_ms: f64,
    current: Sprite,
}

impl Animator {
    pub fn new(initial: Sprite, now_ms: f64) -> Self {
        Self {
            cursor: 0,
            last_advance_ms: now_ms,
            current: initial,
        }
    }

    pub fn current(&self) -> Sprite {
        self.current
    }

    /// Step through `sheet`, showing the next frame once more than
    /// `frame_ms` has passed since the last change
    pub fn cycle(&mut self, sheet: SpriteSheet, frame_ms: f64, now_ms: f64) {
        if self.cursor >= sheet.frame_count() {
            self.cursor = 0;
        }
        if now_ms - self.last_advance_ms > frame_ms {
            self.current = Sprite::new(sheet, self.cursor);
            self.cursor += 1;
            self.last_advance_ms = now_ms;
        }
    }

    /// Show a fixed frame without touching the cycle cursor
    pub fn show(&mut self, sprite: Sprite) {
        self.current = sprite;
    }
}
