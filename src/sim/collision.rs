//! Axis-aligned overlap tests
//!
//! Every pairwise check in the game (entity vs terrain, entity vs entity,
//! bullet vs enemy) goes through [`overlaps`]. Boxes that only share an edge
//! do not overlap.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in world pixels (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box at `pos` with the given extent
    pub fn at(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Same box shifted by (dx, dy)
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

/// True iff the two boxes share a region of positive area
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.right().min(b.right()) > a.x.max(b.x) && a.bottom().min(b.bottom()) > a.y.max(b.y)
}
