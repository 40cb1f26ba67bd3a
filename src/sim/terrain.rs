//! Static level geometry built from a character grid
//!
//! Each character is one 48×48 cell. `'0'` is empty space; the codes
//! `'1'..='9'` and `'A'..='J'` each produce one collision block. Terrain is
//! immutable once built: a new run gets a fresh copy.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, overlaps};
use crate::consts::TILE_SIZE;
use crate::error::ConfigError;

/// Visual tile kinds (all collide identically)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    FrameTopLeft,
    FrameTopRight,
    FrameBottomLeft,
    FrameBottomRight,
    FrameTopMid,
    FrameLeftMid,
    FrameRightMid,
    FrameBottomMid,
    FrameMid,
    Box,
    HalfSlab,
    IndustrialSlabLeft,
    IndustrialSlabMid,
    IndustrialSlabRight,
    LightPole,
    LightTop,
    TreadLeft,
    TreadMid,
    TreadRight,
}

impl TileKind {
    /// Decode a grid character. `None` for empty space and unknown codes.
    pub fn from_code(code: char) -> Option<Self> {
        Some(match code {
            '1' => TileKind::FrameTopLeft,
            '2' => TileKind::FrameTopRight,
            '3' => TileKind::FrameBottomLeft,
            '4' => TileKind::FrameBottomRight,
            '5' => TileKind::FrameTopMid,
            '6' => TileKind::FrameLeftMid,
            '7' => TileKind::FrameRightMid,
            '8' => TileKind::FrameBottomMid,
            '9' => TileKind::FrameMid,
            'A' => TileKind::Box,
            'B' => TileKind::HalfSlab,
            'C' => TileKind::IndustrialSlabLeft,
            'D' => TileKind::IndustrialSlabMid,
            'E' => TileKind::IndustrialSlabRight,
            'F' => TileKind::LightPole,
            'G' => TileKind::LightTop,
            'H' => TileKind::TreadLeft,
            'I' => TileKind::TreadMid,
            'J' => TileKind::TreadRight,
            _ => return None,
        })
    }

    /// Sprite index in the tile atlas
    pub fn atlas_index(self) -> usize {
        self as usize
    }
}

/// One solid cell of terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapBlock {
    pub pos: IVec2,
    pub kind: TileKind,
}

impl MapBlock {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, TILE_SIZE, TILE_SIZE)
    }
}

/// All collision blocks of a level plus its pixel width
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    blocks: Vec<MapBlock>,
    width: i32,
}

impl Terrain {
    /// Parse a tile grid. Fails on unknown codes, on rows whose length
    /// differs from the first row, or when nothing is solid.
    pub fn parse(grid: &str) -> Result<Self, ConfigError> {
        let mut blocks = Vec::new();
        let mut columns = None;

        for (row, line) in grid.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let row_len = line.chars().count();
            let expected = *columns.get_or_insert(row_len);
            if row_len != expected {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected,
                    found: row_len,
                });
            }

            for (column, code) in line.chars().enumerate() {
                if code == '0' {
                    continue;
                }
                let kind = TileKind::from_code(code).ok_or(ConfigError::UnknownTile {
                    row,
                    column,
                    tile: code,
                })?;
                blocks.push(MapBlock {
                    pos: IVec2::new(column as i32 * TILE_SIZE, row as i32 * TILE_SIZE),
                    kind,
                });
            }
        }

        if blocks.is_empty() {
            return Err(ConfigError::EmptyTerrain);
        }

        Ok(Self {
            blocks,
            width: columns.unwrap_or(0) as i32 * TILE_SIZE,
        })
    }

    /// Read and parse a tile grid file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let grid = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let terrain = Self::parse(&grid)?;
        log::info!(
            "Loaded terrain from {}: {} blocks, {}px wide",
            path.display(),
            terrain.blocks.len(),
            terrain.width
        );
        Ok(terrain)
    }

    /// Terrain built directly from blocks (tests and generated levels)
    pub fn from_blocks(blocks: Vec<MapBlock>, width: i32) -> Self {
        Self { blocks, width }
    }

    /// Level with no collision at all
    pub fn empty(width: i32) -> Self {
        Self {
            blocks: Vec::new(),
            width,
        }
    }

    pub fn blocks(&self) -> &[MapBlock] {
        &self.blocks
    }

    /// Total map width in pixels
    pub fn width(&self) -> i32 {
        self.width
    }

    /// True if `rect` overlaps any solid block
    pub fn overlaps(&self, rect: &Rect) -> bool {
        self.blocks.iter().any(|block| overlaps(rect, &block.bounds()))
    }
}
