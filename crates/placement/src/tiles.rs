//! Terrain tile lookup over compressed chunk rows.
//!
//! Chunks replicate as flat byte arrays; resolving one tile means finding the
//! owning chunk and indexing into its bytes. The cache here is rebuilt
//! wholesale (O(chunks), never O(tiles)) on first use, when the snapshot's
//! connection identity changes, or on explicit invalidation; per-tile lookups
//! after that are O(1).

use std::collections::HashMap;

use bevy::log::debug;
use bevy::math::{IVec2, Vec2};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::config::TILE_SIZE_PX;
use crate::keys;
use crate::snapshot::{ConnectionId, WorldSnapshot};

// ---------------------------------------------------------------------------
// Tile kinds
// ---------------------------------------------------------------------------

/// Terrain type of one tile. Discriminants match the replicated byte codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileKind {
    Grass = 0,
    Dirt = 1,
    DirtRoad = 2,
    Sea = 3,
    Beach = 4,
    Sand = 5,
    HotSpringWater = 6,
    Quarry = 7,
    Asphalt = 8,
    Forest = 9,
    Tundra = 10,
    Alpine = 11,
    TundraGrass = 12,
    Tilled = 13,
    DeepSea = 14,
}

impl TileKind {
    /// Decode a replicated byte. Unknown codes fall back to grass so a
    /// half-migrated chunk never breaks lookups.
    pub fn from_byte(code: u8) -> Self {
        match code {
            0 => Self::Grass,
            1 => Self::Dirt,
            2 => Self::DirtRoad,
            3 => Self::Sea,
            4 => Self::Beach,
            5 => Self::Sand,
            6 => Self::HotSpringWater,
            7 => Self::Quarry,
            8 => Self::Asphalt,
            9 => Self::Forest,
            10 => Self::Tundra,
            11 => Self::Alpine,
            12 => Self::TundraGrass,
            13 => Self::Tilled,
            14 => Self::DeepSea,
            _ => Self::Grass,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_water(self) -> bool {
        matches!(self, Self::Sea | Self::HotSpringWater | Self::DeepSea)
    }

    /// Open sea, as opposed to inland water bodies.
    #[inline]
    pub fn is_open_sea(self) -> bool {
        matches!(self, Self::Sea | Self::DeepSea)
    }

    #[inline]
    pub fn blocks_building(self) -> bool {
        matches!(
            self,
            Self::Sea | Self::HotSpringWater | Self::DeepSea | Self::Asphalt
        )
    }
}

// ---------------------------------------------------------------------------
// Coordinate conversions
// ---------------------------------------------------------------------------

/// Tile containing a world position.
#[inline]
pub fn world_to_tile(pos: Vec2) -> IVec2 {
    IVec2::new(
        (pos.x / TILE_SIZE_PX).floor() as i32,
        (pos.y / TILE_SIZE_PX).floor() as i32,
    )
}

/// World position of a tile's center.
#[inline]
pub fn tile_center(tile: IVec2) -> Vec2 {
    Vec2::new(
        tile.x as f32 * TILE_SIZE_PX + TILE_SIZE_PX * 0.5,
        tile.y as f32 * TILE_SIZE_PX + TILE_SIZE_PX * 0.5,
    )
}

/// Minimum corner of a tile's bounding box.
#[inline]
pub fn tile_min(tile: IVec2) -> Vec2 {
    Vec2::new(tile.x as f32 * TILE_SIZE_PX, tile.y as f32 * TILE_SIZE_PX)
}

// ---------------------------------------------------------------------------
// Chunk cache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CachedChunk {
    side: i32,
    tiles: Vec<u8>,
}

/// Connection-scoped cache of chunk bytes, keyed by packed chunk coordinate.
#[derive(Resource, Debug, Clone, Default)]
pub struct TileCache {
    chunks: HashMap<u64, CachedChunk>,
    source: Option<ConnectionId>,
}

impl TileCache {
    /// Drop everything; the next lookup rebuilds from the snapshot. Called
    /// when chunk rows change upstream.
    pub fn invalidate(&mut self) {
        self.chunks.clear();
        self.source = None;
    }

    fn rebuild(&mut self, snapshot: &WorldSnapshot) {
        self.chunks.clear();
        for chunk in &snapshot.chunks {
            if chunk.side == 0 {
                continue;
            }
            self.chunks.insert(
                keys::pack(chunk.chunk_x, chunk.chunk_y),
                CachedChunk {
                    side: chunk.side as i32,
                    tiles: chunk.tiles.clone(),
                },
            );
        }
        self.source = Some(snapshot.connection);
        debug!(
            "tile cache rebuilt: {} chunks from connection {:?}",
            self.chunks.len(),
            snapshot.connection
        );
    }

    fn ensure_fresh(&mut self, snapshot: &WorldSnapshot) {
        if self.chunks.is_empty() || self.source != Some(snapshot.connection) {
            self.rebuild(snapshot);
        }
    }

    /// Terrain kind of a tile, or `None` when the owning chunk is unknown or
    /// the byte index is out of range. Callers treat `None` as fail-open.
    pub fn tile_kind_at(&mut self, snapshot: &WorldSnapshot, tile: IVec2) -> Option<TileKind> {
        self.ensure_fresh(snapshot);
        // Chunk side varies per row, so the chunk coordinate cannot be
        // computed before the candidate chunk is known. Every replicated
        // chunk in one world shares a side length; probe with the first.
        let side = self.chunks.values().next()?.side;
        let chunk_x = tile.x.div_euclid(side);
        let chunk_y = tile.y.div_euclid(side);
        let chunk = self.chunks.get(&keys::pack(chunk_x, chunk_y))?;
        let local_x = tile.x.rem_euclid(chunk.side);
        let local_y = tile.y.rem_euclid(chunk.side);
        let index = (local_y * chunk.side + local_x) as usize;
        chunk.tiles.get(index).copied().map(TileKind::from_byte)
    }

    /// Terrain kind under a world position.
    #[inline]
    pub fn tile_kind_at_world(
        &mut self,
        snapshot: &WorldSnapshot,
        pos: Vec2,
    ) -> Option<TileKind> {
        self.tile_kind_at(snapshot, world_to_tile(pos))
    }

    #[cfg(test)]
    pub(crate) fn cached_chunk_count(&self) -> usize {
        self.chunks.len()
    }
}
