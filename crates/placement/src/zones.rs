//! No-build zones around world infrastructure.
//!
//! Monuments, rune stones and delivery stations each project a circular
//! clearance; hot springs and quarries project theirs from terrain tiles,
//! found by scanning a bounded window around the point rather than the whole
//! world. Wall buffers keep new construction off existing collision bands.

use bevy::math::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::{
    HOT_SPRING_CLEARANCE_PX, HOT_SPRING_SCAN_TILES, QUARRY_CLEARANCE_PX, QUARRY_SCAN_TILES,
    RUNE_STONE_CLEARANCE_PX, TILE_SIZE_PX, WALL_COLLISION_THICKNESS_PX, WALL_PLACEMENT_BUFFER_PX,
};
use crate::geometry::{cell_of_world, point_near_edge};
use crate::snapshot::{MonumentKind, WorldSnapshot};
use crate::tiles::{world_to_tile, TileCache, TileKind};

/// What kind of restriction a point fell into, for the deny message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestrictedZone {
    DeliveryStation,
    RuneStone,
    Monument(MonumentKind),
    Paved,
    Quarry,
    HotSpring,
}

impl RestrictedZone {
    pub fn label(self) -> &'static str {
        match self {
            Self::DeliveryStation => "delivery station",
            Self::RuneStone => "rune stone",
            Self::Monument(kind) => kind.label(),
            Self::Paved => "paved ground",
            Self::Quarry => "quarry",
            Self::HotSpring => "hot spring",
        }
    }
}

/// First restriction covering the point, if any. Row scans run before the
/// tile windows; the hot spring window is by far the widest and goes last.
pub fn restricted_zone(
    cache: &mut TileCache,
    snapshot: &WorldSnapshot,
    pos: Vec2,
) -> Option<RestrictedZone> {
    for station in snapshot.stations.iter().filter(|s| s.active) {
        let center = Vec2::new(station.x, station.y);
        if center.distance_squared(pos) < station.no_build_radius().powi(2) {
            return Some(RestrictedZone::DeliveryStation);
        }
    }

    let rune_clearance_sq = RUNE_STONE_CLEARANCE_PX * RUNE_STONE_CLEARANCE_PX;
    for stone in &snapshot.rune_stones {
        if Vec2::new(stone.x, stone.y).distance_squared(pos) < rune_clearance_sq {
            return Some(RestrictedZone::RuneStone);
        }
    }

    for part in snapshot.monuments.iter().filter(|m| m.is_center) {
        let Some(clearance) = part.kind.clearance_px() else {
            continue;
        };
        if Vec2::new(part.x, part.y).distance_squared(pos) < clearance * clearance {
            return Some(RestrictedZone::Monument(part.kind));
        }
    }

    if cache.tile_kind_at_world(snapshot, pos) == Some(TileKind::Asphalt) {
        return Some(RestrictedZone::Paved);
    }

    let origin = world_to_tile(pos);
    if tile_window_hit(
        cache,
        snapshot,
        origin,
        QUARRY_SCAN_TILES,
        QUARRY_CLEARANCE_PX,
        TileKind::Quarry,
    ) {
        return Some(RestrictedZone::Quarry);
    }
    if tile_window_hit(
        cache,
        snapshot,
        origin,
        HOT_SPRING_SCAN_TILES,
        HOT_SPRING_CLEARANCE_PX,
        TileKind::HotSpringWater,
    ) {
        return Some(RestrictedZone::HotSpring);
    }

    None
}

#[inline]
pub fn in_restricted_zone(cache: &mut TileCache, snapshot: &WorldSnapshot, pos: Vec2) -> bool {
    restricted_zone(cache, snapshot, pos).is_some()
}

/// Any tile of `kind` within `clearance_px` of the origin tile, scanning a
/// `(2 * window + 1)` square window. Distances are tile-delta pixels, the
/// same grid granularity the zones were tuned against.
fn tile_window_hit(
    cache: &mut TileCache,
    snapshot: &WorldSnapshot,
    origin: IVec2,
    window: i32,
    clearance_px: f32,
    kind: TileKind,
) -> bool {
    let clearance_sq = clearance_px * clearance_px;
    for dy in -window..=window {
        for dx in -window..=window {
            let tile = IVec2::new(origin.x + dx, origin.y + dy);
            if cache.tile_kind_at(snapshot, tile) != Some(kind) {
                continue;
            }
            let dist_sq = (dx * dx + dy * dy) as f32 * TILE_SIZE_PX * TILE_SIZE_PX;
            if dist_sq < clearance_sq {
                return true;
            }
        }
    }
    false
}

/// Whether the point sits inside an existing wall's collision band plus the
/// placement buffer. Walls attach to cell edges, so a band can reach into
/// the neighboring cell's bounding box; the 3x3 cell neighborhood covers
/// every edge that can touch the point.
pub fn on_wall_buffer(snapshot: &WorldSnapshot, pos: Vec2) -> bool {
    let margin = WALL_COLLISION_THICKNESS_PX * 0.5 + WALL_PLACEMENT_BUFFER_PX;
    let home = cell_of_world(pos);
    snapshot
        .walls
        .iter()
        .filter(|w| !w.destroyed)
        .filter(|w| (w.cell_x - home.x).abs() <= 1 && (w.cell_y - home.y).abs() <= 1)
        .any(|w| point_near_edge(IVec2::new(w.cell_x, w.cell_y), w.edge, pos, margin))
}
