//! Terrain and shoreline predicates.
//!
//! Pure functions of (tile cache, snapshot, world point). Every search here
//! is bounded by its radius or window, never by world size; missing chunks
//! read as "no information" and the predicates stay permissive, matching how
//! the server treats half-replicated worlds.

use bevy::math::{IVec2, Vec2};

use crate::config::{SHORE_SEARCH_CAP_PX, TILE_SIZE_PX};
use crate::items::TerrainRequirement;
use crate::snapshot::WorldSnapshot;
use crate::tiles::{world_to_tile, TileCache, TileKind};

// ---------------------------------------------------------------------------
// Point predicates
// ---------------------------------------------------------------------------

pub fn on_water(cache: &mut TileCache, snapshot: &WorldSnapshot, pos: Vec2) -> bool {
    cache
        .tile_kind_at_world(snapshot, pos)
        .is_some_and(TileKind::is_water)
}

pub fn on_beach(cache: &mut TileCache, snapshot: &WorldSnapshot, pos: Vec2) -> bool {
    cache.tile_kind_at_world(snapshot, pos) == Some(TileKind::Beach)
}

pub fn on_alpine(cache: &mut TileCache, snapshot: &WorldSnapshot, pos: Vec2) -> bool {
    cache.tile_kind_at_world(snapshot, pos) == Some(TileKind::Alpine)
}

/// Tundra proper and the grassy patches inside it both count.
pub fn on_tundra(cache: &mut TileCache, snapshot: &WorldSnapshot, pos: Vec2) -> bool {
    matches!(
        cache.tile_kind_at_world(snapshot, pos),
        Some(TileKind::Tundra | TileKind::TundraGrass)
    )
}

pub fn on_asphalt(cache: &mut TileCache, snapshot: &WorldSnapshot, pos: Vec2) -> bool {
    cache.tile_kind_at_world(snapshot, pos) == Some(TileKind::Asphalt)
}

/// Land tile with at least one of its 8 neighbors under water.
pub fn on_shore(cache: &mut TileCache, snapshot: &WorldSnapshot, pos: Vec2) -> bool {
    let tile = world_to_tile(pos);
    match cache.tile_kind_at(snapshot, tile) {
        Some(kind) if !kind.is_water() => {}
        _ => return false,
    }
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let neighbor = IVec2::new(tile.x + dx, tile.y + dy);
            if cache
                .tile_kind_at(snapshot, neighbor)
                .is_some_and(TileKind::is_water)
            {
                return true;
            }
        }
    }
    false
}

pub fn satisfies_requirement(
    cache: &mut TileCache,
    snapshot: &WorldSnapshot,
    pos: Vec2,
    requirement: TerrainRequirement,
) -> bool {
    match requirement {
        TerrainRequirement::Water => on_water(cache, snapshot, pos),
        TerrainRequirement::Beach => on_beach(cache, snapshot, pos),
        TerrainRequirement::Alpine => on_alpine(cache, snapshot, pos),
        TerrainRequirement::Tundra => on_tundra(cache, snapshot, pos),
    }
}

// ---------------------------------------------------------------------------
// Ring searches
// ---------------------------------------------------------------------------

/// Visit the perimeter tiles of the square ring at Chebyshev `radius` around
/// `center`. Stops and returns true as soon as `visit` does. Interior tiles
/// were covered by smaller rings, so a caller expanding outward touches each
/// tile exactly once.
fn visit_ring(center: IVec2, radius: i32, visit: &mut impl FnMut(IVec2) -> bool) -> bool {
    debug_assert!(radius >= 1);
    for dx in -radius..=radius {
        if visit(IVec2::new(center.x + dx, center.y - radius)) {
            return true;
        }
        if visit(IVec2::new(center.x + dx, center.y + radius)) {
            return true;
        }
    }
    for dy in (-radius + 1)..radius {
        if visit(IVec2::new(center.x - radius, center.y + dy)) {
            return true;
        }
        if visit(IVec2::new(center.x + radius, center.y + dy)) {
            return true;
        }
    }
    false
}

/// Whether a water/land transition exists within `max_px` of the point.
/// Expands ring by ring; a ring whose minimum possible distance already
/// exceeds `max_px` ends the search.
pub fn near_shore(
    cache: &mut TileCache,
    snapshot: &WorldSnapshot,
    pos: Vec2,
    max_px: f32,
) -> bool {
    let origin = world_to_tile(pos);
    let origin_water = cache
        .tile_kind_at(snapshot, origin)
        .is_some_and(TileKind::is_water);
    let mut radius = 1;
    loop {
        // A tile at Chebyshev radius r is at least (r - 1) tiles of pixels
        // away from any point inside the origin tile.
        if (radius - 1) as f32 * TILE_SIZE_PX > max_px {
            return false;
        }
        let crossed = visit_ring(origin, radius, &mut |tile| {
            cache
                .tile_kind_at(snapshot, tile)
                .is_some_and(TileKind::is_water)
                != origin_water
        });
        if crossed {
            return true;
        }
        radius += 1;
    }
}

/// Distance in pixels from a water point to the nearest non-sea tile,
/// searching concentric rings out to [`SHORE_SEARCH_CAP_PX`]. Returns 0 when
/// the point is already on land and infinity when the cap is all water,
/// which any finite limit comparison then rejects.
pub fn shore_distance(cache: &mut TileCache, snapshot: &WorldSnapshot, pos: Vec2) -> f32 {
    let origin = world_to_tile(pos);
    match cache.tile_kind_at(snapshot, origin) {
        Some(kind) if kind.is_water() => {}
        _ => return 0.0,
    }
    let max_rings = (SHORE_SEARCH_CAP_PX / TILE_SIZE_PX) as i32;
    for radius in 1..=max_rings {
        let found_land = visit_ring(origin, radius, &mut |tile| {
            matches!(cache.tile_kind_at(snapshot, tile), Some(kind) if !kind.is_open_sea())
        });
        if found_land {
            return radius as f32 * TILE_SIZE_PX;
        }
    }
    f32::INFINITY
}

#[cfg(test)]
mod tests {
    use super::*;

    // One island: land on tiles with x < 8, sea from x = 8 east.
    fn coast() -> WorldSnapshot {
        WorldSnapshot::painted(2, 16, |x, _y| {
            if x < 8 {
                TileKind::Grass
            } else {
                TileKind::Sea
            }
        })
    }

    fn at_tile(x: i32, y: i32) -> Vec2 {
        crate::tiles::tile_center(IVec2::new(x, y))
    }

    #[test]
    fn test_on_water_tracks_tile_kind() {
        let snap = coast();
        let mut cache = TileCache::default();
        assert!(on_water(&mut cache, &snap, at_tile(10, 0)));
        assert!(!on_water(&mut cache, &snap, at_tile(3, 0)));
    }

    #[test]
    fn test_on_tundra_includes_tundra_grass() {
        let snap = WorldSnapshot::painted(0, 8, |x, _| {
            if x % 2 == 0 {
                TileKind::Tundra
            } else {
                TileKind::TundraGrass
            }
        });
        let mut cache = TileCache::default();
        assert!(on_tundra(&mut cache, &snap, at_tile(0, 0)));
        assert!(on_tundra(&mut cache, &snap, at_tile(1, 0)));
        assert!(!on_alpine(&mut cache, &snap, at_tile(0, 0)));
    }

    #[test]
    fn test_on_shore_needs_adjacent_water() {
        let snap = coast();
        let mut cache = TileCache::default();
        // Tile x = 7 touches the sea at x = 8; tile x = 3 is interior land;
        // tile x = 10 is itself water.
        assert!(on_shore(&mut cache, &snap, at_tile(7, 0)));
        assert!(!on_shore(&mut cache, &snap, at_tile(3, 0)));
        assert!(!on_shore(&mut cache, &snap, at_tile(10, 0)));
    }

    #[test]
    fn test_near_shore_finds_transition_within_radius() {
        let snap = coast();
        let mut cache = TileCache::default();
        // From tile x = 11 (water), land starts 4 tiles west.
        let pos = at_tile(11, 0);
        assert!(near_shore(&mut cache, &snap, pos, 300.0));
        // Ring 4 holds the transition and its minimum distance is
        // 3 * 48 = 144; a 100 px cap ends the search before it.
        assert!(!near_shore(&mut cache, &snap, pos, 100.0));
    }

    #[test]
    fn test_near_shore_from_land_side() {
        let snap = coast();
        let mut cache = TileCache::default();
        assert!(near_shore(&mut cache, &snap, at_tile(6, 0), 200.0));
    }

    #[test]
    fn test_shore_distance_ring_pixels() {
        let snap = coast();
        let mut cache = TileCache::default();
        // Tile x = 9: nearest land at x = 7, Chebyshev radius 2.
        assert_eq!(
            shore_distance(&mut cache, &snap, at_tile(9, 0)),
            2.0 * TILE_SIZE_PX
        );
        // Land origin is distance zero.
        assert_eq!(shore_distance(&mut cache, &snap, at_tile(3, 0)), 0.0);
    }

    #[test]
    fn test_shore_distance_open_sea_is_infinite() {
        let snap = WorldSnapshot::painted(2, 32, |_, _| TileKind::DeepSea);
        let mut cache = TileCache::default();
        assert!(shore_distance(&mut cache, &snap, at_tile(0, 0)).is_infinite());
    }

    #[test]
    fn test_shore_distance_ignores_hot_spring_origin_rule() {
        // Hot spring water counts as water for the origin but as non-sea for
        // the ring scan, so a spring pool one tile out reads as shore.
        let snap = WorldSnapshot::painted(1, 16, |x, _| {
            if x == 5 {
                TileKind::HotSpringWater
            } else {
                TileKind::Sea
            }
        });
        let mut cache = TileCache::default();
        assert_eq!(
            shore_distance(&mut cache, &snap, at_tile(6, 0)),
            TILE_SIZE_PX
        );
    }

    #[test]
    fn test_requirement_dispatch() {
        let snap = WorldSnapshot::painted(0, 8, |x, _| match x {
            0 => TileKind::Sea,
            1 => TileKind::Beach,
            2 => TileKind::Alpine,
            _ => TileKind::Tundra,
        });
        let mut cache = TileCache::default();
        let cases = [
            (0, TerrainRequirement::Water),
            (1, TerrainRequirement::Beach),
            (2, TerrainRequirement::Alpine),
            (3, TerrainRequirement::Tundra),
        ];
        for (x, requirement) in cases {
            assert!(
                satisfies_requirement(&mut cache, &snap, at_tile(x, 0), requirement),
                "tile x={x} should satisfy {requirement:?}"
            );
        }
        // Beach fails the water requirement; sea fails every land one.
        let beach = at_tile(1, 0);
        let sea = at_tile(0, 0);
        assert!(!satisfies_requirement(&mut cache, &snap, beach, TerrainRequirement::Water));
        assert!(!satisfies_requirement(&mut cache, &snap, sea, TerrainRequirement::Beach));
        assert!(!satisfies_requirement(&mut cache, &snap, sea, TerrainRequirement::Alpine));
        assert!(!satisfies_requirement(&mut cache, &snap, sea, TerrainRequirement::Tundra));
    }
}
