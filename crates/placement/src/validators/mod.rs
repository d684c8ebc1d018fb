//! Per-class placement validators.
//!
//! Every entry point takes an explicit [`PlacementCtx`] assembled by the
//! caller instead of reaching for globals, so the ghost preview, the confirm
//! path, the sandbox applier, tests, and benches all drive the same chain
//! with whatever world they hold. Each validator runs its checks in a fixed
//! order: the distance gate first and always live, then the cheapest
//! discriminating checks, resource sufficiency last.

mod door;
mod fence;
mod foundation;
mod free_object;
mod wall;


pub use door::{plan_door, validate_door_at};
pub use fence::{plan_fence, validate_fence_at};
pub use foundation::validate_foundation;
pub use free_object::{plan_free_object, FreeTarget};
pub use wall::{plan_wall, validate_wall_at};

use bevy::math::{IVec2, Vec2};

use crate::geometry::CellEdge;
use crate::indexes::{FoundationIndex, GrassIndex, PlacementMemo};
use crate::items::{wood_available, Inventory, ItemCatalog};
use crate::snapshot::WorldSnapshot;
use crate::tiles::TileCache;

/// Everything a validator reads, borrowed from the caller for one call.
///
/// The snapshot is immutable; the caches and indexes are mutable because
/// validators refresh them lazily on first use.
pub struct PlacementCtx<'w> {
    pub snapshot: &'w WorldSnapshot,
    pub tiles: &'w mut TileCache,
    pub foundations: &'w mut FoundationIndex,
    pub grass: &'w mut GrassIndex,
    pub memo: &'w mut PlacementMemo,
    pub catalog: &'w ItemCatalog,
    pub inventory: &'w Inventory,
    /// Player position the distance gates measure from.
    pub player: Vec2,
    /// Wall-clock milliseconds driving the memo TTL.
    pub now_ms: f64,
}

impl PlacementCtx<'_> {
    /// Wood held across all slots.
    pub fn wood(&self) -> u32 {
        wood_available(self.catalog, self.inventory)
    }

    #[inline]
    pub(crate) fn in_range(&self, target: Vec2, range_px: f32) -> bool {
        self.player.distance_squared(target) <= range_px * range_px
    }
}

/// A snapped edge placement: which cell and which of its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTarget {
    pub cell: IVec2,
    pub edge: CellEdge,
}

// ---------------------------------------------------------------------------
// Edge occupancy
// ---------------------------------------------------------------------------

pub(crate) fn wall_at(snapshot: &WorldSnapshot, cell: IVec2, edge: CellEdge) -> bool {
    snapshot
        .walls
        .iter()
        .any(|w| !w.destroyed && w.cell_x == cell.x && w.cell_y == cell.y && w.edge == edge)
}

pub(crate) fn fence_at(snapshot: &WorldSnapshot, cell: IVec2, edge: CellEdge) -> bool {
    snapshot
        .fences
        .iter()
        .any(|f| !f.destroyed && f.cell_x == cell.x && f.cell_y == cell.y && f.edge == edge)
}

pub(crate) fn door_at(snapshot: &WorldSnapshot, cell: IVec2, edge: CellEdge) -> bool {
    snapshot
        .doors
        .iter()
        .any(|d| !d.destroyed && d.cell_x == cell.x && d.cell_y == cell.y && d.edge == edge)
}

/// Probe an edge and, for cardinal edges, its mirror in the adjacent cell.
/// A shared border is one physical slot however it was addressed when the
/// occupying row was written.
pub(crate) fn edge_or_mirror(
    cell: IVec2,
    edge: CellEdge,
    mut probe: impl FnMut(IVec2, CellEdge) -> bool,
) -> bool {
    if probe(cell, edge) {
        return true;
    }
    match edge.mirror(cell) {
        Some((adjacent, mirrored)) => probe(adjacent, mirrored),
        None => false,
    }
}
