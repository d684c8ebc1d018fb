//! Grass presence hash at foundation-cell granularity.

use std::collections::HashSet;

use bevy::log::debug;
use bevy::math::{IVec2, Vec2};
use bevy::prelude::Resource;

use crate::config::{CELL_SIZE_PX, INDEX_RECOUNT_MARGIN};
use crate::geometry::cell_of_world;
use crate::keys;
use crate::snapshot::WorldSnapshot;

/// Fast-reject filter for "does this cell contain live grass".
///
/// Rebuild marks the owning cell of every live blade and its 8 neighbors;
/// the halo is what lets a single-cell query answer for footprints that
/// straddle cell boundaries. A positive answer is only a hint and gets
/// re-checked against actual blade positions.
#[derive(Resource, Debug, Clone, Default)]
pub struct GrassIndex {
    cells: HashSet<u64>,
    last_live_count: usize,
    built: bool,
}

impl GrassIndex {
    /// Rebuild if the bounded live-blade count probe says the set changed.
    pub fn refresh(&mut self, snapshot: &WorldSnapshot) {
        let probe = snapshot
            .grass
            .iter()
            .filter(|blade| snapshot.grass_is_alive(blade.id))
            .take(self.last_live_count + INDEX_RECOUNT_MARGIN)
            .count();
        if self.built && probe == self.last_live_count {
            return;
        }
        self.rebuild(snapshot);
    }

    pub fn invalidate(&mut self) {
        self.cells.clear();
        self.last_live_count = 0;
        self.built = false;
    }

    fn rebuild(&mut self, snapshot: &WorldSnapshot) {
        self.cells.clear();
        let mut live = 0;
        for blade in &snapshot.grass {
            if !snapshot.grass_is_alive(blade.id) {
                continue;
            }
            live += 1;
            let cell = cell_of_world(Vec2::new(blade.x, blade.y));
            for dy in -1..=1 {
                for dx in -1..=1 {
                    self.cells.insert(keys::pack(cell.x + dx, cell.y + dy));
                }
            }
        }
        self.last_live_count = live;
        self.built = true;
        debug!(
            "grass index rebuilt: {} live blades marking {} cells",
            live,
            self.cells.len()
        );
    }

    /// Hash probe. False means definitely no live grass in or next to the
    /// cell; true means check precisely.
    #[inline]
    pub fn might_have_grass(&self, cell: IVec2) -> bool {
        self.cells.contains(&keys::pack(cell.x, cell.y))
    }

    /// Precise check: any live blade inside the half-open box
    /// `[min, max)`.
    pub fn grass_in_rect(snapshot: &WorldSnapshot, min: Vec2, max: Vec2) -> bool {
        snapshot.grass.iter().any(|blade| {
            snapshot.grass_is_alive(blade.id)
                && blade.x >= min.x
                && blade.x < max.x
                && blade.y >= min.y
                && blade.y < max.y
        })
    }

    /// Whether live grass blocks building in the cell: hash fast-reject,
    /// then the precise box check against the cell bounds.
    pub fn blocks_cell(&self, snapshot: &WorldSnapshot, cell: IVec2) -> bool {
        if !self.might_have_grass(cell) {
            return false;
        }
        let min = Vec2::new(cell.x as f32 * CELL_SIZE_PX, cell.y as f32 * CELL_SIZE_PX);
        let max = min + Vec2::splat(CELL_SIZE_PX);
        Self::grass_in_rect(snapshot, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::GrassBlade;

    fn world_with_blade(x: f32, y: f32, alive: bool) -> WorldSnapshot {
        let mut snap = WorldSnapshot::default();
        snap.grass.push(GrassBlade { id: 1, x, y });
        snap.grass_alive.insert(1, alive);
        snap
    }

    #[test]
    fn test_halo_marks_neighbors() {
        // Blade in cell (2, 2): cells (1..=3, 1..=3) are all marked.
        let snap = world_with_blade(200.0, 200.0, true);
        let mut index = GrassIndex::default();
        index.refresh(&snap);

        for dy in -1..=1 {
            for dx in -1..=1 {
                assert!(
                    index.might_have_grass(IVec2::new(2 + dx, 2 + dy)),
                    "halo cell ({}, {}) must be marked",
                    2 + dx,
                    2 + dy
                );
            }
        }
        assert!(!index.might_have_grass(IVec2::new(4, 2)));
        assert!(!index.might_have_grass(IVec2::new(0, 2)));
    }

    #[test]
    fn test_hint_positive_but_precise_negative() {
        // The blade sits in cell (2, 2); the halo marks (1, 2) as well, but
        // the precise box check must clear that neighbor.
        let snap = world_with_blade(200.0, 200.0, true);
        let mut index = GrassIndex::default();
        index.refresh(&snap);

        assert!(index.might_have_grass(IVec2::new(1, 2)));
        assert!(!index.blocks_cell(&snap, IVec2::new(1, 2)));
        assert!(index.blocks_cell(&snap, IVec2::new(2, 2)));
    }

    #[test]
    fn test_dead_blades_ignored() {
        let snap = world_with_blade(200.0, 200.0, false);
        let mut index = GrassIndex::default();
        index.refresh(&snap);
        assert!(!index.might_have_grass(IVec2::new(2, 2)));
        assert!(!index.blocks_cell(&snap, IVec2::new(2, 2)));
    }

    #[test]
    fn test_liveness_flip_triggers_rebuild() {
        // The probe counts live blades, so a kill shows up as a count change.
        let mut snap = world_with_blade(200.0, 200.0, true);
        let mut index = GrassIndex::default();
        index.refresh(&snap);
        assert!(index.blocks_cell(&snap, IVec2::new(2, 2)));

        snap.grass_alive.insert(1, false);
        index.refresh(&snap);
        assert!(
            !index.might_have_grass(IVec2::new(2, 2)),
            "live count dropped, hash must have been rebuilt"
        );
    }

    #[test]
    fn test_rect_check_is_half_open() {
        // Blade exactly on the east border of cell (0, 0) belongs to (1, 0),
        // same as the floor-division cell assignment.
        let snap = world_with_blade(CELL_SIZE_PX, 10.0, true);
        let mut index = GrassIndex::default();
        index.refresh(&snap);
        assert!(!index.blocks_cell(&snap, IVec2::new(0, 0)));
        assert!(index.blocks_cell(&snap, IVec2::new(1, 0)));
    }
}
