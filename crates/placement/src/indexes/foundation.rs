//! Cell-keyed index over foundation rows.

use std::collections::HashMap;

use bevy::log::debug;
use bevy::math::IVec2;
use bevy::prelude::Resource;

use crate::config::INDEX_RECOUNT_MARGIN;
use crate::geometry::FoundationShape;
use crate::keys;
use crate::snapshot::WorldSnapshot;

/// One foundation row as captured at rebuild time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoundationSlot {
    pub foundation_id: u64,
    pub shape: FoundationShape,
    pub destroyed: bool,
}

/// Maps packed cell coordinates to the foundations recorded there.
///
/// `refresh` counts rows only up to the last known count plus
/// [`INDEX_RECOUNT_MARGIN`], stopping early; a matching count keeps the
/// index as is. Row mutations that leave the count unchanged are therefore
/// invisible until the next rebuild; callers that mutate the snapshot
/// themselves pair the write with [`FoundationIndex::invalidate`].
#[derive(Resource, Debug, Clone, Default)]
pub struct FoundationIndex {
    cells: HashMap<u64, Vec<FoundationSlot>>,
    last_count: usize,
    built: bool,
}

impl FoundationIndex {
    /// Rebuild if the bounded row-count probe says the table changed.
    pub fn refresh(&mut self, snapshot: &WorldSnapshot) {
        let probe = snapshot
            .foundations
            .iter()
            .take(self.last_count + INDEX_RECOUNT_MARGIN)
            .count();
        if self.built && probe == self.last_count {
            return;
        }
        self.rebuild(snapshot);
    }

    pub fn invalidate(&mut self) {
        self.cells.clear();
        self.last_count = 0;
        self.built = false;
    }

    fn rebuild(&mut self, snapshot: &WorldSnapshot) {
        self.cells.clear();
        for row in &snapshot.foundations {
            self.cells
                .entry(keys::pack(row.cell_x, row.cell_y))
                .or_default()
                .push(FoundationSlot {
                    foundation_id: row.id,
                    shape: row.shape,
                    destroyed: row.destroyed,
                });
        }
        self.last_count = snapshot.foundations.len();
        self.built = true;
        debug!(
            "foundation index rebuilt: {} rows across {} cells",
            self.last_count,
            self.cells.len()
        );
    }

    /// Everything recorded at the cell, destroyed rows included.
    pub fn slots_at(&self, cell: IVec2) -> &[FoundationSlot] {
        self.cells
            .get(&keys::pack(cell.x, cell.y))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Shapes of live foundations at the cell, in row order.
    pub fn live_shapes_at(&self, cell: IVec2) -> impl Iterator<Item = FoundationShape> + '_ {
        self.slots_at(cell)
            .iter()
            .filter(|slot| !slot.destroyed)
            .map(|slot| slot.shape)
    }

    /// Whether any live foundation occupies the cell.
    pub fn occupied(&self, cell: IVec2) -> bool {
        self.live_shapes_at(cell).next().is_some()
    }
}
