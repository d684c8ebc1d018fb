//! Shared world builder for tests and benches.
//!
//! Bundles a snapshot with every cache, index, and resource a
//! [`PlacementCtx`] borrows, so a test builds one `SandboxWorld`, mutates it
//! through the helpers, and calls validators through [`SandboxWorld::ctx`].
//! The helpers pair every snapshot write with the matching index
//! invalidation; forgetting that pairing is how stale-view bugs start.

use bevy::math::{IVec2, Vec2};

use crate::config::{SANDBOX_STARTING_ITEMS, SANDBOX_STARTING_WOOD};
use crate::geometry::{CellEdge, FoundationShape};
use crate::indexes::{FoundationIndex, GrassIndex, PlacementMemo};
use crate::items::{Inventory, ItemCatalog, PlaceableKind, WOOD_ITEM_NAME};
use crate::snapshot::{
    BrothPot, Campfire, Door, Fence, Foundation, Fumarole, GrassBlade, HeatSourceId, Wall,
    WorldSnapshot,
};
use crate::tiles::{TileCache, TileKind};
use crate::validators::PlacementCtx;

pub struct SandboxWorld {
    pub snapshot: WorldSnapshot,
    pub tiles: TileCache,
    pub foundations: FoundationIndex,
    pub grass: GrassIndex,
    pub memo: PlacementMemo,
    pub catalog: ItemCatalog,
    pub inventory: Inventory,
    pub player: Vec2,
    pub now_ms: f64,
}

impl SandboxWorld {
    /// Uniform grass island: chunks `[-2, 2]` of side 8, tiles
    /// `[-16, 24)` on both axes. Player at the origin with the standard
    /// starting kit.
    pub fn grassland() -> Self {
        Self::painted(2, 8, |_, _| TileKind::Grass)
    }

    /// World painted tile by tile, plus the standard catalog, a full wood
    /// pouch, and five of every placeable item.
    pub fn painted(
        radius_chunks: i32,
        side: u32,
        paint: impl Fn(i32, i32) -> TileKind,
    ) -> Self {
        let catalog = ItemCatalog::standard();
        let mut inventory = Inventory::default();
        if let Some(wood) = catalog.id_of(WOOD_ITEM_NAME) {
            inventory.grant(wood, SANDBOX_STARTING_WOOD);
        }
        for kind in PlaceableKind::ALL {
            if let Some(def) = catalog.id_of(kind.item_name()) {
                inventory.grant(def, SANDBOX_STARTING_ITEMS);
            }
        }
        Self {
            snapshot: WorldSnapshot::painted(radius_chunks, side, paint),
            tiles: TileCache::default(),
            foundations: FoundationIndex::default(),
            grass: GrassIndex::default(),
            memo: PlacementMemo::default(),
            catalog,
            inventory,
            player: Vec2::ZERO,
            now_ms: 0.0,
        }
    }

    /// Borrow everything as one validator context.
    pub fn ctx(&mut self) -> PlacementCtx<'_> {
        PlacementCtx {
            snapshot: &self.snapshot,
            tiles: &mut self.tiles,
            foundations: &mut self.foundations,
            grass: &mut self.grass,
            memo: &mut self.memo,
            catalog: &self.catalog,
            inventory: &self.inventory,
            player: self.player,
            now_ms: self.now_ms,
        }
    }

    // -- inventory ----------------------------------------------------------

    pub fn wood(&self) -> u32 {
        crate::items::wood_available(&self.catalog, &self.inventory)
    }

    pub fn give_wood(&mut self, amount: u32) {
        if let Some(wood) = self.catalog.id_of(WOOD_ITEM_NAME) {
            self.inventory.grant(wood, amount);
        }
    }

    pub fn clear_wood(&mut self) {
        if let Some(wood) = self.catalog.id_of(WOOD_ITEM_NAME) {
            let held = self.inventory.count_of(wood);
            self.inventory.consume(wood, held);
        }
    }

    pub fn clear_item(&mut self, kind: PlaceableKind) {
        if let Some(def) = self.catalog.id_of(kind.item_name()) {
            let held = self.inventory.count_of(def);
            self.inventory.consume(def, held);
        }
    }

    // -- snapshot rows ------------------------------------------------------

    pub fn add_foundation(&mut self, cell: IVec2, shape: FoundationShape) -> u64 {
        let id = self.snapshot.alloc_id();
        self.snapshot.foundations.push(Foundation {
            id,
            cell_x: cell.x,
            cell_y: cell.y,
            shape,
            destroyed: false,
        });
        self.foundations.invalidate();
        id
    }

    /// Mark a foundation destroyed in place. The row count is unchanged, so
    /// the index is invalidated by hand exactly as the applier does.
    pub fn destroy_foundation(&mut self, id: u64) {
        if let Some(row) = self.snapshot.foundations.iter_mut().find(|f| f.id == id) {
            row.destroyed = true;
        }
        self.foundations.invalidate();
    }

    pub fn add_wall(&mut self, cell: IVec2, edge: CellEdge) -> u64 {
        let id = self.snapshot.alloc_id();
        self.snapshot.walls.push(Wall {
            id,
            cell_x: cell.x,
            cell_y: cell.y,
            edge,
            destroyed: false,
        });
        id
    }

    pub fn add_fence(&mut self, cell: IVec2, edge: CellEdge) -> u64 {
        let id = self.snapshot.alloc_id();
        self.snapshot.fences.push(Fence {
            id,
            cell_x: cell.x,
            cell_y: cell.y,
            edge,
            destroyed: false,
        });
        id
    }

    pub fn add_door(&mut self, cell: IVec2, edge: CellEdge) -> u64 {
        let id = self.snapshot.alloc_id();
        self.snapshot.doors.push(Door {
            id,
            cell_x: cell.x,
            cell_y: cell.y,
            edge,
            destroyed: false,
        });
        id
    }

    pub fn add_grass(&mut self, pos: Vec2) -> u64 {
        let id = self.snapshot.alloc_id();
        self.snapshot.grass.push(GrassBlade {
            id,
            x: pos.x,
            y: pos.y,
        });
        self.snapshot.grass_alive.insert(id, true);
        self.grass.invalidate();
        id
    }

    pub fn add_campfire(&mut self, pos: Vec2) -> u64 {
        let id = self.snapshot.alloc_id();
        self.snapshot.campfires.push(Campfire {
            id,
            x: pos.x,
            y: pos.y,
            destroyed: false,
        });
        id
    }

    pub fn add_fumarole(&mut self, pos: Vec2) -> u64 {
        let id = self.snapshot.alloc_id();
        self.snapshot.fumaroles.push(Fumarole {
            id,
            x: pos.x,
            y: pos.y,
        });
        id
    }

    pub fn add_broth_pot(&mut self, pos: Vec2, heat_source: HeatSourceId) -> u64 {
        let id = self.snapshot.alloc_id();
        self.snapshot.broth_pots.push(BrothPot {
            id,
            x: pos.x,
            y: pos.y,
            heat_source,
            destroyed: false,
        });
        id
    }
}
