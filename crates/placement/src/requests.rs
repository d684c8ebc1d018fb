//! Placement request queue and the sandbox applier.
//!
//! A [`PlacementRequest`] is the payload the confirm path would send to the
//! server: integer cells, wire-stable enums, no references into local state.
//! The sandbox applier drains the queue each fixed-update tick, re-validates
//! every request against the live snapshot (the preview verdict may be up to
//! a memo TTL stale, and the player keeps moving), applies the accepted ones,
//! and records every outcome in the [`PlacementLog`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DOOR_WOOD_COST, FENCE_WOOD_COST, WALL_WOOD_COST};
use crate::geometry::{CellEdge, FoundationShape};
use crate::indexes::{FoundationIndex, GrassIndex, PlacementMemo};
use crate::items::{Inventory, ItemCatalog, PlaceableKind, WOOD_ITEM_NAME};
use crate::snapshot::{
    BrothPot, Campfire, Door, Fence, Foundation, LocalPlayer, Placeable, Wall, WorldSnapshot,
};
use crate::tiles::TileCache;
use crate::validators::{
    plan_free_object, validate_door_at, validate_fence_at, validate_foundation, validate_wall_at,
    FreeTarget, PlacementCtx,
};
use crate::verdict::{DenyReason, Verdict};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// One confirmed placement, in wire form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlacementRequest {
    Foundation {
        cell_x: i32,
        cell_y: i32,
        shape: FoundationShape,
    },
    Wall {
        cell_x: i32,
        cell_y: i32,
        edge: CellEdge,
    },
    Fence {
        cell_x: i32,
        cell_y: i32,
        edge: CellEdge,
    },
    Door {
        cell_x: i32,
        cell_y: i32,
        edge: CellEdge,
    },
    FreeObject {
        kind: PlaceableKind,
        x: f32,
        y: f32,
    },
}

impl PlacementRequest {
    pub fn foundation(cell: IVec2, shape: FoundationShape) -> Self {
        Self::Foundation {
            cell_x: cell.x,
            cell_y: cell.y,
            shape,
        }
    }

    pub fn wall(cell: IVec2, edge: CellEdge) -> Self {
        Self::Wall {
            cell_x: cell.x,
            cell_y: cell.y,
            edge,
        }
    }

    pub fn fence(cell: IVec2, edge: CellEdge) -> Self {
        Self::Fence {
            cell_x: cell.x,
            cell_y: cell.y,
            edge,
        }
    }

    pub fn door(cell: IVec2, edge: CellEdge) -> Self {
        Self::Door {
            cell_x: cell.x,
            cell_y: cell.y,
            edge,
        }
    }

    pub fn free_object(kind: PlaceableKind, pos: Vec2) -> Self {
        Self::FreeObject {
            kind,
            x: pos.x,
            y: pos.y,
        }
    }

    /// Short label for the outcome log and the status line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Foundation { shape, .. } => shape.label(),
            Self::Wall { .. } => "Wall",
            Self::Fence { .. } => "Fence",
            Self::Door { .. } => "Door",
            Self::FreeObject { kind, .. } => kind.item_name(),
        }
    }
}

/// Pending requests, applied in confirm order on the next fixed tick.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementQueue {
    pending: Vec<PlacementRequest>,
}

impl PlacementQueue {
    pub fn push(&mut self, request: PlacementRequest) {
        self.pending.push(request);
    }

    pub fn drain(&mut self) -> Vec<PlacementRequest> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlacementOutcome {
    /// The request passed re-validation; `id` is the new snapshot row.
    Placed { id: u64 },
    Rejected(DenyReason),
}

impl PlacementOutcome {
    pub fn is_placed(self) -> bool {
        matches!(self, Self::Placed { .. })
    }
}

/// Maximum number of entries retained in the ring buffer.
const MAX_LOG_ENTRIES: usize = 64;

/// Ring-buffer log of the last [`MAX_LOG_ENTRIES`] request/outcome pairs,
/// read by the status panel instead of polling the snapshot for diffs.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlacementLog {
    entries: Vec<(PlacementRequest, PlacementOutcome)>,
}

impl PlacementLog {
    /// Record an outcome. The oldest entry is evicted once full.
    pub fn push(&mut self, request: PlacementRequest, outcome: PlacementOutcome) {
        if self.entries.len() >= MAX_LOG_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push((request, outcome));
    }

    /// Last `n` entries, oldest first (or fewer if the log is shorter).
    pub fn last_n(&self, n: usize) -> &[(PlacementRequest, PlacementOutcome)] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn latest(&self) -> Option<&(PlacementRequest, PlacementOutcome)> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Applier system
// ---------------------------------------------------------------------------

/// Drains the queue and applies every request in order.
#[allow(clippy::too_many_arguments)]
pub fn apply_placement_requests(
    mut queue: ResMut<PlacementQueue>,
    mut log: ResMut<PlacementLog>,
    mut snapshot: ResMut<WorldSnapshot>,
    mut tiles: ResMut<TileCache>,
    mut foundations: ResMut<FoundationIndex>,
    mut grass: ResMut<GrassIndex>,
    mut memo: ResMut<PlacementMemo>,
    catalog: Res<ItemCatalog>,
    mut inventory: ResMut<Inventory>,
    player: Res<LocalPlayer>,
    time: Res<Time>,
) {
    // Change detection on the snapshot drives sprite resync; leave it
    // untouched on idle ticks.
    if queue.is_empty() {
        return;
    }
    let now_ms = time.elapsed_secs_f64() * 1000.0;
    for request in queue.drain() {
        let outcome = apply_one(
            request,
            &mut snapshot,
            &mut tiles,
            &mut foundations,
            &mut grass,
            &mut memo,
            &catalog,
            &mut inventory,
            player.pos,
            now_ms,
        );
        match outcome {
            PlacementOutcome::Placed { id } => {
                info!("{} placed (row {})", request.label(), id);
            }
            PlacementOutcome::Rejected(reason) => {
                // The preview validated this last frame; a reject here means
                // the world moved underneath the click.
                debug!("{} rejected on apply: {}", request.label(), reason.message());
            }
        }
        log.push(request, outcome);
    }
}

/// Re-validate one request against the current world and apply it.
///
/// Any accepted mutation spends resources, so the verdict memo is cleared
/// wholesale afterwards; rejected requests leave every table untouched.
#[allow(clippy::too_many_arguments)]
pub fn apply_one(
    request: PlacementRequest,
    snapshot: &mut WorldSnapshot,
    tiles: &mut TileCache,
    foundations: &mut FoundationIndex,
    grass: &mut GrassIndex,
    memo: &mut PlacementMemo,
    catalog: &ItemCatalog,
    inventory: &mut Inventory,
    player: Vec2,
    now_ms: f64,
) -> PlacementOutcome {
    let (resolved, verdict) = {
        let mut ctx = PlacementCtx {
            snapshot: &*snapshot,
            tiles: &mut *tiles,
            foundations: &mut *foundations,
            grass: &mut *grass,
            memo: &mut *memo,
            catalog,
            inventory: &*inventory,
            player,
            now_ms,
        };
        validate_request(&mut ctx, request)
    };
    if let Some(reason) = verdict.reason() {
        return PlacementOutcome::Rejected(reason);
    }

    let id = snapshot.alloc_id();
    match request {
        PlacementRequest::Foundation {
            cell_x,
            cell_y,
            shape,
        } => {
            spend_wood(catalog, inventory, shape.wood_cost());
            snapshot.foundations.push(Foundation {
                id,
                cell_x,
                cell_y,
                shape,
                destroyed: false,
            });
            foundations.invalidate();
        }
        PlacementRequest::Wall {
            cell_x,
            cell_y,
            edge,
        } => {
            spend_wood(catalog, inventory, WALL_WOOD_COST);
            snapshot.walls.push(Wall {
                id,
                cell_x,
                cell_y,
                edge,
                destroyed: false,
            });
        }
        PlacementRequest::Fence {
            cell_x,
            cell_y,
            edge,
        } => {
            spend_wood(catalog, inventory, FENCE_WOOD_COST);
            snapshot.fences.push(Fence {
                id,
                cell_x,
                cell_y,
                edge,
                destroyed: false,
            });
        }
        PlacementRequest::Door {
            cell_x,
            cell_y,
            edge,
        } => {
            spend_wood(catalog, inventory, DOOR_WOOD_COST);
            snapshot.doors.push(Door {
                id,
                cell_x,
                cell_y,
                edge,
                destroyed: false,
            });
        }
        PlacementRequest::FreeObject { kind, x, y } => {
            let target = resolved.unwrap_or(FreeTarget {
                pos: Vec2::new(x, y),
                heat_source: None,
            });
            // An allowed pot always carries its resolved source; refuse
            // rather than place a cold pot if that ever breaks.
            if kind.needs_heat_source() && target.heat_source.is_none() {
                return PlacementOutcome::Rejected(DenyReason::NoHeatSource);
            }
            consume_item(catalog, inventory, kind);
            match kind {
                PlaceableKind::Campfire => snapshot.campfires.push(Campfire {
                    id,
                    x: target.pos.x,
                    y: target.pos.y,
                    destroyed: false,
                }),
                PlaceableKind::BrothPot => {
                    if let Some(heat_source) = target.heat_source {
                        snapshot.broth_pots.push(BrothPot {
                            id,
                            x: target.pos.x,
                            y: target.pos.y,
                            heat_source,
                            destroyed: false,
                        });
                    }
                }
                _ => snapshot.placeables.push(Placeable {
                    id,
                    kind,
                    x: target.pos.x,
                    y: target.pos.y,
                    destroyed: false,
                }),
            }
        }
    }
    // Resource counts changed, so memoized wood checks are stale.
    memo.clear();
    PlacementOutcome::Placed { id }
}

/// Dispatch to the validator for this request class. Free objects also
/// resolve their landing target, which may differ from the cursor.
fn validate_request(
    ctx: &mut PlacementCtx,
    request: PlacementRequest,
) -> (Option<FreeTarget>, Verdict) {
    match request {
        PlacementRequest::Foundation {
            cell_x,
            cell_y,
            shape,
        } => (
            None,
            validate_foundation(ctx, IVec2::new(cell_x, cell_y), shape),
        ),
        PlacementRequest::Wall {
            cell_x,
            cell_y,
            edge,
        } => (None, validate_wall_at(ctx, IVec2::new(cell_x, cell_y), edge)),
        PlacementRequest::Fence {
            cell_x,
            cell_y,
            edge,
        } => (
            None,
            validate_fence_at(ctx, IVec2::new(cell_x, cell_y), edge),
        ),
        PlacementRequest::Door {
            cell_x,
            cell_y,
            edge,
        } => (None, validate_door_at(ctx, IVec2::new(cell_x, cell_y), edge)),
        PlacementRequest::FreeObject { kind, x, y } => {
            let (target, verdict) = plan_free_object(ctx, kind, Vec2::new(x, y));
            (Some(target), verdict)
        }
    }
}

fn spend_wood(catalog: &ItemCatalog, inventory: &mut Inventory, cost: u32) {
    if cost == 0 {
        return;
    }
    if let Some(wood_id) = catalog.id_of(WOOD_ITEM_NAME) {
        let spent = inventory.consume(wood_id, cost);
        debug_assert!(spent, "validated placement found the wood missing");
    }
}

fn consume_item(catalog: &ItemCatalog, inventory: &mut Inventory, kind: PlaceableKind) {
    if let Some(item_id) = catalog.id_of(kind.item_name()) {
        let spent = inventory.consume(item_id, 1);
        debug_assert!(spent, "validated placement found the item missing");
    }
}
