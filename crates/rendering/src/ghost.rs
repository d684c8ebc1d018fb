//! Ghost preview.
//!
//! Every frame the active tool's target is resolved from the cursor and
//! re-validated against the live world, then drawn as gizmo lines tinted by
//! the verdict. The confirm click submits exactly the request the ghost is
//! showing, so what the player sees is what the applier receives.

use bevy::prelude::*;

use placement::config::{BUILD_RANGE_PX, CELL_SIZE_PX, RUNE_STONE_CLEARANCE_PX};
use placement::geometry::{cell_center, cell_of_world};
use placement::indexes::{FoundationIndex, GrassIndex, PlacementMemo};
use placement::items::{Inventory, ItemCatalog};
use placement::requests::PlacementRequest;
use placement::snapshot::{LocalPlayer, WorldSnapshot};
use placement::tiles::TileCache;
use placement::validators::{
    plan_door, plan_fence, plan_free_object, plan_wall, validate_foundation, PlacementCtx,
};
use placement::verdict::Verdict;

use crate::input::{ActiveTool, CursorWorldPos};
use crate::world_sprites::{cell_corners, edge_endpoints, to_render, triangle_corners};

const ALLOW_COLOR: Color = Color::srgba(0.35, 0.9, 0.45, 0.9);
const DENY_COLOR: Color = Color::srgba(0.92, 0.28, 0.22, 0.9);
const RANGE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
const ZONE_COLOR: Color = Color::srgba(0.95, 0.6, 0.2, 0.3);

/// The plan the ghost is currently showing.
#[derive(Resource, Debug, Default)]
pub struct PreviewState {
    /// Request a confirm click would submit. None while the inspect tool is
    /// active, the cursor is off the window, or a door found nothing to
    /// snap to.
    pub request: Option<PlacementRequest>,
    /// Verdict for the hovered target; carried even without a request so
    /// the status line can explain why there is nothing to place.
    pub verdict: Option<Verdict>,
}

impl PreviewState {
    pub fn clear(&mut self) {
        self.request = None;
        self.verdict = None;
    }

    pub fn is_allowed(&self) -> bool {
        self.verdict == Some(Verdict::Allow)
    }
}

/// Resolve and validate the hovered target for the active tool.
#[allow(clippy::too_many_arguments)]
pub fn update_preview(
    tool: Res<ActiveTool>,
    cursor: Res<CursorWorldPos>,
    snapshot: Res<WorldSnapshot>,
    mut tiles: ResMut<TileCache>,
    mut foundations: ResMut<FoundationIndex>,
    mut grass: ResMut<GrassIndex>,
    mut memo: ResMut<PlacementMemo>,
    catalog: Res<ItemCatalog>,
    inventory: Res<Inventory>,
    player: Res<LocalPlayer>,
    time: Res<Time>,
    mut preview: ResMut<PreviewState>,
) {
    if !tool.is_build_tool() || !cursor.valid {
        preview.clear();
        return;
    }

    let mut ctx = PlacementCtx {
        snapshot: &*snapshot,
        tiles: &mut *tiles,
        foundations: &mut *foundations,
        grass: &mut *grass,
        memo: &mut *memo,
        catalog: &*catalog,
        inventory: &*inventory,
        player: player.pos,
        now_ms: time.elapsed_secs_f64() * 1000.0,
    };

    match *tool {
        ActiveTool::Inspect => preview.clear(),
        ActiveTool::Foundation(shape) => {
            let cell = cell_of_world(cursor.pos);
            let verdict = validate_foundation(&mut ctx, cell, shape);
            preview.request = Some(PlacementRequest::foundation(cell, shape));
            preview.verdict = Some(verdict);
        }
        ActiveTool::Wall => {
            let (target, verdict) = plan_wall(&mut ctx, cursor.pos);
            preview.request = Some(PlacementRequest::wall(target.cell, target.edge));
            preview.verdict = Some(verdict);
        }
        ActiveTool::Fence => {
            let (target, verdict) = plan_fence(&mut ctx, cursor.pos);
            preview.request = Some(PlacementRequest::fence(target.cell, target.edge));
            preview.verdict = Some(verdict);
        }
        ActiveTool::Door => {
            let (target, verdict) = plan_door(&mut ctx, cursor.pos);
            preview.request = target.map(|t| PlacementRequest::door(t.cell, t.edge));
            preview.verdict = Some(verdict);
        }
        ActiveTool::Place(kind) => {
            let (target, verdict) = plan_free_object(&mut ctx, kind, cursor.pos);
            preview.request = Some(PlacementRequest::free_object(kind, target.pos));
            preview.verdict = Some(verdict);
        }
    }
}

/// Draw the ghost shape, the player's build-range ring and every active
/// no-build zone while a build tool is selected.
pub fn draw_preview(
    mut gizmos: Gizmos,
    tool: Res<ActiveTool>,
    preview: Res<PreviewState>,
    player: Res<LocalPlayer>,
    snapshot: Res<WorldSnapshot>,
) {
    if !tool.is_build_tool() {
        return;
    }

    gizmos.circle_2d(to_render(player.pos), BUILD_RANGE_PX, RANGE_COLOR);
    draw_restricted_zones(&mut gizmos, &snapshot);

    let Some(request) = preview.request else {
        return;
    };
    let color = if preview.is_allowed() {
        ALLOW_COLOR
    } else {
        DENY_COLOR
    };

    match request {
        PlacementRequest::Foundation {
            cell_x,
            cell_y,
            shape,
        } => {
            let cell = IVec2::new(cell_x, cell_y);
            match triangle_corners(cell, shape) {
                Some([a, b, c]) => {
                    gizmos.linestrip_2d(
                        [to_render(a), to_render(b), to_render(c), to_render(a)],
                        color,
                    );
                }
                None => {
                    let center = to_render(cell_center(cell));
                    gizmos.rect_2d(center, Vec2::splat(CELL_SIZE_PX), color);
                }
            }
        }
        PlacementRequest::Wall {
            cell_x,
            cell_y,
            edge,
        }
        | PlacementRequest::Fence {
            cell_x,
            cell_y,
            edge,
        } => {
            let (a, b) = edge_endpoints(IVec2::new(cell_x, cell_y), edge);
            gizmos.line_2d(to_render(a), to_render(b), color);
        }
        PlacementRequest::Door {
            cell_x,
            cell_y,
            edge,
        } => {
            // Doors get the edge line plus the host cell outline, since the
            // target may have snapped away from the hovered cell.
            let cell = IVec2::new(cell_x, cell_y);
            let (a, b) = edge_endpoints(cell, edge);
            gizmos.line_2d(to_render(a), to_render(b), color);
            let [nw, ne, se, sw] = cell_corners(cell);
            gizmos.linestrip_2d(
                [
                    to_render(nw),
                    to_render(ne),
                    to_render(se),
                    to_render(sw),
                    to_render(nw),
                ],
                color.with_alpha(0.35),
            );
        }
        PlacementRequest::FreeObject { kind, x, y } => {
            let radius = kind.overlap_radius_px().unwrap_or(12.0);
            gizmos.circle_2d(to_render(Vec2::new(x, y)), radius, color);
        }
    }
}

/// Rings for every zone the validators will refuse: active stations, rune
/// stones and monument centers with a clearance. Tile-derived zones (hot
/// spring, quarry, pavement) are visible as terrain already.
fn draw_restricted_zones(gizmos: &mut Gizmos, snapshot: &WorldSnapshot) {
    for station in snapshot.stations.iter().filter(|s| s.active) {
        gizmos.circle_2d(
            to_render(Vec2::new(station.x, station.y)),
            station.no_build_radius(),
            ZONE_COLOR,
        );
    }
    for stone in &snapshot.rune_stones {
        gizmos.circle_2d(
            to_render(Vec2::new(stone.x, stone.y)),
            RUNE_STONE_CLEARANCE_PX,
            ZONE_COLOR,
        );
    }
    for part in snapshot.monuments.iter().filter(|m| m.is_center) {
        if let Some(clearance) = part.kind.clearance_px() {
            gizmos.circle_2d(to_render(Vec2::new(part.x, part.y)), clearance, ZONE_COLOR);
        }
    }
}
