//! Door placement, snapping to nearby foundations.

use bevy::math::{IVec2, Vec2};

use super::{door_at, edge_or_mirror, wall_at, EdgeTarget, PlacementCtx};
use crate::config::{BUILD_RANGE_PX, DOOR_SNAP_WINDOW_CELLS, DOOR_WOOD_COST};
use crate::geometry::{cell_center, cell_of_world, edge_midpoint, CellEdge};
use crate::verdict::{DenyReason, Verdict};

/// Snap the cursor to the nearest live foundation in the surrounding cell
/// window and validate a door there. Doors mount only on the north or south
/// border, picked by which half of the snapped cell the cursor is in.
///
/// Returns no target when the window holds no foundation at all; the ghost
/// has nothing to snap to in that case.
pub fn plan_door(ctx: &mut PlacementCtx, cursor: Vec2) -> (Option<EdgeTarget>, Verdict) {
    ctx.foundations.refresh(ctx.snapshot);

    let around = cell_of_world(cursor);
    let mut best: Option<(f32, IVec2)> = None;
    for dy in -DOOR_SNAP_WINDOW_CELLS..=DOOR_SNAP_WINDOW_CELLS {
        for dx in -DOOR_SNAP_WINDOW_CELLS..=DOOR_SNAP_WINDOW_CELLS {
            let cell = IVec2::new(around.x + dx, around.y + dy);
            if !ctx.foundations.occupied(cell) {
                continue;
            }
            let d2 = cell_center(cell).distance_squared(cursor);
            if best.map_or(true, |(best_d2, _)| d2 < best_d2) {
                best = Some((d2, cell));
            }
        }
    }
    let Some((_, cell)) = best else {
        return (None, Verdict::Deny(DenyReason::NoFoundation));
    };

    // North is negative y; the cursor's half of the cell picks the border.
    let edge = if cursor.y < cell_center(cell).y {
        CellEdge::North
    } else {
        CellEdge::South
    };
    let target = EdgeTarget { cell, edge };
    (Some(target), validate_door_at(ctx, cell, edge))
}

/// Validate a door at an explicit `(cell, edge)`.
pub fn validate_door_at(ctx: &mut PlacementCtx, cell: IVec2, edge: CellEdge) -> Verdict {
    if !matches!(edge, CellEdge::North | CellEdge::South) {
        return Verdict::Deny(DenyReason::InvalidEdge);
    }
    if !ctx.in_range(edge_midpoint(cell, edge), BUILD_RANGE_PX) {
        return Verdict::Deny(DenyReason::OutOfRange);
    }

    ctx.foundations.refresh(ctx.snapshot);
    if !ctx.foundations.occupied(cell) {
        return Verdict::Deny(DenyReason::NoFoundation);
    }

    if edge_or_mirror(cell, edge, |c, e| {
        wall_at(ctx.snapshot, c, e) || door_at(ctx.snapshot, c, e)
    }) {
        return Verdict::Deny(DenyReason::EdgeOccupied);
    }

    if ctx.wood() < DOOR_WOOD_COST {
        return Verdict::Deny(DenyReason::NotEnoughWood {
            needed: DOOR_WOOD_COST,
        });
    }
    Verdict::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FoundationShape;
    use crate::test_harness::SandboxWorld;

    #[test]
    fn test_no_foundation_in_window() {
        let mut world = SandboxWorld::grassland();
        let (target, verdict) = plan_door(&mut world.ctx(), Vec2::new(48.0, 48.0));
        assert_eq!(target, None);
        assert_eq!(verdict, Verdict::Deny(DenyReason::NoFoundation));
    }

    #[test]
    fn test_snaps_to_adjacent_cell() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::new(1, 0), FoundationShape::Full);
        world.player = Vec2::new(96.0, 20.0);

        // Cursor hovers the empty cell (0, 0); the window finds the
        // neighbor. Upper half of the snapped cell picks the north border.
        let (target, verdict) = plan_door(&mut world.ctx(), Vec2::new(90.0, 30.0));
        let target = target.expect("foundation within the window");
        assert_eq!(target.cell, IVec2::new(1, 0));
        assert_eq!(target.edge, CellEdge::North);
        assert_eq!(verdict, Verdict::Allow);
    }

    #[test]
    fn test_nearest_foundation_wins() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::new(-1, 0), FoundationShape::Full);
        world.add_foundation(IVec2::new(1, 0), FoundationShape::Full);

        let (target, _) = plan_door(&mut world.ctx(), Vec2::new(20.0, 60.0));
        assert_eq!(target.map(|t| t.cell), Some(IVec2::new(-1, 0)));

        let (target, _) = plan_door(&mut world.ctx(), Vec2::new(76.0, 60.0));
        assert_eq!(target.map(|t| t.cell), Some(IVec2::new(1, 0)));
    }

    #[test]
    fn test_cursor_half_picks_the_border() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::Full);

        let (target, _) = plan_door(&mut world.ctx(), Vec2::new(48.0, 20.0));
        assert_eq!(target.map(|t| t.edge), Some(CellEdge::North));

        let (target, _) = plan_door(&mut world.ctx(), Vec2::new(48.0, 80.0));
        assert_eq!(target.map(|t| t.edge), Some(CellEdge::South));
    }

    #[test]
    fn test_east_west_rejected_outright() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::Full);
        assert_eq!(
            validate_door_at(&mut world.ctx(), IVec2::ZERO, CellEdge::East),
            Verdict::Deny(DenyReason::InvalidEdge)
        );
        assert_eq!(
            validate_door_at(&mut world.ctx(), IVec2::ZERO, CellEdge::DiagNeSw),
            Verdict::Deny(DenyReason::InvalidEdge)
        );
    }

    #[test]
    fn test_wall_or_door_occupies_the_border() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::Full);
        world.add_wall(IVec2::ZERO, CellEdge::North);
        assert_eq!(
            validate_door_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );

        // A door on the neighbor's north border is this cell's south border.
        world.add_foundation(IVec2::new(0, 1), FoundationShape::Full);
        world.add_door(IVec2::new(0, 1), CellEdge::North);
        assert_eq!(
            validate_door_at(&mut world.ctx(), IVec2::ZERO, CellEdge::South),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );
    }

    #[test]
    fn test_wood_gate() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::Full);
        world.clear_wood();
        assert_eq!(
            validate_door_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Deny(DenyReason::NotEnoughWood {
                needed: DOOR_WOOD_COST
            })
        );
    }
}
