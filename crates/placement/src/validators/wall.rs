//! Wall placement on foundation edges.

use bevy::math::{IVec2, Vec2};

use super::{door_at, edge_or_mirror, fence_at, wall_at, EdgeTarget, PlacementCtx};
use crate::config::{BUILD_RANGE_PX, WALL_WOOD_COST};
use crate::geometry::{cell_center, cell_of_world, edge_for_point, edge_midpoint, CellEdge};
use crate::snapshot::WorldSnapshot;
use crate::verdict::{DenyReason, Verdict};

/// Resolve the wall slot under the cursor and validate it.
///
/// The target is returned even when the verdict denies, so the ghost can
/// draw at the snapped edge. Without a foundation the edge falls back to
/// full-cell cardinal selection, since there is no shape to aim at.
pub fn plan_wall(ctx: &mut PlacementCtx, cursor: Vec2) -> (EdgeTarget, Verdict) {
    let cell = cell_of_world(cursor);
    let center = cell_center(cell);

    ctx.foundations.refresh(ctx.snapshot);
    let mut any_live = false;
    let mut triangular = true;
    for shape in ctx.foundations.live_shapes_at(cell) {
        any_live = true;
        triangular &= shape.is_triangle();
    }
    if !any_live {
        let edge = edge_for_point(center, cursor, false);
        return (
            EdgeTarget { cell, edge },
            Verdict::Deny(DenyReason::NoFoundation),
        );
    }

    let edge = edge_for_point(center, cursor, triangular);
    let target = EdgeTarget { cell, edge };
    (target, validate_wall_at(ctx, cell, edge))
}

/// Validate a wall at an explicit `(cell, edge)`, the form the confirm path
/// and the sandbox applier see after snapping.
pub fn validate_wall_at(ctx: &mut PlacementCtx, cell: IVec2, edge: CellEdge) -> Verdict {
    if !ctx.in_range(edge_midpoint(cell, edge), BUILD_RANGE_PX) {
        return Verdict::Deny(DenyReason::OutOfRange);
    }

    ctx.foundations.refresh(ctx.snapshot);
    let mut any_live = false;
    let mut legal = false;
    for shape in ctx.foundations.live_shapes_at(cell) {
        any_live = true;
        legal |= shape.legal_edges().contains(&edge);
    }
    if !any_live {
        return Verdict::Deny(DenyReason::NoFoundation);
    }
    if !legal {
        return Verdict::Deny(DenyReason::InvalidEdge);
    }

    if wall_slot_occupied(ctx.snapshot, cell, edge) {
        return Verdict::Deny(DenyReason::EdgeOccupied);
    }

    if ctx.wood() < WALL_WOOD_COST {
        return Verdict::Deny(DenyReason::NotEnoughWood {
            needed: WALL_WOOD_COST,
        });
    }
    Verdict::Allow
}

/// A wall slot is taken by any live wall, fence, or door on the same
/// physical border, addressed from either side. The two diagonals cross at
/// the cell center, so a live wall on one blocks the other even though no
/// current shape pair can make both legal at once; rows outlive the
/// foundations they were built against.
fn wall_slot_occupied(snapshot: &WorldSnapshot, cell: IVec2, edge: CellEdge) -> bool {
    if edge_or_mirror(cell, edge, |c, e| {
        wall_at(snapshot, c, e) || fence_at(snapshot, c, e) || door_at(snapshot, c, e)
    }) {
        return true;
    }
    match edge {
        CellEdge::DiagNeSw => wall_at(snapshot, cell, CellEdge::DiagNwSe),
        CellEdge::DiagNwSe => wall_at(snapshot, cell, CellEdge::DiagNeSw),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FoundationShape;
    use crate::test_harness::SandboxWorld;

    #[test]
    fn test_requires_a_foundation() {
        let mut world = SandboxWorld::grassland();
        let (target, verdict) = plan_wall(&mut world.ctx(), Vec2::new(48.0, 10.0));
        assert_eq!(verdict, Verdict::Deny(DenyReason::NoFoundation));
        // The fallback edge still points where the cursor aimed.
        assert_eq!(target.cell, IVec2::ZERO);
        assert_eq!(target.edge, CellEdge::North);
    }

    #[test]
    fn test_full_foundation_cursor_picks_cardinal_edges() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::Full);

        let cases = [
            (Vec2::new(48.0, 8.0), CellEdge::North),
            (Vec2::new(48.0, 88.0), CellEdge::South),
            (Vec2::new(88.0, 48.0), CellEdge::East),
            (Vec2::new(8.0, 48.0), CellEdge::West),
        ];
        for (cursor, expected) in cases {
            let (target, verdict) = plan_wall(&mut world.ctx(), cursor);
            assert_eq!(target.edge, expected, "cursor {cursor:?}");
            assert_eq!(verdict, Verdict::Allow);
        }
    }

    #[test]
    fn test_triangle_prefers_its_diagonal() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::TriNw);

        // Near the center both diagonals are close; the NE-SW hypotenuse of
        // the NW triangle wins over the distant cardinal borders.
        let (target, verdict) = plan_wall(&mut world.ctx(), Vec2::new(50.0, 44.0));
        assert_eq!(target.edge, CellEdge::DiagNeSw);
        assert_eq!(verdict, Verdict::Allow);

        // Hard against the west border the cardinal edge wins again.
        let (target, verdict) = plan_wall(&mut world.ctx(), Vec2::new(2.0, 48.0));
        assert_eq!(target.edge, CellEdge::West);
        assert_eq!(verdict, Verdict::Allow);
    }

    #[test]
    fn test_edge_not_on_shape_is_invalid() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::TriNw);
        // The NW triangle has no east or south border.
        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::East),
            Verdict::Deny(DenyReason::InvalidEdge)
        );
        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::South),
            Verdict::Deny(DenyReason::InvalidEdge)
        );
        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::DiagNwSe),
            Verdict::Deny(DenyReason::InvalidEdge),
            "wrong diagonal for this triangle"
        );
    }

    #[test]
    fn test_split_pair_unions_legal_edges() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::TriNw);
        world.add_foundation(IVec2::ZERO, FoundationShape::TriSe);

        for edge in [
            CellEdge::North,
            CellEdge::West,
            CellEdge::South,
            CellEdge::East,
            CellEdge::DiagNeSw,
        ] {
            assert_eq!(
                validate_wall_at(&mut world.ctx(), IVec2::ZERO, edge),
                Verdict::Allow,
                "{edge:?} is legal on one half of the pair"
            );
        }
    }

    #[test]
    fn test_same_edge_occupied() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::Full);
        world.add_wall(IVec2::ZERO, CellEdge::North);
        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );
    }

    #[test]
    fn test_shared_border_occupied_from_either_side() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::Full);
        world.add_foundation(IVec2::new(1, 0), FoundationShape::Full);
        // A wall recorded as the west edge of (1, 0) fills the same border
        // as the east edge of (0, 0).
        world.add_wall(IVec2::new(1, 0), CellEdge::West);

        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::East),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );
        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::new(1, 0), CellEdge::West),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );
    }

    #[test]
    fn test_fence_and_door_block_the_slot() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::Full);
        world.add_fence(IVec2::ZERO, CellEdge::West);
        world.add_door(IVec2::ZERO, CellEdge::South);

        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::West),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );
        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::South),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );
        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Allow
        );
    }

    #[test]
    fn test_crossing_diagonals_conflict() {
        let mut world = SandboxWorld::grassland();
        // A wall on the NW-SE diagonal survives from a foundation that is
        // gone; the cell now holds the other split pair.
        world.add_foundation(IVec2::ZERO, FoundationShape::TriNw);
        world.add_wall(IVec2::ZERO, CellEdge::DiagNwSe);

        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::DiagNeSw),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );
    }

    #[test]
    fn test_wood_gate() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::Full);
        world.clear_wood();
        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Deny(DenyReason::NotEnoughWood {
                needed: WALL_WOOD_COST
            })
        );
        world.give_wood(WALL_WOOD_COST);
        assert_eq!(
            validate_wall_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Allow
        );
    }

    #[test]
    fn test_distance_gate_on_edge_midpoint() {
        let mut world = SandboxWorld::grassland();
        let cell = IVec2::new(2, 0);
        world.add_foundation(cell, FoundationShape::Full);
        // West edge midpoint is (192, 48): 198 px from the origin player.
        assert_eq!(
            validate_wall_at(&mut world.ctx(), cell, CellEdge::West),
            Verdict::Deny(DenyReason::OutOfRange)
        );
        world.player = Vec2::new(150.0, 48.0);
        assert_eq!(
            validate_wall_at(&mut world.ctx(), cell, CellEdge::West),
            Verdict::Allow
        );
    }
}
