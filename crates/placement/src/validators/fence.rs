//! Freestanding fence placement on cell borders.

use bevy::math::{IVec2, Vec2};

use super::{edge_or_mirror, fence_at, wall_at, EdgeTarget, PlacementCtx};
use crate::config::{
    BUILD_RANGE_PX, CELL_SIZE_PX, FENCE_COLLISION_THICKNESS_PX, FENCE_WOOD_COST, PLAYER_RADIUS_PX,
};
use crate::geometry::{cell_center, cell_of_world, edge_for_point, edge_midpoint, CellEdge};
use crate::tiles::TileKind;
use crate::verdict::{DenyReason, Verdict};
use crate::zones;

/// Resolve the fence border under the cursor and validate it. Fences need no
/// foundation, so the edge always comes from full-cell cardinal selection.
pub fn plan_fence(ctx: &mut PlacementCtx, cursor: Vec2) -> (EdgeTarget, Verdict) {
    let cell = cell_of_world(cursor);
    let edge = edge_for_point(cell_center(cell), cursor, false);
    let target = EdgeTarget { cell, edge };
    (target, validate_fence_at(ctx, cell, edge))
}

/// Validate a fence at an explicit `(cell, edge)`.
pub fn validate_fence_at(ctx: &mut PlacementCtx, cell: IVec2, edge: CellEdge) -> Verdict {
    if edge.is_diagonal() {
        return Verdict::Deny(DenyReason::InvalidEdge);
    }
    let mid = edge_midpoint(cell, edge);
    if !ctx.in_range(mid, BUILD_RANGE_PX) {
        return Verdict::Deny(DenyReason::OutOfRange);
    }

    if edge_or_mirror(cell, edge, |c, e| {
        fence_at(ctx.snapshot, c, e) || wall_at(ctx.snapshot, c, e)
    }) {
        return Verdict::Deny(DenyReason::EdgeOccupied);
    }

    if ctx
        .tiles
        .tile_kind_at_world(ctx.snapshot, mid)
        .is_some_and(TileKind::is_water)
    {
        return Verdict::Deny(DenyReason::WaterBlocked);
    }
    if let Some(zone) = zones::restricted_zone(ctx.tiles, ctx.snapshot, mid) {
        return Verdict::Deny(DenyReason::RestrictedZone(zone));
    }

    if traps_player(cell, edge, ctx.player) {
        return Verdict::Deny(DenyReason::SelfTrap);
    }

    if ctx.wood() < FENCE_WOOD_COST {
        return Verdict::Deny(DenyReason::NotEnoughWood {
            needed: FENCE_WOOD_COST,
        });
    }
    Verdict::Allow
}

/// The fence's collision box inflated by the player radius. Building a fence
/// through one's own feet would wedge the player against it.
fn traps_player(cell: IVec2, edge: CellEdge, player: Vec2) -> bool {
    let mid = edge_midpoint(cell, edge);
    let half_len = CELL_SIZE_PX * 0.5 + PLAYER_RADIUS_PX;
    let half_thick = FENCE_COLLISION_THICKNESS_PX * 0.5 + PLAYER_RADIUS_PX;
    let (half_x, half_y) = if edge.is_horizontal() {
        (half_len, half_thick)
    } else {
        (half_thick, half_len)
    };
    (player.x - mid.x).abs() <= half_x && (player.y - mid.y).abs() <= half_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FoundationShape;
    use crate::test_harness::SandboxWorld;
    use crate::zones::RestrictedZone;

    // Keeps the player clear of the fence box while staying in build range.
    fn step_aside(world: &mut SandboxWorld) {
        world.player = Vec2::new(48.0, -60.0);
    }

    #[test]
    fn test_fence_on_open_grass() {
        let mut world = SandboxWorld::grassland();
        // In range of the south border, outside its inflated box.
        world.player = Vec2::new(48.0, 170.0);
        let (target, verdict) = plan_fence(&mut world.ctx(), Vec2::new(48.0, 88.0));
        assert_eq!(target.edge, CellEdge::South);
        assert_eq!(verdict, Verdict::Allow);
    }

    #[test]
    fn test_no_foundation_needed_but_no_diagonals() {
        let mut world = SandboxWorld::grassland();
        step_aside(&mut world);
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::ZERO, CellEdge::DiagNeSw),
            Verdict::Deny(DenyReason::InvalidEdge)
        );
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::ZERO, CellEdge::DiagNwSe),
            Verdict::Deny(DenyReason::InvalidEdge)
        );
    }

    #[test]
    fn test_wall_blocks_fence_across_the_mirror() {
        let mut world = SandboxWorld::grassland();
        step_aside(&mut world);
        world.add_foundation(IVec2::new(1, 0), FoundationShape::Full);
        world.add_wall(IVec2::new(1, 0), CellEdge::West);

        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::ZERO, CellEdge::East),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );
    }

    #[test]
    fn test_fence_blocks_fence() {
        let mut world = SandboxWorld::grassland();
        step_aside(&mut world);
        world.add_fence(IVec2::ZERO, CellEdge::North);
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );
        // The same border named from the neighbor above.
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::new(0, -1), CellEdge::South),
            Verdict::Deny(DenyReason::EdgeOccupied)
        );
    }

    #[test]
    fn test_water_under_the_border() {
        // Land west of x = 0, sea east of it; the east border of cell
        // (-1, 0) has its midpoint exactly on the waterline tile.
        let mut world = SandboxWorld::painted(2, 8, |x, _| {
            if x < 0 {
                TileKind::Grass
            } else {
                TileKind::Sea
            }
        });
        world.player = Vec2::new(-48.0, 48.0);
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::new(-1, 0), CellEdge::East),
            Verdict::Deny(DenyReason::WaterBlocked)
        );
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::new(-1, 0), CellEdge::West),
            Verdict::Allow
        );
    }

    #[test]
    fn test_paved_border_is_zoned() {
        let mut world = SandboxWorld::painted(2, 8, |_, _| TileKind::Asphalt);
        step_aside(&mut world);
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Deny(DenyReason::RestrictedZone(RestrictedZone::Paved))
        );
    }

    #[test]
    fn test_self_trap() {
        let mut world = SandboxWorld::grassland();
        // Standing right on the border being fenced.
        world.player = Vec2::new(48.0, 2.0);
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Deny(DenyReason::SelfTrap)
        );

        // One player-width clear of the inflated box.
        world.player = Vec2::new(48.0, 70.0);
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Allow
        );
    }

    #[test]
    fn test_self_trap_respects_edge_orientation() {
        let mut world = SandboxWorld::grassland();
        // (60, 20) sits inside the north border's long box but clear of the
        // west border's thin one; orientation decides, not plain distance.
        world.player = Vec2::new(60.0, 20.0);
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::ZERO, CellEdge::West),
            Verdict::Allow
        );
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Deny(DenyReason::SelfTrap)
        );
    }

    #[test]
    fn test_wood_gate() {
        let mut world = SandboxWorld::grassland();
        step_aside(&mut world);
        world.clear_wood();
        assert_eq!(
            validate_fence_at(&mut world.ctx(), IVec2::ZERO, CellEdge::North),
            Verdict::Deny(DenyReason::NotEnoughWood {
                needed: FENCE_WOOD_COST
            })
        );
    }
}
