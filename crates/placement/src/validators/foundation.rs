//! Foundation placement.

use bevy::math::{IVec2, Vec2};

use super::PlacementCtx;
use crate::config::BUILD_RANGE_PX;
use crate::geometry::{cell_center, FoundationShape};
use crate::indexes::MemoKey;
use crate::tiles::TileKind;
use crate::verdict::{DenyReason, Verdict};
use crate::zones;

/// Validate a foundation of `shape` at `cell`.
///
/// The distance gate always runs against the live player position. The rest
/// of the chain is memoized per `(cell, shape)` for a short window, so a
/// ghost hovering one cell costs a hash probe per frame instead of a full
/// re-evaluation.
pub fn validate_foundation(ctx: &mut PlacementCtx, cell: IVec2, shape: FoundationShape) -> Verdict {
    let center = cell_center(cell);
    if !ctx.in_range(center, BUILD_RANGE_PX) {
        return Verdict::Deny(DenyReason::OutOfRange);
    }

    let key = MemoKey::new(cell, shape);
    if let Some(hit) = ctx.memo.get(key, ctx.now_ms) {
        return hit;
    }
    let verdict = evaluate(ctx, cell, shape, center);
    ctx.memo.insert(key, verdict, ctx.now_ms);
    verdict
}

fn evaluate(ctx: &mut PlacementCtx, cell: IVec2, shape: FoundationShape, center: Vec2) -> Verdict {
    ctx.grass.refresh(ctx.snapshot);
    if ctx.grass.blocks_cell(ctx.snapshot, cell) {
        return Verdict::Deny(DenyReason::GrassBlocked);
    }

    if let Some(zone) = zones::restricted_zone(ctx.tiles, ctx.snapshot, center) {
        return Verdict::Deny(DenyReason::RestrictedZone(zone));
    }
    if ctx
        .tiles
        .tile_kind_at_world(ctx.snapshot, center)
        .is_some_and(TileKind::is_water)
    {
        return Verdict::Deny(DenyReason::WaterBlocked);
    }

    ctx.foundations.refresh(ctx.snapshot);
    let (first, second) = {
        let mut live = ctx.foundations.live_shapes_at(cell);
        (live.next(), live.next())
    };
    if let Some(existing) = first {
        // A cell holds at most two foundations, and only as the two halves
        // of a diagonally split square.
        if second.is_some() || !existing.complementary(shape) {
            return Verdict::Deny(DenyReason::Overlap);
        }
    }

    let needed = shape.wood_cost();
    if ctx.wood() < needed {
        return Verdict::Deny(DenyReason::NotEnoughWood { needed });
    }
    Verdict::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FOUNDATION_FULL_WOOD_COST, FOUNDATION_TRI_WOOD_COST, MEMO_TTL_MS};
    use crate::snapshot::RuneStone;
    use crate::test_harness::SandboxWorld;
    use crate::zones::RestrictedZone;

    #[test]
    fn test_full_on_open_grass() {
        let mut world = SandboxWorld::grassland();
        let verdict = validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full);
        assert_eq!(verdict, Verdict::Allow);
    }

    #[test]
    fn test_distance_gate_runs_before_memo() {
        let mut world = SandboxWorld::grassland();
        let far = IVec2::new(5, 5);
        assert_eq!(
            validate_foundation(&mut world.ctx(), far, FoundationShape::Full),
            Verdict::Deny(DenyReason::OutOfRange)
        );
        // An out-of-range verdict must leave no memo entry behind; otherwise
        // walking closer within the TTL would replay the stale denial.
        assert!(world.memo.is_empty());

        world.player = cell_center(far);
        assert_eq!(
            validate_foundation(&mut world.ctx(), far, FoundationShape::Full),
            Verdict::Allow
        );

        // The Allow above is memoized, but walking away still denies: the
        // distance gate re-evaluates on every call, memo or not.
        world.player = Vec2::ZERO;
        world.now_ms += MEMO_TTL_MS * 0.25;
        assert_eq!(
            validate_foundation(&mut world.ctx(), far, FoundationShape::Full),
            Verdict::Deny(DenyReason::OutOfRange)
        );
    }

    #[test]
    fn test_water_denied() {
        let mut world = SandboxWorld::painted(2, 8, |_, _| TileKind::Sea);
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Deny(DenyReason::WaterBlocked)
        );
    }

    #[test]
    fn test_paved_ground_denied_as_zone() {
        let mut world = SandboxWorld::painted(2, 8, |_, _| TileKind::Asphalt);
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Deny(DenyReason::RestrictedZone(RestrictedZone::Paved))
        );
    }

    #[test]
    fn test_live_grass_blocks_dead_grass_does_not() {
        let mut world = SandboxWorld::grassland();
        let blade = world.add_grass(Vec2::new(40.0, 40.0));
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Deny(DenyReason::GrassBlocked)
        );

        world.snapshot.grass_alive.insert(blade, false);
        world.grass.invalidate();
        world.memo.clear();
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Allow
        );
    }

    #[test]
    fn test_rune_stone_clearance() {
        let mut world = SandboxWorld::grassland();
        world.snapshot.rune_stones.push(RuneStone {
            id: 900,
            x: 300.0,
            y: 48.0,
        });
        // Cell (0, 0) centers at (48, 48): 252 px from the stone, inside 400.
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Deny(DenyReason::RestrictedZone(RestrictedZone::RuneStone))
        );
    }

    #[test]
    fn test_split_square_pairing() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::TriNw);

        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::TriSe),
            Verdict::Allow,
            "the complementary half completes the square"
        );
        world.memo.clear();
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::TriNe),
            Verdict::Deny(DenyReason::Overlap),
            "a triangle from the other diagonal crosses the occupant"
        );
        world.memo.clear();
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Deny(DenyReason::Overlap)
        );
    }

    #[test]
    fn test_completed_pair_rejects_a_third() {
        let mut world = SandboxWorld::grassland();
        world.add_foundation(IVec2::ZERO, FoundationShape::TriNw);
        world.add_foundation(IVec2::ZERO, FoundationShape::TriSe);
        for shape in [FoundationShape::TriNe, FoundationShape::TriSw, FoundationShape::Full] {
            world.memo.clear();
            assert_eq!(
                validate_foundation(&mut world.ctx(), IVec2::ZERO, shape),
                Verdict::Deny(DenyReason::Overlap),
                "{shape:?} must not fit a completed cell"
            );
        }
    }

    #[test]
    fn test_destroyed_foundation_frees_the_cell() {
        let mut world = SandboxWorld::grassland();
        let id = world.add_foundation(IVec2::ZERO, FoundationShape::Full);
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Deny(DenyReason::Overlap)
        );

        world.destroy_foundation(id);
        world.memo.clear();
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Allow
        );
    }

    #[test]
    fn test_wood_cost_per_shape() {
        let mut world = SandboxWorld::grassland();
        world.clear_wood();
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Deny(DenyReason::NotEnoughWood {
                needed: FOUNDATION_FULL_WOOD_COST
            })
        );
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::TriSw),
            Verdict::Deny(DenyReason::NotEnoughWood {
                needed: FOUNDATION_TRI_WOOD_COST
            })
        );

        world.give_wood(FOUNDATION_TRI_WOOD_COST);
        world.memo.clear();
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::TriSw),
            Verdict::Allow
        );
        world.memo.clear();
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Deny(DenyReason::NotEnoughWood {
                needed: FOUNDATION_FULL_WOOD_COST
            })
        );
    }

    #[test]
    fn test_memo_serves_stale_verdicts_inside_ttl() {
        let mut world = SandboxWorld::grassland();
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Allow
        );

        // The world changes under the memo: another player claims the cell.
        world.add_foundation(IVec2::ZERO, FoundationShape::Full);

        // Within the TTL the cached verdict is served as-is.
        world.now_ms += MEMO_TTL_MS * 0.5;
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Allow,
            "stale verdicts are tolerated inside the TTL window"
        );

        // Past the TTL the entry expires and the occupant is seen.
        world.now_ms += MEMO_TTL_MS;
        assert_eq!(
            validate_foundation(&mut world.ctx(), IVec2::ZERO, FoundationShape::Full),
            Verdict::Deny(DenyReason::Overlap)
        );
    }
}
