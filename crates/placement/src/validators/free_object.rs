//! Free-object placement: campfires, furniture, seeds, and the broth pot.

use bevy::math::Vec2;

use super::PlacementCtx;
use crate::items::PlaceableKind;
use crate::snapshot::{HeatSourceId, WorldSnapshot};
use crate::terrain;
use crate::verdict::{DenyReason, Verdict};
use crate::zones;

/// Where a free object will actually land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeTarget {
    /// Final position. Differs from the cursor only for pots, which snap
    /// onto their heat source.
    pub pos: Vec2,
    /// Heat source a pot will mount, resolved during validation.
    pub heat_source: Option<HeatSourceId>,
}

/// Validate `kind` at the cursor and resolve its landing target.
pub fn plan_free_object(
    ctx: &mut PlacementCtx,
    kind: PlaceableKind,
    cursor: Vec2,
) -> (FreeTarget, Verdict) {
    let mut target = FreeTarget {
        pos: cursor,
        heat_source: None,
    };
    let verdict = evaluate(ctx, kind, cursor, &mut target);
    (target, verdict)
}

fn evaluate(
    ctx: &mut PlacementCtx,
    kind: PlaceableKind,
    cursor: Vec2,
    target: &mut FreeTarget,
) -> Verdict {
    if !ctx.in_range(cursor, kind.placement_range_px()) {
        return Verdict::Deny(DenyReason::OutOfRange);
    }

    match kind.terrain_requirement() {
        Some(requirement) => {
            if !terrain::satisfies_requirement(ctx.tiles, ctx.snapshot, cursor, requirement) {
                return Verdict::Deny(DenyReason::WrongTerrain(requirement));
            }
            if let Some(limit) = kind.shore_limit_px() {
                if terrain::shore_distance(ctx.tiles, ctx.snapshot, cursor) > limit {
                    return Verdict::Deny(DenyReason::TooFarFromShore);
                }
            }
        }
        None => {
            if kind.blocked_on_water() && terrain::on_water(ctx.tiles, ctx.snapshot, cursor) {
                return Verdict::Deny(DenyReason::WaterBlocked);
            }
        }
    }

    if kind.blocked_on_beach() && terrain::on_beach(ctx.tiles, ctx.snapshot, cursor) {
        return Verdict::Deny(DenyReason::BlockedOnBeach);
    }
    if kind.blocked_on_alpine() && terrain::on_alpine(ctx.tiles, ctx.snapshot, cursor) {
        return Verdict::Deny(DenyReason::BlockedOnAlpine);
    }

    if let Some(zone) = zones::restricted_zone(ctx.tiles, ctx.snapshot, cursor) {
        return Verdict::Deny(DenyReason::RestrictedZone(zone));
    }
    if zones::on_wall_buffer(ctx.snapshot, cursor) {
        return Verdict::Deny(DenyReason::WallBuffer);
    }

    if let Some(radius) = kind.overlap_radius_px() {
        if object_overlap(ctx.snapshot, cursor, radius) {
            return Verdict::Deny(DenyReason::ObjectOverlap);
        }
    }

    if kind.needs_heat_source() {
        let Some((source, pos)) =
            nearest_heat_source(ctx.snapshot, cursor, kind.heat_snap_radius_px())
        else {
            return Verdict::Deny(DenyReason::NoHeatSource);
        };
        if ctx.snapshot.heat_source_occupied(source) {
            return Verdict::Deny(DenyReason::HeatSourceOccupied);
        }
        target.pos = pos;
        target.heat_source = Some(source);
    }

    let held = ctx
        .catalog
        .id_of(kind.item_name())
        .map_or(0, |id| ctx.inventory.count_of(id));
    if held == 0 {
        return Verdict::Deny(DenyReason::MissingItem);
    }
    Verdict::Allow
}

/// Any live placed object whose combined footprint radius overlaps `pos`.
/// Campfires live in their own table; everything else with a footprint is a
/// generic placeable row.
fn object_overlap(snapshot: &WorldSnapshot, pos: Vec2, radius: f32) -> bool {
    let campfire_radius = PlaceableKind::Campfire
        .overlap_radius_px()
        .unwrap_or_default();
    for fire in snapshot.campfires.iter().filter(|c| !c.destroyed) {
        let combined = radius + campfire_radius;
        if Vec2::new(fire.x, fire.y).distance_squared(pos) < combined * combined {
            return true;
        }
    }
    for row in snapshot.placeables.iter().filter(|p| !p.destroyed) {
        let Some(other) = row.kind.overlap_radius_px() else {
            continue;
        };
        let combined = radius + other;
        if Vec2::new(row.x, row.y).distance_squared(pos) < combined * combined {
            return true;
        }
    }
    false
}

/// Nearest live heat source within `radius` of the cursor. The player aims
/// at one source; whether it is free is the caller's question to ask.
fn nearest_heat_source(
    snapshot: &WorldSnapshot,
    pos: Vec2,
    radius: f32,
) -> Option<(HeatSourceId, Vec2)> {
    let mut best: Option<(f32, HeatSourceId, Vec2)> = None;
    let mut consider = |source: HeatSourceId, at: Vec2| {
        let d2 = at.distance_squared(pos);
        if d2 > radius * radius {
            return;
        }
        if best.map_or(true, |(best_d2, _, _)| d2 < best_d2) {
            best = Some((d2, source, at));
        }
    };
    for fire in snapshot.campfires.iter().filter(|c| !c.destroyed) {
        consider(HeatSourceId::Campfire(fire.id), Vec2::new(fire.x, fire.y));
    }
    for vent in &snapshot.fumaroles {
        consider(HeatSourceId::Fumarole(vent.id), Vec2::new(vent.x, vent.y));
    }
    best.map(|(_, source, at)| (source, at))
}
