//! Replicated world snapshot.
//!
//! Every struct here mirrors a row the server replicates to the client: plain
//! fields, wire-friendly types, destroyed/active flags left in place rather
//! than removing rows. The placement core never mutates these through its
//! queries; the sandbox applier in [`crate::requests`] is the only writer.

use std::collections::HashMap;

use bevy::math::Vec2;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::config::DELIVERY_ZONE_MULTIPLIER;
use crate::geometry::{CellEdge, FoundationShape};
use crate::items::PlaceableKind;

/// Identity of the world connection a snapshot came from. Tile-cache entries
/// are scoped to this and rebuilt when it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ConnectionId(pub u64);

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One terrain chunk: a `side` x `side` block of tile codes, row-major
/// `local_y * side + local_x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldChunk {
    pub chunk_x: i32,
    pub chunk_y: i32,
    pub side: u32,
    pub tiles: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Foundation {
    pub id: u64,
    pub cell_x: i32,
    pub cell_y: i32,
    pub shape: FoundationShape,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: u64,
    pub cell_x: i32,
    pub cell_y: i32,
    pub edge: CellEdge,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fence {
    pub id: u64,
    pub cell_x: i32,
    pub cell_y: i32,
    pub edge: CellEdge,
    pub destroyed: bool,
}

/// Doors only ever occupy north or south edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: u64,
    pub cell_x: i32,
    pub cell_y: i32,
    pub edge: CellEdge,
    pub destroyed: bool,
}

/// Static half of a grass blade; liveness lives in the side table so the
/// frequently-flipping state replicates without touching positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrassBlade {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuneStone {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonumentKind {
    Shipwreck,
    FishingVillage,
    WhaleBoneGraveyard,
    HuntingVillage,
}

impl MonumentKind {
    /// No-build clearance around this monument's center marker. Hunting
    /// villages carry no clearance; their zone was switched off in the
    /// live rules.
    pub fn clearance_px(self) -> Option<f32> {
        match self {
            Self::Shipwreck => Some(600.0),
            Self::FishingVillage => Some(500.0),
            Self::WhaleBoneGraveyard => Some(550.0),
            Self::HuntingVillage => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Shipwreck => "shipwreck",
            Self::FishingVillage => "fishing village",
            Self::WhaleBoneGraveyard => "whale bone graveyard",
            Self::HuntingVillage => "hunting village",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonumentPart {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub kind: MonumentKind,
    /// Only the center marker of a monument projects its clearance zone.
    pub is_center: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStation {
    /// 0 is the central compound; everything else is a substation.
    pub station_id: u32,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub interaction_radius: f32,
    pub active: bool,
}

impl DeliveryStation {
    #[inline]
    pub fn is_central(&self) -> bool {
        self.station_id == 0
    }

    /// Radius of the no-build zone this station projects while active.
    #[inline]
    pub fn no_build_radius(&self) -> f32 {
        self.interaction_radius * DELIVERY_ZONE_MULTIPLIER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Campfire {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fumarole {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

/// A heat source a broth pot can sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeatSourceId {
    Campfire(u64),
    Fumarole(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrothPot {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub heat_source: HeatSourceId,
    pub destroyed: bool,
}

/// A placed free-standing object that is not a campfire, fumarole or pot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placeable {
    pub id: u64,
    pub kind: PlaceableKind,
    pub x: f32,
    pub y: f32,
    pub destroyed: bool,
}

// ---------------------------------------------------------------------------
// Snapshot resource
// ---------------------------------------------------------------------------

/// The client's view of the replicated world. Collections are scanned by the
/// indexes and validators; only `grass_alive` offers by-key lookup because it
/// is the one side table probed per entity.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub connection: ConnectionId,
    pub chunks: Vec<WorldChunk>,
    pub foundations: Vec<Foundation>,
    pub walls: Vec<Wall>,
    pub fences: Vec<Fence>,
    pub doors: Vec<Door>,
    pub grass: Vec<GrassBlade>,
    pub grass_alive: HashMap<u64, bool>,
    pub rune_stones: Vec<RuneStone>,
    pub monuments: Vec<MonumentPart>,
    pub stations: Vec<DeliveryStation>,
    pub campfires: Vec<Campfire>,
    pub fumaroles: Vec<Fumarole>,
    pub broth_pots: Vec<BrothPot>,
    pub placeables: Vec<Placeable>,
    pub(crate) next_id: u64,
}

impl WorldSnapshot {
    /// Liveness of a grass blade; unknown ids count as dead.
    #[inline]
    pub fn grass_is_alive(&self, blade_id: u64) -> bool {
        self.grass_alive.get(&blade_id).copied().unwrap_or(false)
    }

    /// Fresh row id for sandbox inserts.
    pub fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn live_campfire(&self, id: u64) -> Option<&Campfire> {
        self.campfires
            .iter()
            .find(|c| c.id == id && !c.destroyed)
    }

    pub fn fumarole(&self, id: u64) -> Option<&Fumarole> {
        self.fumaroles.iter().find(|f| f.id == id)
    }

    /// Whether a heat source already carries a live pot.
    pub fn heat_source_occupied(&self, source: HeatSourceId) -> bool {
        self.broth_pots
            .iter()
            .any(|p| !p.destroyed && p.heat_source == source)
    }

    /// World position of a heat source, if it still exists.
    pub fn heat_source_pos(&self, source: HeatSourceId) -> Option<Vec2> {
        match source {
            HeatSourceId::Campfire(id) => {
                self.live_campfire(id).map(|c| Vec2::new(c.x, c.y))
            }
            HeatSourceId::Fumarole(id) => self.fumarole(id).map(|f| Vec2::new(f.x, f.y)),
        }
    }
}

#[cfg(any(test, feature = "bench"))]
impl WorldSnapshot {
    /// Test worlds: paint every tile of a square of chunks by coordinate.
    /// Chunks span `[-radius_chunks, radius_chunks]` on both axes.
    pub fn painted(
        radius_chunks: i32,
        side: u32,
        paint: impl Fn(i32, i32) -> crate::tiles::TileKind,
    ) -> Self {
        let mut chunks = Vec::new();
        for cy in -radius_chunks..=radius_chunks {
            for cx in -radius_chunks..=radius_chunks {
                let mut tiles = Vec::with_capacity((side * side) as usize);
                for ly in 0..side as i32 {
                    for lx in 0..side as i32 {
                        let tile_x = cx * side as i32 + lx;
                        let tile_y = cy * side as i32 + ly;
                        tiles.push(paint(tile_x, tile_y).to_byte());
                    }
                }
                chunks.push(WorldChunk {
                    chunk_x: cx,
                    chunk_y: cy,
                    side,
                    tiles,
                });
            }
        }
        Self {
            connection: ConnectionId(1),
            chunks,
            ..Default::default()
        }
    }
}

/// Position of the locally-controlled player, consumed by the per-class
/// distance gates. Moves every frame, which is exactly why verdict memoizing
/// happens after the distance check.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LocalPlayer {
    pub pos: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grass_liveness_defaults_dead() {
        let mut snap = WorldSnapshot::default();
        snap.grass.push(GrassBlade {
            id: 1,
            x: 10.0,
            y: 10.0,
        });
        assert!(!snap.grass_is_alive(1), "missing state row reads as dead");
        snap.grass_alive.insert(1, true);
        assert!(snap.grass_is_alive(1));
        snap.grass_alive.insert(1, false);
        assert!(!snap.grass_is_alive(1));
    }

    #[test]
    fn test_station_no_build_radius() {
        let central = DeliveryStation {
            station_id: 0,
            name: "Central Compound".into(),
            x: 0.0,
            y: 0.0,
            interaction_radius: 250.0,
            active: true,
        };
        let sub = DeliveryStation {
            station_id: 2,
            name: "North Substation".into(),
            x: 0.0,
            y: 0.0,
            interaction_radius: 200.0,
            active: true,
        };
        assert!(central.is_central());
        assert!(!sub.is_central());
        assert_eq!(central.no_build_radius(), 400.0);
        assert_eq!(sub.no_build_radius(), 320.0);
    }

    #[test]
    fn test_heat_source_occupancy() {
        let mut snap = WorldSnapshot::default();
        snap.campfires.push(Campfire {
            id: 3,
            x: 100.0,
            y: 100.0,
            destroyed: false,
        });
        let source = HeatSourceId::Campfire(3);
        assert!(!snap.heat_source_occupied(source));
        snap.broth_pots.push(BrothPot {
            id: 9,
            x: 100.0,
            y: 100.0,
            heat_source: source,
            destroyed: false,
        });
        assert!(snap.heat_source_occupied(source));
        snap.broth_pots[0].destroyed = true;
        assert!(
            !snap.heat_source_occupied(source),
            "destroyed pots free the source"
        );
    }

    #[test]
    fn test_monument_clearances() {
        assert_eq!(MonumentKind::Shipwreck.clearance_px(), Some(600.0));
        assert_eq!(MonumentKind::FishingVillage.clearance_px(), Some(500.0));
        assert_eq!(MonumentKind::WhaleBoneGraveyard.clearance_px(), Some(550.0));
        assert_eq!(MonumentKind::HuntingVillage.clearance_px(), None);
    }
}
