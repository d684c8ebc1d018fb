//! Sandbox island generation.
//!
//! Stands in for the server: fills an empty snapshot with a deterministic
//! island, the fixed infrastructure the exclusion zones project from,
//! scattered grass, and the starting kit. Elevation is fBm noise pulled down
//! by a radial falloff so the rim of the map is always open sea. A live
//! connection would replicate all of this instead; the generator refuses to
//! touch a snapshot that already has chunks.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use rand::Rng;

use crate::config::{
    SANDBOX_CHUNK_SIDE, SANDBOX_SEED, SANDBOX_STARTING_ITEMS, SANDBOX_STARTING_WOOD,
    SANDBOX_WORLD_CHUNKS,
};
use crate::items::{Inventory, ItemCatalog, PlaceableKind, WOOD_ITEM_NAME};
use crate::sandbox_rng::SandboxRng;
use crate::snapshot::{
    Campfire, ConnectionId, DeliveryStation, Fumarole, GrassBlade, LocalPlayer, MonumentKind,
    MonumentPart, RuneStone, WorldChunk, WorldSnapshot,
};
use crate::tiles::{world_to_tile, TileKind};

// Water bands of the elevation field.
const DEEP_SEA_LEVEL: f32 = 0.18;
const SEA_LEVEL: f32 = 0.32;
const BEACH_LEVEL: f32 = 0.37;

// North is negative y. Tundra covers the band above this tile row; its
// high ground reads as alpine.
const TUNDRA_NORTH_TILE_Y: i32 = -20;
const ALPINE_MIN_ELEVATION: f32 = 0.55;

const FOREST_MOISTURE: f32 = 0.62;
const DIRT_MOISTURE: f32 = 0.25;

// Fixed infrastructure. The hot spring pond and quarry are tile features;
// everything else is a snapshot row.
const HOT_SPRING_POND: IVec2 = IVec2::new(20, -22);
const QUARRY_TILE: IVec2 = IVec2::new(-30, 6);
const COMPOUND_MIN: IVec2 = IVec2::new(-6, 12);
const COMPOUND_MAX: IVec2 = IVec2::new(5, 21);

const PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 300.0);

/// Random grass never lands this close to the spawn point.
const SPAWN_CLEARING_PX: f32 = 300.0;
const GRASS_SCATTER_ATTEMPTS: usize = 600;
const GRASS_BLADE_CAP: usize = 250;
const GRASS_SCATTER_EXTENT_PX: f32 = 1600.0;

/// Fills an empty snapshot with the sandbox island and hands the player the
/// starting kit.
pub fn init_sandbox_world(
    mut snapshot: ResMut<WorldSnapshot>,
    mut catalog: ResMut<ItemCatalog>,
    mut inventory: ResMut<Inventory>,
    mut player: ResMut<LocalPlayer>,
    mut rng: ResMut<SandboxRng>,
) {
    generate_sandbox(
        &mut snapshot,
        &mut catalog,
        &mut inventory,
        &mut player,
        &mut rng,
    );
    info!(
        "sandbox island ready: {} chunks, {} grass blades, spawn {:?}",
        snapshot.chunks.len(),
        snapshot.grass.len(),
        player.pos,
    );
}

pub(crate) fn generate_sandbox(
    snapshot: &mut WorldSnapshot,
    catalog: &mut ItemCatalog,
    inventory: &mut Inventory,
    player: &mut LocalPlayer,
    rng: &mut SandboxRng,
) {
    if !snapshot.chunks.is_empty() {
        return;
    }

    let painter = IslandPainter::new(SANDBOX_SEED);
    snapshot.connection = ConnectionId(1);

    let side = SANDBOX_CHUNK_SIDE;
    let half = SANDBOX_WORLD_CHUNKS / 2;
    for chunk_y in -half..half {
        for chunk_x in -half..half {
            let mut tiles = Vec::with_capacity((side * side) as usize);
            for local_y in 0..side as i32 {
                for local_x in 0..side as i32 {
                    let tile = IVec2::new(
                        chunk_x * side as i32 + local_x,
                        chunk_y * side as i32 + local_y,
                    );
                    tiles.push(painter.kind_at(tile).to_byte());
                }
            }
            snapshot.chunks.push(WorldChunk {
                chunk_x,
                chunk_y,
                side,
                tiles,
            });
        }
    }

    spawn_infrastructure(snapshot);
    scatter_grass(snapshot, &painter, rng);

    *catalog = ItemCatalog::standard();
    *inventory = starting_kit(catalog);
    player.pos = PLAYER_SPAWN;
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// Deterministic tile painter for the island.
struct IslandPainter {
    elevation: FastNoiseLite,
    moisture: FastNoiseLite,
    half_extent_tiles: f32,
}

impl IslandPainter {
    fn new(seed: u64) -> Self {
        let mut elevation = FastNoiseLite::with_seed(seed as i32);
        elevation.set_noise_type(Some(NoiseType::OpenSimplex2));
        elevation.set_frequency(Some(0.035));
        elevation.set_fractal_type(Some(FractalType::FBm));
        elevation.set_fractal_octaves(Some(5));
        elevation.set_fractal_gain(Some(0.5));
        elevation.set_fractal_lacunarity(Some(2.0));

        let mut moisture = FastNoiseLite::with_seed((seed as i32).wrapping_add(9173));
        moisture.set_noise_type(Some(NoiseType::OpenSimplex2));
        moisture.set_frequency(Some(0.012));
        moisture.set_fractal_type(Some(FractalType::FBm));
        moisture.set_fractal_octaves(Some(4));
        moisture.set_fractal_gain(Some(0.5));
        moisture.set_fractal_lacunarity(Some(2.0));

        let half_extent_tiles = (SANDBOX_WORLD_CHUNKS / 2 * SANDBOX_CHUNK_SIDE as i32) as f32;
        Self {
            elevation,
            moisture,
            half_extent_tiles,
        }
    }

    /// fBm elevation minus a radial falloff. Positive noise cannot keep the
    /// rim above sea level, so the coast always closes.
    fn elevation_at(&self, tile: IVec2) -> f32 {
        let raw = self.elevation.get_noise_2d(tile.x as f32, tile.y as f32);
        let base = (raw + 1.0) * 0.5;
        let nx = tile.x as f32 / self.half_extent_tiles;
        let ny = tile.y as f32 / self.half_extent_tiles;
        0.6 + 0.4 * base - 0.85 * (nx * nx + ny * ny)
    }

    fn moisture_at(&self, tile: IVec2) -> f32 {
        let raw = self.moisture.get_noise_2d(tile.x as f32, tile.y as f32);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    fn kind_at(&self, tile: IVec2) -> TileKind {
        if let Some(kind) = feature_at(tile) {
            return kind;
        }
        let elevation = self.elevation_at(tile);
        if elevation < DEEP_SEA_LEVEL {
            return TileKind::DeepSea;
        }
        if elevation < SEA_LEVEL {
            return TileKind::Sea;
        }
        if elevation < BEACH_LEVEL {
            return TileKind::Beach;
        }
        let moisture = self.moisture_at(tile);
        if tile.y <= TUNDRA_NORTH_TILE_Y {
            if elevation > ALPINE_MIN_ELEVATION {
                return TileKind::Alpine;
            }
            return if moisture > 0.55 {
                TileKind::TundraGrass
            } else {
                TileKind::Tundra
            };
        }
        if moisture > FOREST_MOISTURE {
            return TileKind::Forest;
        }
        if moisture < DIRT_MOISTURE {
            return TileKind::Dirt;
        }
        TileKind::Grass
    }
}

/// Fixed terrain features, painted over the biome field.
fn feature_at(tile: IVec2) -> Option<TileKind> {
    let spring = tile - HOT_SPRING_POND;
    if spring.x.abs() + spring.y.abs() <= 2 {
        return Some(TileKind::HotSpringWater);
    }
    let quarry = tile - QUARRY_TILE;
    if quarry.x.abs() <= 2 && quarry.y.abs() <= 1 {
        return Some(TileKind::Quarry);
    }
    if tile.x >= COMPOUND_MIN.x
        && tile.x <= COMPOUND_MAX.x
        && tile.y >= COMPOUND_MIN.y
        && tile.y <= COMPOUND_MAX.y
    {
        return Some(TileKind::Asphalt);
    }
    None
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

fn spawn_infrastructure(snapshot: &mut WorldSnapshot) {
    snapshot.stations.push(DeliveryStation {
        station_id: 0,
        name: "Central Compound".into(),
        x: 0.0,
        y: 800.0,
        interaction_radius: 250.0,
        active: true,
    });
    snapshot.stations.push(DeliveryStation {
        station_id: 1,
        name: "North Dock".into(),
        x: -40.0,
        y: -1650.0,
        interaction_radius: 150.0,
        active: true,
    });
    snapshot.stations.push(DeliveryStation {
        station_id: 2,
        name: "Abandoned Relay".into(),
        x: 900.0,
        y: 300.0,
        interaction_radius: 200.0,
        active: false,
    });

    for (x, y) in [(500.0, -350.0), (-800.0, 250.0), (350.0, 1300.0)] {
        let id = snapshot.alloc_id();
        snapshot.rune_stones.push(RuneStone { id, x, y });
    }

    // Shipwreck on the east coast: one center marker plus flotsam.
    for (x, y, is_center) in [
        (1750.0, 150.0, true),
        (1690.0, 220.0, false),
        (1810.0, 90.0, false),
    ] {
        let id = snapshot.alloc_id();
        snapshot.monuments.push(MonumentPart {
            id,
            x,
            y,
            kind: MonumentKind::Shipwreck,
            is_center,
        });
    }
    let id = snapshot.alloc_id();
    snapshot.monuments.push(MonumentPart {
        id,
        x: -1500.0,
        y: 900.0,
        kind: MonumentKind::FishingVillage,
        is_center: true,
    });
    let id = snapshot.alloc_id();
    snapshot.monuments.push(MonumentPart {
        id,
        x: -700.0,
        y: -1500.0,
        kind: MonumentKind::HuntingVillage,
        is_center: true,
    });

    // Volcanic vents, kept clear of the hot spring's own exclusion zone so
    // pots can actually use them.
    for (x, y) in [(200.0, -700.0), (-600.0, -1200.0)] {
        let id = snapshot.alloc_id();
        snapshot.fumaroles.push(Fumarole { id, x, y });
    }

    // Starter campfire within reach of the spawn point.
    let id = snapshot.alloc_id();
    snapshot.campfires.push(Campfire {
        id,
        x: 140.0,
        y: 320.0,
        destroyed: false,
    });
}

fn scatter_grass(snapshot: &mut WorldSnapshot, painter: &IslandPainter, rng: &mut SandboxRng) {
    // A fixed meadow so clearing always has something to work on wherever
    // the random scatter lands.
    for iy in 0..2 {
        for ix in 0..4 {
            let id = snapshot.alloc_id();
            snapshot.grass.push(GrassBlade {
                id,
                x: 480.0 + ix as f32 * 36.0,
                y: 540.0 + iy as f32 * 36.0,
            });
            snapshot.grass_alive.insert(id, true);
        }
    }

    for _ in 0..GRASS_SCATTER_ATTEMPTS {
        if snapshot.grass.len() >= GRASS_BLADE_CAP {
            break;
        }
        let pos = Vec2::new(
            rng.0.gen_range(-GRASS_SCATTER_EXTENT_PX..GRASS_SCATTER_EXTENT_PX),
            rng.0.gen_range(-GRASS_SCATTER_EXTENT_PX..GRASS_SCATTER_EXTENT_PX),
        );
        if pos.distance_squared(PLAYER_SPAWN) < SPAWN_CLEARING_PX * SPAWN_CLEARING_PX {
            continue;
        }
        if !matches!(
            painter.kind_at(world_to_tile(pos)),
            TileKind::Grass | TileKind::Forest | TileKind::TundraGrass
        ) {
            continue;
        }
        let id = snapshot.alloc_id();
        snapshot.grass.push(GrassBlade {
            id,
            x: pos.x,
            y: pos.y,
        });
        snapshot.grass_alive.insert(id, true);
    }
}

fn starting_kit(catalog: &ItemCatalog) -> Inventory {
    let mut inventory = Inventory::default();
    if let Some(wood) = catalog.id_of(WOOD_ITEM_NAME) {
        inventory.grant(wood, SANDBOX_STARTING_WOOD);
    }
    for kind in PlaceableKind::ALL {
        if let Some(def) = catalog.id_of(kind.item_name()) {
            inventory.grant(def, SANDBOX_STARTING_ITEMS);
        }
    }
    inventory
}
