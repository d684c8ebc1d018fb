//! Placement tuning constants.
//!
//! Every threshold the validators and spatial queries depend on lives here as
//! a named constant. All of these are game-balance values, not structural
//! invariants; the tests that reference them read them from here so a retune
//! does not silently break the suite.

// ---------------------------------------------------------------------------
// World metrics
// ---------------------------------------------------------------------------

/// Terrain tile side in world pixels.
pub const TILE_SIZE_PX: f32 = 48.0;

/// Building cell side in world pixels (2x2 terrain tiles).
pub const CELL_SIZE_PX: f32 = 96.0;

/// Player collision radius in world pixels.
pub const PLAYER_RADIUS_PX: f32 = 32.0;

// ---------------------------------------------------------------------------
// Distance gates (player -> placement target), per object class
// ---------------------------------------------------------------------------

/// Foundations, walls, fences and doors.
pub const BUILD_RANGE_PX: f32 = 128.0;

/// Campfires, lanterns, storage boxes, sleeping bags, beehives.
pub const PLACEABLE_RANGE_PX: f32 = 96.0;

/// Seeds and rhizomes.
pub const PLANTING_RANGE_PX: f32 = 150.0;

/// Broth pots (placed onto a heat source, so the reach is longer).
pub const POT_RANGE_PX: f32 = 200.0;

// ---------------------------------------------------------------------------
// Caches and indexes
// ---------------------------------------------------------------------------

/// Lifetime of a memoized placement verdict, in milliseconds.
pub const MEMO_TTL_MS: f64 = 100.0;

/// How many rows past the last known count the rebuild probe inspects
/// before concluding the collection changed.
pub const INDEX_RECOUNT_MARGIN: usize = 10;

// ---------------------------------------------------------------------------
// Edge selection
// ---------------------------------------------------------------------------

/// A diagonal edge wins over a cardinal edge when its distance is within
/// this factor of the nearer cardinal distance.
pub const DIAG_EDGE_PREFERENCE: f32 = 1.2;

/// A diagonal edge always wins within this absolute distance of its line.
pub const DIAG_EDGE_SNAP_PX: f32 = 10.0;

// ---------------------------------------------------------------------------
// Walls, fences, doors
// ---------------------------------------------------------------------------

/// Collision thickness of a placed wall segment.
pub const WALL_COLLISION_THICKNESS_PX: f32 = 6.0;

/// Extra clearance around walls that free objects must respect.
pub const WALL_PLACEMENT_BUFFER_PX: f32 = 4.0;

/// Collision thickness of a fence segment.
pub const FENCE_COLLISION_THICKNESS_PX: f32 = 6.0;

/// Doors snap to the nearest foundation within this many cells of the
/// cursor's cell, in each axis (1 = the 3x3 neighborhood).
pub const DOOR_SNAP_WINDOW_CELLS: i32 = 1;

// ---------------------------------------------------------------------------
// Build costs, in wood units
// ---------------------------------------------------------------------------

pub const FOUNDATION_FULL_WOOD_COST: u32 = 50;
pub const FOUNDATION_TRI_WOOD_COST: u32 = 25;
pub const WALL_WOOD_COST: u32 = 20;
pub const FENCE_WOOD_COST: u32 = 15;
pub const DOOR_WOOD_COST: u32 = 30;

// ---------------------------------------------------------------------------
// Shore search
// ---------------------------------------------------------------------------

/// Outer bound of the ring search used by `shore_distance`. Water-only out
/// to this radius yields the infinity sentinel.
pub const SHORE_SEARCH_CAP_PX: f32 = 800.0;

/// Reed rhizomes must sit on water no farther than this from land.
pub const REED_SHORE_LIMIT_PX: f32 = 500.0;

// ---------------------------------------------------------------------------
// Exclusion zones
// ---------------------------------------------------------------------------

/// No-build radius around a rune stone.
pub const RUNE_STONE_CLEARANCE_PX: f32 = 400.0;

/// No-build radius around hot spring water tiles.
pub const HOT_SPRING_CLEARANCE_PX: f32 = 600.0;

/// Tile window scanned around a point when looking for hot spring water.
pub const HOT_SPRING_SCAN_TILES: i32 = 12;

/// No-build radius around quarry tiles.
pub const QUARRY_CLEARANCE_PX: f32 = 96.0;

/// Tile window scanned around a point when looking for quarry tiles.
pub const QUARRY_SCAN_TILES: i32 = 2;

/// A delivery station's no-build zone is its interaction radius times this.
pub const DELIVERY_ZONE_MULTIPLIER: f32 = 1.6;

// ---------------------------------------------------------------------------
// Heat sources
// ---------------------------------------------------------------------------

/// Broth pots snap to the nearest campfire or fumarole within this radius.
pub const HEAT_SNAP_RADIUS_PX: f32 = 96.0;

// ---------------------------------------------------------------------------
// Sandbox world
// ---------------------------------------------------------------------------

/// Chunk side length, in tiles, used by the sandbox generator. Live chunk
/// rows carry their own side length; nothing outside world generation may
/// assume this value.
pub const SANDBOX_CHUNK_SIDE: u32 = 16;

/// Sandbox island extent, in chunks per axis.
pub const SANDBOX_WORLD_CHUNKS: i32 = 6;

/// Seed for the sandbox island and its scattered entities.
pub const SANDBOX_SEED: u64 = 1447;

/// Wood the sandbox inventory starts with.
pub const SANDBOX_STARTING_WOOD: u32 = 400;

/// Copies of each placeable item the sandbox inventory starts with.
pub const SANDBOX_STARTING_ITEMS: u32 = 5;
