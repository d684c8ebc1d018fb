//! World sprites.
//!
//! Terrain and fixed infrastructure spawn once at startup; everything backed
//! by a snapshot row (foundations, edge pieces, grass, free objects) is
//! rebuilt whenever the snapshot changes. Placements are rare compared to
//! frames, so a full rebuild on change stays cheaper than per-row diffing
//! and can never drift out of sync.
//!
//! World coordinates are y-down (north is negative y) to match the
//! replicated data; render space is Bevy's y-up. [`to_render`] and
//! [`render_to_world`] are the only crossing points.

use bevy::prelude::*;

use placement::config::{CELL_SIZE_PX, TILE_SIZE_PX, WALL_COLLISION_THICKNESS_PX};
use placement::geometry::{cell_center, CellEdge, FoundationShape};
use placement::items::PlaceableKind;
use placement::snapshot::{LocalPlayer, WorldSnapshot};
use placement::tiles::{tile_center, TileKind};

const Z_TILES: f32 = 0.0;
const Z_FOUNDATION: f32 = 1.0;
const Z_GRASS: f32 = 2.0;
const Z_OBJECT: f32 = 3.0;
const Z_EDGE: f32 = 4.0;
const Z_PLAYER: f32 = 6.0;

const FENCE_THICKNESS_PX: f32 = 3.0;
const DOOR_THICKNESS_PX: f32 = 8.0;
/// Doors render shorter than their edge to read as an opening.
const DOOR_LENGTH_FRACTION: f32 = 0.7;

const WOOD_COLOR: Color = Color::srgb(0.62, 0.47, 0.3);
const WALL_COLOR: Color = Color::srgb(0.42, 0.3, 0.18);
const FENCE_COLOR: Color = Color::srgb(0.55, 0.45, 0.3);
const DOOR_COLOR: Color = Color::srgb(0.75, 0.6, 0.35);
const GRASS_BLADE_COLOR: Color = Color::srgb(0.3, 0.65, 0.25);
const PLAYER_COLOR: Color = Color::srgb(0.25, 0.55, 0.9);

// ---------------------------------------------------------------------------
// Coordinate flip
// ---------------------------------------------------------------------------

/// World (y-down) to render (y-up). Its own inverse.
#[inline]
pub fn to_render(pos: Vec2) -> Vec2 {
    Vec2::new(pos.x, -pos.y)
}

/// Render (y-up) to world (y-down).
#[inline]
pub fn render_to_world(pos: Vec2) -> Vec2 {
    Vec2::new(pos.x, -pos.y)
}

// ---------------------------------------------------------------------------
// Cell geometry in world space
// ---------------------------------------------------------------------------

/// World corners of a cell as `[nw, ne, se, sw]`.
pub fn cell_corners(cell: IVec2) -> [Vec2; 4] {
    let c = cell_center(cell);
    let h = CELL_SIZE_PX * 0.5;
    [
        c + Vec2::new(-h, -h),
        c + Vec2::new(h, -h),
        c + Vec2::new(h, h),
        c + Vec2::new(-h, h),
    ]
}

/// World corners of a triangular foundation; `None` for the full square,
/// which draws as a plain rect.
pub fn triangle_corners(cell: IVec2, shape: FoundationShape) -> Option<[Vec2; 3]> {
    let [nw, ne, se, sw] = cell_corners(cell);
    match shape {
        FoundationShape::Full => None,
        FoundationShape::TriNw => Some([nw, ne, sw]),
        FoundationShape::TriNe => Some([nw, ne, se]),
        FoundationShape::TriSe => Some([se, ne, sw]),
        FoundationShape::TriSw => Some([sw, nw, se]),
    }
}

/// World endpoints of a cell edge.
pub fn edge_endpoints(cell: IVec2, edge: CellEdge) -> (Vec2, Vec2) {
    let [nw, ne, se, sw] = cell_corners(cell);
    match edge {
        CellEdge::North => (nw, ne),
        CellEdge::East => (ne, se),
        CellEdge::South => (sw, se),
        CellEdge::West => (nw, sw),
        CellEdge::DiagNeSw => (ne, sw),
        CellEdge::DiagNwSe => (nw, se),
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Grass => Color::srgb(0.35, 0.6, 0.3),
        TileKind::Dirt => Color::srgb(0.52, 0.42, 0.28),
        TileKind::DirtRoad => Color::srgb(0.58, 0.48, 0.34),
        TileKind::Sea => Color::srgb(0.2, 0.42, 0.65),
        TileKind::Beach => Color::srgb(0.85, 0.78, 0.55),
        TileKind::Sand => Color::srgb(0.82, 0.74, 0.5),
        TileKind::HotSpringWater => Color::srgb(0.4, 0.7, 0.75),
        TileKind::Quarry => Color::srgb(0.5, 0.5, 0.52),
        TileKind::Asphalt => Color::srgb(0.3, 0.3, 0.32),
        TileKind::Forest => Color::srgb(0.22, 0.45, 0.24),
        TileKind::Tundra => Color::srgb(0.62, 0.6, 0.52),
        TileKind::Alpine => Color::srgb(0.78, 0.8, 0.82),
        TileKind::TundraGrass => Color::srgb(0.5, 0.58, 0.42),
        TileKind::Tilled => Color::srgb(0.45, 0.34, 0.22),
        TileKind::DeepSea => Color::srgb(0.12, 0.28, 0.5),
    }
}

fn placeable_color(kind: PlaceableKind) -> Color {
    match kind {
        PlaceableKind::Campfire => Color::srgb(0.9, 0.45, 0.15),
        PlaceableKind::Lantern => Color::srgb(0.95, 0.85, 0.3),
        PlaceableKind::WoodenStorageBox => Color::srgb(0.55, 0.38, 0.2),
        PlaceableKind::SleepingBag => Color::srgb(0.6, 0.2, 0.25),
        PlaceableKind::Beehive => Color::srgb(0.8, 0.65, 0.3),
        PlaceableKind::BrothPot => Color::srgb(0.35, 0.3, 0.3),
        PlaceableKind::ReedRhizome => Color::srgb(0.25, 0.6, 0.5),
        PlaceableKind::DuneGrass => Color::srgb(0.7, 0.72, 0.4),
        PlaceableKind::AlpineSnowberry => Color::srgb(0.85, 0.9, 0.8),
        PlaceableKind::TundraRoot => Color::srgb(0.5, 0.48, 0.3),
    }
}

fn placeable_size(kind: PlaceableKind) -> f32 {
    match kind.overlap_radius_px() {
        Some(radius) => radius * 2.0,
        None => 16.0,
    }
}

// ---------------------------------------------------------------------------
// Shared mesh handles
// ---------------------------------------------------------------------------

/// Meshes and the material shared by every foundation sprite. Triangle
/// meshes are indexed by [`tri_index`] and baked in render-space offsets
/// around the cell center.
#[derive(Resource)]
pub struct BuildMeshes {
    pub full: Handle<Mesh>,
    pub tri: [Handle<Mesh>; 4],
    pub wood: Handle<ColorMaterial>,
}

fn tri_index(shape: FoundationShape) -> Option<usize> {
    match shape {
        FoundationShape::Full => None,
        FoundationShape::TriNw => Some(0),
        FoundationShape::TriNe => Some(1),
        FoundationShape::TriSe => Some(2),
        FoundationShape::TriSw => Some(3),
    }
}

pub fn setup_build_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let h = CELL_SIZE_PX * 0.5;
    // Render-space corner offsets: y is flipped relative to world space.
    let nw = Vec2::new(-h, h);
    let ne = Vec2::new(h, h);
    let se = Vec2::new(h, -h);
    let sw = Vec2::new(-h, -h);
    commands.insert_resource(BuildMeshes {
        full: meshes.add(Rectangle::new(CELL_SIZE_PX, CELL_SIZE_PX)),
        tri: [
            meshes.add(Triangle2d::new(sw, ne, nw)),
            meshes.add(Triangle2d::new(se, ne, nw)),
            meshes.add(Triangle2d::new(sw, se, ne)),
            meshes.add(Triangle2d::new(sw, se, nw)),
        ],
        wood: materials.add(WOOD_COLOR),
    });
}

// ---------------------------------------------------------------------------
// Static world
// ---------------------------------------------------------------------------

#[derive(Component)]
pub struct PlayerSprite;

/// Spawn terrain tiles, fixed infrastructure and the player marker. Runs
/// once, after the sandbox generator has filled the snapshot.
pub fn spawn_static_world(
    mut commands: Commands,
    snapshot: Res<WorldSnapshot>,
    player: Res<LocalPlayer>,
) {
    for chunk in &snapshot.chunks {
        let side = chunk.side as i32;
        for (i, code) in chunk.tiles.iter().enumerate() {
            let tile = IVec2::new(
                chunk.chunk_x * side + i as i32 % side,
                chunk.chunk_y * side + i as i32 / side,
            );
            commands.spawn((
                Sprite::from_color(
                    tile_color(TileKind::from_byte(*code)),
                    Vec2::splat(TILE_SIZE_PX),
                ),
                Transform::from_translation(to_render(tile_center(tile)).extend(Z_TILES)),
            ));
        }
    }

    for station in &snapshot.stations {
        let color = if station.active {
            Color::srgb(0.85, 0.72, 0.3)
        } else {
            Color::srgb(0.45, 0.45, 0.45)
        };
        commands.spawn((
            Sprite::from_color(color, Vec2::splat(64.0)),
            Transform::from_translation(
                to_render(Vec2::new(station.x, station.y)).extend(Z_OBJECT),
            ),
        ));
    }
    for stone in &snapshot.rune_stones {
        commands.spawn((
            Sprite::from_color(Color::srgb(0.45, 0.5, 0.6), Vec2::splat(28.0)),
            Transform::from_translation(to_render(Vec2::new(stone.x, stone.y)).extend(Z_OBJECT)),
        ));
    }
    for part in &snapshot.monuments {
        let size = if part.is_center { 56.0 } else { 40.0 };
        commands.spawn((
            Sprite::from_color(Color::srgb(0.5, 0.42, 0.35), Vec2::splat(size)),
            Transform::from_translation(to_render(Vec2::new(part.x, part.y)).extend(Z_OBJECT)),
        ));
    }
    for fumarole in &snapshot.fumaroles {
        commands.spawn((
            Sprite::from_color(Color::srgb(0.55, 0.25, 0.2), Vec2::splat(32.0)),
            Transform::from_translation(
                to_render(Vec2::new(fumarole.x, fumarole.y)).extend(Z_OBJECT),
            ),
        ));
    }

    commands.spawn((
        Sprite::from_color(PLAYER_COLOR, Vec2::splat(24.0)),
        Transform::from_translation(to_render(player.pos).extend(Z_PLAYER)),
        PlayerSprite,
    ));
}

pub fn sync_player_sprite(
    player: Res<LocalPlayer>,
    mut query: Query<&mut Transform, With<PlayerSprite>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    let pos = to_render(player.pos);
    transform.translation.x = pos.x;
    transform.translation.y = pos.y;
}

// ---------------------------------------------------------------------------
// Snapshot rows
// ---------------------------------------------------------------------------

/// Marker for sprites rebuilt from snapshot rows.
#[derive(Component)]
pub struct RowSprite;

/// Tear down and respawn every row-backed sprite when the snapshot changes.
pub fn sync_world_sprites(
    mut commands: Commands,
    snapshot: Res<WorldSnapshot>,
    build: Res<BuildMeshes>,
    existing: Query<Entity, With<RowSprite>>,
) {
    if !snapshot.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn();
    }

    for foundation in snapshot.foundations.iter().filter(|f| !f.destroyed) {
        let cell = IVec2::new(foundation.cell_x, foundation.cell_y);
        let mesh = match tri_index(foundation.shape) {
            Some(i) => build.tri[i].clone(),
            None => build.full.clone(),
        };
        commands.spawn((
            Mesh2d(mesh),
            MeshMaterial2d(build.wood.clone()),
            Transform::from_translation(to_render(cell_center(cell)).extend(Z_FOUNDATION)),
            RowSprite,
        ));
    }

    for wall in snapshot.walls.iter().filter(|w| !w.destroyed) {
        spawn_edge_sprite(
            &mut commands,
            IVec2::new(wall.cell_x, wall.cell_y),
            wall.edge,
            WALL_COLLISION_THICKNESS_PX,
            1.0,
            WALL_COLOR,
        );
    }
    for fence in snapshot.fences.iter().filter(|f| !f.destroyed) {
        spawn_edge_sprite(
            &mut commands,
            IVec2::new(fence.cell_x, fence.cell_y),
            fence.edge,
            FENCE_THICKNESS_PX,
            1.0,
            FENCE_COLOR,
        );
    }
    for door in snapshot.doors.iter().filter(|d| !d.destroyed) {
        spawn_edge_sprite(
            &mut commands,
            IVec2::new(door.cell_x, door.cell_y),
            door.edge,
            DOOR_THICKNESS_PX,
            DOOR_LENGTH_FRACTION,
            DOOR_COLOR,
        );
    }

    for blade in &snapshot.grass {
        if !snapshot.grass_is_alive(blade.id) {
            continue;
        }
        commands.spawn((
            Sprite::from_color(GRASS_BLADE_COLOR, Vec2::splat(8.0)),
            Transform::from_translation(to_render(Vec2::new(blade.x, blade.y)).extend(Z_GRASS)),
            RowSprite,
        ));
    }

    for campfire in snapshot.campfires.iter().filter(|c| !c.destroyed) {
        commands.spawn((
            Sprite::from_color(
                placeable_color(PlaceableKind::Campfire),
                Vec2::splat(placeable_size(PlaceableKind::Campfire)),
            ),
            Transform::from_translation(
                to_render(Vec2::new(campfire.x, campfire.y)).extend(Z_OBJECT),
            ),
            RowSprite,
        ));
    }
    for pot in snapshot.broth_pots.iter().filter(|p| !p.destroyed) {
        commands.spawn((
            Sprite::from_color(placeable_color(PlaceableKind::BrothPot), Vec2::splat(26.0)),
            // Pots sit on their heat source; render above the fire sprite.
            Transform::from_translation(
                to_render(Vec2::new(pot.x, pot.y)).extend(Z_OBJECT + 0.5),
            ),
            RowSprite,
        ));
    }
    for placeable in snapshot.placeables.iter().filter(|p| !p.destroyed) {
        commands.spawn((
            Sprite::from_color(
                placeable_color(placeable.kind),
                Vec2::splat(placeable_size(placeable.kind)),
            ),
            Transform::from_translation(
                to_render(Vec2::new(placeable.x, placeable.y)).extend(Z_OBJECT),
            ),
            RowSprite,
        ));
    }
}

/// One sprite along a cell edge, rotated to match the edge direction.
fn spawn_edge_sprite(
    commands: &mut Commands,
    cell: IVec2,
    edge: CellEdge,
    thickness: f32,
    length_fraction: f32,
    color: Color,
) {
    let (a, b) = edge_endpoints(cell, edge);
    let (ra, rb) = (to_render(a), to_render(b));
    let delta = rb - ra;
    let angle = delta.y.atan2(delta.x);
    commands.spawn((
        Sprite::from_color(color, Vec2::new(delta.length() * length_fraction, thickness)),
        Transform {
            translation: ((ra + rb) * 0.5).extend(Z_EDGE),
            rotation: Quat::from_rotation_z(angle),
            ..default()
        },
        RowSprite,
    ));
}
