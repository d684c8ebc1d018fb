//! Client-side placement core: tile lookup over replicated chunks, derived
//! spatial indexes, terrain and exclusion-zone predicates, foundation
//! geometry, and the per-class validators the preview and the sandbox
//! applier both run.

use bevy::prelude::*;

pub mod config;
pub mod geometry;
pub mod indexes;
pub mod items;
pub mod keys;
pub mod requests;
pub mod sandbox_rng;
pub mod snapshot;
pub mod terrain;
pub mod tiles;
pub mod validators;
pub mod verdict;
pub mod world_init;
pub mod zones;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use indexes::{FoundationIndex, GrassIndex, PlacementMemo};
use items::{Inventory, ItemCatalog};
use requests::{PlacementLog, PlacementQueue};
use sandbox_rng::SandboxRng;
use snapshot::{LocalPlayer, WorldSnapshot};
use tiles::TileCache;

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldSnapshot>()
            .init_resource::<TileCache>()
            .init_resource::<FoundationIndex>()
            .init_resource::<GrassIndex>()
            .init_resource::<PlacementMemo>()
            .init_resource::<ItemCatalog>()
            .init_resource::<Inventory>()
            .init_resource::<LocalPlayer>()
            .init_resource::<SandboxRng>()
            .init_resource::<PlacementQueue>()
            .init_resource::<PlacementLog>()
            .add_systems(Startup, world_init::init_sandbox_world)
            .add_systems(FixedUpdate, requests::apply_placement_requests);
    }
}
