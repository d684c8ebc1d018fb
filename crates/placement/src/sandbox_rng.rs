//! Deterministic sandbox RNG resource.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness. World
//! generation and everything else that scatters entities take
//! `ResMut<SandboxRng>` instead of `rand::thread_rng()`, so one seed always
//! produces the same island.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SANDBOX_SEED;

/// Deterministic RNG for all sandbox randomness. Systems use `rng.0`, which
/// implements `rand::Rng`.
#[derive(Resource)]
pub struct SandboxRng(pub ChaCha8Rng);

impl Default for SandboxRng {
    fn default() -> Self {
        Self::from_seed_u64(SANDBOX_SEED)
    }
}

impl SandboxRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
