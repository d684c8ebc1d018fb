//! Short-lived verdict memo for the preview loop.

use std::collections::HashMap;

use bevy::math::IVec2;
use bevy::prelude::Resource;

use crate::config::MEMO_TTL_MS;
use crate::geometry::FoundationShape;
use crate::keys;
use crate::verdict::Verdict;

/// Memo key: packed cell coordinate plus the shape being previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoKey {
    cell: u64,
    shape: FoundationShape,
}

impl MemoKey {
    pub fn new(cell: IVec2, shape: FoundationShape) -> Self {
        Self {
            cell: keys::pack(cell.x, cell.y),
            shape,
        }
    }
}

/// Amortizes repeated validations while the cursor wobbles inside one cell.
/// Entries expire after [`MEMO_TTL_MS`]; expired entries read as absent.
/// Only the geometric and resource checks land here. The player-distance
/// gate depends on a position that moves every frame and is checked before
/// the memo is consulted.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlacementMemo {
    entries: HashMap<MemoKey, (Verdict, f64)>,
}

impl PlacementMemo {
    /// Verdict stored within the TTL window, if any.
    pub fn get(&self, key: MemoKey, now_ms: f64) -> Option<Verdict> {
        let (verdict, stamp) = self.entries.get(&key)?;
        if now_ms - stamp <= MEMO_TTL_MS {
            Some(*verdict)
        } else {
            None
        }
    }

    pub fn insert(&mut self, key: MemoKey, verdict: Verdict, now_ms: f64) {
        self.entries.insert(key, (verdict, now_ms));
    }

    /// Drop everything. Called when the snapshot mutates under us.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
