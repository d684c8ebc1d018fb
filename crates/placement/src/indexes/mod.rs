//! Derived spatial indexes over the world snapshot.
//!
//! All three are wholesale-rebuilt caches, never patched per entity. The
//! foundation and grass indexes decide whether to rebuild with a bounded
//! count probe; the memo expires by timestamp. Staleness is bounded and
//! accepted; writers that mutate the snapshot directly call `invalidate`.

pub mod foundation;
pub mod grass;
pub mod memo;

pub use foundation::{FoundationIndex, FoundationSlot};
pub use grass::GrassIndex;
pub use memo::{MemoKey, PlacementMemo};
