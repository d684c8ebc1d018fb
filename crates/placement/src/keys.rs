//! Packed integer keys for spatial hash maps.
//!
//! Chunk and cell coordinates are signed pairs; hashing them as formatted
//! strings would allocate on every probe, so both halves are packed into one
//! `u64` instead. Negative coordinates survive the round trip because the
//! cast goes through `u32` bit patterns.

/// Pack an (x, y) coordinate pair into a single map key.
#[inline]
pub fn pack(x: i32, y: i32) -> u64 {
    ((x as u32 as u64) << 32) | (y as u32 as u64)
}

/// Recover the (x, y) pair from a packed key.
#[inline]
pub fn unpack(key: u64) -> (i32, i32) {
    ((key >> 32) as u32 as i32, key as u32 as i32)
}
