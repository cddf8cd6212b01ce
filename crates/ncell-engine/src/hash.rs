//! Hashing utilities for grid comparison.
//!
//! Uses FNV-1a for fast, deterministic hashing of interior contents.
//! These hashes are not cryptographically secure; they back determinism
//! checks such as "parallel sweep equals sequential sweep".

use ncell_grid::{AttributeArray, BufferRole, GridSnapshot, GridStore, StateArray};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Section tags folded in before each array.
const STATES_TAG: u32 = 0;
const ATTRIBUTES_TAG: u32 = 1;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash interior states and attributes.
///
/// The shape is folded in first, so arrays with equal data but different
/// shapes hash differently. Attributes are hashed by `f64::to_bits()`;
/// `0.0` and `-0.0` are distinct.
pub fn interior_hash(states: &StateArray, attributes: Option<&AttributeArray>) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u64(hash, states.shape().len() as u64);
    for &extent in states.shape() {
        hash = fnv1a_u64(hash, extent as u64);
    }

    hash = fnv1a_u32(hash, STATES_TAG);
    for &s in states.as_slice() {
        hash = fnv1a_u32(hash, s as u32);
    }

    if let Some(attributes) = attributes {
        hash = fnv1a_u32(hash, ATTRIBUTES_TAG);
        hash = fnv1a_u64(hash, attributes.attribute_count() as u64);
        for &v in attributes.as_slice() {
            hash = fnv1a_u64(hash, v.to_bits());
        }
    }
    hash
}

/// Hash the interior of the buffer currently playing `role`.
pub fn grid_hash(grid: &GridStore, role: BufferRole) -> u64 {
    let reader = grid.reader(role);
    interior_hash(&reader.states(), reader.attributes().as_ref())
}

/// Hash a snapshot's interior. Equal to [`grid_hash`] of the buffer the
/// snapshot was taken from.
pub fn snapshot_hash(snapshot: &GridSnapshot) -> u64 {
    interior_hash(&snapshot.states, snapshot.attributes.as_ref())
}
