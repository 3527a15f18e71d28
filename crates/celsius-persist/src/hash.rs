//! FNV-1a hashing of thermal state.
//!
//! Used to compare states quickly, for example before and after a save
//! cycle or across two runs of the same scenario. Not cryptographic.

use celsius_core::MapThermalState;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001B3;

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

fn fnv1a_f32s(hash: u64, values: &[f32]) -> u64 {
    values.iter().fold(hash, |h, v| fnv1a_u32(h, v.to_bits()))
}

/// Hash every field of `state`, floats by their bits.
///
/// Under-terrain entries are hashed by id, so two states only compare
/// equal against the same terrain registry.
pub fn state_hash(state: &MapThermalState) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u32(hash, state.width);
    hash = fnv1a_u32(hash, state.height);
    hash = fnv1a_f32s(hash, &state.temperatures);
    hash = match &state.terrain_temperatures {
        Some(values) => fnv1a_f32s(fnv1a_byte(hash, 1), values),
        None => fnv1a_byte(hash, 0),
    };
    hash = fnv1a_u32(hash, state.under_terrain.len() as u32);
    for &(cell, terrain) in &state.under_terrain {
        hash = fnv1a_u32(hash, cell);
        hash = fnv1a_u32(hash, u32::from(terrain.0));
    }
    hash
}
