//! FNV-1a, 64-bit.
//!
//! The hash is a pure function of the input bytes: there is no seed and no
//! per-process randomization, so the same key always lands in the same bucket
//! for a given bucket count. Growth relies on this.

const FNV64_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Returns the 64-bit FNV-1a hash of `bytes`.
#[inline]
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut state = FNV64_OFFSET_BASIS;
    for &b in bytes {
        state ^= b as u64;
        state = state.wrapping_mul(FNV64_PRIME);
    }
    state
}
