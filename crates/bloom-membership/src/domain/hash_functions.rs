//! Hash functions for the membership filter
//!
//! A single SHA-256 digest is split into two 64-bit words which drive
//! double hashing: probe(i) = (h1 + i * h2) mod m.

use sha2::{Digest, Sha256};

/// The two base hashes derived from one digest
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseHashes {
    pub h1: u64,
    pub h2: u64,
}

/// Compute the SHA-256 digest of a value's UTF-8 bytes
pub fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Split a digest into the two big-endian base hashes
///
/// `h2` is forced to 1 when it would be 0, otherwise every probe would
/// collapse onto `h1 mod m`.
pub fn base_hashes(digest: &[u8; 32]) -> BaseHashes {
    let mut first = [0u8; 8];
    let mut second = [0u8; 8];
    first.copy_from_slice(&digest[0..8]);
    second.copy_from_slice(&digest[8..16]);

    let h1 = u64::from_be_bytes(first);
    let h2 = match u64::from_be_bytes(second) {
        0 => 1,
        h => h,
    };
    BaseHashes { h1, h2 }
}

/// Lazily yield the `k` probe indices for a pair of base hashes
///
/// The sum is carried in 128 bits so `h1 + i * h2` never wraps before the
/// reduction.
pub fn probes(hashes: BaseHashes, k: usize, m: usize) -> impl Iterator<Item = usize> {
    let m = m as u128;
    (0..k).map(move |i| {
        let sum = hashes.h1 as u128 + (i as u128) * (hashes.h2 as u128);
        let index = (sum % m) as usize;
        debug_assert!((index as u128) < m, "probe {} escaped [0, {})", index, m);
        index
    })
}

/// Compute all `k` probe positions for a value
pub fn compute_hash_positions(value: &str, k: usize, m: usize) -> Vec<usize> {
    probes(base_hashes(&digest(value)), k, m).collect()
}
