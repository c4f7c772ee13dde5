//! Locality-sensitive hashings for Jaccard similarity.
pub mod banding;
pub mod minhash;

pub use banding::BandedIndex;
pub use minhash::MinHasher;

use rand_xoshiro::rand_core::{RngCore, SeedableRng};

/// Generates a hash value.
#[inline(always)]
pub(crate) fn hash_u64(x: u64, seed: u64) -> u64 {
    rand_xoshiro::SplitMix64::seed_from_u64(x ^ seed).next_u64()
}
