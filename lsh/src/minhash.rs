use rand_xoshiro::rand_core::{RngCore, SeedableRng};

/// Slot value of a signature computed from an empty feature set.
pub const EMPTY_SLOT: u64 = u64::MAX;

/// MinHash for Jaccard similarity.
///
/// Each of the `num_hashes` slots owns a seed drawn from a SplitMix64 stream,
/// and the slot value is the minimum of the seeded hash over all features.
///
/// # Reference
///
/// * https://doi.org/10.1109/SEQUEN.1997.666900
pub struct MinHasher {
    seeds: Vec<u64>,
}

impl MinHasher {
    pub fn new(num_hashes: usize, seed: u64) -> Self {
        let mut seeder = rand_xoshiro::SplitMix64::seed_from_u64(seed);
        let seeds = (0..num_hashes).map(|_| seeder.next_u64()).collect();
        Self { seeds }
    }

    pub fn num_hashes(&self) -> usize {
        self.seeds.len()
    }

    pub fn iter<'a>(&'a self, feats: &'a [u64]) -> MinHashIter<'a> {
        MinHashIter {
            feats,
            seeds: self.seeds.iter(),
        }
    }

    /// Computes the whole signature of `num_hashes` slots.
    /// An empty feature set yields [`EMPTY_SLOT`] in every slot.
    pub fn signature(&self, feats: &[u64]) -> Vec<u64> {
        self.iter(feats).collect()
    }
}

pub struct MinHashIter<'a> {
    feats: &'a [u64],
    seeds: std::slice::Iter<'a, u64>,
}

impl<'a> Iterator for MinHashIter<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let seed = *self.seeds.next()?;
        let h = self
            .feats
            .iter()
            .map(|&f| crate::hash_u64(f, seed))
            .min()
            .unwrap_or(EMPTY_SLOT);
        Some(h)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.seeds.size_hint()
    }
}

impl<'a> ExactSizeIterator for MinHashIter<'a> {}

/// Estimates the Jaccard similarity as the fraction of agreeing slots.
pub fn estimate_similarity(lhs: &[u64], rhs: &[u64]) -> f64 {
    if lhs.is_empty() || lhs.len() != rhs.len() {
        return 0.;
    }
    let agreed = lhs.iter().zip(rhs.iter()).filter(|(x, y)| x == y).count();
    agreed as f64 / lhs.len() as f64
}
