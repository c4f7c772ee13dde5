use anyhow::{anyhow, Result};
use hashbrown::{HashMap, HashSet};

/// Bucket table of banded MinHash signatures.
///
/// A signature of `num_bands * rows_per_band` slots is cut into `num_bands`
/// contiguous bands, and band `b` is keyed by `(b, slots)`. Ids sharing a key
/// become candidate pairs.
///
/// Partial tables built over disjoint ids can be combined with [`Self::merge`].
pub struct BandedIndex {
    rows_per_band: usize,
    bands: Vec<HashMap<Box<[u64]>, Vec<usize>>>,
    num_signatures: usize,
}

impl BandedIndex {
    pub fn new(num_bands: usize, rows_per_band: usize) -> Self {
        debug_assert!(num_bands != 0 && rows_per_band != 0);
        Self {
            rows_per_band,
            bands: vec![HashMap::new(); num_bands],
            num_signatures: 0,
        }
    }

    pub fn insert(&mut self, id: usize, signature: &[u64]) -> Result<()> {
        let num_hashes = self.num_hashes();
        if signature.len() != num_hashes {
            return Err(anyhow!(
                "The input signature must include {num_hashes} slots, but got {}.",
                signature.len()
            ));
        }
        for (band, rows) in self
            .bands
            .iter_mut()
            .zip(signature.chunks_exact(self.rows_per_band))
        {
            band.entry(rows.into()).or_insert_with(Vec::new).push(id);
        }
        self.num_signatures += 1;
        Ok(())
    }

    /// Moves all the bucket members of `other` into `self`.
    pub fn merge(&mut self, other: Self) -> Result<()> {
        if self.num_bands() != other.num_bands() || self.rows_per_band != other.rows_per_band {
            return Err(anyhow!(
                "Cannot merge a {}x{} table into a {}x{} table.",
                other.num_bands(),
                other.rows_per_band,
                self.num_bands(),
                self.rows_per_band
            ));
        }
        for (band, other_band) in self.bands.iter_mut().zip(other.bands) {
            for (key, ids) in other_band {
                band.entry(key).or_insert_with(Vec::new).extend(ids);
            }
        }
        self.num_signatures += other.num_signatures;
        Ok(())
    }

    /// Enumerates unique pairs `(i, j)` with `i < j` sharing at least one bucket,
    /// sorted in ascending order.
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut candidates: Vec<_> = self.unique_pairs().into_iter().collect();
        candidates.sort_unstable();
        candidates
    }

    /// Collects pairs sharing a bucket. A pair colliding in several bands is
    /// held once.
    fn unique_pairs(&self) -> HashSet<(usize, usize)> {
        let mut pairs = HashSet::new();
        let mut members = vec![];
        for band in &self.bands {
            for ids in band.values().filter(|ids| ids.len() > 1) {
                members.clear();
                members.extend_from_slice(ids);
                members.sort_unstable();
                members.dedup();
                for (k, &i) in members.iter().enumerate() {
                    pairs.extend(members[k + 1..].iter().map(|&j| (i, j)));
                }
            }
        }
        pairs
    }

    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    pub const fn rows_per_band(&self) -> usize {
        self.rows_per_band
    }

    pub fn num_hashes(&self) -> usize {
        self.num_bands() * self.rows_per_band
    }

    pub const fn num_signatures(&self) -> usize {
        self.num_signatures
    }

    /// Number of buckets holding two or more ids.
    pub fn num_shared_buckets(&self) -> usize {
        self.bands
            .iter()
            .map(|band| band.values().filter(|ids| ids.len() > 1).count())
            .sum()
    }
}
