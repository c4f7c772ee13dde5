//! Configuration of fuzzy deduplication.
use std::str::FromStr;

use crate::errors::{DedupError, Result};

/// Seed value used when [`DedupConfig::seed`] is not given.
pub const DEFAULT_SEED: u64 = 0x5eed_f00d_cafe_d00d;

/// How verified duplicate pairs are turned into removals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResolveStrategy {
    /// Visits candidate pairs in ascending `(i, j)` order and removes `j` whenever
    /// `(i, j)` is verified, skipping pairs whose `j` is already removed.
    /// The relation is not closed transitively.
    #[default]
    Greedy,
    /// Verifies every candidate pair, groups documents into connected components
    /// of verified pairs, and keeps the smallest id of each component.
    Transitive,
}

impl FromStr for ResolveStrategy {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(Self::Greedy),
            "transitive" => Ok(Self::Transitive),
            _ => Err("Could not parse a resolve strategy"),
        }
    }
}

/// Validated parameters of MinHash deduplication.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DedupConfig {
    num_hashes: usize,
    num_bands: usize,
    ngram_length: usize,
    jaccard_threshold: f64,
    seed: u64,
    strategy: ResolveStrategy,
    strips_accents: bool,
}

impl DedupConfig {
    /// Creates a configuration.
    ///
    /// # Arguments
    ///
    /// * `num_hashes` - Number of MinHash slots in a signature (must be more than 0).
    /// * `num_bands` - Number of LSH bands (must be more than 0 and divide `num_hashes`).
    /// * `ngram_length` - Number of words in a shingle (must be more than 0).
    /// * `jaccard_threshold` - Similarity in `[0, 1]` at or above which a pair is a duplicate.
    pub fn new(
        num_hashes: usize,
        num_bands: usize,
        ngram_length: usize,
        jaccard_threshold: f64,
    ) -> Result<Self> {
        if num_hashes == 0 {
            return Err(DedupError::config("num_hashes must not be 0."));
        }
        if num_bands == 0 {
            return Err(DedupError::config("num_bands must not be 0."));
        }
        if num_hashes % num_bands != 0 {
            return Err(DedupError::config(format!(
                "num_hashes ({num_hashes}) must be divisible by num_bands ({num_bands})."
            )));
        }
        if ngram_length == 0 {
            return Err(DedupError::config("ngram_length must not be 0."));
        }
        if !(0. ..=1.).contains(&jaccard_threshold) {
            return Err(DedupError::config(format!(
                "jaccard_threshold ({jaccard_threshold}) must be in the range of [0,1]."
            )));
        }
        Ok(Self {
            num_hashes,
            num_bands,
            ngram_length,
            jaccard_threshold,
            seed: DEFAULT_SEED,
            strategy: ResolveStrategy::Greedy,
            strips_accents: false,
        })
    }

    /// Sets the seed value for the fingerprint and MinHash seeds.
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the resolve strategy.
    pub const fn strategy(mut self, strategy: ResolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Drops combining marks after NFD decomposition?
    pub const fn strips_accents(mut self, yes: bool) -> Self {
        self.strips_accents = yes;
        self
    }

    /// Gets the number of MinHash slots.
    pub const fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Gets the number of LSH bands.
    pub const fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Gets the number of slots in a band.
    pub const fn rows_per_band(&self) -> usize {
        self.num_hashes / self.num_bands
    }

    /// Gets the number of words in a shingle.
    pub const fn ngram_length(&self) -> usize {
        self.ngram_length
    }

    /// Gets the similarity threshold.
    pub const fn jaccard_threshold(&self) -> f64 {
        self.jaccard_threshold
    }

    /// Gets the seed value.
    pub const fn seed_value(&self) -> u64 {
        self.seed
    }

    /// Gets the resolve strategy.
    pub const fn resolve_strategy(&self) -> ResolveStrategy {
        self.strategy
    }

    /// Checks if combining marks are dropped.
    pub const fn accents_stripped(&self) -> bool {
        self.strips_accents
    }
}
