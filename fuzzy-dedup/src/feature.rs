use std::hash::{Hash, Hasher};

use fasthash::{CityHasher, FastHasher};

use crate::config::DedupConfig;
use crate::normalize::Normalizer;
use crate::shingling::{self, ShingleSet};

#[derive(Clone, Copy, Debug)]
pub struct FeatureExtractor {
    normalizer: Normalizer,
    window_size: usize,
    seed: u64,
}

impl FeatureExtractor {
    pub fn new(config: &DedupConfig, seed: u64) -> Self {
        Self {
            normalizer: Normalizer::new().strips_accents(config.accents_stripped()),
            window_size: config.ngram_length(),
            seed,
        }
    }

    pub fn shingles<S>(&self, text: S) -> ShingleSet
    where
        S: AsRef<str>,
    {
        shingling::shingles(self.normalizer.normalize(text), self.window_size)
    }

    /// Hashes each shingle into a 64-bit feature for MinHash.
    pub fn extract(&self, shingles: &ShingleSet, feature: &mut Vec<u64>) {
        feature.clear();
        feature.extend(shingles.iter().map(|s| self.hash(s)));
    }

    fn hash(&self, shingle: &str) -> u64 {
        let mut s = CityHasher::with_seed(self.seed);
        shingle.hash(&mut s);
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(ngram_length: usize) -> FeatureExtractor {
        let config = DedupConfig::new(4, 2, ngram_length, 0.5).unwrap();
        FeatureExtractor::new(&config, 42)
    }

    #[test]
    fn test_shingles_are_normalized() {
        let extractor = extractor(2);
        assert_eq!(
            extractor.shingles("The CAT, sat."),
            extractor.shingles("the cat sat")
        );
        assert_eq!(extractor.shingles("The CAT, sat.").len(), 2);
    }

    #[test]
    fn test_extract() {
        let extractor = extractor(1);
        let shingles = extractor.shingles("abc de abc");
        let mut feature = vec![1, 2, 3];
        extractor.extract(&shingles, &mut feature);
        assert_eq!(feature.len(), 2);
        feature.sort_unstable();
        let mut expected = vec![extractor.hash("abc"), extractor.hash("de")];
        expected.sort_unstable();
        assert_eq!(feature, expected);
    }

    #[test]
    fn test_hash_depends_on_seed() {
        let config = DedupConfig::new(4, 2, 1, 0.5).unwrap();
        let x = FeatureExtractor::new(&config, 1);
        let y = FeatureExtractor::new(&config, 2);
        assert_eq!(x.hash("word"), x.hash("word"));
        assert_ne!(x.hash("word"), y.hash("word"));
    }
}
