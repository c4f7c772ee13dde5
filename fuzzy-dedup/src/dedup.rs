//! End-to-end fuzzy deduplication with MinHash and LSH.
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use lsh::minhash::estimate_similarity;
use lsh::{BandedIndex, MinHasher};
use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::config::{DedupConfig, ResolveStrategy};
use crate::document::Document;
use crate::errors::{DedupError, Result};
use crate::feature::FeatureExtractor;
use crate::jaccard;
use crate::resolve::{self, Resolution};
use crate::writer::{self, CorpusWriter};

/// Summary of a deduplication run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DedupReport {
    /// Number of input documents.
    pub num_documents: usize,
    /// Number of unique candidate pairs from LSH.
    pub num_candidates: usize,
    /// Number of candidate pairs whose exact similarity was computed.
    pub num_verified: usize,
    /// Number of candidate pairs skipped because the right side was already removed.
    pub num_skipped: usize,
    /// Number of removed documents.
    pub num_removed: usize,
    /// Number of files written to the output directory.
    pub num_written: usize,
    /// Ids of removed documents in ascending order.
    pub removed: Vec<usize>,
}

impl fmt::Display for DedupReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "documents={} candidates={} verified={} skipped={} removed={} written={}",
            self.num_documents,
            self.num_candidates,
            self.num_verified,
            self.num_skipped,
            self.num_removed,
            self.num_written
        )
    }
}

/// Fuzzy deduplicator of documents using MinHash signatures and banded LSH.
pub struct MinHashDeduplicator {
    config: DedupConfig,
    extractor: FeatureExtractor,
    hasher: MinHasher,
    in_parallel: bool,
}

impl MinHashDeduplicator {
    /// Creates an instance.
    ///
    /// The fingerprint seed and the MinHash seeds are drawn from the configured
    /// seed value, so the same configuration always produces the same signatures.
    pub fn new(config: DedupConfig) -> Self {
        let mut seeder = rand_xoshiro::SplitMix64::seed_from_u64(config.seed_value());
        let extractor = FeatureExtractor::new(&config, seeder.next_u64());
        let hasher = MinHasher::new(config.num_hashes(), seeder.next_u64());
        Self {
            config,
            extractor,
            hasher,
            in_parallel: true,
        }
    }

    /// Builds signatures and buckets with multiple threads? (Default: true)
    pub fn in_parallel(mut self, yes: bool) -> Self {
        self.in_parallel = yes;
        self
    }

    /// Gets the configuration.
    pub const fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Derives shingles and the signature of a document from its raw content.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD for comparison only;
    /// the document keeps the original bytes.
    pub fn analyze<P>(&self, id: usize, source_path: P, raw_content: Vec<u8>) -> Document
    where
        P: Into<PathBuf>,
    {
        let source_path = source_path.into();
        let text = String::from_utf8_lossy(&raw_content);
        if matches!(text, Cow::Owned(_)) {
            warn!(
                "Replaced invalid UTF-8 sequences in {}",
                source_path.display()
            );
        }
        let shingles = self.extractor.shingles(&text);
        let mut feature = vec![];
        self.extractor.extract(&shingles, &mut feature);
        let signature = self.hasher.signature(&feature);
        Document::new(id, source_path, raw_content, shingles, signature)
    }

    /// Reads and analyzes all input files, assigning ids in input order.
    /// The first unreadable file aborts loading.
    pub fn load_documents<P>(&self, input_paths: &[P]) -> Result<Vec<Document>>
    where
        P: AsRef<Path> + Sync,
    {
        let processed = AtomicUsize::new(0);
        let load = |id: usize, path: &Path| -> Result<Document> {
            let raw_content = fs::read(path).map_err(|e| DedupError::io(path, e))?;
            let doc = self.analyze(id, path, raw_content);
            let cnt = processed.fetch_add(1, Ordering::Relaxed) + 1;
            if cnt % 1000 == 0 {
                debug!("Processed {cnt} documents...");
            }
            Ok(doc)
        };
        if self.in_parallel {
            input_paths
                .par_iter()
                .enumerate()
                .map(|(id, path)| load(id, path.as_ref()))
                .collect()
        } else {
            input_paths
                .iter()
                .enumerate()
                .map(|(id, path)| load(id, path.as_ref()))
                .collect()
        }
    }

    /// Buckets the signatures band by band and enumerates the unique candidate
    /// pairs in ascending order.
    pub fn candidate_pairs(&self, documents: &[Document]) -> Result<Vec<(usize, usize)>> {
        let num_bands = self.config.num_bands();
        let rows_per_band = self.config.rows_per_band();
        let index = if self.in_parallel {
            documents
                .par_iter()
                .try_fold(
                    || BandedIndex::new(num_bands, rows_per_band),
                    |mut index, doc| {
                        index.insert(doc.id(), doc.signature())?;
                        Ok::<_, anyhow::Error>(index)
                    },
                )
                .try_reduce(
                    || BandedIndex::new(num_bands, rows_per_band),
                    |mut lhs, rhs| {
                        lhs.merge(rhs)?;
                        Ok(lhs)
                    },
                )?
        } else {
            let mut index = BandedIndex::new(num_bands, rows_per_band);
            for doc in documents {
                index.insert(doc.id(), doc.signature())?;
            }
            index
        };
        debug!(
            "Bucketed {} signatures into {} bands, {} shared buckets",
            index.num_signatures(),
            index.num_bands(),
            index.num_shared_buckets()
        );
        Ok(index.candidate_pairs())
    }

    /// Verifies candidate pairs with the exact Jaccard similarity and decides
    /// which documents survive.
    pub fn resolve(&self, documents: &[Document], candidates: &[(usize, usize)]) -> Resolution {
        let threshold = self.config.jaccard_threshold();
        let verify = |i: usize, j: usize| {
            let (lhs, rhs) = (&documents[i], &documents[j]);
            let duplicate = jaccard::is_duplicate(lhs.shingles(), rhs.shingles(), threshold);
            trace!(
                "Pair ({i}, {j}): estimated similarity {:.3}, duplicate {duplicate}",
                estimate_similarity(lhs.signature(), rhs.signature())
            );
            duplicate
        };
        match self.config.resolve_strategy() {
            ResolveStrategy::Greedy => resolve::resolve_greedy(documents.len(), candidates, verify),
            ResolveStrategy::Transitive => {
                resolve::resolve_transitive(documents.len(), candidates, verify)
            }
        }
    }

    /// Finds the documents to remove. Document ids must match their positions.
    pub fn find_duplicates(&self, documents: &[Document]) -> Result<Resolution> {
        if let Some((i, doc)) = documents
            .iter()
            .enumerate()
            .find(|(i, doc)| doc.id() != *i)
        {
            return Err(DedupError::Index(anyhow::anyhow!(
                "The document at position {i} has id {}.",
                doc.id()
            )));
        }
        let candidates = self.candidate_pairs(documents)?;
        Ok(self.resolve(documents, &candidates))
    }

    /// Deduplicates the input files and writes the survivors, unchanged, into
    /// `output_dir` under their base names.
    ///
    /// Base-name collisions are rejected before any file is read. A path given
    /// twice counts as a collision too.
    pub fn run<P, Q>(&self, input_paths: &[P], output_dir: Q) -> Result<DedupReport>
    where
        P: AsRef<Path> + Sync,
        Q: AsRef<Path>,
    {
        writer::output_names(input_paths)?;

        info!(
            "Converting {} documents into signatures...",
            input_paths.len()
        );
        let start = Instant::now();
        let documents = self.load_documents(input_paths)?;
        info!(
            "Produced {} signatures of {} slots in {} sec",
            documents.len(),
            self.config.num_hashes(),
            start.elapsed().as_secs_f64()
        );

        info!("Finding candidate pairs in {} bands...", self.config.num_bands());
        let start = Instant::now();
        let candidates = self.candidate_pairs(&documents)?;
        info!(
            "Found {} candidate pairs in {} sec",
            candidates.len(),
            start.elapsed().as_secs_f64()
        );

        let start = Instant::now();
        let resolution = self.resolve(&documents, &candidates);
        info!(
            "Verified {} pairs ({} skipped), removing {} documents in {} sec",
            resolution.num_verified(),
            resolution.num_skipped(),
            resolution.num_removed(),
            start.elapsed().as_secs_f64()
        );

        let writer = CorpusWriter::new(output_dir.as_ref());
        let num_written = writer.write_documents(&documents, &resolution)?;
        info!(
            "Wrote {num_written} documents to {}",
            writer.output_dir().display()
        );

        Ok(DedupReport {
            num_documents: documents.len(),
            num_candidates: resolution.num_candidates(),
            num_verified: resolution.num_verified(),
            num_skipped: resolution.num_skipped(),
            num_removed: resolution.num_removed(),
            num_written,
            removed: resolution.removed().collect(),
        })
    }
}
