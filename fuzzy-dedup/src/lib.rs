//! Fuzzy near-duplicate removal for text corpora with MinHash and LSH.
//!
//! Documents are normalized, split into word n-grams, and summarized by MinHash
//! signatures. Banded LSH proposes candidate pairs, which are confirmed with the
//! exact Jaccard similarity of their n-gram sets. Only one document of each
//! confirmed pair is written to the output directory.
//!
//! # Examples
//!
//! ```no_run
//! use fuzzy_dedup::{DedupConfig, MinHashDeduplicator};
//!
//! // 100 hashes in 20 bands of 5 rows, word 5-grams, threshold 0.8.
//! let config = DedupConfig::new(100, 20, 5, 0.8).unwrap();
//! let report = MinHashDeduplicator::new(config)
//!     .run(&["corpus/a.txt", "corpus/b.txt"], "deduped")
//!     .unwrap();
//! println!("{report}");
//! ```
#![deny(missing_docs)]

pub mod config;
pub mod dedup;
pub mod document;
pub mod errors;
pub mod jaccard;
pub mod line_dedup;
pub mod normalize;
pub mod resolve;
pub mod shingling;
pub mod writer;

pub(crate) mod feature;

pub use config::{DedupConfig, ResolveStrategy};
pub use dedup::{DedupReport, MinHashDeduplicator};
pub use document::Document;
pub use errors::{DedupError, Result};
pub use line_dedup::{exact_line_dedup, LineDedupReport};
pub use normalize::Normalizer;
pub use resolve::Resolution;
pub use writer::CorpusWriter;
