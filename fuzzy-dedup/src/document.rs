//! Documents flowing through the pipeline.
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::shingling::ShingleSet;

/// An input document with its derived shingles and MinHash signature.
///
/// `raw_content` holds the input bytes untouched; normalization only feeds
/// `shingles` and `signature`.
#[derive(Clone, Debug)]
pub struct Document {
    id: usize,
    source_path: PathBuf,
    raw_content: Vec<u8>,
    shingles: ShingleSet,
    signature: Vec<u64>,
}

impl Document {
    pub(crate) fn new(
        id: usize,
        source_path: PathBuf,
        raw_content: Vec<u8>,
        shingles: ShingleSet,
        signature: Vec<u64>,
    ) -> Self {
        Self {
            id,
            source_path,
            raw_content,
            shingles,
            signature,
        }
    }

    /// Gets the index in input order.
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Gets the path the document was read from.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Gets the base name used for the output file.
    pub fn file_name(&self) -> Option<&OsStr> {
        self.source_path.file_name()
    }

    /// Gets the original bytes.
    pub fn raw_content(&self) -> &[u8] {
        &self.raw_content
    }

    /// Gets the set of word n-grams of the normalized text.
    pub const fn shingles(&self) -> &ShingleSet {
        &self.shingles
    }

    /// Gets the MinHash signature.
    pub fn signature(&self) -> &[u64] {
        &self.signature
    }
}
