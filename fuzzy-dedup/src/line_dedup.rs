//! Exact line-level deduplication across a corpus.
use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use tracing::info;

use crate::errors::{DedupError, Result};
use crate::writer::{self, CorpusWriter};

/// Summary of a line deduplication run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineDedupReport {
    /// Number of input files.
    pub num_files: usize,
    /// Number of lines read over all files.
    pub num_lines: usize,
    /// Number of lines written.
    pub num_kept: usize,
}

/// Splits `content` on `\n`, dropping the terminator of each line. A `\r`
/// before the `\n` belongs to the terminator.
fn lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    (!content.is_empty())
        .then(|| body.split(|&b| b == b'\n'))
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

fn line_hash(line: &[u8]) -> u64 {
    fasthash::city::hash64(line)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| DedupError::io(path, e))
}

/// Rewrites each input under `output_dir` with its base name, keeping only
/// the lines that occur exactly once in the whole corpus.
///
/// Lines ending in `\r\n` and `\n` compare equal. Every kept line is
/// terminated with `\n`. A path given twice is rejected as a collision.
pub fn exact_line_dedup<P, Q>(input_paths: &[P], output_dir: Q) -> Result<LineDedupReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let names = writer::output_names(input_paths)?;

    let mut counts: HashMap<u64, usize> = HashMap::new();
    let mut num_lines = 0;
    for path in input_paths {
        let content = read(path.as_ref())?;
        for line in lines(&content) {
            *counts.entry(line_hash(line)).or_insert(0) += 1;
            num_lines += 1;
        }
    }
    info!(
        "Counted {} unique lines out of {num_lines} in {} files",
        counts.len(),
        input_paths.len()
    );

    let writer = CorpusWriter::new(output_dir.as_ref());
    writer.create_dir()?;
    let mut num_kept = 0;
    for (path, name) in input_paths.iter().zip(names) {
        let content = read(path.as_ref())?;
        let mut kept = Vec::with_capacity(content.len());
        for line in lines(&content) {
            if counts.get(&line_hash(line)) == Some(&1) {
                kept.extend_from_slice(line);
                kept.push(b'\n');
                num_kept += 1;
            }
        }
        writer.write(name, &kept)?;
    }
    info!("Kept {num_kept} lines");

    Ok(LineDedupReport {
        num_files: input_paths.len(),
        num_lines,
        num_kept,
    })
}
