use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fuzzy_dedup::{DedupConfig, MinHashDeduplicator, ResolveStrategy};

#[derive(Parser, Debug)]
#[clap(
    name = "fuzzy-dedup-minhash",
    about = "A program to remove near-duplicate documents with MinHash and LSH."
)]
struct Args {
    /// File paths to documents, one document per file.
    #[clap(required = true)]
    input_paths: Vec<PathBuf>,

    /// Directory to write surviving documents into (created if missing).
    #[clap(short = 'o', long)]
    output_dir: PathBuf,

    /// Number of MinHash functions.
    #[clap(short = 'n', long)]
    num_hashes: usize,

    /// Number of LSH bands (must divide num_hashes).
    /// The more bands, the more candidate pairs are verified.
    #[clap(short = 'b', long)]
    num_bands: usize,

    /// Number of words in a shingle (must be more than 0).
    #[clap(short = 'w', long)]
    ngram_length: usize,

    /// Jaccard similarity in the range of [0,1] at or above which documents are duplicates.
    #[clap(short = 't', long)]
    jaccard_threshold: f64,

    /// Resolve strategy of verified pairs: "greedy" or "transitive".
    #[clap(short = 'r', long, default_value = "greedy")]
    strategy: ResolveStrategy,

    /// Drops accents (combining marks) in normalization.
    #[clap(long)]
    strip_accents: bool,

    /// Seed value for hash functions.
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// Disables parallel construction.
    #[clap(short = 'p', long)]
    disable_parallel: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = DedupConfig::new(
        args.num_hashes,
        args.num_bands,
        args.ngram_length,
        args.jaccard_threshold,
    )?
    .strategy(args.strategy)
    .strips_accents(args.strip_accents);
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }

    let report = MinHashDeduplicator::new(config)
        .in_parallel(!args.disable_parallel)
        .run(&args.input_paths, &args.output_dir)
        .with_context(|| format!("deduplicating into {}", args.output_dir.display()))?;

    println!("{report}");
    for id in &report.removed {
        println!("removed,{}", args.input_paths[*id].display());
    }

    Ok(())
}
