use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(
    name = "fuzzy-dedup-line",
    about = "A program to remove lines occurring more than once in a corpus."
)]
struct Args {
    /// File paths to documents.
    #[clap(required = true)]
    input_paths: Vec<PathBuf>,

    /// Directory to write rewritten documents into (created if missing).
    #[clap(short = 'o', long)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let report = fuzzy_dedup::exact_line_dedup(&args.input_paths, &args.output_dir)
        .with_context(|| format!("deduplicating lines into {}", args.output_dir.display()))?;

    println!("files,lines,kept");
    println!(
        "{},{},{}",
        report.num_files, report.num_lines, report.num_kept
    );

    Ok(())
}
