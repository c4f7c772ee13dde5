use std::fs;

use fuzzy_dedup::{DedupConfig, MinHashDeduplicator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let documents = [
        ("jimbocho.txt", "Welcome to Jimbocho, the town of books and curry! Old bookshops line every street, and curry houses hide in the basements between them."),
        ("jimbocho-recrawl.txt", "WELCOME TO JIMBOCHO: the town of books and curry. Old bookshops line every street, and curry houses hide in the basements between them!"),
        ("kanda.txt", "Kanda is known for its used sporting goods stores, musical instrument shops near Ochanomizu, and a long history of university life."),
    ];

    let workdir = tempfile::tempdir()?;
    let mut paths = vec![];
    for (name, text) in documents {
        let path = workdir.path().join(name);
        fs::write(&path, text)?;
        paths.push(path);
    }

    // 128 hashes in 32 bands of 4 rows, word 3-grams (with seed value 42).
    let config = DedupConfig::new(128, 32, 3, 0.7)?.seed(42);
    let output_dir = workdir.path().join("deduped");
    let report = MinHashDeduplicator::new(config).run(&paths, &output_dir)?;

    // The re-crawl differs only in casing and punctuation.
    assert_eq!(report.removed, vec![1]);
    println!("{report}");
    Ok(())
}
