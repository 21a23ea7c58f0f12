use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tweetl::{Row, Vocabulary, PROJECTED_COLUMNS};

/// Write a gzip-compressed CSV file with the full projected header.
/// Mirrors the corpus's `part_*/ *.csv.gz` layout but with tiny content.
pub fn write_csv_gz(path: &Path, rows: &[Vec<String>]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let enc = GzEncoder::new(f, Compression::default());
    let mut w = csv::Writer::from_writer(enc);
    w.write_record(PROJECTED_COLUMNS).unwrap();
    for r in rows {
        w.write_record(r).unwrap();
    }
    w.flush().unwrap();
    w.into_inner().unwrap().finish().unwrap();
}

/// One CSV record in projected-column order with sensible defaults.
pub fn tweet_record(id: &str, epoch: i64, text: &str, user: &str) -> Vec<String> {
    vec![
        id.to_string(),
        epoch.to_string(),
        text.to_string(),
        "[]".to_string(),
        "[]".to_string(),
        "0".to_string(),
        "0".to_string(),
        "en".to_string(),
        user.to_string(),
    ]
}

/// An in-memory row with only the fields the filter and reporters look at.
pub fn row(id: &str, text: &str) -> Row {
    Row {
        id: id.to_string(),
        raw_content: Some(text.to_string()),
        ..Default::default()
    }
}

/// A one-group vocabulary containing just "kalshi", as in the end-to-end
/// scenario.
pub fn kalshi_vocab() -> Vocabulary {
    Vocabulary::from_groups(&[vec!["kalshi"]])
}

/// Build a corpus root with one partition directory per entry:
/// `(partition, file name, rows)`.
pub fn make_corpus(entries: &[(&str, &str, Vec<Vec<String>>)]) -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.into_path();
    for (part, name, rows) in entries {
        write_csv_gz(&base.join(part).join(name), rows);
    }
    base
}
