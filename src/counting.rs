//! Read-only reporters over a directory of output units: per-file row
//! counts from footer metadata, and a keyword-group match counter.

use crate::parquet_io::{file_row_count, for_each_text};
use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All `*.parquet` files directly under `dir`, sorted by name.
pub fn parquet_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if !dir.exists() {
        return files;
    }
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let Ok(ent) = entry else { continue };
        if ent.file_type().is_file()
            && ent.path().extension().map(|e| e == "parquet").unwrap_or(false)
        {
            files.push(ent.path().to_path_buf());
        }
    }
    files.sort();
    files
}

/// Per-unit row counts via footer metadata only — no row content is
/// decompressed. Re-running on an unmodified directory yields identical
/// counts.
pub fn row_counts(dir: &Path) -> Result<Vec<(String, u64)>> {
    let mut counts = Vec::new();
    for path in parquet_files(dir) {
        let n = file_row_count(&path)?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        counts.push((name, n));
    }
    Ok(counts)
}

/// Grand total across all units in `dir`.
pub fn total_rows(dir: &Path) -> Result<u64> {
    Ok(row_counts(dir)?.iter().map(|(_, n)| n).sum())
}

/// Count rows across all units whose raw text matches `pattern`. Streams
/// record batches; never writes.
pub fn count_matching(dir: &Path, pattern: &Regex) -> Result<u64> {
    let mut total = 0u64;
    for path in parquet_files(dir) {
        for_each_text(&path, |text| {
            if pattern.is_match(text) {
                total += 1;
            }
        })?;
    }
    Ok(total)
}
