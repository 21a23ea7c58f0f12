//! Dedup/clean job: build a second output-unit set keeping only the first
//! occurrence of each identifier and dropping retweets, without mutating
//! the source units.
//!
//! "First occurrence" is deterministic: files are visited sorted by name,
//! rows in file order. The retweet check is a case-insensitive prefix
//! match on the raw text.

use crate::config::Codec;
use crate::counting::parquet_files;
use crate::parquet_io::{read_rows, write_rows};
use crate::util::init_tracing_once;
use anyhow::{bail, Context, Result};
use ahash::AHashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker prefix identifying a retweet.
pub const RETWEET_PREFIX: &str = "rt @";

#[derive(Clone, Debug, Default)]
pub struct DedupeSummary {
    pub rows_in: u64,
    pub rows_out: u64,
    pub dropped_duplicates: u64,
    pub dropped_retweets: u64,
    pub files: Vec<PathBuf>,
}

fn is_retweet(text: Option<&str>) -> bool {
    text.map(|t| {
        t.get(..RETWEET_PREFIX.len())
            .map(|p| p.eq_ignore_ascii_case(RETWEET_PREFIX))
            .unwrap_or(false)
    })
    .unwrap_or(false)
}

/// Clean `src_dir` into `dst_dir`: unique ids, no retweets, one output file
/// per surviving source file (same file name). Sources are read-only.
pub fn dedupe_clean(src_dir: &Path, dst_dir: &Path, codec: Codec) -> Result<DedupeSummary> {
    init_tracing_once();
    if src_dir == dst_dir {
        bail!("dedupe output directory must differ from the source directory");
    }
    fs::create_dir_all(dst_dir)
        .with_context(|| format!("create {}", dst_dir.display()))?;

    let mut seen: AHashSet<String> = AHashSet::new();
    let mut summary = DedupeSummary::default();

    for src in parquet_files(src_dir) {
        let rows = read_rows(&src)?;
        summary.rows_in += rows.len() as u64;

        let mut kept = Vec::with_capacity(rows.len());
        for row in rows {
            if is_retweet(row.raw_content.as_deref()) {
                summary.dropped_retweets += 1;
                continue;
            }
            if !seen.insert(row.id.clone()) {
                summary.dropped_duplicates += 1;
                continue;
            }
            kept.push(row);
        }

        if kept.is_empty() {
            continue;
        }
        let Some(name) = src.file_name() else { continue };
        let dst = dst_dir.join(name);
        write_rows(&dst, &kept, codec)?;
        summary.rows_out += kept.len() as u64;
        summary.files.push(dst);
    }

    tracing::info!(
        "dedupe: {} rows in, {} out ({} duplicates, {} retweets dropped)",
        summary.rows_in, summary.rows_out, summary.dropped_duplicates, summary.dropped_retweets
    );
    Ok(summary)
}
