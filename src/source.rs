//! Input discovery and the streaming gzip-CSV batch source.
//!
//! Discovery finds `part_*/NAME.csv.gz` files under the input root; each
//! file is tagged with its containing directory name as the partition id.
//! `stream_job` decompresses one file on the fly and hands rows to a batch
//! callback in chunks of at most `chunk_size`, so memory stays bounded no
//! matter how large the file is.

use crate::mem::maybe_throttle_low_memory;
use crate::row::{RawRow, Row, RowBatch, PROJECTED_COLUMNS};
use crate::util::open_with_backoff;
use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One input unit: a compressed CSV file plus the partition it belongs to.
#[derive(Clone, Debug)]
pub struct FileJob {
    pub part: String,
    pub path: PathBuf,
}

/// Discover all `part_*/ *.csv.gz` files under `input_root`, in a
/// deterministic order (partition name, then file name). Batches from one
/// file are always contiguous; partitions interleave only at file
/// boundaries because of this ordering.
pub fn discover_jobs(input_root: &Path) -> Vec<FileJob> {
    let mut jobs = Vec::new();
    if !input_root.exists() {
        return jobs;
    }
    for entry in WalkDir::new(input_root).min_depth(2).max_depth(2) {
        let Ok(ent) = entry else { continue };
        if !ent.file_type().is_file() {
            continue;
        }
        let Some(name) = ent.file_name().to_str() else { continue };
        if !name.ends_with(".csv.gz") {
            continue;
        }
        let part = ent
            .path()
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str());
        if let Some(part) = part {
            if part.starts_with("part_") {
                jobs.push(FileJob { part: part.to_string(), path: ent.path().to_path_buf() });
            }
        }
    }
    jobs.sort_by(|a, b| (&a.part, &a.path).cmp(&(&b.part, &b.path)));
    jobs
}

/// Validate the declared projection against a file's header, once, before
/// any row is read.
fn check_projection(headers: &csv::StringRecord) -> Result<()> {
    for col in PROJECTED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("missing required column `{}`", col);
        }
    }
    Ok(())
}

/// Stream one input file as row batches. Returns the number of rows
/// scanned. Any error here — unreadable file, bad gzip stream, missing
/// column, malformed record — is the caller's cue to skip this unit and
/// move on; it carries the file path as context.
pub fn stream_job(
    job: &FileJob,
    chunk_size: usize,
    read_buf_bytes: usize,
    mut on_batch: impl FnMut(RowBatch) -> Result<()>,
) -> Result<u64> {
    let chunk_size = chunk_size.max(1);
    let file = open_with_backoff(&job.path, 16, 50)
        .with_context(|| format!("open {}", job.path.display()))?;
    let gz = GzDecoder::new(BufReader::with_capacity(read_buf_bytes.max(8 * 1024), file));
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(gz);

    let headers = rdr
        .headers()
        .with_context(|| format!("read header of {}", job.path.display()))?
        .clone();
    check_projection(&headers).with_context(|| format!("header of {}", job.path.display()))?;

    let mut rows: Vec<Row> = Vec::with_capacity(chunk_size.min(4096));
    let mut scanned: u64 = 0;

    for record in rdr.records() {
        let record = record.with_context(|| format!("read {}", job.path.display()))?;
        let raw: RawRow = record
            .deserialize(Some(&headers))
            .with_context(|| format!("decode row {} of {}", scanned + 1, job.path.display()))?;
        rows.push(Row::from(raw));
        scanned += 1;

        if rows.len() >= chunk_size {
            on_batch(RowBatch::new(job.part.clone(), std::mem::take(&mut rows)))?;
            maybe_throttle_low_memory(0.10);
        }
    }
    if !rows.is_empty() {
        on_batch(RowBatch::new(job.part.clone(), rows))?;
    }
    Ok(scanned)
}
