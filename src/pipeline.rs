//! The pipeline facade: wires source → filter → accumulator and collects
//! per-unit outcomes into a run summary instead of printing ad hoc.

use crate::accumulator::{FlushRecord, PartitionAccumulator};
use crate::config::{Codec, FilterOptions};
use crate::filter::filter_batch;
use crate::progress::{make_progress_bar_labeled, total_compressed_size};
use crate::source::{discover_jobs, stream_job};
use crate::util::init_tracing_once;
use crate::vocab::{CompiledPattern, Vocabulary};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Result for one input unit. A skipped unit names its reason; the run as
/// a whole still completes.
#[derive(Clone, Debug)]
pub enum UnitOutcome {
    Processed { path: PathBuf, rows_scanned: u64, rows_matched: u64 },
    Skipped { path: PathBuf, reason: String },
}

/// What one run did: per-unit outcomes, per-partition flush records, and
/// the aggregate row counts.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub units: Vec<UnitOutcome>,
    pub flushes: Vec<FlushRecord>,
    pub rows_scanned: u64,
    pub rows_matched: u64,
}

impl RunSummary {
    pub fn files_processed(&self) -> usize {
        self.units.iter().filter(|u| matches!(u, UnitOutcome::Processed { .. })).count()
    }
    pub fn files_skipped(&self) -> usize {
        self.units.len() - self.files_processed()
    }
    /// Partition names written successfully, in flush order.
    pub fn partitions_written(&self) -> Vec<&str> {
        self.flushes.iter().filter(|f| f.ok()).map(|f| f.part.as_str()).collect()
    }
    /// (partition, error) pairs for flushes that failed.
    pub fn partitions_failed(&self) -> Vec<(&str, &str)> {
        self.flushes
            .iter()
            .filter_map(|f| f.error.as_deref().map(|e| (f.part.as_str(), e)))
            .collect()
    }
}

/// Builder facade over `FilterOptions`.
#[derive(Clone)]
pub struct TweetFilter {
    opts: FilterOptions,
}

impl Default for TweetFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetFilter {
    pub fn new() -> Self {
        Self { opts: FilterOptions::default() }
    }

    // -------- Builder methods --------
    pub fn input_root(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_input_root(dir); self }
    pub fn output_root(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_output_root(dir); self }
    pub fn chunk_size(mut self, rows: usize) -> Self { self.opts = self.opts.with_chunk_size(rows); self }
    pub fn codec(mut self, codec: Codec) -> Self { self.opts = self.opts.with_codec(codec); self }
    pub fn read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_read_buffer(bytes); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }

    /// Run the whole scan-filter-flush pipeline with the given vocabulary.
    ///
    /// Fatal errors (missing input root, unwritable output root) abort
    /// before any processing; everything downstream is recovered per unit
    /// and reported in the summary.
    pub fn run(self, vocab: &Vocabulary) -> Result<RunSummary> {
        init_tracing_once();

        if !self.opts.input_root.is_dir() {
            bail!("input root not found: {}", self.opts.input_root.display());
        }
        fs::create_dir_all(&self.opts.output_root)
            .with_context(|| format!("create output root {}", self.opts.output_root.display()))?;

        let pattern = CompiledPattern::new(vocab);
        let jobs = discover_jobs(&self.opts.input_root);
        if jobs.is_empty() {
            tracing::warn!(
                "no part_*/ *.csv.gz files under {}; check the input root",
                self.opts.input_root.display()
            );
        } else {
            tracing::info!("planned {} input files", jobs.len());
        }

        let pb = if self.opts.progress {
            Some(make_progress_bar_labeled(
                total_compressed_size(&jobs),
                self.opts.progress_label.as_deref(),
            ))
        } else {
            None
        };

        let mut acc = PartitionAccumulator::new(&self.opts.output_root, self.opts.codec);
        let mut summary = RunSummary::default();

        for job in &jobs {
            let mut scanned_in_file = 0u64;
            let mut matched_in_file = 0u64;
            let res = stream_job(job, self.opts.chunk_size, self.opts.read_buffer_bytes, |batch| {
                scanned_in_file += batch.len() as u64;
                let kept = filter_batch(batch, &pattern);
                matched_in_file += kept.len() as u64;
                acc.push(kept);
                Ok(())
            });

            if let Some(pb) = &pb {
                pb.inc(fs::metadata(&job.path).map(|m| m.len()).unwrap_or(0));
            }

            match res {
                Ok(scanned) => {
                    summary.rows_scanned += scanned;
                    summary.rows_matched += matched_in_file;
                    summary.units.push(UnitOutcome::Processed {
                        path: job.path.clone(),
                        rows_scanned: scanned,
                        rows_matched: matched_in_file,
                    });
                }
                Err(e) => {
                    // One bad unit never aborts the run. Batches already
                    // delivered from this file stay buffered, so both their
                    // scan and match counts stay in the aggregate.
                    tracing::warn!("skipping {}: {:#}", job.path.display(), e);
                    summary.rows_scanned += scanned_in_file;
                    summary.rows_matched += matched_in_file;
                    summary.units.push(UnitOutcome::Skipped {
                        path: job.path.clone(),
                        reason: format!("{:#}", e),
                    });
                }
            }
        }

        summary.flushes = acc.finish();
        if let Some(pb) = &pb {
            pb.finish_with_message(format!(
                "{} rows matched of {} scanned",
                summary.rows_matched, summary.rows_scanned
            ));
        }
        tracing::info!(
            "run complete: {} files processed, {} skipped, {} partitions written, {} failed",
            summary.files_processed(),
            summary.files_skipped(),
            summary.partitions_written().len(),
            summary.partitions_failed().len()
        );
        Ok(summary)
    }
}
