mod accumulator;
mod config;
mod counting;
mod dedupe;
mod filter;
mod mem;
mod parquet_io;
mod pipeline;
mod progress;
mod row;
mod source;
mod util;
mod vocab;

pub use crate::config::{Codec, FilterOptions};
pub use crate::pipeline::{RunSummary, TweetFilter, UnitOutcome};
pub use crate::row::{Row, RowBatch, DEFAULT_CHUNK_SIZE, PROJECTED_COLUMNS};
pub use crate::vocab::{
    compile_pattern, price_pattern, CompiledPattern, Vocabulary,
    BET_VERBS, KALSHI_TERMS, MARKET_TERMS, POSITION_TERMS, PRICE_TERMS,
};

// Source and filter stages, usable standalone.
pub use crate::filter::{filter_batch, matching_mask};
pub use crate::source::{discover_jobs, stream_job, FileJob};

// Accumulator is exposed so callers can drive their own batch sequences.
pub use crate::accumulator::{FlushRecord, PartitionAccumulator};

// Post-processing reporters.
pub use crate::counting::{count_matching, parquet_files, row_counts, total_rows};
pub use crate::dedupe::{dedupe_clean, DedupeSummary, RETWEET_PREFIX};

// Columnar read/write helpers (also used by tests).
pub use crate::parquet_io::{file_row_count, read_rows, row_schema, write_rows};

// Memory helpers for adaptive throttling from binaries.
pub use crate::mem::{available_memory_fraction, is_low_memory};

// Robust file ops so binaries can import from the crate root.
pub use crate::util::{create_with_backoff, init_tracing_once, open_with_backoff};
