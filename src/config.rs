use crate::row::DEFAULT_CHUNK_SIZE;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Compression codec for the Parquet output units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codec {
    Zstd,
    Snappy,
    Uncompressed,
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Zstd => write!(f, "zstd"),
            Codec::Snappy => write!(f, "snappy"),
            Codec::Uncompressed => write!(f, "uncompressed"),
        }
    }
}

impl FromStr for Codec {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zstd" => Ok(Codec::Zstd),
            "snappy" => Ok(Codec::Snappy),
            "none" | "uncompressed" => Ok(Codec::Uncompressed),
            other => Err(format!("unknown codec `{}` (expected zstd, snappy, none)", other)),
        }
    }
}

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct FilterOptions {
    pub input_root: PathBuf,      // directory tree of part_*/ *.csv.gz
    pub output_root: PathBuf,     // one <part>.parquet per partition lands here
    pub chunk_size: usize,        // max rows per batch
    pub codec: Codec,             // output compression
    pub read_buffer_bytes: usize, // BufReader capacity under the gzip decoder
    pub progress: bool,           // show progress bar
    pub progress_label: Option<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("./data"),
            output_root: PathBuf::from("./filtered"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            codec: Codec::Zstd,
            read_buffer_bytes: 256 * 1024,
            progress: true,
            progress_label: None,
        }
    }
}

impl FilterOptions {
    pub fn with_input_root(mut self, dir: impl AsRef<Path>) -> Self {
        self.input_root = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_output_root(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_root = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_chunk_size(mut self, rows: usize) -> Self {
        self.chunk_size = rows.max(1);
        self
    }
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }
    pub fn with_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
}
