//! Row data model: the fixed column projection read from every input file,
//! the in-memory `Row` record, and the bounded `RowBatch`.

use serde::Deserialize;

/// The declared column projection. Input files may carry more columns; only
/// these are read. Presence is validated once per file at source
/// construction, never per row.
pub const PROJECTED_COLUMNS: [&str; 9] = [
    "id", "epoch", "rawContent", "hashtags", "links",
    "retweetCount", "likeCount", "lang", "user",
];

/// Default batch cardinality: rows are read and filtered in chunks of this
/// size to bound memory.
pub const DEFAULT_CHUNK_SIZE: usize = 50_000;

/// One post. The identifier is an opaque string — snowflake IDs exceed
/// f64 precision, so it must never pass through a numeric type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub id: String,
    pub epoch: Option<i64>,
    pub raw_content: Option<String>,
    pub hashtags: Vec<String>,
    pub links: Vec<String>,
    pub retweet_count: Option<i64>,
    pub like_count: Option<i64>,
    pub lang: Option<String>,
    pub user: Option<String>,
}

/// Raw per-line shape as deserialized from a CSV record by header name.
/// Hashtags/links arrive as JSON list cells and are decoded afterwards.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRow {
    pub id: String,
    pub epoch: Option<i64>,
    #[serde(rename = "rawContent")]
    pub raw_content: Option<String>,
    pub hashtags: Option<String>,
    pub links: Option<String>,
    #[serde(rename = "retweetCount")]
    pub retweet_count: Option<i64>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<i64>,
    pub lang: Option<String>,
    pub user: Option<String>,
}

/// Decode a list-valued cell. Cells are JSON arrays of strings when
/// well-formed; anything else (including empty cells) decodes to empty.
fn parse_list_cell(cell: Option<&str>) -> Vec<String> {
    match cell {
        Some(s) if !s.trim().is_empty() => serde_json::from_str(s).unwrap_or_default(),
        _ => Vec::new(),
    }
}

impl From<RawRow> for Row {
    fn from(raw: RawRow) -> Self {
        Self {
            id: raw.id,
            epoch: raw.epoch,
            raw_content: raw.raw_content,
            hashtags: parse_list_cell(raw.hashtags.as_deref()),
            links: parse_list_cell(raw.links.as_deref()),
            retweet_count: raw.retweet_count,
            like_count: raw.like_count,
            lang: raw.lang,
            user: raw.user,
        }
    }
}

/// An ordered group of rows sharing one source partition tag.
#[derive(Clone, Debug)]
pub struct RowBatch {
    pub part: String,
    pub rows: Vec<Row>,
}

impl RowBatch {
    pub fn new(part: impl Into<String>, rows: Vec<Row>) -> Self {
        Self { part: part.into(), rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
