//! Parquet read/write for `Row` columns.
//!
//! Schema: `(id: utf8, epoch: i64?, rawContent: utf8?, hashtags: list<utf8>,
//! links: list<utf8>, retweetCount: i64?, likeCount: i64?, lang: utf8?,
//! user: utf8?)`. The identifier column is always string-typed.

use crate::config::Codec;
use crate::row::Row;
use crate::util::{create_with_backoff, open_with_backoff};
use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Int64Array, ListArray, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::path::Path;
use std::sync::Arc;

fn list_field(name: &str) -> Field {
    Field::new(name, DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))), false)
}

/// The Arrow schema of one output unit.
pub fn row_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("epoch", DataType::Int64, true),
        Field::new("rawContent", DataType::Utf8, true),
        list_field("hashtags"),
        list_field("links"),
        Field::new("retweetCount", DataType::Int64, true),
        Field::new("likeCount", DataType::Int64, true),
        Field::new("lang", DataType::Utf8, true),
        Field::new("user", DataType::Utf8, true),
    ]))
}

fn compression_for(codec: Codec) -> Compression {
    match codec {
        Codec::Zstd => Compression::ZSTD(Default::default()),
        Codec::Snappy => Compression::SNAPPY,
        Codec::Uncompressed => Compression::UNCOMPRESSED,
    }
}

fn list_array<'a>(rows: &'a [Row], get: impl Fn(&'a Row) -> &'a [String]) -> ArrayRef {
    let mut builder = ListBuilder::new(StringBuilder::new());
    for row in rows {
        for item in get(row) {
            builder.values().append_value(item);
        }
        builder.append(true);
    }
    Arc::new(builder.finish())
}

fn rows_to_batch(rows: &[Row]) -> Result<RecordBatch> {
    let schema = row_schema();

    let id: ArrayRef = Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.id.as_str())));
    let epoch: ArrayRef = Arc::new(Int64Array::from_iter(rows.iter().map(|r| r.epoch)));
    let raw: ArrayRef = Arc::new(StringArray::from_iter(rows.iter().map(|r| r.raw_content.as_deref())));
    let hashtags = list_array(rows, |r| &r.hashtags);
    let links = list_array(rows, |r| &r.links);
    let retweets: ArrayRef = Arc::new(Int64Array::from_iter(rows.iter().map(|r| r.retweet_count)));
    let likes: ArrayRef = Arc::new(Int64Array::from_iter(rows.iter().map(|r| r.like_count)));
    let lang: ArrayRef = Arc::new(StringArray::from_iter(rows.iter().map(|r| r.lang.as_deref())));
    let user: ArrayRef = Arc::new(StringArray::from_iter(rows.iter().map(|r| r.user.as_deref())));

    Ok(RecordBatch::try_new(
        schema,
        vec![id, epoch, raw, hashtags, links, retweets, likes, lang, user],
    )?)
}

/// Write `rows` to a single Parquet file, truncating any previous file at
/// the same path. Write-once per run; re-runs overwrite.
pub fn write_rows(path: &Path, rows: &[Row], codec: Codec) -> Result<()> {
    let props = WriterProperties::builder()
        .set_compression(compression_for(codec))
        .build();
    let file = create_with_backoff(path, 16, 50)
        .with_context(|| format!("create {}", path.display()))?;
    let batch = rows_to_batch(rows)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .with_context(|| format!("open parquet writer for {}", path.display()))?;
    writer.write(&batch).with_context(|| format!("write {}", path.display()))?;
    writer.close().with_context(|| format!("close {}", path.display()))?;
    Ok(())
}

/// Row count from footer metadata only; no row group is decompressed.
pub fn file_row_count(path: &Path) -> Result<u64> {
    let file = open_with_backoff(path, 16, 50)
        .with_context(|| format!("open {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("read parquet footer of {}", path.display()))?;
    Ok(builder.metadata().file_metadata().num_rows() as u64)
}

fn string_at(col: &StringArray, i: usize) -> Option<String> {
    if col.is_null(i) { None } else { Some(col.value(i).to_string()) }
}

fn int_at(col: &Int64Array, i: usize) -> Option<i64> {
    if col.is_null(i) { None } else { Some(col.value(i)) }
}

fn strings_at(col: &ListArray, i: usize) -> Vec<String> {
    let values = col.value(i);
    let Some(items) = values.as_any().downcast_ref::<StringArray>() else {
        return Vec::new();
    };
    (0..items.len())
        .filter(|&j| !items.is_null(j))
        .map(|j| items.value(j).to_string())
        .collect()
}

macro_rules! column_as {
    ($batch:expr, $name:expr, $ty:ty) => {
        $batch
            .column_by_name($name)
            .and_then(|c| c.as_any().downcast_ref::<$ty>())
            .with_context(|| format!("column `{}` missing or mistyped", $name))?
    };
}

/// Read a whole output unit back into memory. Used by the dedup/clean job
/// and tests; the counters never need this.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let file = open_with_backoff(path, 16, 50)
        .with_context(|| format!("open {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("read parquet footer of {}", path.display()))?
        .build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch.with_context(|| format!("decode {}", path.display()))?;
        let id = column_as!(batch, "id", StringArray);
        let epoch = column_as!(batch, "epoch", Int64Array);
        let raw = column_as!(batch, "rawContent", StringArray);
        let hashtags = column_as!(batch, "hashtags", ListArray);
        let links = column_as!(batch, "links", ListArray);
        let retweets = column_as!(batch, "retweetCount", Int64Array);
        let likes = column_as!(batch, "likeCount", Int64Array);
        let lang = column_as!(batch, "lang", StringArray);
        let user = column_as!(batch, "user", StringArray);

        for i in 0..batch.num_rows() {
            rows.push(Row {
                id: id.value(i).to_string(),
                epoch: int_at(epoch, i),
                raw_content: string_at(raw, i),
                hashtags: strings_at(hashtags, i),
                links: strings_at(links, i),
                retweet_count: int_at(retweets, i),
                like_count: int_at(likes, i),
                lang: string_at(lang, i),
                user: string_at(user, i),
            });
        }
    }
    Ok(rows)
}

/// Stream the raw-text column of one file, invoking `on_text` for every
/// non-null value. Used by the keyword counter.
pub fn for_each_text(path: &Path, mut on_text: impl FnMut(&str)) -> Result<()> {
    let file = open_with_backoff(path, 16, 50)
        .with_context(|| format!("open {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("read parquet footer of {}", path.display()))?
        .build()?;
    for batch in reader {
        let batch = batch.with_context(|| format!("decode {}", path.display()))?;
        let raw = column_as!(batch, "rawContent", StringArray);
        for i in 0..batch.num_rows() {
            if !raw.is_null(i) {
                on_text(raw.value(i));
            }
        }
    }
    Ok(())
}
