//! The match filter: a pure per-batch verdict over the raw-text field.

use crate::row::{Row, RowBatch};
use crate::vocab::CompiledPattern;

/// Per-row verdict text: the raw-text field with null/missing as "".
#[inline]
fn verdict_text(row: &Row) -> &str {
    row.raw_content.as_deref().unwrap_or("")
}

/// Compute the boolean mask over a batch: true where the row's text matches
/// the vocabulary alternation or the numeric/currency pattern.
pub fn matching_mask(batch: &RowBatch, pattern: &CompiledPattern) -> Vec<bool> {
    batch.rows.iter().map(|r| pattern.is_match(verdict_text(r))).collect()
}

/// Select the matching subsequence of a batch, preserving row order.
/// Consumes the batch; the result carries the same partition tag.
pub fn filter_batch(batch: RowBatch, pattern: &CompiledPattern) -> RowBatch {
    let RowBatch { part, rows } = batch;
    let rows = rows
        .into_iter()
        .filter(|r| pattern.is_match(verdict_text(r)))
        .collect();
    RowBatch { part, rows }
}
