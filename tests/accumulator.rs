#[path = "common/mod.rs"]
mod common;

use common::*;
use tweetl::{read_rows, Codec, PartitionAccumulator, RowBatch};

#[test]
fn out_of_order_reappearance_flushes_thrice_and_overwrites() {
    let out = tempfile::tempdir().unwrap().into_path();
    let mut acc = PartitionAccumulator::new(&out, Codec::Uncompressed);

    // Batch sequence A, A, B, B, A.
    acc.push(RowBatch::new("part_a", vec![row("a1", "kalshi")]));
    acc.push(RowBatch::new("part_a", vec![row("a2", "kalshi")]));
    acc.push(RowBatch::new("part_b", vec![row("b1", "kalshi")]));
    acc.push(RowBatch::new("part_b", vec![row("b2", "kalshi")]));
    acc.push(RowBatch::new("part_a", vec![row("a3", "kalshi")]));
    let flushes = acc.finish();

    assert_eq!(flushes.len(), 3);
    let parts: Vec<_> = flushes.iter().map(|f| f.part.as_str()).collect();
    assert_eq!(parts, vec!["part_a", "part_b", "part_a"]);
    assert!(flushes.iter().all(|f| f.ok()));

    // Two files on disk; the reappearing partition overwrote its first unit.
    let a = read_rows(&out.join("part_a.parquet")).unwrap();
    assert_eq!(a.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["a3"]);
    let b = read_rows(&out.join("part_b.parquet")).unwrap();
    assert_eq!(b.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["b1", "b2"]);
}

#[test]
fn batches_concatenate_in_arrival_order() {
    let out = tempfile::tempdir().unwrap().into_path();
    let mut acc = PartitionAccumulator::new(&out, Codec::Uncompressed);
    acc.push(RowBatch::new("part_x", vec![row("1", "t"), row("2", "t")]));
    assert_eq!(acc.buffered_rows(), 2);
    acc.push(RowBatch::new("part_x", vec![row("3", "t")]));
    assert_eq!(acc.buffered_rows(), 3);
    let flushes = acc.finish();

    assert_eq!(flushes.len(), 1);
    assert_eq!(flushes[0].rows, 3);
    let rows = read_rows(&out.join("part_x.parquet")).unwrap();
    assert_eq!(rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["1", "2", "3"]);
}

#[test]
fn empty_buffers_are_never_flushed() {
    let out = tempfile::tempdir().unwrap().into_path();
    let mut acc = PartitionAccumulator::new(&out, Codec::Uncompressed);

    // An empty batch still moves the open partition along.
    acc.push(RowBatch::new("part_a", vec![]));
    acc.push(RowBatch::new("part_b", vec![row("b1", "t")]));
    let flushes = acc.finish();

    assert_eq!(flushes.len(), 1);
    assert_eq!(flushes[0].part, "part_b");
    assert!(!out.join("part_a.parquet").exists());
}

#[test]
fn flush_failure_is_recorded_and_does_not_block_later_partitions() {
    let base = tempfile::tempdir().unwrap().into_path();
    // Output directory does not exist, so every write fails.
    let mut acc = PartitionAccumulator::new(base.join("missing").join("deeper"), Codec::Uncompressed);
    acc.push(RowBatch::new("part_a", vec![row("1", "t")]));
    acc.push(RowBatch::new("part_b", vec![row("2", "t")]));
    let flushes = acc.finish();

    assert_eq!(flushes.len(), 2);
    assert!(flushes.iter().all(|f| !f.ok()));
    // The buffer was dropped, not retried: both partitions got their turn.
    assert_eq!(flushes[0].part, "part_a");
    assert_eq!(flushes[1].part, "part_b");
}
