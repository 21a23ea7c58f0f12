#[path = "common/mod.rs"]
mod common;

use common::*;
use tweetl::{
    compile_pattern, count_matching, dedupe_clean, read_rows, row_counts, total_rows, write_rows,
    Codec, MARKET_TERMS,
};

#[test]
fn row_counter_is_metadata_only_and_idempotent() {
    let dir = tempfile::tempdir().unwrap().into_path();
    write_rows(
        &dir.join("part_01.parquet"),
        &[row("1", "a"), row("2", "b"), row("3", "c")],
        Codec::Zstd,
    )
    .unwrap();
    write_rows(&dir.join("part_02.parquet"), &[row("4", "d")], Codec::Zstd).unwrap();

    let first = row_counts(&dir).unwrap();
    assert_eq!(
        first,
        vec![("part_01.parquet".to_string(), 3), ("part_02.parquet".to_string(), 1)]
    );
    assert_eq!(total_rows(&dir).unwrap(), 4);

    // Same directory, same answer.
    let second = row_counts(&dir).unwrap();
    assert_eq!(first, second);
}

#[test]
fn dedupe_keeps_first_occurrence_and_drops_retweets() {
    let src = tempfile::tempdir().unwrap().into_path();
    let dst = src.join("no_retweets");

    // Files are visited sorted by name, so a.parquet's copy of id1 wins.
    write_rows(
        &src.join("a.parquet"),
        &[row("id1", "kalshi original"), row("id2", "RT @bob: kalshi repost")],
        Codec::Zstd,
    )
    .unwrap();
    write_rows(
        &src.join("b.parquet"),
        &[row("id1", "kalshi duplicate"), row("id3", "another post")],
        Codec::Zstd,
    )
    .unwrap();

    let summary = dedupe_clean(&src, &dst, Codec::Zstd).unwrap();
    assert_eq!(summary.rows_in, 4);
    assert_eq!(summary.rows_out, 2);
    assert_eq!(summary.dropped_duplicates, 1);
    assert_eq!(summary.dropped_retweets, 1);

    let a = read_rows(&dst.join("a.parquet")).unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].id, "id1");
    assert_eq!(a[0].raw_content.as_deref(), Some("kalshi original"));
    let b = read_rows(&dst.join("b.parquet")).unwrap();
    assert_eq!(b.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["id3"]);

    // Sources were never touched.
    assert_eq!(read_rows(&src.join("a.parquet")).unwrap().len(), 2);
}

#[test]
fn dedupe_retweet_prefix_is_case_insensitive() {
    let src = tempfile::tempdir().unwrap().into_path();
    let dst = src.join("cleaned");
    write_rows(
        &src.join("a.parquet"),
        &[row("1", "rt @alice lowercase"), row("2", "Rt @bob mixed"), row("3", "art @ is fine")],
        Codec::Zstd,
    )
    .unwrap();

    let summary = dedupe_clean(&src, &dst, Codec::Zstd).unwrap();
    assert_eq!(summary.dropped_retweets, 2);
    let kept = read_rows(&dst.join("a.parquet")).unwrap();
    assert_eq!(kept.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["3"]);
}

#[test]
fn dedupe_refuses_in_place_output() {
    let dir = tempfile::tempdir().unwrap().into_path();
    assert!(dedupe_clean(&dir, &dir, Codec::Zstd).is_err());
}

#[test]
fn keyword_counter_counts_market_terms_only() {
    let dir = tempfile::tempdir().unwrap().into_path();
    write_rows(
        &dir.join("part_01.parquet"),
        &[
            row("1", "the market is up"),
            row("2", "hello world"),
            row("3", "MARKETS everywhere"),
            row("4", "the marketplace"), // not a whole-word hit
        ],
        Codec::Zstd,
    )
    .unwrap();

    let market = compile_pattern(MARKET_TERMS);
    assert_eq!(count_matching(&dir, &market).unwrap(), 2);
}
