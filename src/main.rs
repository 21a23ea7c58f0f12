use anyhow::Result;
use tweetl::{
    compile_pattern, count_matching, dedupe_clean, row_counts, Codec, TweetFilter, Vocabulary,
    MARKET_TERMS,
};
use std::path::PathBuf;

const INPUT_ROOT: &str = "./data";
const OUTPUT_ROOT: &str = "./filtered_tweets";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| INPUT_ROOT.to_string()));
    let output = PathBuf::from(args.next().unwrap_or_else(|| OUTPUT_ROOT.to_string()));

    let vocab = Vocabulary::default_finance();
    let summary = TweetFilter::new()
        .input_root(&input)
        .output_root(&output)
        .codec(Codec::Zstd)
        .progress(true)
        .progress_label("Filtering tweets")
        .run(&vocab)?;

    println!(
        "{} rows matched of {} scanned ({} files, {} skipped)",
        summary.rows_matched,
        summary.rows_scanned,
        summary.files_processed(),
        summary.files_skipped()
    );
    for (part, err) in summary.partitions_failed() {
        println!("  flush failed for {part}: {err}");
    }

    // Reporter 1: per-partition row counts from Parquet footers.
    let counts = row_counts(&output)?;
    let mut total = 0u64;
    for (name, n) in &counts {
        println!("{name:<24} {n:>12}");
        total += n;
    }
    println!("{:-<38}", "");
    println!("{:<24} {total:>12}", "GRAND TOTAL");

    // Reporter 2: unique, non-retweet copy of the dataset.
    let cleaned = output.join("no_retweets");
    let ded = dedupe_clean(&output, &cleaned, Codec::Zstd)?;
    println!("non-RT unique rows: {}", ded.rows_out);

    // Reporter 3: how often market terms alone show up.
    let market = compile_pattern(MARKET_TERMS);
    println!("market-term rows: {}", count_matching(&output, &market)?);

    Ok(())
}
