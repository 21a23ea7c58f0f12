use regex::Regex;
use tweetl::{compile_pattern, price_pattern, CompiledPattern, Vocabulary};

#[test]
fn whole_word_case_insensitive() {
    let re = compile_pattern(&["kalshi", "bet"]);
    assert!(re.is_match("I love KALSHI markets"));
    assert!(re.is_match("place your bet now"));
    // Whole-word only: embedded occurrences don't count.
    assert!(!re.is_match("kalshian traditions"));
    assert!(!re.is_match("alphabet soup"));
}

#[test]
fn multi_word_phrases_match() {
    let re = compile_pattern(&["event contract", "cash out"]);
    assert!(re.is_match("my first event contract paid"));
    assert!(re.is_match("time to CASH OUT"));
    assert!(!re.is_match("event contraction"));
}

#[test]
fn phrases_are_escaped_literally() {
    // A dot in a phrase must not act as a regex wildcard.
    let re = compile_pattern(&["a.b"]);
    assert!(re.is_match("see a.b here"));
    assert!(!re.is_match("see aXb here"));
}

#[test]
fn empty_keyword_set_matches_nothing() {
    let re = compile_pattern::<&str>(&[]);
    assert!(!re.is_match(""));
    assert!(!re.is_match("kalshi bet market"));

    let empty = Vocabulary::from_groups::<Vec<&str>, &str>(&[]);
    let pattern = CompiledPattern::from_parts(
        compile_pattern(&empty.all_phrases()),
        Regex::new(r"\b\B").unwrap(),
    );
    assert!(!pattern.is_match("anything at all"));
}

#[test]
fn price_amounts() {
    let re = price_pattern();
    assert!(re.is_match("the price is $5.00"));
    assert!(re.is_match("bought at 75¢ each"));
    assert!(re.is_match("12c a share"));
    assert!(re.is_match("up to $1.2k"));
    assert!(!re.is_match("hello world"));
    // Four-digit dollar amounts fall outside the pattern.
    assert!(!re.is_match("$5000"));
}

#[test]
fn verdict_is_vocabulary_or_price() {
    let vocab = Vocabulary::from_groups(&[vec!["kalshi"]]);
    let pattern = CompiledPattern::new(&vocab);

    // The three-row scenario: rows 1 and 3 match, row 2 does not.
    assert!(pattern.is_match("I love kalshi markets"));
    assert!(!pattern.is_match("hello world"));
    assert!(pattern.is_match("the price is $5.00"));
}

#[test]
fn default_vocabulary_covers_all_groups() {
    let vocab = Vocabulary::default_finance();
    let pattern = CompiledPattern::new(&vocab);
    assert!(pattern.is_match("kalshi is live"));          // identity
    assert!(pattern.is_match("I never WAGER"));           // actions
    assert!(pattern.is_match("what a payout"));           // prices
    assert!(pattern.is_match("time to hedge"));           // positions
    assert!(pattern.is_match("thin liquidity today"));    // markets
    assert!(!pattern.is_match("completely unrelated words"));
}
