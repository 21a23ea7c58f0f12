//! Keyword vocabulary and pattern compilation: five curated groups of
//! finance/market/betting phrases, compiled into one case-insensitive
//! whole-word alternation, plus the secondary cent/dollar amount pattern.

use regex::Regex;

/// Platform identity terms (exchange names, cashtags, branded hashtags).
pub const KALSHI_TERMS: &[&str] = &[
    "kalshi", "kalshiex", "trade on kalshi",
    "#kalshi", "#kalshimarkets",
    "event contract", "event contracts",
    "kalshi exchange", "kalshi market",
    "kalshi contract",
];

/// Action terms: verbs and slang around placing bets / taking trades.
pub const BET_VERBS: &[&str] = &[
    "bet", "betting", "wager", "odds", "chance",
    "line", "spread", "stake",
    "shares", "buy shares", "sell shares",
    "contract", "contracts",
    "gamble", "speculate", "trade", "investment",
    "predict", "prediction", "long", "short",
    "positions", "yolo", "degens", "trading", "trader",
];

/// Price terms: cost, payout and P&L vocabulary.
pub const PRICE_TERMS: &[&str] = &[
    "price", "price per share", "cost", "value now",
    "payout", "paid out", "payout if win", "payouts",
    "cash out", "exit", "profit", "loss", "return", "apy",
    "entry", "exit", "bid", "ask", "spread", "volatility",
    "premium",
];

/// Position lifecycle terms.
pub const POSITION_TERMS: &[&str] = &[
    "position", "positions", "open position", "close position",
    "won", "break-even", "hedge", "liquidate",
];

/// Market microstructure terms (used standalone by the keyword counter).
pub const MARKET_TERMS: &[&str] = &[
    "market", "markets", "exchange", "liquidity", "volume",
    "price action", "fluctuation", "manipulate the odds", "pump", "dump",
];

/// An ordered set of keyword groups. Groups are kept separate so reporters
/// can target a single group (e.g. market terms only) while the filter
/// matches the union.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    pub identity: Vec<String>,
    pub actions: Vec<String>,
    pub prices: Vec<String>,
    pub positions: Vec<String>,
    pub markets: Vec<String>,
}

impl Vocabulary {
    /// The curated finance/betting vocabulary used by the original study.
    pub fn default_finance() -> Self {
        let owned = |g: &[&str]| g.iter().map(|s| s.to_string()).collect();
        Self {
            identity: owned(KALSHI_TERMS),
            actions: owned(BET_VERBS),
            prices: owned(PRICE_TERMS),
            positions: owned(POSITION_TERMS),
            markets: owned(MARKET_TERMS),
        }
    }

    /// Build a vocabulary from arbitrary groups (mainly for tests and
    /// alternative studies). Group order is preserved in the alternation;
    /// missing trailing groups are empty.
    pub fn from_groups<I, S>(groups: &[I]) -> Self
    where
        I: AsRef<[S]>,
        S: AsRef<str>,
    {
        let take = |i: usize| -> Vec<String> {
            groups
                .get(i)
                .map(|g| g.as_ref().iter().map(|s| s.as_ref().to_string()).collect())
                .unwrap_or_default()
        };
        Self {
            identity: take(0),
            actions: take(1),
            prices: take(2),
            positions: take(3),
            markets: take(4),
        }
    }

    /// All phrases in group order, as fed to `compile_pattern`.
    pub fn all_phrases(&self) -> Vec<&str> {
        self.identity
            .iter()
            .chain(self.actions.iter())
            .chain(self.prices.iter())
            .chain(self.positions.iter())
            .chain(self.markets.iter())
            .map(|s| s.as_str())
            .collect()
    }
}

/// Compile a phrase list into one case-insensitive, whole-word alternation.
/// Every phrase is escaped for literal matching, so the alternation cannot
/// backtrack pathologically. An empty list compiles to a pattern that
/// matches nothing (by construction, not an error).
pub fn compile_pattern<S: AsRef<str>>(phrases: &[S]) -> Regex {
    if phrases.is_empty() {
        // \b\B is unsatisfiable: no position is both a boundary and not one.
        return Regex::new(r"\b\B").unwrap();
    }
    let tokens: Vec<String> = phrases.iter().map(|p| regex::escape(p.as_ref())).collect();
    Regex::new(&format!(r"(?i)\b({})\b", tokens.join("|"))).unwrap()
}

/// Secondary numeric pattern: cent amounts ("75¢", "12c") and dollar
/// amounts ("$5.00", "$1.2k").
pub fn price_pattern() -> Regex {
    Regex::new(r"(?i)\b\d{1,3}(\.\d{1,2})?¢|\b\d{1,2}c\b|\$\d{1,3}(\.\d{1,2})?k?\b").unwrap()
}

/// The static matching rule for one run: vocabulary alternation OR'd with
/// the numeric/currency pattern. Built once, shared by reference.
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    vocab: Regex,
    price: Regex,
}

impl CompiledPattern {
    pub fn new(vocab: &Vocabulary) -> Self {
        Self {
            vocab: compile_pattern(&vocab.all_phrases()),
            price: price_pattern(),
        }
    }

    /// Pair an arbitrary phrase pattern with an arbitrary numeric pattern.
    pub fn from_parts(vocab: Regex, price: Regex) -> Self {
        Self { vocab, price }
    }

    /// The per-row verdict. `text` is matched lower-cased; callers pass the
    /// raw-text field with null/missing already mapped to "".
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.vocab.is_match(&lowered) || self.price.is_match(&lowered)
    }
}
