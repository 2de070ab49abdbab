//! OCR scoring engine.
//!
//! Four complementary scores per (expected, OCR) text pair:
//!
//! | Score | Module | Meaning |
//! |-------|--------|---------|
//! | longest match | [`substring`] | length of the longest common substring |
//! | LCS | [`lcs`] | length of the longest common subsequence |
//! | smart distance | [`smart`] | edit distance after cancelling shared words |
//! | composite | [`composite`] | shape-dependent choice among the above |
//!
//! Every function here is pure and deterministic. [`Scorer::score_row`] is
//! the unit of work for batch callers; rows share no state and can be scored
//! in any order or in parallel.

pub mod composite;
pub mod lcs;
pub mod levenshtein;
pub mod smart;
pub mod substring;
pub mod tokens;

use serde::{Deserialize, Serialize};

pub use composite::CompositeOutcome;
pub use lcs::{BacktraceLcs, LcsStrategy, LcsStrategyKind, TableLcs};
pub use smart::smart_distance;
pub use substring::longest_match;
pub use tokens::cancel_common_words;

/// The four scores for one text pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreTuple {
    pub longest_match: usize,
    pub lcs: usize,
    pub smart_distance: usize,
    pub composite: usize,
}

/// One scored row: the input texts plus their [`ScoreTuple`].
///
/// Field names match the columns of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub expected_text: String,
    pub ocr_text: String,
    pub score_longest_match: usize,
    pub score_lcs: usize,
    pub score_levenshtein: usize,
    pub score_algorithm1: usize,
}

impl ScoreRecord {
    pub fn new(expected: &str, ocr: &str, scores: ScoreTuple) -> Self {
        Self {
            expected_text: expected.to_owned(),
            ocr_text: ocr.to_owned(),
            score_longest_match: scores.longest_match,
            score_lcs: scores.lcs,
            score_levenshtein: scores.smart_distance,
            score_algorithm1: scores.composite,
        }
    }

    pub fn scores(&self) -> ScoreTuple {
        ScoreTuple {
            longest_match: self.score_longest_match,
            lcs: self.score_lcs,
            smart_distance: self.score_levenshtein,
            composite: self.score_algorithm1,
        }
    }
}

/// Scores text pairs with a chosen [`LcsStrategy`].
#[derive(Debug, Clone, Default)]
pub struct Scorer<L = TableLcs> {
    lcs: L,
}

impl<L: LcsStrategy> Scorer<L> {
    pub fn new(lcs: L) -> Self {
        Self { lcs }
    }

    /// LCS of `a` and `b` through this scorer's strategy.
    pub fn lcs(&self, a: &str, b: &str) -> String {
        self.lcs.lcs(a, b)
    }

    /// Composite decision for `expected` against `ocr`.
    pub fn composite_outcome(&self, expected: &str, ocr: &str) -> CompositeOutcome {
        composite::decide(&self.lcs, expected, ocr)
    }

    /// Composite score for `expected` against `ocr`.
    pub fn composite(&self, expected: &str, ocr: &str) -> usize {
        self.composite_outcome(expected, ocr).score()
    }

    /// All four scores for one pair.
    pub fn score_row(&self, expected: &str, ocr: &str) -> ScoreTuple {
        ScoreTuple {
            longest_match: longest_match(expected, ocr).chars().count(),
            lcs: self.lcs(expected, ocr).chars().count(),
            smart_distance: smart_distance(expected, ocr),
            composite: self.composite(expected, ocr),
        }
    }

    /// [`score_row`](Self::score_row) wrapped with the input texts.
    pub fn score_record(&self, expected: &str, ocr: &str) -> ScoreRecord {
        ScoreRecord::new(expected, ocr, self.score_row(expected, ocr))
    }
}

/// All four scores for one pair using the default strategy.
pub fn score_row(expected: &str, ocr: &str) -> ScoreTuple {
    Scorer::<TableLcs>::default().score_row(expected, ocr)
}

/// Composite score using the default strategy.
pub fn composite(expected: &str, ocr: &str) -> usize {
    Scorer::<TableLcs>::default().composite(expected, ocr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_row() {
        let scores = score_row("the cat sat", "the bat sat");
        assert_eq!(
            scores,
            ScoreTuple {
                longest_match: 6, // "at sat"
                lcs: 10,
                smart_distance: 1,
                composite: 1,
            }
        );
    }

    #[test]
    fn test_score_row_empty() {
        let scores = score_row("", "");
        assert_eq!(
            scores,
            ScoreTuple {
                longest_match: 0,
                lcs: 0,
                smart_distance: 0,
                composite: 0,
            }
        );
    }

    #[test]
    fn test_strategies_score_identically() {
        let table = Scorer::new(TableLcs);
        let backtrace = Scorer::new(BacktraceLcs);
        for (e, o) in [("kitten", "a sitting kitchen"), ("Hello World", "hel1o wor1d")] {
            assert_eq!(table.score_row(e, o), backtrace.score_row(e, o));
        }
    }

    #[test]
    fn test_boxed_strategy() {
        let scorer = Scorer::new(LcsStrategyKind::Backtrace.build());
        assert_eq!(scorer.composite("cat", "The CAT sat"), 0);
    }

    #[test]
    fn test_record_round_trips_scores() {
        let record = Scorer::new(TableLcs).score_record("abc", "abd");
        assert_eq!(record.expected_text, "abc");
        assert_eq!(record.ocr_text, "abd");
        assert_eq!(record.scores(), score_row("abc", "abd"));
    }
}
