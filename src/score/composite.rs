//! Composite score: picks a comparison strategy from the shape of the
//! expected text.
//!
//! The decision has three branches, captured by [`CompositeOutcome`]:
//!
//! 1. `Contained` — the expected text occurs verbatim in the OCR text. This
//!    check is case-sensitive, unlike every other comparison in the engine.
//! 2. `SingleWord` — the expected text is one word. The OCR word with the
//!    longest LCS against it is picked and compared with [`smart_distance`].
//! 3. `MultiWord` — the texts are compared whole with [`smart_distance`].

use serde::Serialize;
use tracing::debug;

use super::lcs::LcsStrategy;
use super::smart::smart_distance;

/// Which branch produced a composite score, with its intermediate result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "branch", rename_all = "snake_case")]
pub enum CompositeOutcome {
    /// Expected text is a substring of the OCR text.
    Contained,
    /// Expected text is a single word; `best_match` is the chosen OCR word
    /// (empty when no OCR word shares a character with it).
    SingleWord { best_match: String, distance: usize },
    /// Expected text has zero or several words.
    MultiWord { distance: usize },
}

impl CompositeOutcome {
    /// The integer score for this outcome.
    pub fn score(&self) -> usize {
        match self {
            Self::Contained => 0,
            Self::SingleWord { distance, .. } | Self::MultiWord { distance } => *distance,
        }
    }
}

/// Run the three-way decision for `expected` against `ocr`.
pub fn decide<L: LcsStrategy + ?Sized>(lcs: &L, expected: &str, ocr: &str) -> CompositeOutcome {
    if ocr.contains(expected) {
        debug!("expected text contained in OCR text");
        return CompositeOutcome::Contained;
    }

    let mut expected_words = expected.split_whitespace();
    if expected_words.next().is_some() && expected_words.next().is_none() {
        let best_match = best_matching_word(lcs, expected, ocr);
        let distance = smart_distance(&best_match, expected);
        debug!(best_match = %best_match, distance, "single-word match");
        return CompositeOutcome::SingleWord {
            best_match,
            distance,
        };
    }

    CompositeOutcome::MultiWord {
        distance: smart_distance(ocr, expected),
    }
}

/// First OCR word whose LCS with `expected` is strictly longest.
fn best_matching_word<L: LcsStrategy + ?Sized>(lcs: &L, expected: &str, ocr: &str) -> String {
    let mut best = "";
    let mut best_len = 0;
    for word in ocr.split_whitespace() {
        let len = lcs.lcs(word, expected).chars().count();
        if len > best_len {
            best_len = len;
            best = word;
        }
    }
    best.to_owned()
}
