//! Single-metric tools for inspecting one scorer at a time.

use serde::{Deserialize, Serialize};

use crate::error::ScoreResult;
use crate::score::{self, LcsStrategy, Scorer};
use crate::server::{ToolCallResult, ToolDefinition};

/// Two texts to compare.
#[derive(Debug, Deserialize)]
pub struct TextPair {
    pub a: String,
    pub b: String,
}

impl TextPair {
    /// Parse the arguments and enforce the text size limit.
    fn parse(arguments: serde_json::Value) -> ScoreResult<Result<Self, ToolCallResult>> {
        let pair: Self = serde_json::from_value(arguments)?;
        Ok(match super::check_text_len([pair.a.as_str(), pair.b.as_str()]) {
            Ok(()) => Ok(pair),
            Err(e) => Err(e.into()),
        })
    }
}

/// A matched string with its length in characters.
#[derive(Debug, Serialize)]
struct MatchOutput {
    text: String,
    length: usize,
}

impl MatchOutput {
    fn new(text: String) -> Self {
        let length = text.chars().count();
        Self { text, length }
    }
}

#[derive(Debug, Serialize)]
struct CancelOutput {
    a: String,
    b: String,
}

fn definition(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition {
        name: name.to_owned(),
        description: description.to_owned(),
        input_schema: super::pair_schema("a", "First text", "b", "Second text"),
    }
}

pub fn longest_match_definition() -> ToolDefinition {
    definition(
        "longest_match",
        "Longest contiguous run of characters shared by both texts (case-insensitive).",
    )
}

pub fn lcs_definition() -> ToolDefinition {
    definition(
        "lcs",
        "Longest common subsequence of both texts (case-insensitive).",
    )
}

pub fn cancel_words_definition() -> ToolDefinition {
    definition(
        "cancel_words",
        "Remove one occurrence of each whitespace-delimited word shared by both texts.",
    )
}

pub fn smart_distance_definition() -> ToolDefinition {
    definition(
        "smart_distance",
        "Levenshtein distance after lowercasing, cancelling shared words and stripping spaces.",
    )
}

/// Execute `longest_match`.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn longest_match(arguments: serde_json::Value) -> ScoreResult<ToolCallResult> {
    let TextPair { a, b } = match TextPair::parse(arguments)? {
        Ok(pair) => pair,
        Err(rejected) => return Ok(rejected),
    };
    super::json_result(&MatchOutput::new(score::longest_match(&a, &b)))
}

/// Execute `lcs`.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn lcs<L: LcsStrategy>(
    scorer: &Scorer<L>,
    arguments: serde_json::Value,
) -> ScoreResult<ToolCallResult> {
    let TextPair { a, b } = match TextPair::parse(arguments)? {
        Ok(pair) => pair,
        Err(rejected) => return Ok(rejected),
    };
    super::json_result(&MatchOutput::new(scorer.lcs(&a, &b)))
}

/// Execute `cancel_words`.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn cancel_words(arguments: serde_json::Value) -> ScoreResult<ToolCallResult> {
    let TextPair { a, b } = match TextPair::parse(arguments)? {
        Ok(pair) => pair,
        Err(rejected) => return Ok(rejected),
    };
    let (a, b) = score::cancel_common_words(&a, &b);
    super::json_result(&CancelOutput { a, b })
}

/// Execute `smart_distance`.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn smart_distance(arguments: serde_json::Value) -> ScoreResult<ToolCallResult> {
    let TextPair { a, b } = match TextPair::parse(arguments)? {
        Ok(pair) => pair,
        Err(rejected) => return Ok(rejected),
    };
    super::json_result(&score::smart_distance(&a, &b))
}
