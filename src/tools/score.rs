//! Whole-pair and batch scoring tools.

use serde::{Deserialize, Serialize};

use crate::batch::BatchScorer;
use crate::error::ScoreResult;
use crate::score::{CompositeOutcome, LcsStrategy, Scorer};
use crate::server::{ToolCallResult, ToolDefinition};

/// Arguments naming an expected text and its OCR transcription.
#[derive(Debug, Deserialize)]
pub struct PairParams {
    pub expected: String,
    pub ocr: String,
}

/// Row-aligned expected and OCR texts.
#[derive(Debug, Deserialize)]
pub struct BatchParams {
    pub expected: Vec<String>,
    pub ocr: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CompositeOutput {
    score: usize,
    #[serde(flatten)]
    outcome: CompositeOutcome,
}

pub fn score_pair_definition() -> ToolDefinition {
    ToolDefinition {
        name: "score_pair".to_owned(),
        description: "Score an OCR transcription against its expected text. Returns the longest \
            common substring length, LCS length, word-aware edit distance and composite score."
            .to_owned(),
        input_schema: super::pair_schema(
            "expected",
            "Ground-truth text",
            "ocr",
            "OCR transcription",
        ),
    }
}

pub fn score_batch_definition() -> ToolDefinition {
    ToolDefinition {
        name: "score_batch".to_owned(),
        description: "Score row-aligned lists of expected texts and OCR transcriptions. \
            Both lists must have the same length; results keep input order."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "expected": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Ground-truth texts, one per row"
                },
                "ocr": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "OCR transcriptions, one per row"
                }
            },
            "required": ["expected", "ocr"]
        }),
    }
}

pub fn composite_definition() -> ToolDefinition {
    ToolDefinition {
        name: "composite".to_owned(),
        description: "Composite score only, with the decision branch taken \
            (contained, single_word or multi_word)."
            .to_owned(),
        input_schema: super::pair_schema(
            "expected",
            "Ground-truth text",
            "ocr",
            "OCR transcription",
        ),
    }
}

/// Execute `score_pair`.
///
/// # Errors
///
/// Returns an error if the arguments are malformed. Oversized texts are
/// reported as an error result.
pub fn score_pair<L: LcsStrategy>(
    scorer: &Scorer<L>,
    arguments: serde_json::Value,
) -> ScoreResult<ToolCallResult> {
    let params: PairParams = serde_json::from_value(arguments)?;
    if let Err(e) = super::check_text_len([params.expected.as_str(), params.ocr.as_str()]) {
        return Ok(e.into());
    }
    super::json_result(&scorer.score_record(&params.expected, &params.ocr))
}

/// Execute `score_batch`.
///
/// # Errors
///
/// Returns an error if the arguments are malformed. A row count mismatch is
/// reported as an error result, as are oversized texts.
pub fn score_batch<L: LcsStrategy>(
    batch: &BatchScorer<L>,
    arguments: serde_json::Value,
) -> ScoreResult<ToolCallResult> {
    let params: BatchParams = serde_json::from_value(arguments)?;
    let texts = params.expected.iter().chain(&params.ocr).map(String::as_str);
    if let Err(e) = super::check_text_len(texts) {
        return Ok(e.into());
    }
    match batch.score(&params.expected, &params.ocr) {
        Ok(records) => super::json_result(&records),
        Err(e) => Ok(e.into()),
    }
}

/// Execute `composite`.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn composite<L: LcsStrategy>(
    scorer: &Scorer<L>,
    arguments: serde_json::Value,
) -> ScoreResult<ToolCallResult> {
    let params: PairParams = serde_json::from_value(arguments)?;
    if let Err(e) = super::check_text_len([params.expected.as_str(), params.ocr.as_str()]) {
        return Ok(e.into());
    }
    let outcome = scorer.composite_outcome(&params.expected, &params.ocr);
    super::json_result(&CompositeOutput {
        score: outcome.score(),
        outcome,
    })
}
