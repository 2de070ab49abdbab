//! Tool router — registers and dispatches scoring tool calls.
//!
//! Each tool takes JSON arguments and returns a [`ToolCallResult`] whose text
//! is the JSON-encoded score. Argument errors surface as
//! [`ScoreError::Json`]; scoring failures the client can act on (a
//! misaligned batch or an oversized text) come back as `isError` results
//! instead.

pub mod metrics;
pub mod score;

use serde::Serialize;
use tracing::debug;

use crate::batch::BatchScorer;
use crate::config::ScoreConfig;
use crate::error::{ScoreError, ScoreResult};
use crate::score::LcsStrategy;
use crate::server::{ToolCallResult, ToolDefinition};

/// Maximum character count of any text a tool will score.
///
/// The scorers are quadratic or worse in text length; longer inputs are
/// rejected with an error result instead of being computed.
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Reject the call if any text exceeds [`MAX_TEXT_CHARS`].
fn check_text_len<'a>(texts: impl IntoIterator<Item = &'a str>) -> ScoreResult<()> {
    for text in texts {
        let chars = text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(ScoreError::TextTooLong {
                chars,
                max: MAX_TEXT_CHARS,
            });
        }
    }
    Ok(())
}

/// Schema for a tool taking two text arguments.
fn pair_schema(first: &str, first_desc: &str, second: &str, second_desc: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            first: { "type": "string", "description": first_desc },
            second: { "type": "string", "description": second_desc }
        },
        "required": [first, second]
    })
}

/// Serialize a tool's output as the text of a successful result.
fn json_result(value: &impl Serialize) -> ScoreResult<ToolCallResult> {
    Ok(ToolCallResult::text(serde_json::to_string(value)?))
}

/// Tool router that dispatches tool calls to the scorers.
pub struct ToolRouter {
    batch: BatchScorer<Box<dyn LcsStrategy>>,
}

impl ToolRouter {
    /// Create a router scoring with the configured strategy.
    pub fn new(config: &ScoreConfig) -> Self {
        Self {
            batch: BatchScorer::from_config(config),
        }
    }

    /// List all available tools with their JSON Schema definitions.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![
            score::score_pair_definition(),
            score::score_batch_definition(),
            score::composite_definition(),
            metrics::longest_match_definition(),
            metrics::lcs_definition(),
            metrics::cancel_words_definition(),
            metrics::smart_distance_definition(),
        ]
    }

    /// Call a tool by name with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Json`] if the arguments do not match the tool's
    /// schema.
    pub fn call_tool(&self, name: &str, arguments: serde_json::Value) -> ScoreResult<ToolCallResult> {
        debug!(tool = name, "dispatching tool call");

        match name {
            "score_pair" => score::score_pair(self.batch.scorer(), arguments),
            "score_batch" => score::score_batch(&self.batch, arguments),
            "composite" => score::composite(self.batch.scorer(), arguments),
            "longest_match" => metrics::longest_match(arguments),
            "lcs" => metrics::lcs(self.batch.scorer(), arguments),
            "cancel_words" => metrics::cancel_words(arguments),
            "smart_distance" => metrics::smart_distance(arguments),
            _ => Ok(ToolCallResult::error(format!("unknown tool: {name}"))),
        }
    }
}

impl From<ScoreError> for ToolCallResult {
    fn from(e: ScoreError) -> Self {
        ToolCallResult::error(e)
    }
}
