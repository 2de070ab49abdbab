//! Error types for the ocr-score crate.

/// Scoring errors.
///
/// The scorers themselves are total: empty texts produce defined results
/// (empty match, distance 0) rather than errors.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// Expected and OCR collections are not row-aligned.
    #[error("row count mismatch: {expected} expected rows vs {ocr} OCR rows")]
    RowCountMismatch { expected: usize, ocr: usize },

    /// A text exceeds the size the tool server will score.
    #[error("text too long: {chars} chars (max {max})")]
    TextTooLong { chars: usize, max: usize },

    /// Malformed tool arguments or unserializable output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for ocr-score operations.
pub type ScoreResult<T> = Result<T, ScoreError>;
