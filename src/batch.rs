//! Batch scoring over row-aligned expected/OCR collections.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::ScoreConfig;
use crate::error::{ScoreError, ScoreResult};
use crate::score::{LcsStrategy, ScoreRecord, Scorer, TableLcs};

/// Scores row-aligned text collections.
pub struct BatchScorer<L> {
    scorer: Scorer<L>,
    parallel: bool,
}

impl BatchScorer<Box<dyn LcsStrategy>> {
    /// Build a batch scorer from configuration.
    pub fn from_config(config: &ScoreConfig) -> Self {
        Self::new(Scorer::new(config.lcs_strategy.build()), config.parallel)
    }
}

impl<L: LcsStrategy> BatchScorer<L> {
    pub fn new(scorer: Scorer<L>, parallel: bool) -> Self {
        Self { scorer, parallel }
    }

    /// The per-pair scorer.
    pub fn scorer(&self) -> &Scorer<L> {
        &self.scorer
    }

    /// Score every `(expected[i], ocr[i])` pair, preserving row order.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::RowCountMismatch`] when the collections differ
    /// in length. Nothing is scored in that case.
    pub fn score<S: AsRef<str> + Sync>(
        &self,
        expected: &[S],
        ocr: &[S],
    ) -> ScoreResult<Vec<ScoreRecord>> {
        if expected.len() != ocr.len() {
            warn!(
                expected = expected.len(),
                ocr = ocr.len(),
                "refusing to score misaligned batch"
            );
            return Err(ScoreError::RowCountMismatch {
                expected: expected.len(),
                ocr: ocr.len(),
            });
        }

        debug!(rows = expected.len(), parallel = self.parallel, "scoring batch");

        let score = |(e, o): (&S, &S)| self.scorer.score_record(e.as_ref(), o.as_ref());
        let records = if self.parallel {
            expected.par_iter().zip(ocr.par_iter()).map(score).collect()
        } else {
            expected.iter().zip(ocr.iter()).map(score).collect()
        };

        Ok(records)
    }
}

/// Score a batch sequentially with the default strategy.
///
/// # Errors
///
/// Returns [`ScoreError::RowCountMismatch`] when the collections differ in
/// length.
pub fn score_batch<S: AsRef<str> + Sync>(
    expected: &[S],
    ocr: &[S],
) -> ScoreResult<Vec<ScoreRecord>> {
    BatchScorer::new(Scorer::new(TableLcs), false).score(expected, ocr)
}
