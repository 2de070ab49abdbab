//! `ocr-score` — similarity scoring for OCR transcriptions.
//!
//! Compares an OCR transcription with its expected ground-truth text and
//! produces four complementary scores per pair:
//!
//! - longest match — longest common substring length
//! - LCS — longest common subsequence length
//! - smart distance — Levenshtein distance after cancelling shared words
//! - composite — exact-containment / best-word / whole-text decision
//!
//! The engine lives in [`score`] and is pure. [`batch`] scores row-aligned
//! collections, optionally on the rayon pool. [`server`] exposes the scorers
//! as JSON-RPC 2.0 tools over stdio.
//!
//! # Architecture
//!
//! ```text
//! stdin (JSON-RPC) → server → ToolRouter → BatchScorer → Scorer
//!                                                          ├─ substring
//!                                                          ├─ lcs (LcsStrategy)
//!                                                          ├─ smart ─ tokens + levenshtein
//!                                                          └─ composite
//! stdout (JSON-RPC) ←──────────────────────────────────────┘
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod score;
pub mod server;
pub mod tools;

pub use batch::{score_batch, BatchScorer};
pub use config::ScoreConfig;
pub use error::{ScoreError, ScoreResult};
pub use score::{score_row, ScoreRecord, ScoreTuple, Scorer};
pub use server::run_server;
