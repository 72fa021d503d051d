// src/ingest/types.rs
// Transcription engine output and ingestion errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Segment as produced by a transcription engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsrSegment {
    /// Engine-local sequence number
    pub id: i32,
    pub start: f32,
    pub end: f32,
    pub tokens: Vec<i32>,
    /// Model text, may contain `<|...|>` control tokens
    pub text: String,
}

/// Full result of one transcription run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsrResult {
    /// Detected language (e.g., "en", "de")
    pub language: String,
    pub segments: Vec<AsrSegment>,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Transcription engine error: {0}")]
    Engine(String),

    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    #[error("Import pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
