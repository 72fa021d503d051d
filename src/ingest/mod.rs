// src/ingest/mod.rs
// Ingestion - builds the initial transcript from an engine run or an import

mod plain_text;
mod types;

pub use plain_text::{from_plain_text, parse_time, IMPORT_LANGUAGE};
pub use types::{AsrResult, AsrSegment, IngestError};

use crate::transcript::{IdGenerator, Segment, Transcript};
use async_trait::async_trait;
use regex::Regex;
use std::path::Path;

/// Model control tokens such as `<|startoftranscript|>` or `<|0.00|>`
const CONTROL_TOKEN_PATTERN: &str = r"<\|[^|]+\|>";

/// Speech-to-text engine producing segment lists from audio files
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribe an audio file
    async fn transcribe(&self, audio: &Path) -> Result<AsrResult, IngestError>;

    /// Get engine name
    fn name(&self) -> &str;
}

/// Maps an engine result onto a fresh transcript.
///
/// Segment ids combine the engine's sequence number with a fresh id, so they
/// stay unique across repeated runs over the same audio.
pub fn from_asr(result: AsrResult, ids: &dyn IdGenerator) -> Result<Transcript, IngestError> {
    let control_tokens = Regex::new(CONTROL_TOKEN_PATTERN)?;

    let segments = result
        .segments
        .into_iter()
        .map(|segment| {
            let cleaned = control_tokens.replace_all(&segment.text, "").trim().to_string();
            Segment {
                id: format!("{}_{}", segment.id, ids.next_id()),
                start: segment.start,
                end: segment.end,
                tokens: segment.tokens,
                raw_text: segment.text,
                text: cleaned,
                speaker: None,
            }
        })
        .collect();

    Ok(Transcript::new(result.language, segments))
}

/// Runs `engine` on `audio` and turns the result into a transcript that
/// references the audio file by name.
pub async fn transcribe_file(
    engine: &dyn TranscriptionEngine,
    audio: &Path,
    ids: &dyn IdGenerator,
) -> Result<Transcript, IngestError> {
    let file_name = audio
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| IngestError::InvalidAudio(audio.display().to_string()))?
        .to_string();

    tracing::info!("Transcribing {} with {}", file_name, engine.name());
    let result = match engine.transcribe(audio).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("{} failed on {}: {:?}", engine.name(), file_name, e);
            return Err(e);
        }
    };

    let transcript = from_asr(result, ids)?.with_audio_file_ref(file_name);
    tracing::info!(
        "Transcript {} created: language={}, segments={}",
        transcript.id,
        transcript.language,
        transcript.len()
    );
    Ok(transcript)
}
