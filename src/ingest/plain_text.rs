// src/ingest/plain_text.rs
// Import of exported or hand-written transcripts, one segment per line

use super::IngestError;
use crate::transcript::{IdGenerator, Segment, Speaker, Transcript};
use regex::Regex;

/// `[(start - end) ][Speaker: ]text`
const LINE_PATTERN: &str = r"^(?:\(([^)]+)\)\s*)?(?:(.*?):\s*)?(.*)$";

pub const IMPORT_LANGUAGE: &str = "en";

/// Builds a transcript from plain text, keeping `id` as the transcript id.
///
/// Best effort: blank lines are skipped, unreadable timestamps become 0 and an
/// empty speaker name means no speaker.
pub fn from_plain_text(
    text: &str,
    id: &str,
    ids: &dyn IdGenerator,
) -> Result<Transcript, IngestError> {
    let regex = Regex::new(LINE_PATTERN)?;
    let mut segments = Vec::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let Some(captures) = regex.captures(line) else {
            tracing::debug!("Skipping unparseable line: {}", line);
            continue;
        };

        let (start, end) = captures
            .get(1)
            .map(|m| parse_span(m.as_str()))
            .unwrap_or((0.0, 0.0));

        let speaker = captures
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|name| !name.is_empty())
            .map(Speaker::new);

        let text = captures.get(3).map(|m| m.as_str()).unwrap_or_default();

        let mut segment = Segment::new(ids.next_id(), start, end, text);
        segment.speaker = speaker;
        segments.push(segment);
    }

    tracing::info!("Imported {} segments from plain text", segments.len());
    Ok(Transcript::new(IMPORT_LANGUAGE, segments).with_id(id))
}

fn parse_span(span: &str) -> (f32, f32) {
    match span.split(" - ").collect::<Vec<_>>().as_slice() {
        [start, end] => (parse_time(start), parse_time(end)),
        _ => (0.0, 0.0),
    }
}

/// Parses `MM:SS[,mmm]` or `HH:MM:SS[,mmm]`; a comma is the decimal separator.
/// Components that are not numbers are ignored, and anything else yields 0.
pub fn parse_time(value: &str) -> f32 {
    let cleaned = value.trim().replace(',', ".");
    let parts: Vec<f32> = cleaned
        .split(':')
        .filter_map(|part| part.trim().parse::<f32>().ok())
        .collect();

    match parts.as_slice() {
        [minutes, seconds] => minutes * 60.0 + seconds,
        [hours, minutes, seconds] => hours * 3600.0 + minutes * 60.0 + seconds,
        _ => 0.0,
    }
}
