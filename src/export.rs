// src/export.rs
// Plain-text rendering of a transcript, read-only

use crate::transcript::{Segment, Transcript};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub include_linebreaks: bool,
    pub include_timestamps: bool,
    pub include_speaker: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_linebreaks: true,
            include_timestamps: true,
            include_speaker: true,
        }
    }
}

/// Formats seconds as `MM:SS,mmm`. Sub-millisecond precision is truncated.
pub fn format_time(seconds: f32) -> String {
    let total_millis = (seconds.max(0.0) * 1000.0) as u64;
    let minutes = total_millis / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    format!("{:02}:{:02},{:03}", minutes, secs, millis)
}

pub fn format_segment(segment: &Segment, options: ExportOptions) -> String {
    let mut out = String::new();
    out.push_str(if options.include_linebreaks { "\n" } else { " " });

    if options.include_timestamps {
        out.push_str(&format!(
            "({} - {}) ",
            format_time(segment.start),
            format_time(segment.end)
        ));
    }

    if options.include_speaker {
        let name = segment.speaker.as_ref().map(|s| s.name.as_str()).unwrap_or("");
        out.push_str(name);
        out.push_str(": ");
    }

    out.push_str(&segment.text);
    out
}

/// Whole-document export, one segment per line when line breaks are enabled.
pub fn export_text(transcript: &Transcript, options: ExportOptions) -> String {
    let text = transcript
        .segments
        .iter()
        .fold(String::from(" "), |mut acc, segment| {
            acc.push_str(&format_segment(segment, options));
            acc
        });
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Speaker;

    fn transcript() -> Transcript {
        Transcript::new(
            "en",
            vec![
                Segment::new("a", 0.0, 4.25, "Hello").with_speaker(Speaker::new("Ann")),
                Segment::new("b", 65.5, 70.0, "Hi there"),
            ],
        )
    }

    #[test]
    fn formats_minutes_seconds_and_millis() {
        assert_eq!(format_time(0.0), "00:00,000");
        assert_eq!(format_time(4.25), "00:04,250");
        assert_eq!(format_time(65.5), "01:05,500");
        assert_eq!(format_time(3600.0), "60:00,000");
    }

    #[test]
    fn exports_every_part_by_default() {
        let text = export_text(&transcript(), ExportOptions::default());
        assert_eq!(
            text,
            "(00:00,000 - 00:04,250) Ann: Hello\n(01:05,500 - 01:10,000) : Hi there"
        );
    }

    #[test]
    fn parts_can_be_switched_off() {
        let options = ExportOptions {
            include_linebreaks: false,
            include_timestamps: false,
            include_speaker: false,
        };
        assert_eq!(export_text(&transcript(), options), "Hello Hi there");

        let options = ExportOptions {
            include_timestamps: false,
            ..ExportOptions::default()
        };
        assert_eq!(export_text(&transcript(), options), "Ann: Hello\n: Hi there");
    }

    #[test]
    fn empty_transcript_exports_empty_string() {
        let empty = Transcript::new("", Vec::new());
        assert_eq!(export_text(&empty, ExportOptions::default()), "");
    }
}
