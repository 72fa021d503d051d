// src/transcript/types.rs
// Transcript value types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Person credited with a segment. Compared by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
}

impl Speaker {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A time-bounded, speaker-attributable unit of transcript text.
///
/// Equality is identity: two segments are equal when their ids match, even if
/// their fields have diverged. Use [`Segment::same_content`] for a field-by-field
/// comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    /// Start offset in seconds
    pub start: f32,
    /// End offset in seconds
    pub end: f32,
    /// Raw model token ids, opaque to the editor
    #[serde(default)]
    pub tokens: Vec<i32>,
    /// Unedited model output
    #[serde(default)]
    pub raw_text: String,
    /// User-editable text
    pub text: String,
    #[serde(default)]
    pub speaker: Option<Speaker>,
}

impl Segment {
    pub fn new(id: impl Into<String>, start: f32, end: f32, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: id.into(),
            start,
            end,
            tokens: Vec::new(),
            raw_text: text.clone(),
            text,
            speaker: None,
        }
    }

    pub fn with_speaker(mut self, speaker: Speaker) -> Self {
        self.speaker = Some(speaker);
        self
    }

    pub fn with_tokens(mut self, tokens: Vec<i32>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn duration(&self) -> f32 {
        self.end - self.start
    }

    /// Compares every field, id included.
    pub fn same_content(&self, other: &Segment) -> bool {
        self.id == other.id
            && self.start == other.start
            && self.end == other.end
            && self.tokens == other.tokens
            && self.raw_text == other.raw_text
            && self.text == other.text
            && self.speaker == other.speaker
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Segment {}

/// An editable transcript document. Owns its segments exclusively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// ISO language code, empty when unknown
    #[serde(default)]
    pub language: String,
    /// Display order
    pub segments: Vec<Segment>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub audio_file_ref: Option<String>,
}

impl Transcript {
    pub fn new(language: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            language: language.into(),
            segments,
            created_at: Utc::now(),
            audio_file_ref: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_audio_file_ref(mut self, audio_file_ref: impl Into<String>) -> Self {
        self.audio_file_ref = Some(audio_file_ref.into());
        self
    }

    /// Current position of the segment with `id`, resolved by id equality.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.segments.iter().position(|segment| segment.id == id)
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.id == id)
    }

    pub fn segment_mut(&mut self, id: &str) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|segment| segment.id == id)
    }

    /// Segment at `index`, or `None` past the end.
    pub fn segment_at(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Ids in display order.
    pub fn segment_ids(&self) -> Vec<&str> {
        self.segments.iter().map(|segment| segment.id.as_str()).collect()
    }
}
