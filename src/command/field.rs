// src/command/field.rs
// Commands that edit a single field of a segment or of the transcript

use crate::transcript::{Segment, Speaker, Transcript};

fn with_segment(transcript: &mut Transcript, id: &str, edit: impl FnOnce(&mut Segment)) {
    match transcript.segment_mut(id) {
        Some(segment) => edit(segment),
        None => tracing::debug!("segment ({}) not found, skipping", id),
    }
}

#[derive(Debug, Clone)]
pub struct UpdateText {
    segment_id: String,
    old_text: String,
    new_text: String,
}

impl UpdateText {
    pub fn new(transcript: &Transcript, id: &str, new_text: impl Into<String>) -> Option<Self> {
        let segment = transcript.segment(id)?;
        Some(Self {
            segment_id: segment.id.clone(),
            old_text: segment.text.clone(),
            new_text: new_text.into(),
        })
    }

    pub(super) fn execute(&mut self, transcript: &mut Transcript) {
        tracing::info!(
            "execute >>> update segment ({}) with text: {}",
            self.segment_id,
            self.new_text
        );
        let text = &self.new_text;
        with_segment(transcript, &self.segment_id, |segment| {
            segment.text = text.clone()
        });
    }

    pub(super) fn undo(&mut self, transcript: &mut Transcript) {
        tracing::info!(
            "undo <<< update segment ({}) with text: {}",
            self.segment_id,
            self.old_text
        );
        let text = &self.old_text;
        with_segment(transcript, &self.segment_id, |segment| {
            segment.text = text.clone()
        });
    }
}

#[derive(Debug, Clone)]
pub struct UpdateSpeaker {
    segment_id: String,
    old_speaker: Option<Speaker>,
    new_speaker: Speaker,
}

impl UpdateSpeaker {
    pub fn new(transcript: &Transcript, id: &str, new_speaker: Speaker) -> Option<Self> {
        let segment = transcript.segment(id)?;
        Some(Self {
            segment_id: segment.id.clone(),
            old_speaker: segment.speaker.clone(),
            new_speaker,
        })
    }

    pub(super) fn execute(&mut self, transcript: &mut Transcript) {
        tracing::info!(
            "execute >>> update segment ({}) with speaker: {}",
            self.segment_id,
            self.new_speaker.name
        );
        let speaker = &self.new_speaker;
        with_segment(transcript, &self.segment_id, |segment| {
            segment.speaker = Some(speaker.clone())
        });
    }

    pub(super) fn undo(&mut self, transcript: &mut Transcript) {
        tracing::info!(
            "undo <<< update segment ({}) with speaker: {:?}",
            self.segment_id,
            self.old_speaker.as_ref().map(|s| s.name.as_str())
        );
        let speaker = &self.old_speaker;
        with_segment(transcript, &self.segment_id, |segment| {
            segment.speaker = speaker.clone()
        });
    }
}

#[derive(Debug, Clone)]
pub struct UpdateStartTime {
    segment_id: String,
    old_start: f32,
    new_start: f32,
}

impl UpdateStartTime {
    pub fn new(transcript: &Transcript, id: &str, new_start: f32) -> Option<Self> {
        let segment = transcript.segment(id)?;
        Some(Self {
            segment_id: segment.id.clone(),
            old_start: segment.start,
            new_start,
        })
    }

    pub(super) fn execute(&mut self, transcript: &mut Transcript) {
        tracing::info!(
            "execute >>> update start time of segment ({}) to {}",
            self.segment_id,
            self.new_start
        );
        let start = self.new_start;
        with_segment(transcript, &self.segment_id, |segment| segment.start = start);
    }

    pub(super) fn undo(&mut self, transcript: &mut Transcript) {
        tracing::info!(
            "undo <<< update start time of segment ({}) to {}",
            self.segment_id,
            self.old_start
        );
        let start = self.old_start;
        with_segment(transcript, &self.segment_id, |segment| segment.start = start);
    }
}

#[derive(Debug, Clone)]
pub struct UpdateEndTime {
    segment_id: String,
    old_end: f32,
    new_end: f32,
}

impl UpdateEndTime {
    pub fn new(transcript: &Transcript, id: &str, new_end: f32) -> Option<Self> {
        let segment = transcript.segment(id)?;
        Some(Self {
            segment_id: segment.id.clone(),
            old_end: segment.end,
            new_end,
        })
    }

    pub(super) fn execute(&mut self, transcript: &mut Transcript) {
        tracing::info!(
            "execute >>> update end time of segment ({}) to {}",
            self.segment_id,
            self.new_end
        );
        let end = self.new_end;
        with_segment(transcript, &self.segment_id, |segment| segment.end = end);
    }

    pub(super) fn undo(&mut self, transcript: &mut Transcript) {
        tracing::info!(
            "undo <<< update end time of segment ({}) to {}",
            self.segment_id,
            self.old_end
        );
        let end = self.old_end;
        with_segment(transcript, &self.segment_id, |segment| segment.end = end);
    }
}

/// Renames the transcript.
#[derive(Debug, Clone)]
pub struct UpdateTitle {
    old_title: String,
    new_title: String,
}

impl UpdateTitle {
    pub fn new(transcript: &Transcript, new_title: impl Into<String>) -> Self {
        Self {
            old_title: transcript.title.clone(),
            new_title: new_title.into(),
        }
    }

    pub(super) fn execute(&mut self, transcript: &mut Transcript) {
        tracing::info!("execute >>> change title to {}", self.new_title);
        transcript.title = self.new_title.clone();
    }

    pub(super) fn undo(&mut self, transcript: &mut Transcript) {
        tracing::info!("undo <<< change title to {}", self.old_title);
        transcript.title = self.old_title.clone();
    }
}
