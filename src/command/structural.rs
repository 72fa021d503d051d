// src/command/structural.rs
// Commands that change the shape of the segment list

use crate::transcript::{IdGenerator, Segment, Transcript};
use std::sync::Arc;

/// Inserts a new segment at a fixed position.
#[derive(Debug, Clone)]
pub struct AddSegment {
    segment: Segment,
    index: usize,
}

impl AddSegment {
    pub fn new(segment: Segment, index: usize) -> Self {
        Self { segment, index }
    }

    pub(super) fn execute(&mut self, transcript: &mut Transcript) {
        let index = self.index.min(transcript.segments.len());
        tracing::info!(
            "execute >>> insert segment ({}) at {}",
            self.segment.id,
            index
        );
        transcript.segments.insert(index, self.segment.clone());
    }

    pub(super) fn undo(&mut self, transcript: &mut Transcript) {
        let Some(index) = transcript.index_of(&self.segment.id) else {
            tracing::debug!("undo <<< segment ({}) not found, skipping", self.segment.id);
            return;
        };
        tracing::info!("undo <<< remove inserted segment ({}) from {}", self.segment.id, index);
        transcript.segments.remove(index);
    }
}

/// Removes a segment and remembers where it was.
#[derive(Debug, Clone)]
pub struct DeleteSegment {
    segment: Segment,
    index: Option<usize>,
}

impl DeleteSegment {
    /// Snapshots the segment with `id` as it currently is in `transcript`.
    pub fn new(transcript: &Transcript, id: &str) -> Option<Self> {
        let segment = transcript.segment(id)?.clone();
        Some(Self {
            segment,
            index: None,
        })
    }

    pub(super) fn execute(&mut self, transcript: &mut Transcript) {
        let Some(index) = transcript.index_of(&self.segment.id) else {
            tracing::debug!("execute >>> segment ({}) not found, skipping", self.segment.id);
            return;
        };
        tracing::info!("execute >>> delete segment ({}) at {}", self.segment.id, index);
        self.index = Some(index);
        transcript.segments.remove(index);
    }

    pub(super) fn undo(&mut self, transcript: &mut Transcript) {
        let Some(index) = self.index.take() else {
            return;
        };
        let index = index.min(transcript.segments.len());
        tracing::info!("undo <<< restore segment ({}) at {}", self.segment.id, index);
        transcript.segments.insert(index, self.segment.clone());
    }
}

/// Inserts a copy of a segment, under a freshly minted id, right after it.
///
/// The id is minted on the first execution and reused on redo, so redoing
/// reproduces the exact document the first execution produced. This is the one
/// exception to ids never being recycled: the id only ever returns for the
/// same copy of the same segment.
#[derive(Debug, Clone)]
pub struct DuplicateSegment {
    original_id: String,
    copy_id: Option<String>,
    inserted: bool,
    ids: Arc<dyn IdGenerator>,
}

impl DuplicateSegment {
    pub fn new(transcript: &Transcript, id: &str, ids: Arc<dyn IdGenerator>) -> Option<Self> {
        let original_id = transcript.segment(id)?.id.clone();
        Some(Self {
            original_id,
            copy_id: None,
            inserted: false,
            ids,
        })
    }

    /// Id of the inserted copy, once the command has run.
    pub fn copy_id(&self) -> Option<&str> {
        self.copy_id.as_deref()
    }

    pub(super) fn execute(&mut self, transcript: &mut Transcript) {
        let Some(index) = transcript.index_of(&self.original_id) else {
            tracing::debug!("execute >>> segment ({}) not found, skipping", self.original_id);
            return;
        };

        let copy_id = self
            .copy_id
            .get_or_insert_with(|| self.ids.next_id())
            .clone();
        tracing::info!(
            "execute >>> duplicate segment ({}) as ({})",
            self.original_id,
            copy_id
        );

        let mut copy = transcript.segments[index].clone();
        copy.id = copy_id;
        transcript.segments.insert(index + 1, copy);
        self.inserted = true;
    }

    pub(super) fn undo(&mut self, transcript: &mut Transcript) {
        if !self.inserted {
            return;
        }
        let Some(copy_id) = self.copy_id.as_deref() else {
            return;
        };
        let Some(index) = transcript.index_of(copy_id) else {
            tracing::debug!("undo <<< duplicate ({}) not found, skipping", copy_id);
            return;
        };
        tracing::info!("undo <<< remove duplicate ({}) from {}", copy_id, index);
        transcript.segments.remove(index);
        self.inserted = false;
    }
}

/// Merges a segment with the one following it.
#[derive(Debug, Clone)]
pub struct CombineWithNext {
    current: Segment,
    next: Segment,
    applied: bool,
}

impl CombineWithNext {
    pub fn new(transcript: &Transcript, current_id: &str, next_id: &str) -> Option<Self> {
        if current_id == next_id {
            return None;
        }
        Some(Self {
            current: transcript.segment(current_id)?.clone(),
            next: transcript.segment(next_id)?.clone(),
            applied: false,
        })
    }

    fn merged(&self) -> Segment {
        let mut merged = self.current.clone();
        merged.end = self.next.end;
        merged.text = format!("{} {}", self.current.text, self.next.text);
        merged
    }

    pub(super) fn execute(&mut self, transcript: &mut Transcript) {
        let (Some(current_index), Some(_)) = (
            transcript.index_of(&self.current.id),
            transcript.index_of(&self.next.id),
        ) else {
            tracing::debug!(
                "execute >>> combine ({}) + ({}) target missing, skipping",
                self.current.id,
                self.next.id
            );
            return;
        };

        tracing::info!(
            "execute >>> combine segments ({}) and ({})",
            self.current.id,
            self.next.id
        );

        // Same-size replace, so the next segment's position is unaffected
        transcript.segments[current_index] = self.merged();
        if let Some(next_index) = transcript.index_of(&self.next.id) {
            transcript.segments.remove(next_index);
        }
        self.applied = true;
    }

    pub(super) fn undo(&mut self, transcript: &mut Transcript) {
        if !self.applied {
            return;
        }
        let Some(index) = transcript.index_of(&self.current.id) else {
            tracing::debug!("undo <<< merged segment ({}) not found, skipping", self.current.id);
            return;
        };

        tracing::info!(
            "undo <<< split segments ({}) and ({})",
            self.current.id,
            self.next.id
        );

        transcript.segments[index] = self.current.clone();
        transcript.segments.insert(index + 1, self.next.clone());
        self.applied = false;
    }
}
