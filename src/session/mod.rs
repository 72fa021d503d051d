use crate::command::{
    AddSegment, AlternateSpeakers, CombineWithNext, DeleteSegment, DuplicateSegment,
    TranscriptCommand, UpdateEndTime, UpdateSpeaker, UpdateStartTime, UpdateText, UpdateTitle,
};
use crate::config::EditorConfig;
use crate::export::{export_text, ExportOptions};
use crate::history::CommandInvoker;
use crate::ingest::{self, IngestError};
use crate::repository::{RepositoryError, SaveQueue, SaveStats, TranscriptRepository};
use crate::transcript::{IdGenerator, Segment, Speaker, Transcript, UuidIdGenerator};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Transcript not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Import error: {0}")]
    Import(#[from] IngestError),
}

/// One open transcript and its edit history.
///
/// The session is the only writer of its document: every edit takes `&mut self`,
/// builds its command from the live document and dispatches it in the same call,
/// then queues a save. Saves run in the background in request order.
pub struct EditorSession {
    transcript: Transcript,
    invoker: CommandInvoker,
    repository: Arc<dyn TranscriptRepository>,
    saves: SaveQueue,
    ids: Arc<dyn IdGenerator>,
    config: EditorConfig,
}

impl EditorSession {
    /// Loads an existing transcript for editing.
    pub async fn open(
        repository: Arc<dyn TranscriptRepository>,
        id: &str,
        config: EditorConfig,
    ) -> Result<Self, SessionError> {
        let transcript = repository
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        tracing::info!(
            "Opened transcript {} ({} segments) from {}",
            transcript.id,
            transcript.len(),
            repository.name()
        );
        Ok(Self::start(repository, transcript, config))
    }

    /// Stores a freshly ingested transcript and opens it.
    pub async fn create(
        repository: Arc<dyn TranscriptRepository>,
        transcript: Transcript,
        config: EditorConfig,
    ) -> Result<Self, SessionError> {
        repository.insert(&transcript).await?;
        tracing::info!("Created transcript {} in {}", transcript.id, repository.name());
        Ok(Self::start(repository, transcript, config))
    }

    fn start(
        repository: Arc<dyn TranscriptRepository>,
        transcript: Transcript,
        config: EditorConfig,
    ) -> Self {
        let saves = SaveQueue::spawn(Arc::clone(&repository));
        Self {
            transcript,
            invoker: CommandInvoker::new(),
            repository,
            saves,
            ids: Arc::new(UuidIdGenerator),
            config,
        }
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &CommandInvoker {
        &self.invoker
    }

    pub fn save_stats(&self) -> &SaveStats {
        self.saves.stats()
    }

    fn dispatch(&mut self, command: impl Into<TranscriptCommand>) {
        self.invoker.execute(command.into(), &mut self.transcript);
        self.persist();
    }

    fn persist(&self) {
        self.saves.enqueue(self.transcript.clone());
    }

    // --- Structural edits ---

    /// Inserts `segment` at `index`. Refused when its id is already taken.
    pub fn add_segment(&mut self, segment: Segment, index: usize) -> bool {
        if self.transcript.index_of(&segment.id).is_some() {
            tracing::warn!("Segment id {} already in use, not adding", segment.id);
            return false;
        }
        self.dispatch(AddSegment::new(segment, index));
        true
    }

    /// Inserts an empty segment after `index`, spanning the gap to the next
    /// segment. Returns the new segment's id.
    pub fn add_new_segment_after(&mut self, index: usize) -> Option<String> {
        let before = self.transcript.segment_at(index)?;
        let end = self
            .transcript
            .segment_at(index + 1)
            .map(|after| after.start)
            .unwrap_or(before.end);

        let segment = Segment {
            id: self.ids.next_id(),
            start: before.end,
            end,
            tokens: Vec::new(),
            raw_text: String::new(),
            text: String::new(),
            speaker: Some(self.config.placeholder_speaker()),
        };
        let id = segment.id.clone();
        self.add_segment(segment, index + 1).then_some(id)
    }

    /// Returns the id of the inserted copy.
    pub fn duplicate_segment(&mut self, index: usize) -> Option<String> {
        let id = self.transcript.segment_at(index)?.id.clone();
        let command = DuplicateSegment::new(&self.transcript, &id, Arc::clone(&self.ids))?;
        self.dispatch(command);
        self.transcript
            .segment_at(index + 1)
            .map(|copy| copy.id.clone())
    }

    pub fn delete_segment(&mut self, index: usize) -> bool {
        let Some(id) = self.transcript.segment_at(index).map(|s| s.id.clone()) else {
            return false;
        };
        match DeleteSegment::new(&self.transcript, &id) {
            Some(command) => {
                self.dispatch(command);
                true
            }
            None => false,
        }
    }

    pub fn combine_with_next(&mut self, index: usize) -> bool {
        let (Some(current), Some(next)) = (
            self.transcript.segment_at(index),
            self.transcript.segment_at(index + 1),
        ) else {
            return false;
        };
        match CombineWithNext::new(&self.transcript, &current.id, &next.id) {
            Some(command) => {
                self.dispatch(command);
                true
            }
            None => false,
        }
    }

    // --- Field edits ---

    pub fn update_text(&mut self, segment_id: &str, text: impl Into<String>) -> bool {
        match UpdateText::new(&self.transcript, segment_id, text) {
            Some(command) => {
                self.dispatch(command);
                true
            }
            None => false,
        }
    }

    pub fn update_speaker(&mut self, segment_id: &str, speaker: Speaker) -> bool {
        match UpdateSpeaker::new(&self.transcript, segment_id, speaker) {
            Some(command) => {
                self.dispatch(command);
                true
            }
            None => false,
        }
    }

    pub fn update_start_time(&mut self, segment_id: &str, start: f32) -> bool {
        match UpdateStartTime::new(&self.transcript, segment_id, start) {
            Some(command) => {
                self.dispatch(command);
                true
            }
            None => false,
        }
    }

    pub fn update_end_time(&mut self, segment_id: &str, end: f32) -> bool {
        match UpdateEndTime::new(&self.transcript, segment_id, end) {
            Some(command) => {
                self.dispatch(command);
                true
            }
            None => false,
        }
    }

    pub fn alternate_speakers(&mut self, speakers: Vec<Speaker>) {
        self.dispatch(AlternateSpeakers::new(speakers));
    }

    /// Alternates the speakers configured in `alternate_speakers`.
    pub fn alternate_default_speakers(&mut self) {
        let speakers = self.config.alternate_speakers();
        self.alternate_speakers(speakers);
    }

    pub fn update_title(&mut self, title: impl Into<String>) {
        let command = UpdateTitle::new(&self.transcript, title);
        self.dispatch(command);
    }

    // --- History ---

    pub fn undo(&mut self) -> Option<&'static str> {
        let undone = self.invoker.undo(&mut self.transcript)?;
        tracing::info!("Undo: {}", undone);
        self.persist();
        Some(undone)
    }

    pub fn redo(&mut self) -> Option<&'static str> {
        let redone = self.invoker.redo(&mut self.transcript)?;
        tracing::info!("Redo: {}", redone);
        self.persist();
        Some(redone)
    }

    pub fn is_undo_available(&self) -> bool {
        self.invoker.is_undo_available()
    }

    pub fn is_redo_available(&self) -> bool {
        self.invoker.is_redo_available()
    }

    // --- Import / export ---

    /// Replaces the segment list with segments parsed from `text`.
    ///
    /// The edit history is cleared: the replaced segments are gone, so earlier
    /// commands could no longer find their targets.
    pub fn import_plain_text(&mut self, text: &str) -> Result<usize, SessionError> {
        let imported = ingest::from_plain_text(text, &self.transcript.id, self.ids.as_ref())?;
        let count = imported.segments.len();

        self.transcript.segments = imported.segments;
        self.invoker.clear();
        tracing::info!(
            "Imported {} segments into transcript {}, history cleared",
            count,
            self.transcript.id
        );
        self.persist();
        Ok(count)
    }

    pub fn set_export_options(&mut self, options: ExportOptions) {
        self.config.export = options;
    }

    pub fn export_preview(&self) -> String {
        export_text(&self.transcript, self.config.export)
    }

    // --- Lifecycle ---

    /// Waits for every queued save to finish.
    pub async fn flush(&self) {
        self.saves.flush().await;
    }

    /// Finishes pending saves and closes the session.
    pub async fn close(self) -> Transcript {
        self.saves.shutdown().await;
        tracing::info!("Closed transcript {}", self.transcript.id);
        self.transcript
    }

    /// Finishes pending saves, then removes the transcript from the repository.
    pub async fn delete(self) -> Result<(), SessionError> {
        let Self {
            transcript,
            repository,
            saves,
            ..
        } = self;
        saves.shutdown().await;
        repository.delete(&transcript.id).await?;
        tracing::info!("Deleted transcript {}", transcript.id);
        Ok(())
    }
}
