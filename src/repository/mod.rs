// src/repository/mod.rs
// Transcript storage - repository trait, implementations and ordered saves

mod file;
mod memory;
mod save_queue;

pub use file::FileTranscriptRepository;
pub use memory::InMemoryTranscriptRepository;
pub use save_queue::{SaveQueue, SaveStats};

use crate::transcript::Transcript;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transcript not found: {0}")]
    NotFound(String),

    #[error("Transcript already exists: {0}")]
    Duplicate(String),

    #[error("Invalid transcript id: {0}")]
    InvalidId(String),
}

/// Async document store for transcripts
#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    /// Store a new transcript
    async fn insert(&self, transcript: &Transcript) -> Result<(), RepositoryError>;

    /// Remove a transcript
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// All transcripts, newest first
    async fn fetch_all(&self) -> Result<Vec<Transcript>, RepositoryError>;

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Transcript>, RepositoryError>;

    /// Persist the current state of a transcript, inserting it if needed
    async fn save(&self, transcript: &Transcript) -> Result<(), RepositoryError>;

    /// Get backend name
    fn name(&self) -> &str;
}

pub(crate) fn newest_first(transcripts: &mut [Transcript]) {
    transcripts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
