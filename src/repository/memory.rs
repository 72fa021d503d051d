use super::{newest_first, RepositoryError, TranscriptRepository};
use crate::transcript::Transcript;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local repository. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryTranscriptRepository {
    transcripts: RwLock<HashMap<String, Transcript>>,
}

impl InMemoryTranscriptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TranscriptRepository for InMemoryTranscriptRepository {
    async fn insert(&self, transcript: &Transcript) -> Result<(), RepositoryError> {
        let mut transcripts = self.transcripts.write().await;
        if transcripts.contains_key(&transcript.id) {
            return Err(RepositoryError::Duplicate(transcript.id.clone()));
        }
        transcripts.insert(transcript.id.clone(), transcript.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.transcripts
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn fetch_all(&self) -> Result<Vec<Transcript>, RepositoryError> {
        let mut all: Vec<Transcript> = self.transcripts.read().await.values().cloned().collect();
        newest_first(&mut all);
        Ok(all)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Transcript>, RepositoryError> {
        Ok(self.transcripts.read().await.get(id).cloned())
    }

    async fn save(&self, transcript: &Transcript) -> Result<(), RepositoryError> {
        self.transcripts
            .write()
            .await
            .insert(transcript.id.clone(), transcript.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
