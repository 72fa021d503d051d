// src/repository/file.rs
// One pretty-printed JSON file per transcript

use super::{newest_first, RepositoryError, TranscriptRepository};
use crate::transcript::Transcript;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

const FILE_EXTENSION: &str = "json";

pub struct FileTranscriptRepository {
    dir: PathBuf,
}

impl FileTranscriptRepository {
    /// Opens (and creates if needed) the store directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        tracing::info!("Transcript store opened at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, RepositoryError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", id, FILE_EXTENSION)))
    }

    async fn write(&self, path: &Path, transcript: &Transcript) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(transcript)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }

    async fn read(path: &Path) -> Result<Transcript, RepositoryError> {
        let raw = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl TranscriptRepository for FileTranscriptRepository {
    async fn insert(&self, transcript: &Transcript) -> Result<(), RepositoryError> {
        let path = self.path_for(&transcript.id)?;
        if fs::try_exists(&path).await? {
            return Err(RepositoryError::Duplicate(transcript.id.clone()));
        }
        self.write(&path, transcript).await
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(RepositoryError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Transcript>, RepositoryError> {
        let mut transcripts = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            match Self::read(&path).await {
                Ok(transcript) => transcripts.push(transcript),
                Err(e) => tracing::warn!("Skipping unreadable transcript {}: {}", path.display(), e),
            }
        }

        newest_first(&mut transcripts);
        Ok(transcripts)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Transcript>, RepositoryError> {
        let path = self.path_for(id)?;
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        Self::read(&path).await.map(Some)
    }

    async fn save(&self, transcript: &Transcript) -> Result<(), RepositoryError> {
        let path = self.path_for(&transcript.id)?;
        self.write(&path, transcript).await
    }

    fn name(&self) -> &str {
        "json-file"
    }
}
