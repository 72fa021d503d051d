// src/repository/save_queue.rs
// Fire-and-forget saves, applied strictly in the order they were requested

use super::TranscriptRepository;
use crate::transcript::Transcript;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

enum SaveRequest {
    Save(Box<Transcript>),
    Flush(oneshot::Sender<()>),
}

/// Outcome counters for the save task.
#[derive(Debug, Default)]
pub struct SaveStats {
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl SaveStats {
    fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn succeeded(&self) -> u64 {
        self.succeeded.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Single background task that persists document snapshots one at a time.
///
/// Snapshots are saved in the order they were enqueued and the next save only
/// starts once the previous one finished, so an older state never overwrites a
/// newer one. Failures are logged and counted, never retried.
pub struct SaveQueue {
    tx: mpsc::UnboundedSender<SaveRequest>,
    handle: JoinHandle<()>,
    stats: Arc<SaveStats>,
}

impl SaveQueue {
    /// Spawns the save task on the current tokio runtime.
    pub fn spawn(repository: Arc<dyn TranscriptRepository>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<SaveRequest>();
        let stats = Arc::new(SaveStats::default());
        let task_stats = Arc::clone(&stats);

        let handle = tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                match request {
                    SaveRequest::Save(transcript) => match repository.save(&transcript).await {
                        Ok(()) => {
                            tracing::debug!(
                                "Saved transcript {} to {}",
                                transcript.id,
                                repository.name()
                            );
                            task_stats.record_success();
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to save transcript {} to {}: {}",
                                transcript.id,
                                repository.name(),
                                e
                            );
                            task_stats.record_failure();
                        }
                    },
                    SaveRequest::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            tracing::debug!("Save queue drained");
        });

        Self { tx, handle, stats }
    }

    /// Queues a snapshot for saving. Never blocks.
    pub fn enqueue(&self, transcript: Transcript) {
        if self.tx.send(SaveRequest::Save(Box::new(transcript))).is_err() {
            tracing::warn!("Save queue closed, dropping save request");
        }
    }

    /// Waits until every snapshot queued so far has been handled.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(SaveRequest::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    pub fn stats(&self) -> &SaveStats {
        &self.stats
    }

    /// Handles everything still queued, then stops the task.
    pub async fn shutdown(self) {
        let Self { tx, handle, .. } = self;
        drop(tx);
        if let Err(e) = handle.await {
            tracing::error!("Save task ended abnormally: {}", e);
        }
    }
}
