pub mod command;
pub mod config;
pub mod export;
pub mod history;
pub mod ingest;
pub mod repository;
pub mod session;
pub mod transcript;

pub use command::TranscriptCommand;
pub use config::EditorConfig;
pub use export::ExportOptions;
pub use history::CommandInvoker;
pub use repository::{
    FileTranscriptRepository, InMemoryTranscriptRepository, RepositoryError, SaveQueue,
    TranscriptRepository,
};
pub use session::{EditorSession, SessionError};
pub use transcript::{IdGenerator, Segment, Speaker, Transcript, UuidIdGenerator};

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_level`. Does nothing if a global subscriber is already set.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_LEVEL));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("Logging already initialized");
    }
}

/// Loads configuration from `config_path` and the environment, then sets up
/// logging with the configured level.
pub fn bootstrap(config_path: &std::path::Path) -> Result<EditorConfig, config::ConfigError> {
    let mut config = config::load_or_create(config_path)?;
    config::apply_env(&mut config);
    init_logging(&config.log_level);
    tracing::info!(
        "Transcript editor configured: store={}, placeholder speaker={}",
        config.store_dir.display(),
        config.placeholder_speaker
    );
    Ok(config)
}
