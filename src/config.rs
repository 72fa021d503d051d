use crate::export::ExportOptions;
use crate::transcript::Speaker;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_STORE_DIR: &str = "transcripts";
pub const DEFAULT_PLACEHOLDER_SPEAKER: &str = "unknown";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_ALTERNATE_SPEAKERS: [&str; 2] = ["Interviewer", "Interviewee"];

pub const ENV_STORE_DIR: &str = "TRANSCRIPT_EDITOR_STORE_DIR";
pub const ENV_PLACEHOLDER_SPEAKER: &str = "TRANSCRIPT_EDITOR_PLACEHOLDER_SPEAKER";
pub const ENV_LOG_LEVEL: &str = "TRANSCRIPT_EDITOR_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Directory of the JSON transcript store
    pub store_dir: PathBuf,
    /// Speaker given to segments inserted by hand
    pub placeholder_speaker: String,
    /// Rotation used by "alternate speakers"
    pub alternate_speakers: Vec<String>,
    pub export: ExportOptions,
    /// Fallback filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            placeholder_speaker: DEFAULT_PLACEHOLDER_SPEAKER.to_string(),
            alternate_speakers: DEFAULT_ALTERNATE_SPEAKERS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            export: ExportOptions::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn placeholder_speaker(&self) -> Speaker {
        Speaker::new(self.placeholder_speaker.clone())
    }

    pub fn alternate_speakers(&self) -> Vec<Speaker> {
        self.alternate_speakers
            .iter()
            .map(|name| Speaker::new(name.clone()))
            .collect()
    }
}

/// Reads the config at `path`, writing defaults when it does not exist yet.
/// An unreadable file is kept as `*.json.bak` and replaced by defaults.
pub fn load_or_create(path: &Path) -> Result<EditorConfig, ConfigError> {
    if !path.exists() {
        let config = EditorConfig::default();
        save(path, &config)?;
        return Ok(config);
    }

    let raw = fs::read_to_string(path)?;
    match serde_json::from_str::<EditorConfig>(&raw) {
        Ok(mut config) => {
            normalize_config(&mut config);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!("Config at {} is invalid ({}), resetting to defaults", path.display(), e);
            let backup = path.with_extension("json.bak");
            let _ = fs::copy(path, backup);
            let config = EditorConfig::default();
            save(path, &config)?;
            Ok(config)
        }
    }
}

pub fn save(path: &Path, config: &EditorConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

/// Loads `.env` if present and applies `TRANSCRIPT_EDITOR_*` overrides.
pub fn apply_env(config: &mut EditorConfig) {
    let _ = dotenvy::dotenv();

    if let Ok(dir) = std::env::var(ENV_STORE_DIR) {
        if !dir.trim().is_empty() {
            config.store_dir = PathBuf::from(dir.trim());
        }
    }

    if let Ok(name) = std::env::var(ENV_PLACEHOLDER_SPEAKER) {
        config.placeholder_speaker = name;
    }

    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        config.log_level = level;
    }

    normalize_config(config);
}

pub fn normalize_log_level(input: &str) -> String {
    match input.trim().to_lowercase().as_str() {
        level @ ("trace" | "debug" | "info" | "warn" | "error" | "off") => level.to_string(),
        _ => DEFAULT_LOG_LEVEL.to_string(),
    }
}

fn normalize_config(config: &mut EditorConfig) {
    let placeholder = config.placeholder_speaker.trim();
    config.placeholder_speaker = if placeholder.is_empty() {
        DEFAULT_PLACEHOLDER_SPEAKER.to_string()
    } else {
        placeholder.to_string()
    };

    config.alternate_speakers = config
        .alternate_speakers
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    if config.store_dir.as_os_str().is_empty() {
        config.store_dir = PathBuf::from(DEFAULT_STORE_DIR);
    }

    config.log_level = normalize_log_level(&config.log_level);
}
