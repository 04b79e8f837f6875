//! Checkpoint store for memoizing expensive remote calls.
//!
//! A checkpoint is a JSON value keyed by the input file path. Presence alone
//! is trusted: no versioning, no expiry, no shape validation. The default
//! backing store writes a sidecar file next to the input
//! (`<audio_path>_transcription.json` for the transcription stage).

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Key-value cache of prior successful results, keyed by input path.
pub trait CheckpointStore: Send + Sync {
    /// Returns the cached value for `key`, or `None` if no checkpoint exists.
    fn load(&self, key: &Path) -> Result<Option<Value>>;

    /// Persists `value` for `key`, overwriting any existing checkpoint.
    /// Not atomic; a crash mid-write can leave a corrupt checkpoint behind.
    fn save(&self, key: &Path, value: &Value) -> Result<()>;
}

/// File-backed store writing one JSON sidecar per key.
pub struct JsonFileStore {
    suffix: String,
}

impl JsonFileStore {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Store for transcription checkpoints: `<audio_path>_transcription.json`.
    pub fn transcription() -> Self {
        Self::new("_transcription.json")
    }

    /// Sidecar path for a given key. The suffix is appended to the full
    /// path, extension included, so `meeting.mp3` maps to
    /// `meeting.mp3_transcription.json`.
    pub fn sidecar_path(&self, key: &Path) -> PathBuf {
        let mut name = key.as_os_str().to_owned();
        name.push(&self.suffix);
        PathBuf::from(name)
    }
}

impl CheckpointStore for JsonFileStore {
    fn load(&self, key: &Path) -> Result<Option<Value>> {
        let path = self.sidecar_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read checkpoint {:?}", path))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to decode checkpoint {:?}", path))?;

        info!("Loaded existing checkpoint from {:?}", path);
        Ok(Some(value))
    }

    fn save(&self, key: &Path, value: &Value) -> Result<()> {
        let path = self.sidecar_path(key);
        let content = serde_json::to_string(value).context("Failed to serialize checkpoint")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write checkpoint {:?}", path))?;

        info!("Checkpoint saved to {:?}", path);
        Ok(())
    }
}
