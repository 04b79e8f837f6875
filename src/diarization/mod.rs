//! Speaker diarization against a pretrained remote model.
//!
//! The model wants mono 16kHz WAV, so non-WAV inputs are converted first
//! (see `crate::audio`) and the temporary file is removed once inference
//! finishes. Segments come back in chronological order.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::audio;

const DEFAULT_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// One detected speech turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSegment {
    /// Turn start, seconds from the beginning of the audio.
    pub start: f64,
    /// Turn end, seconds.
    pub end: f64,
    /// Model-assigned label, e.g. `SPEAKER_00`.
    pub speaker: String,
}

/// Inference backend producing raw speech turns for a WAV file.
#[async_trait]
pub trait DiarizationBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, wav_path: &Path) -> Result<Vec<SpeakerSegment>>;
}

/// Hugging Face Inference API backend for pyannote-style diarization models.
pub struct HuggingFaceBackend {
    client: reqwest::Client,
    auth_token: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl HuggingFaceBackend {
    pub fn new(auth_token: String, model: &str, api_url: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .context("Failed to build HTTP client")?;

        let base = api_url.unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let endpoint = format!("{}/{}", base.trim_end_matches('/'), model);

        info!("Initialized diarization backend for model at {}", endpoint);

        Ok(Self {
            client,
            auth_token,
            endpoint,
        })
    }
}

#[async_trait]
impl DiarizationBackend for HuggingFaceBackend {
    fn name(&self) -> &'static str {
        "Hugging Face Inference API"
    }

    async fn run(&self, wav_path: &Path) -> Result<Vec<SpeakerSegment>> {
        debug!("Uploading WAV for diarization: {:?}", wav_path);

        let audio_data = tokio::fs::read(wav_path)
            .await
            .with_context(|| format!("Failed to read WAV file {:?}", wav_path))?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.auth_token)
            .header("Content-Type", "audio/wav")
            .body(audio_data)
            .send()
            .await
            .context("Failed to send diarization request")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read diarization response body")?;

        if !status.is_success() {
            error!(
                "Diarization request failed with status {}: {}",
                status, response_text
            );

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
                return Err(anyhow::anyhow!(
                    "Diarization API error: {}",
                    error_response.error
                ));
            }

            return Err(anyhow::anyhow!(
                "Diarization request failed with status {}: {}",
                status,
                response_text
            ));
        }

        let segments: Vec<SpeakerSegment> = serde_json::from_str(&response_text)
            .context("Failed to parse diarization response")?;

        Ok(segments)
    }
}

/// Diarization client tying together WAV conversion, inference, and cleanup.
pub struct Diarizer {
    backend: Box<dyn DiarizationBackend>,
}

impl Diarizer {
    pub fn new(backend: Box<dyn DiarizationBackend>) -> Self {
        Self { backend }
    }

    /// Run speaker diarization over `audio_path`.
    ///
    /// Non-WAV inputs are converted to a temporary sibling WAV which is
    /// removed after inference, on success and failure paths alike.
    /// Returned segments are ordered by start time and each satisfies
    /// `start <= end`.
    pub async fn diarize(&self, audio_path: &Path) -> Result<Vec<SpeakerSegment>> {
        info!("Starting speaker diarization for {:?}", audio_path);

        let wav = audio::ensure_wav(audio_path)?;

        // wav is dropped (and any temp file removed) whether or not
        // inference succeeds
        let raw = self
            .backend
            .run(wav.path())
            .await
            .with_context(|| format!("Diarization failed for {:?}", audio_path))?;

        drop(wav);

        // A turn ending before it starts means the model response is
        // malformed, not that the turn is ignorable
        for s in &raw {
            if s.start > s.end {
                error!(
                    "Malformed diarization segment for {}: start {} > end {}",
                    s.speaker, s.start, s.end
                );
                bail!(
                    "Diarization returned a malformed segment: start {} > end {}",
                    s.start,
                    s.end
                );
            }
        }

        let mut segments = raw;
        segments.sort_by(|a, b| {
            a.start
                .partial_cmp(&b.start)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        info!("Diarization produced {} segments", segments.len());
        Ok(segments)
    }
}
