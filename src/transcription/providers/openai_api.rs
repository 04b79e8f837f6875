use anyhow::{Context, Result};
use serde::Deserialize;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use tokio::fs;
use tracing::{debug, error, info};

use super::TranscriptionProvider;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    r#type: Option<String>,
    code: Option<String>,
}

/// Whisper API client. Uploads the raw audio bytes as a multipart form and
/// requests plain-text output, so the response body is the transcript itself.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, endpoint: Option<String>, model: String) -> Result<Self> {
        let client = reqwest::Client::new();
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        info!(
            "Initialized OpenAI transcription provider with model {} at {}",
            model, endpoint
        );

        Ok(Self {
            client,
            api_key,
            endpoint,
            model,
        })
    }
}

impl TranscriptionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "OpenAI Whisper API"
    }

    fn transcribe<'a>(
        &'a self,
        audio_path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            info!("Transcribing audio file via OpenAI API: {:?}", audio_path);

            let bytes = fs::read(audio_path)
                .await
                .with_context(|| format!("Failed to read audio file {:?}", audio_path))?;

            let file_name = audio_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("audio")
                .to_string();

            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(file_name)
                .mime_str("application/octet-stream")
                .context("Failed to build multipart file part")?;

            let form = reqwest::multipart::Form::new()
                .text("model", self.model.clone())
                .text("response_format", "text")
                .part("file", part);

            debug!("Sending transcription request with model {}", self.model);

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .multipart(form)
                .send()
                .await
                .context("Failed to send request to OpenAI API")?;

            let status = response.status();
            let response_text = response
                .text()
                .await
                .context("Failed to read response body")?;

            if !status.is_success() {
                error!(
                    "OpenAI transcription request failed with status {}: {}",
                    status, response_text
                );

                if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
                    return Err(anyhow::anyhow!(
                        "OpenAI API error: {} (type: {:?}, code: {:?})",
                        error_response.error.message,
                        error_response.error.r#type,
                        error_response.error.code
                    ));
                }

                return Err(anyhow::anyhow!(
                    "OpenAI transcription request failed with status {}: {}",
                    status,
                    response_text
                ));
            }

            // response_format=text returns the transcript as the raw body
            let text = response_text.trim().to_string();
            info!("Transcription complete: {} chars", text.len());
            debug!("Raw transcription: {}", text);

            Ok(text)
        })
    }
}
