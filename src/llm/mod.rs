//! Chat-completion client for the minutes prompts.
//!
//! The client is constructed once from config and passed down; nothing in
//! the crate reads credentials from the environment at call time. Tests
//! substitute the `ChatCompleter` trait with canned fakes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::ClerkError;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// One chat request: a system instruction, a user message, and sampling
/// parameters fixed by the caller.
#[derive(Debug, Clone)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String>;
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// OpenAI-compatible chat client.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(api_key: String, endpoint: Option<String>, model: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to build HTTP client")?;

        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        info!("Initialized chat client with model {} at {}", model, endpoint);

        Ok(Self {
            client,
            api_key,
            endpoint,
            model,
        })
    }
}

#[async_trait]
impl ChatCompleter for OpenAiChatClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
            max_tokens: prompt.max_tokens,
            temperature: prompt.temperature,
        };

        debug!(
            "Sending chat request: model={} max_tokens={} temperature={}",
            self.model, prompt.max_tokens, prompt.temperature
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send chat request")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read chat response body")?;

        if !status.is_success() {
            error!(
                "Chat request failed with status {}: {}",
                status, response_text
            );

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
                return Err(anyhow::anyhow!(
                    "Chat API error: {}",
                    error_response.error.message
                ));
            }

            return Err(anyhow::anyhow!(
                "Chat request failed with status {}: {}",
                status,
                response_text
            ));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&response_text).context("Failed to parse chat response")?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            error!("Chat model returned no usable output");
            return Err(ClerkError::EmptyModelOutput.into());
        }

        Ok(content)
    }
}
