use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::checkpoint::JsonFileStore;
use crate::error::ClerkError;
use crate::config::Config;
use crate::diarization::{Diarizer, HuggingFaceBackend};
use crate::llm::OpenAiChatClient;
use crate::minutes::MinutesGenerator;
use crate::transcription::{OpenAiProvider, Transcriber};

mod args;
mod diarize;
mod minutes;
mod transcribe;

pub use args::{Cli, CliCommand, DiarizeCliArgs, MinutesCliArgs, TranscribeCliArgs};
pub use diarize::handle_diarize_command;
pub use minutes::handle_minutes_command;
pub use transcribe::handle_transcribe_command;

const SUPPORTED_EXTENSIONS: [&str; 8] = ["wav", "mp3", "m4a", "flac", "ogg", "opus", "webm", "mp4"];

/// Validate that the file exists and has a supported format.
fn validate_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(anyhow::Error::from(ClerkError::UnsupportedFormat(ext))
            .context(format!("Supported formats: {}", SUPPORTED_EXTENSIONS.join(", "))));
    }

    Ok(())
}

/// Build the checkpoint-gated transcriber from config.
fn build_transcriber(config: &Config) -> Result<Transcriber> {
    let api_key = config
        .openai_api_key()
        .context("No OpenAI API key: set OPENAI_API_KEY or [openai].api_key in the config")?;

    let endpoint = config
        .openai
        .api_url
        .as_ref()
        .map(|base| format!("{}/audio/transcriptions", base.trim_end_matches('/')));

    let provider = OpenAiProvider::new(
        api_key,
        endpoint,
        config.openai.transcription_model.clone(),
    )?;

    Ok(Transcriber::new(
        Box::new(provider),
        Box::new(JsonFileStore::transcription()),
    ))
}

/// Build the minutes generator from config.
fn build_generator(config: &Config) -> Result<MinutesGenerator> {
    let api_key = config
        .openai_api_key()
        .context("No OpenAI API key: set OPENAI_API_KEY or [openai].api_key in the config")?;

    let endpoint = config
        .openai
        .api_url
        .as_ref()
        .map(|base| format!("{}/chat/completions", base.trim_end_matches('/')));

    let chat = OpenAiChatClient::new(api_key, endpoint, config.openai.chat_model.clone())?;

    Ok(MinutesGenerator::new(Box::new(chat)))
}

/// Build the diarizer from config.
fn build_diarizer(config: &Config) -> Result<Diarizer> {
    let token = config.diarization_token().context(
        "No diarization token: set HF_TOKEN or [diarization].auth_token in the config",
    )?;

    let backend = HuggingFaceBackend::new(
        token,
        &config.diarization.model,
        config.diarization.api_url.clone(),
    )?;

    Ok(Diarizer::new(Box::new(backend)))
}
