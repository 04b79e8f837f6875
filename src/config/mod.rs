use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub diarization: DiarizationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key for both the speech-to-text and chat endpoints.
    /// Falls back to the OPENAI_API_KEY environment variable.
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub transcription_model: String,
    pub chat_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiarizationConfig {
    /// Access token for the pretrained diarization model.
    /// Falls back to HF_TOKEN, then HUGGINGFACE_TOKEN.
    pub auth_token: Option<String>,
    pub api_url: Option<String>,
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: None,
            transcription_model: "whisper-1".to_string(),
            chat_model: "gpt-4o".to_string(),
        }
    }
}

impl Default for DiarizationConfig {
    fn default() -> Self {
        Self {
            auth_token: None,
            api_url: None,
            model: "pyannote/speaker-diarization-3.1".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// API key for the OpenAI endpoints, config value first, environment second.
    pub fn openai_api_key(&self) -> Option<String> {
        self.openai
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Credential token for the diarization model, config value first.
    pub fn diarization_token(&self) -> Option<String> {
        self.diarization
            .auth_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| std::env::var("HF_TOKEN").ok())
            .or_else(|| std::env::var("HUGGINGFACE_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("clerk").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_models() {
        let config = Config::default();
        assert_eq!(config.openai.transcription_model, "whisper-1");
        assert_eq!(config.openai.chat_model, "gpt-4o");
        assert_eq!(config.diarization.model, "pyannote/speaker-diarization-3.1");
    }

    #[test]
    fn test_partial_config_parses_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [openai]
            api_key = "sk-test"
            "#,
        )
        .unwrap();

        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.openai.chat_model, "gpt-4o");
        assert!(config.diarization.auth_token.is_none());
    }

    #[test]
    fn test_config_key_prefers_explicit_value() {
        let config = Config {
            openai: OpenAiConfig {
                api_key: Some("sk-from-config".to_string()),
                ..OpenAiConfig::default()
            },
            ..Config::default()
        };

        assert_eq!(config.openai_api_key().as_deref(), Some("sk-from-config"));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let reparsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(reparsed.openai.chat_model, config.openai.chat_model);
        assert_eq!(reparsed.diarization.model, config.diarization.model);
    }
}
