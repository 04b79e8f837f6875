use anyhow::Result;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

pub mod openai_api;

pub use openai_api::OpenAiProvider;

/// A remote speech-to-text backend.
///
/// Implementations receive the original audio file as-is; no preprocessing
/// is applied before transcription.
pub trait TranscriptionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn transcribe<'a>(
        &'a self,
        audio_path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}
