//! Pipeline driver: transcription, minutes generation, document rendering.
//!
//! All remote clients are injected; the driver owns only the sequencing.
//! The first failing stage aborts the run and no document is produced.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::document;
use crate::minutes::MinutesGenerator;
use crate::transcription::Transcriber;

pub struct Pipeline {
    transcriber: Transcriber,
    generator: MinutesGenerator,
}

impl Pipeline {
    pub fn new(transcriber: Transcriber, generator: MinutesGenerator) -> Self {
        Self {
            transcriber,
            generator,
        }
    }

    /// Process one audio file end to end. Returns the path of the written
    /// minutes document.
    pub async fn run(&self, audio_path: &Path) -> Result<PathBuf> {
        let transcription = self.transcriber.transcribe(audio_path).await?;

        let minutes = self.generator.generate(&transcription).await?;

        let output_path = document::write_minutes(&minutes, audio_path)?;
        info!("Meeting minutes written to {:?}", output_path);

        Ok(output_path)
    }
}
