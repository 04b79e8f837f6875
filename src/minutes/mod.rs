//! Minutes generation: three independent chat prompts over the transcript.

use anyhow::{Context, Result};
use tracing::info;

use crate::llm::ChatCompleter;

pub mod prompts;

/// The assembled minutes for one meeting. Built once per run and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingMinutes {
    pub executive_summary: String,
    pub attendees: String,
    pub transcription: String,
    pub action_items_and_followups: String,
}

/// Issues the three minutes prompts against an injected chat client.
///
/// The prompts have no data dependency on each other and are sent
/// concurrently, joined before assembly. They may still disagree on details
/// (an attendee missing from the summary, say); that is accepted, not
/// corrected.
pub struct MinutesGenerator {
    chat: Box<dyn ChatCompleter>,
}

impl MinutesGenerator {
    pub fn new(chat: Box<dyn ChatCompleter>) -> Self {
        Self { chat }
    }

    pub async fn generate(&self, transcription: &str) -> Result<MeetingMinutes> {
        info!("Generating meeting minutes...");

        let (executive_summary, attendees, action_items_and_followups) = tokio::try_join!(
            self.executive_summary(transcription),
            self.attendees(transcription),
            self.action_items_and_followups(transcription),
        )?;

        Ok(MeetingMinutes {
            executive_summary,
            attendees,
            transcription: transcription.to_string(),
            action_items_and_followups,
        })
    }

    async fn executive_summary(&self, transcription: &str) -> Result<String> {
        info!("Generating executive summary...");
        self.chat
            .complete(&prompts::executive_summary(transcription))
            .await
            .context("Error generating executive summary")
    }

    async fn attendees(&self, transcription: &str) -> Result<String> {
        info!("Extracting attendees...");
        self.chat
            .complete(&prompts::attendees(transcription))
            .await
            .context("Error extracting attendees")
    }

    async fn action_items_and_followups(&self, transcription: &str) -> Result<String> {
        info!("Generating action items and follow-ups...");
        self.chat
            .complete(&prompts::action_items_and_followups(transcription))
            .await
            .context("Error generating action items and follow-ups")
    }
}
