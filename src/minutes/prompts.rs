//! Prompt construction for the three minutes sections.
//!
//! Each prompt embeds the full transcript in a natural-language instruction
//! with a fixed response cap and sampling temperature. Summaries lean
//! deterministic; extraction runs colder still.

use crate::llm::ChatPrompt;

pub fn executive_summary(transcription: &str) -> ChatPrompt {
    ChatPrompt {
        system: "You are an AI assistant that creates concise executive summaries.".to_string(),
        user: format!(
            "Based on the following meeting transcription, provide a brief executive summary \
             of the key points discussed:\n\n{}\n\nLimit the summary to 3-5 bullet points.",
            transcription
        ),
        max_tokens: 250,
        temperature: 0.3,
    }
}

pub fn attendees(transcription: &str) -> ChatPrompt {
    ChatPrompt {
        system: "You are an AI assistant that extracts attendee information from meeting \
                 transcriptions."
            .to_string(),
        user: format!(
            "Based on the following meeting transcription, extract the names and roles \
             (if mentioned) of all attendees:\n\n{}\n\nProvide the list in the format:\n\
             - [Name] ([Role, if available])",
            transcription
        ),
        max_tokens: 200,
        temperature: 0.2,
    }
}

pub fn action_items_and_followups(transcription: &str) -> ChatPrompt {
    ChatPrompt {
        system: "You are an AI assistant that extracts action items and follow-ups from \
                 meeting transcriptions."
            .to_string(),
        user: format!(
            "Based on the following meeting transcription, extract all action items and \
             follow-ups:\n\n{}\n\nProvide a list of action items and follow-ups in the format:\n\
             - Action Items:\n  * [Person] to [task], due by [date]\n\
             - Follow-ups:\n  * [Person] to follow up on [issue], due by [date]",
            transcription
        ),
        max_tokens: 500,
        temperature: 0.2,
    }
}
