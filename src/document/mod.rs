//! Word-document rendering for assembled minutes.
//!
//! Output lands next to the input audio as `<stem>_meeting_minutes.docx`,
//! overwriting silently. The document is a title followed by four fixed
//! sections, each a heading and one paragraph.

use anyhow::{Context, Result};
use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::minutes::MeetingMinutes;

/// Section headings, in document order.
pub const SECTION_HEADINGS: [&str; 4] = [
    "Executive Summary",
    "Attendees",
    "Transcription",
    "Action Items and Follow-ups",
];

/// Output path: sibling of the input, `<stem>_meeting_minutes.docx`.
pub fn output_path_for(audio_path: &Path) -> PathBuf {
    let stem = audio_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("meeting");
    let file_name = format!("{}_meeting_minutes.docx", stem);

    match audio_path.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Document title derived from the input file name.
pub fn title_for(audio_path: &Path) -> String {
    let stem = audio_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("meeting");
    format!("Meeting Minutes: {}", stem)
}

/// The four (heading, body) pairs in render order.
pub fn sections(minutes: &MeetingMinutes) -> [(&'static str, &str); 4] {
    [
        (SECTION_HEADINGS[0], minutes.executive_summary.as_str()),
        (SECTION_HEADINGS[1], minutes.attendees.as_str()),
        (SECTION_HEADINGS[2], minutes.transcription.as_str()),
        (
            SECTION_HEADINGS[3],
            minutes.action_items_and_followups.as_str(),
        ),
    ]
}

/// Render the minutes to disk and return the output path.
pub fn write_minutes(minutes: &MeetingMinutes, audio_path: &Path) -> Result<PathBuf> {
    info!("Saving meeting minutes to Word document...");

    let output_path = output_path_for(audio_path);

    let mut doc = Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(40)
                .bold(),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(28)
                .bold(),
        )
        .add_paragraph(
            Paragraph::new()
                .style("Title")
                .add_run(Run::new().add_text(title_for(audio_path))),
        );

    for (heading, body) in sections(minutes) {
        doc = doc
            .add_paragraph(
                Paragraph::new()
                    .style("Heading1")
                    .add_run(Run::new().add_text(heading)),
            )
            .add_paragraph(body_paragraph(body));
    }

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("Failed to create document {:?}", output_path))?;

    doc.build().pack(file).map_err(|e| {
        error!("Error saving document: {}", e);
        anyhow::anyhow!("Failed to write document {:?}: {}", output_path, e)
    })?;

    info!("Meeting minutes saved as {:?}", output_path);
    Ok(output_path)
}

/// One paragraph per section. Newlines in the model output become soft
/// breaks so bullet lists keep their shape.
fn body_paragraph(text: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    Paragraph::new().add_run(run)
}
