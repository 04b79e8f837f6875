//! CLI handler for speaker diarization.
//!
//! Diarization is a standalone capability: its segments are printed here
//! and are not merged into the minutes document.

use anyhow::Result;

use crate::cli::args::DiarizeCliArgs;
use crate::config::Config;

pub async fn handle_diarize_command(args: DiarizeCliArgs) -> Result<()> {
    super::validate_file(&args.file)?;

    let config = Config::load()?;
    let diarizer = super::build_diarizer(&config)?;

    let segments = diarizer.diarize(&args.file).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
    } else if segments.is_empty() {
        eprintln!("No speech turns detected");
    } else {
        for segment in &segments {
            println!(
                "[{:8.2} - {:8.2}] {}",
                segment.start, segment.end, segment.speaker
            );
        }
    }

    Ok(())
}
