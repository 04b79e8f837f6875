//! CLI handler for transcription only.
//!
//! The checkpoint still applies: a prior run's transcript is reused without
//! a remote call.

use anyhow::{Context, Result};

use crate::cli::args::TranscribeCliArgs;
use crate::config::Config;

pub async fn handle_transcribe_command(args: TranscribeCliArgs) -> Result<()> {
    super::validate_file(&args.file)?;

    let config = Config::load()?;
    let transcriber = super::build_transcriber(&config)?;

    let text = transcriber.transcribe(&args.file).await?;

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, &text).context("Failed to write output file")?;
        eprintln!("Transcript saved to: {}", output_path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}
