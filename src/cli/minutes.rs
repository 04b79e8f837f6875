//! CLI handler for the full minutes pipeline.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::cli::args::MinutesCliArgs;
use crate::config::Config;
use crate::pipeline::Pipeline;

/// Handle the minutes command (also the default invocation).
pub async fn handle_minutes_command(args: MinutesCliArgs) -> Result<()> {
    super::validate_file(&args.file)?;

    let config = Config::load()?;
    let transcriber = super::build_transcriber(&config)?;
    let generator = super::build_generator(&config)?;
    let pipeline = Pipeline::new(transcriber, generator);

    let pb = create_spinner();
    pb.set_message("Transcribing and generating minutes...");

    let result = pipeline.run(&args.file).await;
    pb.finish_and_clear();

    let output_path = result?;
    println!("Meeting minutes saved to: {}", output_path.display());

    Ok(())
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
