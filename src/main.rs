use anyhow::{bail, Result};
use clap::Parser;
use clerk::cli::{
    handle_diarize_command, handle_minutes_command, handle_transcribe_command, Cli, CliCommand,
    MinutesCliArgs,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("clerk {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(CliCommand::Minutes(args)) => handle_minutes_command(args).await,
        Some(CliCommand::Transcribe(args)) => handle_transcribe_command(args).await,
        Some(CliCommand::Diarize(args)) => handle_diarize_command(args).await,
        None => match cli.audio_file {
            Some(file) => handle_minutes_command(MinutesCliArgs { file }).await,
            None => bail!("No audio file given. Run `clerk --help` for usage."),
        },
    }
}
