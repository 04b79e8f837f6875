use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "clerk")]
#[command(about = "Turn recorded meetings into minutes documents", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Audio file to process into a minutes document
    pub audio_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate a meeting-minutes document from an audio file
    Minutes(MinutesCliArgs),
    /// Transcribe an audio file and print the text
    Transcribe(TranscribeCliArgs),
    /// Run speaker diarization and print the detected segments
    Diarize(DiarizeCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct MinutesCliArgs {
    /// Path to the audio file (e.g. .m4a, .wav, .mp3)
    pub file: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct TranscribeCliArgs {
    /// Path to the audio file
    pub file: PathBuf,

    /// Write the transcript to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct DiarizeCliArgs {
    /// Path to the audio file
    pub file: PathBuf,

    /// Print segments as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}
