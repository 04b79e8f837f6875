//! Audio preprocessing for diarization.
//!
//! The diarization model wants mono 16kHz PCM WAV input. Anything else is
//! transcoded with FFmpeg into a sibling `<stem>.wav`, which is removed once
//! the caller is done with it. Transcription streams the original file
//! unmodified, so none of this applies there.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

use crate::error::ClerkError;

/// Target sample rate for the diarization WAV.
const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Whether the file already carries a WAV extension.
pub fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

/// Check if FFmpeg is available on the system.
pub fn check_ffmpeg_available() -> bool {
    which::which("ffmpeg").is_ok()
}

/// A WAV view of an audio file.
///
/// Either the original file (already WAV) or a converted sibling that is
/// deleted when the value is dropped, so cleanup happens on success and
/// failure paths alike.
pub enum WavSource {
    Original(PathBuf),
    Converted(PathBuf),
}

impl WavSource {
    pub fn path(&self) -> &Path {
        match self {
            WavSource::Original(p) | WavSource::Converted(p) => p,
        }
    }

    /// True when a temporary conversion was produced.
    pub fn is_converted(&self) -> bool {
        matches!(self, WavSource::Converted(_))
    }
}

impl Drop for WavSource {
    fn drop(&mut self) {
        if let WavSource::Converted(path) = self {
            match std::fs::remove_file(path.as_path()) {
                Ok(()) => info!("Removed temporary WAV file: {:?}", path),
                Err(e) => warn!("Failed to remove temporary WAV file {:?}: {}", path, e),
            }
        }
    }
}

/// Ensure a WAV form of `input` exists, converting if necessary.
pub fn ensure_wav(input: &Path) -> Result<WavSource> {
    if is_wav(input) {
        return Ok(WavSource::Original(input.to_path_buf()));
    }

    let output = convert_to_wav(input)?;
    Ok(WavSource::Converted(output))
}

/// Convert `input` to a mono, 16kHz, 16-bit PCM WAV sibling file.
///
/// Output lands next to the input as `<stem>.wav` and overwrites any
/// existing file at that path.
pub fn convert_to_wav(input: &Path) -> Result<PathBuf> {
    if !check_ffmpeg_available() {
        return Err(ClerkError::FfmpegMissing(input.display().to_string()).into());
    }

    let output = input.with_extension("wav");
    info!("Converting {:?} to WAV format: {:?}", input, output);

    // -ac 1 / -ar 16000 / pcm_s16le: what the diarization model expects
    let result = Command::new("ffmpeg")
        .args(["-i"])
        .arg(input)
        .args(["-ac", "1"])
        .args(["-ar", "16000"])
        .args(["-acodec", "pcm_s16le"])
        .args(["-y"])
        .arg(&output)
        .output()
        .context("Failed to run FFmpeg")?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        bail!("FFmpeg conversion failed: {}", stderr);
    }

    if !output.exists() {
        bail!("FFmpeg did not produce output file");
    }

    verify_wav_spec(&output)?;

    Ok(output)
}

/// Confirm the converted file really is mono 16kHz PCM.
fn verify_wav_spec(path: &Path) -> Result<()> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Converted file {:?} is not readable as WAV", path))?;
    let spec = reader.spec();

    if spec.channels != 1 || spec.sample_rate != TARGET_SAMPLE_RATE {
        bail!(
            "Converted WAV has unexpected format: {} channel(s) at {}Hz",
            spec.channels,
            spec.sample_rate
        );
    }

    Ok(())
}
