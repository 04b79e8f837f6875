//! Failure conditions that callers need to tell apart.
//!
//! Everything else travels as `anyhow::Error` with context attached at the
//! point of failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClerkError {
    /// The chat endpoint answered but produced no usable text.
    #[error("chat model returned empty output")]
    EmptyModelOutput,

    /// ffmpeg is needed to convert the input for diarization.
    #[error("ffmpeg is required to convert {0} to WAV but was not found on PATH")]
    FfmpegMissing(String),

    /// Input file extension is not one we know how to handle.
    #[error("unsupported audio format: .{0}")]
    UnsupportedFormat(String),
}
