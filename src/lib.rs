pub mod audio;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod diarization;
pub mod document;
pub mod error;
pub mod llm;
pub mod minutes;
pub mod pipeline;
pub mod transcription;
