//! End-to-end pipeline tests with fake remote services.

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

use clerk::checkpoint::JsonFileStore;
use clerk::llm::{ChatCompleter, ChatPrompt};
use clerk::minutes::MinutesGenerator;
use clerk::pipeline::Pipeline;
use clerk::transcription::{Transcriber, TranscriptionProvider};

struct FakeTranscription {
    text: String,
    calls: Arc<AtomicUsize>,
}

impl TranscriptionProvider for FakeTranscription {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn transcribe<'a>(
        &'a self,
        _audio_path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = self.text.clone();
        Box::pin(async move { Ok(text) })
    }
}

struct BrokenTranscription;

impl TranscriptionProvider for BrokenTranscription {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn transcribe<'a>(
        &'a self,
        _audio_path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move { Err(anyhow::anyhow!("connection refused")) })
    }
}

/// Distinguishes the three prompts by their token caps, which are unique
/// per section.
struct FakeChat;

#[async_trait]
impl ChatCompleter for FakeChat {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String> {
        Ok(match prompt.max_tokens {
            250 => "- decided to ship Friday".to_string(),
            200 => "- Alice (PM)\n- Bob (Engineer)".to_string(),
            500 => "- Action Items:\n  * Bob to cut the release, due by Friday".to_string(),
            other => panic!("unexpected token cap {}", other),
        })
    }
}

fn pipeline_with(provider: Box<dyn TranscriptionProvider>) -> Pipeline {
    let transcriber = Transcriber::new(provider, Box::new(JsonFileStore::transcription()));
    let generator = MinutesGenerator::new(Box::new(FakeChat));
    Pipeline::new(transcriber, generator)
}

#[tokio::test]
async fn full_run_produces_checkpoint_and_document() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("meeting.mp3");
    std::fs::write(&audio, b"fake mp3 bytes").unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = pipeline_with(Box::new(FakeTranscription {
        text: "Alice: let's ship Friday. Bob: I'll cut the release.".to_string(),
        calls: calls.clone(),
    }));

    let output = pipeline.run(&audio).await.unwrap();

    assert_eq!(output, dir.path().join("meeting_meeting_minutes.docx"));
    assert!(output.exists());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let checkpoint = dir.path().join("meeting.mp3_transcription.json");
    assert!(checkpoint.exists());
    let cached: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&checkpoint).unwrap()).unwrap();
    assert_eq!(
        cached.as_str().unwrap(),
        "Alice: let's ship Friday. Bob: I'll cut the release."
    );
}

#[tokio::test]
async fn existing_checkpoint_skips_transcription_service() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("meeting.mp3");
    std::fs::write(&audio, b"fake mp3 bytes").unwrap();
    std::fs::write(
        dir.path().join("meeting.mp3_transcription.json"),
        "\"cached transcript from an earlier run\"",
    )
    .unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = pipeline_with(Box::new(FakeTranscription {
        text: "fresh transcript that must not be used".to_string(),
        calls: calls.clone(),
    }));

    let output = pipeline.run(&audio).await.unwrap();

    assert!(output.exists());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // Checkpoint content is reused verbatim, not rewritten
    let cached = std::fs::read_to_string(dir.path().join("meeting.mp3_transcription.json")).unwrap();
    assert_eq!(cached, "\"cached transcript from an earlier run\"");
}

#[tokio::test]
async fn transcription_failure_leaves_no_artifacts() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("meeting.mp3");
    std::fs::write(&audio, b"fake mp3 bytes").unwrap();

    let pipeline = pipeline_with(Box::new(BrokenTranscription));

    let result = pipeline.run(&audio).await;
    assert!(result.is_err());

    assert!(!dir.path().join("meeting.mp3_transcription.json").exists());
    assert!(!dir.path().join("meeting_meeting_minutes.docx").exists());
}

#[tokio::test]
async fn chat_failure_produces_no_document() {
    struct BrokenChat;

    #[async_trait]
    impl ChatCompleter for BrokenChat {
        async fn complete(&self, _prompt: &ChatPrompt) -> Result<String> {
            Err(anyhow::anyhow!("503 service unavailable"))
        }
    }

    let dir = tempdir().unwrap();
    let audio = dir.path().join("meeting.mp3");
    std::fs::write(&audio, b"fake mp3 bytes").unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let transcriber = Transcriber::new(
        Box::new(FakeTranscription {
            text: "some transcript".to_string(),
            calls,
        }),
        Box::new(JsonFileStore::transcription()),
    );
    let pipeline = Pipeline::new(transcriber, MinutesGenerator::new(Box::new(BrokenChat)));

    assert!(pipeline.run(&audio).await.is_err());
    assert!(!dir.path().join("meeting_meeting_minutes.docx").exists());

    // Transcription succeeded before the chat stage failed, so its
    // checkpoint survives for the next run
    assert!(dir.path().join("meeting.mp3_transcription.json").exists());
}
