//! Shared test helpers and stub synthesizer.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use tts_batch::audio::{SpeechSynthesizer, SynthesisRequest};
use tts_batch::error::TtsError;

pub const CONFIG_JSON: &str = r#"{
    "voices": {
        "germanSales": {
            "voice": { "languageCode": "de-DE", "name": "de-DE-Wavenet-B" },
            "audioConfig": { "speakingRate": 1.05 }
        },
        "englishSupport": {
            "voice": { "languageCode": "en-US", "name": "en-US-Neural2-F" }
        }
    }
}"#;

/// A synthesizer that returns canned audio and records every request.
#[derive(Default)]
pub struct StubSynthesizer {
    requests: Mutex<Vec<SynthesisRequest>>,
    fail_marker: Option<String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any request whose input contains `marker`.
    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_marker: Some(marker.to_string()),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// The bytes returned for a request with the given input payload.
    pub fn audio_for(payload: &str) -> Vec<u8> {
        format!("AUDIO[{payload}]").into_bytes()
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSynthesizer {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.requests.lock().unwrap().push(request.clone());
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let payload = request
            .input
            .as_text()
            .or(request.input.as_ssml())
            .unwrap_or_default()
            .to_string();
        if let Some(marker) = &self.fail_marker {
            if payload.contains(marker.as_str()) {
                return Err(TtsError::api(500, "stubbed failure"));
            }
        }
        Ok(Self::audio_for(&payload))
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

/// Sorted file names in `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
