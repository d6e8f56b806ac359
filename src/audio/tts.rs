//! Text-to-speech trait.

use async_trait::async_trait;

use super::types::SynthesisRequest;
use crate::error::TtsError;

/// Trait for speech synthesis backends.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one request and return the raw audio bytes.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsError>;
}
