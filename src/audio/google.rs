//! Google Cloud Text-to-Speech provider (`text:synthesize`).

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use tracing::debug;

use super::tts::SpeechSynthesizer;
use super::types::SynthesisRequest;
use crate::config::Credentials;
use crate::error::TtsError;
use crate::provider::http::{json_headers, shared_client, status_to_error};

pub const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Google Cloud TTS over the REST API.
#[derive(Debug, Clone)]
pub struct GoogleTtsProvider {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
}

impl GoogleTtsProvider {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn new_with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            credentials,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/text:synthesize", self.base_url.trim_end_matches('/'))
    }

    fn validate_request(&self, request: &SynthesisRequest) -> Result<(), TtsError> {
        let secret = match &self.credentials {
            Credentials::ApiKey(key) => key,
            Credentials::AccessToken(token) => token,
        };
        if secret.trim().is_empty() {
            return Err(TtsError::Authentication(
                "Missing Google credentials for speech synthesis".to_string(),
            ));
        }
        if request.voice.language_code.trim().is_empty() {
            return Err(TtsError::InvalidArgument(
                "Voice languageCode cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsProvider {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        self.validate_request(request)?;

        let (bearer, key) = match &self.credentials {
            Credentials::AccessToken(token) => (Some(token.as_str()), None),
            Credentials::ApiKey(key) => (None, Some(key.as_str())),
        };
        let headers = json_headers(bearer);
        let mut builder = shared_client().post(self.endpoint()).headers(headers);
        if let Some(key) = key {
            builder = builder.query(&[("key", key)]);
        }

        debug!(
            voice = request.voice.name.as_deref().unwrap_or(&request.voice.language_code),
            encoding = request.audio_config.audio_encoding.as_str(),
            "Google synthesize"
        );

        let call = async {
            let response = builder.json(request).send().await?;
            parse_synthesize_response(response).await
        };
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| TtsError::Timeout(self.timeout.as_millis() as u64))?
    }
}

async fn parse_synthesize_response(response: reqwest::Response) -> Result<Vec<u8>, TtsError> {
    let status = response.status().as_u16();
    if status != 200 {
        let body = response.text().await.unwrap_or_default();
        return Err(status_to_error(status, &body));
    }

    let body = response.text().await?;
    let parsed: SynthesizeResponse = serde_json::from_str(&body)?;
    if parsed.audio_content.is_empty() {
        return Err(TtsError::InvalidState(
            "Synthesis response contained empty audio payload".to_string(),
        ));
    }

    base64::engine::general_purpose::STANDARD
        .decode(parsed.audio_content.as_bytes())
        .map_err(|e| TtsError::InvalidState(format!("Invalid base64 audio content: {e}")))
}
