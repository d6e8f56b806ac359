//! Synthesis request and voice types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Output audio format, selected once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Mp3,
    Wav,
}

impl OutputFormat {
    /// Value sent as `audioConfig.audioEncoding`.
    pub fn encoding(self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Wav => "LINEAR16",
        }
    }

    /// File extension of the written audio, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }
}

/// Recognized source file formats, keyed by lowercase extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SourceFormat {
    Txt,
    Smd,
    Ssml,
}

impl SourceFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        extension.parse().ok()
    }
}

/// Voice selection parameters, forwarded to the API as-is.
///
/// Fields beyond the common ones are kept in `extra` so a profile can carry
/// anything the remote service accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDescriptor {
    pub language_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssml_gender: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Synthesis input: plain text or SSML markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Content {
    Text(String),
    Ssml(String),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Ssml(_) => None,
        }
    }

    pub fn as_ssml(&self) -> Option<&str> {
        match self {
            Self::Ssml(ssml) => Some(ssml),
            Self::Text(_) => None,
        }
    }
}

/// Audio configuration: the profile's overrides plus the encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: String,
    #[serde(flatten)]
    pub overrides: serde_json::Map<String, serde_json::Value>,
}

/// A fully-populated request, sent exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    pub input: Content,
    pub voice: VoiceDescriptor,
    pub audio_config: AudioConfig,
}
