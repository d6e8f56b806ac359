//! Speech Markdown to SSML translation.

mod speech_markdown;

pub use speech_markdown::SpeechMarkdown;

use strum::{Display, EnumString};

use crate::error::TtsError;

/// Converts Speech Markdown into SSML.
pub trait MarkupTranslator: Send + Sync {
    fn to_ssml(&self, markdown: &str) -> Result<String, TtsError>;
}

/// Target platform profile; controls platform-specific tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Platform {
    #[default]
    GoogleAssistant,
    AmazonAlexa,
    Generic,
}
