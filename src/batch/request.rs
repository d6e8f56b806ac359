//! Build synthesis requests from file contents.

use std::sync::Arc;

use crate::audio::{AudioConfig, Content, OutputFormat, SourceFormat, SynthesisRequest};
use crate::config::VoiceProfile;
use crate::error::{Result, TtsError};
use crate::markup::MarkupTranslator;

/// Turns source text into requests for one resolved voice profile.
///
/// Voice and audio config are fixed at construction so every job in a run
/// gets the same parameters.
#[derive(Clone)]
pub struct RequestBuilder {
    profile: VoiceProfile,
    format: OutputFormat,
    translator: Arc<dyn MarkupTranslator>,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("profile", &self.profile)
            .field("format", &self.format)
            .field("translator", &"..")
            .finish()
    }
}

impl RequestBuilder {
    pub fn new(
        profile: VoiceProfile,
        format: OutputFormat,
        translator: Arc<dyn MarkupTranslator>,
    ) -> Self {
        Self {
            profile,
            format,
            translator,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Build the request for a file of the given source format.
    pub fn build(&self, source: SourceFormat, contents: &str) -> Result<SynthesisRequest> {
        let input = match source {
            SourceFormat::Txt => Content::Text(contents.to_string()),
            SourceFormat::Smd => Content::Ssml(self.translator.to_ssml(contents)?),
            SourceFormat::Ssml => Content::Ssml(contents.to_string()),
        };

        Ok(SynthesisRequest {
            input,
            voice: self.profile.voice.clone(),
            audio_config: self.audio_config(),
        })
    }

    /// Like [`build`](Self::build), resolving the format from a raw extension.
    pub fn build_for_extension(&self, extension: &str, contents: &str) -> Result<SynthesisRequest> {
        let source = SourceFormat::from_extension(extension)
            .ok_or_else(|| TtsError::UnsupportedFormat(extension.to_string()))?;
        self.build(source, contents)
    }

    fn audio_config(&self) -> AudioConfig {
        let mut overrides = self.profile.audio_config.clone();
        overrides.remove("audioEncoding");
        AudioConfig {
            audio_encoding: self.format.encoding().to_string(),
            overrides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::VoiceDescriptor;
    use crate::markup::{Platform, SpeechMarkdown};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct FixedTranslator;

    impl MarkupTranslator for FixedTranslator {
        fn to_ssml(&self, markdown: &str) -> Result<String> {
            Ok(format!("<speak>translated:{markdown}</speak>"))
        }
    }

    fn profile() -> VoiceProfile {
        VoiceProfile {
            voice: VoiceDescriptor {
                language_code: "de-DE".to_string(),
                name: Some("de-DE-Wavenet-B".to_string()),
                ..Default::default()
            },
            audio_config: json!({ "speakingRate": 1.1, "audioEncoding": "OGG_OPUS" })
                .as_object()
                .cloned()
                .unwrap(),
        }
    }

    fn builder(format: OutputFormat) -> RequestBuilder {
        RequestBuilder::new(profile(), format, Arc::new(FixedTranslator))
    }

    #[test]
    fn txt_becomes_plain_text_input() {
        let request = builder(OutputFormat::Mp3)
            .build(SourceFormat::Txt, "Hello world")
            .unwrap();
        assert_eq!(request.input.as_text(), Some("Hello world"));
        assert_eq!(request.input.as_ssml(), None);
    }

    #[test]
    fn ssml_is_passed_verbatim() {
        let markup = "<speak>Hi <break time=\"1s\"/> there</speak>";
        let request = builder(OutputFormat::Mp3)
            .build(SourceFormat::Ssml, markup)
            .unwrap();
        assert_eq!(request.input, Content::Ssml(markup.to_string()));
    }

    #[test]
    fn smd_always_goes_through_translator() {
        let request = builder(OutputFormat::Mp3)
            .build(SourceFormat::Smd, "Hi [1s] there")
            .unwrap();
        assert_eq!(
            request.input,
            Content::Ssml("<speak>translated:Hi [1s] there</speak>".to_string())
        );
    }

    #[test]
    fn smd_with_real_translator() {
        let builder = RequestBuilder::new(
            profile(),
            OutputFormat::Mp3,
            Arc::new(SpeechMarkdown::new(Platform::GoogleAssistant)),
        );
        let request = builder.build(SourceFormat::Smd, "Hi [1s] there").unwrap();
        assert_eq!(
            request.input.as_ssml(),
            Some("<speak>Hi <break time=\"1s\"/> there</speak>")
        );
    }

    #[test]
    fn encoding_follows_output_format_and_overrides_are_merged() {
        let mp3 = builder(OutputFormat::Mp3)
            .build(SourceFormat::Txt, "x")
            .unwrap();
        assert_eq!(
            serde_json::to_value(&mp3.audio_config).unwrap(),
            json!({ "audioEncoding": "MP3", "speakingRate": 1.1 })
        );

        let wav = builder(OutputFormat::Wav)
            .build(SourceFormat::Txt, "x")
            .unwrap();
        assert_eq!(wav.audio_config.audio_encoding, "LINEAR16");
        assert_eq!(wav.voice, profile().voice);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = builder(OutputFormat::Mp3)
            .build_for_extension("docx", "x")
            .unwrap_err();
        assert!(matches!(err, TtsError::UnsupportedFormat(ext) if ext == "docx"));

        let ok = builder(OutputFormat::Mp3)
            .build_for_extension("ssml", "<speak/>")
            .unwrap();
        assert_eq!(ok.input.as_ssml(), Some("<speak/>"));
    }
}
