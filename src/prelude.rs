//! Convenience re-exports for common use.

pub use crate::audio::{
    Content, GoogleTtsProvider, OutputFormat, SourceFormat, SpeechSynthesizer, SynthesisRequest,
    VoiceDescriptor,
};
pub use crate::batch::{
    scan_directory, BatchDispatcher, BatchReport, ConversionJob, FailurePolicy, RequestBuilder,
};
pub use crate::config::{ApiSettings, Credentials, VoiceCatalog, VoiceProfile};
pub use crate::error::{Result, TtsError};
pub use crate::markup::{MarkupTranslator, Platform, SpeechMarkdown};
