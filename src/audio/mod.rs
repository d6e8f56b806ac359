//! Speech synthesis: request types, the synthesizer trait, and the Google backend.

pub mod google;
pub mod tts;
pub mod types;

pub use google::GoogleTtsProvider;
pub use tts::SpeechSynthesizer;
pub use types::*;
