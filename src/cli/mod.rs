//! Command-line interface for tts-batch.

pub mod convert;

use std::path::PathBuf;

use clap::Parser;

use crate::audio::OutputFormat;
use crate::batch::{FailurePolicy, DEFAULT_CONCURRENCY};
use crate::config::DEFAULT_VOICE;
use crate::markup::Platform;

/// Convert a directory of text, Speech Markdown and SSML files into speech.
#[derive(Parser, Debug, Clone)]
#[command(name = "tts-batch", version, about)]
pub struct Cli {
    /// Directory with .txt, .smd and .ssml files
    pub input: PathBuf,

    /// Directory for the audio files (emptied before writing)
    pub output: PathBuf,

    /// Voice profile to use, as named in the config file
    #[arg(short, long, default_value = DEFAULT_VOICE)]
    pub voice: String,

    /// Output lossless .wav instead of .mp3
    #[arg(long)]
    pub wav: bool,

    /// Path to the voice config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of files synthesized at once
    #[arg(short = 'j', long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Convert every file even if some fail, then report all failures
    #[arg(long)]
    pub keep_going: bool,

    /// Speech Markdown platform profile
    #[arg(long, default_value_t = Platform::GoogleAssistant)]
    pub platform: Platform,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn format(&self) -> OutputFormat {
        if self.wav {
            OutputFormat::Wav
        } else {
            OutputFormat::Mp3
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::CollectAll
        } else {
            FailurePolicy::FailFast
        }
    }
}

fn parse_concurrency(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("concurrency must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parse_positional_dirs_with_defaults() {
        let cli = Cli::try_parse_from(["tts-batch", "texts", "audio"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("texts"));
        assert_eq!(cli.output, PathBuf::from("audio"));
        assert_eq!(cli.voice, "germanSales");
        assert_eq!(cli.format(), OutputFormat::Mp3);
        assert_eq!(cli.policy(), FailurePolicy::FailFast);
        assert_eq!(cli.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(cli.platform, Platform::GoogleAssistant);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_voice_wav_and_extras() {
        let cli = Cli::try_parse_from([
            "tts-batch",
            "in",
            "out",
            "-v",
            "englishSupport",
            "--wav",
            "--config",
            "voices.json",
            "-j",
            "2",
            "--keep-going",
            "--platform",
            "amazon-alexa",
        ])
        .unwrap();
        assert_eq!(cli.voice, "englishSupport");
        assert_eq!(cli.format(), OutputFormat::Wav);
        assert_eq!(cli.config, Some(PathBuf::from("voices.json")));
        assert_eq!(cli.concurrency, 2);
        assert_eq!(cli.policy(), FailurePolicy::CollectAll);
        assert_eq!(cli.platform, Platform::AmazonAlexa);
    }

    #[test]
    fn long_voice_flag() {
        let cli = Cli::try_parse_from(["tts-batch", "in", "out", "--voice", "narrator"]).unwrap();
        assert_eq!(cli.voice, "narrator");
    }

    #[test]
    fn missing_output_dir_is_rejected() {
        let err = Cli::try_parse_from(["tts-batch", "in"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let err = Cli::try_parse_from(["tts-batch", "in", "out", "-j", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn version_and_help_short_circuit() {
        let version = Cli::try_parse_from(["tts-batch", "-V"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);

        let help = Cli::try_parse_from(["tts-batch", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
    }
}
