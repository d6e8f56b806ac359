//! Error types for tts-batch.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for all conversion operations.
#[derive(Error, Debug)]
pub enum TtsError {
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse configuration {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown voice '{name}' (available: {})", .available.join(", "))]
    UnknownVoice {
        name: String,
        available: Vec<String>,
    },

    #[error("Input directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Synthesis failed for {}: {source}", .path.display())]
    Synthesis {
        path: PathBuf,
        #[source]
        source: Box<TtsError>,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{failed} of {total} conversions failed")]
    BatchFailed { failed: usize, total: usize },

    #[error("Markup error: {0}")]
    Markup(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Broad error category, used for log fields and exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Filesystem,
    Synthesis,
    Authentication,
    Network,
    Internal,
}

impl TtsError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Wrap a per-job failure with the input file it belongs to.
    pub fn synthesis(path: impl Into<PathBuf>, source: TtsError) -> Self {
        Self::Synthesis {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigNotFound(_)
            | Self::ConfigParse { .. }
            | Self::UnknownVoice { .. }
            | Self::InvalidArgument(_) => ErrorCategory::Configuration,
            Self::DirectoryNotFound(_) | Self::Read { .. } | Self::Write { .. } | Self::Io(_) => {
                ErrorCategory::Filesystem
            }
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::Network(_) | Self::Timeout(_) => ErrorCategory::Network,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                _ => ErrorCategory::Synthesis,
            },
            Self::RateLimited { .. } | Self::BatchFailed { .. } | Self::Markup(_) => {
                ErrorCategory::Synthesis
            }
            Self::Synthesis { source, .. } => source.category(),
            Self::UnsupportedFormat(_) | Self::Serialization(_) | Self::InvalidState(_) => {
                ErrorCategory::Internal
            }
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TtsError>;
