//! Configuration: the voice catalog file and API credentials.
//!
//! The voice catalog is a JSON document mapping a profile name to a voice
//! descriptor and optional audio-config overrides:
//!
//! ```json
//! {
//!   "voices": {
//!     "germanSales": {
//!       "voice": { "languageCode": "de-DE", "name": "de-DE-Wavenet-B" },
//!       "audioConfig": { "speakingRate": 1.05 }
//!     }
//!   }
//! }
//! ```
//!
//! The `voices` wrapper is optional; a bare name → profile mapping is
//! accepted too.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::VoiceDescriptor;
use crate::error::{Result, TtsError};

/// File name looked up next to the executable and in the config dirs.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Environment variable naming an explicit catalog path.
pub const CONFIG_ENV_VAR: &str = "TTS_BATCH_CONFIG";
/// Profile used when `--voice` is not given.
pub const DEFAULT_VOICE: &str = "germanSales";

/// A named voice descriptor plus audio-config overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceProfile {
    pub voice: VoiceDescriptor,
    #[serde(default)]
    pub audio_config: serde_json::Map<String, serde_json::Value>,
}

/// All profiles from one catalog file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceCatalog {
    profiles: BTreeMap<String, VoiceProfile>,
}

#[derive(Deserialize)]
struct WrappedCatalog {
    voices: BTreeMap<String, VoiceProfile>,
}

impl VoiceCatalog {
    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TtsError::ConfigNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(TtsError::Io(e)),
        };
        let catalog = Self::parse(&raw).map_err(|message| TtsError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::debug!(
            path = %path.display(),
            profiles = catalog.profiles.len(),
            "Loaded voice catalog"
        );
        Ok(catalog)
    }

    /// Parse catalog JSON, returning a human-readable message on failure.
    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        if !value.is_object() {
            return Err("expected a JSON object at the top level".to_string());
        }

        // A `voices` object that is not itself a profile is the wrapper.
        let wrapped = value
            .get("voices")
            .and_then(serde_json::Value::as_object)
            .is_some_and(|voices| !voices.contains_key("voice"));
        if wrapped {
            return serde_json::from_value::<WrappedCatalog>(value)
                .map(|wrapped| Self {
                    profiles: wrapped.voices,
                })
                .map_err(|e| e.to_string());
        }

        serde_json::from_value::<BTreeMap<String, VoiceProfile>>(value)
            .map(|profiles| Self { profiles })
            .map_err(|e| e.to_string())
    }

    pub fn from_profiles(profiles: impl IntoIterator<Item = (String, VoiceProfile)>) -> Self {
        Self {
            profiles: profiles.into_iter().collect(),
        }
    }

    /// Select a profile by name.
    pub fn profile(&self, name: &str) -> Result<&VoiceProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| TtsError::UnknownVoice {
                name: name.to_string(),
                available: self.names().map(ToString::to_string).collect(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Candidate catalog locations in lookup order.
///
/// An explicit path or the env override is the only candidate when present.
pub fn config_candidates(explicit: Option<&Path>, env_override: Option<PathBuf>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    if let Some(path) = env_override {
        return vec![path];
    }

    let mut candidates = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(dir.join(CONFIG_FILE_NAME));
    }
    if let Some(dirs) = directories::ProjectDirs::from("", "", "tts-batch") {
        candidates.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    candidates.push(PathBuf::from(CONFIG_FILE_NAME));
    candidates
}

/// Resolve the catalog path: the first existing candidate, or the first
/// candidate so the not-found error names a sensible location.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    let env_override = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let candidates = config_candidates(explicit, env_override);
    candidates
        .iter()
        .find(|path| path.is_file())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Credentials for the remote synthesis API.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// OAuth access token sent as a bearer header.
    AccessToken(String),
    /// API key sent as the `key` query parameter.
    ApiKey(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessToken(_) => f.write_str("AccessToken(..)"),
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
        }
    }
}

/// Remote API settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub credentials: Credentials,
    pub base_url: Option<String>,
}

impl ApiSettings {
    /// Load from environment variables (`.env` is honored if present).
    ///
    /// `GOOGLE_TTS_ACCESS_TOKEN` wins over `GOOGLE_API_KEY`;
    /// `GOOGLE_TTS_BASE_URL` overrides the endpoint.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let credentials = if let Some(token) = non_empty("GOOGLE_TTS_ACCESS_TOKEN") {
            Credentials::AccessToken(token)
        } else if let Some(key) = non_empty("GOOGLE_API_KEY") {
            Credentials::ApiKey(key)
        } else {
            return Err(TtsError::Authentication(
                "No Google credentials found. Set GOOGLE_TTS_ACCESS_TOKEN or GOOGLE_API_KEY"
                    .to_string(),
            ));
        };

        Ok(Self {
            credentials,
            base_url: non_empty("GOOGLE_TTS_BASE_URL"),
        })
    }
}
