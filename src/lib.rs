//! tts-batch: convert a directory of text into speech.
//!
//! Plain text (`.txt`), Speech Markdown (`.smd`) and SSML (`.ssml`) files are
//! turned into synthesis requests and sent to a speech backend; each response
//! is written as one `.mp3` or `.wav` file with the same base name.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use tts_batch::prelude::*;
//!
//! # async fn example() -> tts_batch::error::Result<()> {
//! let catalog = VoiceCatalog::load(Path::new("config.json"))?;
//! let profile = catalog.profile("germanSales")?.clone();
//! let settings = ApiSettings::from_env()?;
//!
//! let builder = RequestBuilder::new(
//!     profile,
//!     OutputFormat::Mp3,
//!     Arc::new(SpeechMarkdown::default()),
//! );
//! let jobs = scan_directory(Path::new("texts"), Path::new("audio"), OutputFormat::Mp3)?;
//! let report = BatchDispatcher::new(Arc::new(GoogleTtsProvider::new(settings.credentials)), builder)
//!     .run(Path::new("audio"), jobs)
//!     .await?;
//! println!("{} files written", report.succeeded());
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod batch;
pub mod config;
pub mod error;
pub mod markup;
pub mod prelude;
pub mod provider;

#[cfg(feature = "cli")]
pub mod cli;
