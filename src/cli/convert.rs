//! The conversion command: wire config, scan, and dispatch together.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::Cli;
use crate::audio::{GoogleTtsProvider, SpeechSynthesizer};
use crate::batch::{scan_directory, BatchDispatcher, BatchReport, RequestBuilder};
use crate::config::{resolve_config_path, ApiSettings, VoiceCatalog};
use crate::error::{Result, TtsError};
use crate::markup::SpeechMarkdown;

/// Run a conversion against the Google TTS API.
pub async fn handle_convert(cli: &Cli) -> Result<BatchReport> {
    let settings = ApiSettings::from_env()?;
    let provider = match settings.base_url {
        Some(url) => GoogleTtsProvider::new_with_base_url(settings.credentials, url),
        None => GoogleTtsProvider::new(settings.credentials),
    };
    convert_with(cli, Arc::new(provider)).await
}

/// Run a conversion with the given synthesizer.
pub async fn convert_with(
    cli: &Cli,
    synthesizer: Arc<dyn SpeechSynthesizer>,
) -> Result<BatchReport> {
    let config_path = resolve_config_path(cli.config.as_deref());
    let catalog = VoiceCatalog::load(&config_path)?;
    let profile = catalog.profile(&cli.voice)?.clone();

    let jobs = scan_directory(&cli.input, &cli.output, cli.format())?;
    ensure_distinct_dirs(&cli.input, &cli.output)?;

    let translator = Arc::new(SpeechMarkdown::new(cli.platform));
    let builder = RequestBuilder::new(profile, cli.format(), translator);

    BatchDispatcher::new(synthesizer, builder)
        .with_concurrency(cli.concurrency)
        .with_policy(cli.policy())
        .run(&cli.output, jobs)
        .await
}

/// The output directory is emptied, so it must not contain the input directory.
fn ensure_distinct_dirs(input: &Path, output: &Path) -> Result<()> {
    let Ok(input) = input.canonicalize() else {
        return Ok(());
    };
    let output = resolve_lexically(output)?;
    if input.starts_with(&output) {
        return Err(TtsError::InvalidArgument(format!(
            "Output directory {} contains the input directory {}",
            output.display(),
            input.display()
        )));
    }
    Ok(())
}

/// Canonicalize the nearest existing ancestor of `path` and re-append the
/// missing components.
fn resolve_lexically(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut missing = Vec::new();
    let mut existing = absolute.as_path();
    loop {
        match existing.canonicalize() {
            Ok(mut resolved) => {
                for component in missing.iter().rev() {
                    match component {
                        Component::ParentDir => {
                            resolved.pop();
                        }
                        Component::CurDir => {}
                        other => resolved.push(other),
                    }
                }
                return Ok(resolved);
            }
            Err(_) => match (existing.parent(), existing.components().next_back()) {
                (Some(parent), Some(last)) => {
                    missing.push(last);
                    existing = parent;
                }
                _ => return Ok(absolute.clone()),
            },
        }
    }
}
