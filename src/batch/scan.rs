//! Directory scan: map recognized input files to conversion jobs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::audio::{OutputFormat, SourceFormat};
use crate::error::{Result, TtsError};

/// One input file mapped to one output audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub source: SourceFormat,
}

impl ConversionJob {
    /// Build a job for `input_path` if its extension is recognized.
    pub fn for_input(input_path: &Path, output_dir: &Path, format: OutputFormat) -> Option<Self> {
        let source = input_path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(SourceFormat::from_extension)?;
        let stem = input_path.file_stem()?;

        let mut file_name = stem.to_os_string();
        file_name.push(".");
        file_name.push(format.extension());

        Some(Self {
            input_path: input_path.to_path_buf(),
            output_path: output_dir.join(file_name),
            source,
        })
    }
}

/// List `input_dir` and produce a job per recognized file.
///
/// Job order follows the directory listing and is not stable across
/// platforms.
pub fn scan_directory(
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<Vec<ConversionJob>> {
    if !input_dir.is_dir() {
        return Err(TtsError::DirectoryNotFound(input_dir.to_path_buf()));
    }

    let mut jobs: Vec<ConversionJob> = Vec::new();
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();

        let Some(job) = ConversionJob::for_input(&path, output_dir, format) else {
            tracing::debug!(path = %path.display(), "Skipping unrecognized file");
            continue;
        };
        // Follows symlinks; a dangling link to a recognized name is an error.
        let metadata = std::fs::metadata(&path).map_err(|source| TtsError::Read {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_file() {
            continue;
        }
        if let Some(other) = claimed.insert(job.output_path.clone(), job.input_path.clone()) {
            return Err(TtsError::InvalidArgument(format!(
                "{} and {} would both be written to {}",
                other.display(),
                job.input_path.display(),
                job.output_path.display()
            )));
        }
        jobs.push(job);
    }

    tracing::debug!(
        input = %input_dir.display(),
        matched = jobs.len(),
        "Scanned input directory"
    );
    Ok(jobs)
}
