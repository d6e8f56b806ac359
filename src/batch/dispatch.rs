//! Batch dispatch: run conversion jobs with bounded concurrency.

use std::path::Path;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::request::RequestBuilder;
use super::scan::ConversionJob;
use crate::audio::SpeechSynthesizer;
use crate::error::{Result, TtsError};

/// Default number of jobs in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// What to do when a job fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the batch on the first failure; in-flight jobs are dropped.
    #[default]
    FailFast,
    /// Run every job and report all failures at the end.
    CollectAll,
}

/// Result of one job.
#[derive(Debug)]
pub struct JobOutcome {
    pub job: ConversionJob,
    pub result: Result<()>,
}

/// Outcomes of a batch, in completion order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Collapse the report into an error if any job failed.
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TtsError::BatchFailed {
                failed: self.failed(),
                total: self.total(),
            })
        }
    }
}

/// Remove everything inside `dir`, creating it if absent.
pub async fn prepare_output_dir(dir: &Path) -> Result<()> {
    let write_err = |source: std::io::Error| TtsError::Write {
        path: dir.to_path_buf(),
        source,
    };

    tokio::fs::create_dir_all(dir).await.map_err(write_err)?;
    let mut entries = tokio::fs::read_dir(dir).await.map_err(write_err)?;
    let mut removed = 0usize;
    while let Some(entry) = entries.next_entry().await.map_err(write_err)? {
        let path = entry.path();
        let is_dir = entry.file_type().await.map_err(write_err)?.is_dir();
        let removal = if is_dir {
            tokio::fs::remove_dir_all(&path).await
        } else {
            tokio::fs::remove_file(&path).await
        };
        removal.map_err(|source| TtsError::Write { path, source })?;
        removed += 1;
    }

    debug!(dir = %dir.display(), removed, "Cleared output directory");
    Ok(())
}

/// Runs conversion jobs against a synthesizer.
pub struct BatchDispatcher {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    builder: RequestBuilder,
    concurrency: usize,
    policy: FailurePolicy,
}

impl BatchDispatcher {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, builder: RequestBuilder) -> Self {
        Self {
            synthesizer,
            builder,
            concurrency: DEFAULT_CONCURRENCY,
            policy: FailurePolicy::default(),
        }
    }

    /// Maximum jobs in flight; values below 1 are treated as 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Clear `output_dir`, then convert every job under the failure policy.
    pub async fn run(&self, output_dir: &Path, jobs: Vec<ConversionJob>) -> Result<BatchReport> {
        prepare_output_dir(output_dir).await?;

        info!(
            jobs = jobs.len(),
            concurrency = self.concurrency,
            policy = ?self.policy,
            format = %self.builder.format(),
            "Starting batch"
        );

        let report = match self.policy {
            FailurePolicy::FailFast => self.run_fail_fast(jobs).await?,
            FailurePolicy::CollectAll => {
                let report = self.run_all(jobs).await;
                for outcome in report.failures() {
                    if let Err(e) = &outcome.result {
                        warn!(
                            input = %outcome.job.input_path.display(),
                            category = ?e.category(),
                            error = %e,
                            "Conversion failed"
                        );
                    }
                }
                report.into_result()?
            }
        };

        info!(converted = report.succeeded(), "Batch finished");
        Ok(report)
    }

    /// Convert every job, capturing each outcome. Does not touch the
    /// output directory beyond writing job outputs.
    pub async fn run_all(&self, jobs: Vec<ConversionJob>) -> BatchReport {
        let outcomes = stream::iter(jobs)
            .map(|job| self.convert_job(job))
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await;
        BatchReport { outcomes }
    }

    async fn run_fail_fast(&self, jobs: Vec<ConversionJob>) -> Result<BatchReport> {
        let mut pending = stream::iter(jobs)
            .map(|job| self.convert_job(job))
            .buffer_unordered(self.concurrency);

        let mut report = BatchReport::default();
        while let Some(outcome) = pending.next().await {
            if let Err(e) = outcome.result {
                warn!(
                    input = %outcome.job.input_path.display(),
                    category = ?e.category(),
                    error = %e,
                    "Conversion failed, aborting batch"
                );
                return Err(e);
            }
            report.outcomes.push(outcome);
        }
        Ok(report)
    }

    async fn convert_job(&self, job: ConversionJob) -> JobOutcome {
        let result = self.convert(&job).await;
        JobOutcome { job, result }
    }

    async fn convert(&self, job: &ConversionJob) -> Result<()> {
        let contents = tokio::fs::read_to_string(&job.input_path)
            .await
            .map_err(|source| TtsError::Read {
                path: job.input_path.clone(),
                source,
            })?;

        let request = self
            .builder
            .build(job.source, &contents)
            .map_err(|e| TtsError::synthesis(&job.input_path, e))?;

        let audio = self
            .synthesizer
            .synthesize(&request)
            .await
            .map_err(|e| TtsError::synthesis(&job.input_path, e))?;

        tokio::fs::write(&job.output_path, &audio)
            .await
            .map_err(|source| TtsError::Write {
                path: job.output_path.clone(),
                source,
            })?;

        debug!(
            output = %job.output_path.display(),
            bytes = audio.len(),
            "Wrote audio"
        );
        Ok(())
    }
}
