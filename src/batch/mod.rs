//! The batch conversion pipeline: scan, build requests, dispatch.

pub mod dispatch;
pub mod request;
pub mod scan;

pub use dispatch::{
    prepare_output_dir, BatchDispatcher, BatchReport, FailurePolicy, JobOutcome,
    DEFAULT_CONCURRENCY,
};
pub use request::RequestBuilder;
pub use scan::{scan_directory, ConversionJob};
