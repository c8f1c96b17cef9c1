use std::path::PathBuf;
use thiserror::Error;

/// Failure while turning a line into an event.
///
/// Any of these stops reading the rest of the current file.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("'{keyword}' line does not match template '{template}': {message}")]
    TemplateMismatch {
        keyword: &'static str,
        template: &'static str,
        message: String,
    },

    #[error("'{keyword}' line has a non-numeric {field} '{value}'")]
    BadNumber {
        keyword: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("'{keyword}' payload is {found}, expected an object")]
    PayloadShape {
        keyword: &'static str,
        found: &'static str,
    },

    #[error("'{keyword}' payload field '{field}' is {found}, expected {expected}")]
    FieldShape {
        keyword: &'static str,
        field: &'static str,
        found: &'static str,
        expected: &'static str,
    },

    #[error("Response time '{time}' is not '<date> <time>-<zone>'")]
    ResponseTime { time: String },

    #[error("Continuation line with no record in progress: '{line}'")]
    DetachedContinuation { line: String },
}

/// Run-level and file-level failures of the driver
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Nothing to analyze: no source has any log file")]
    NothingToAnalyze,

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode {} as {encoding}", path.display())]
    Encoding {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("Worker thread {worker} panicked")]
    WorkerPanicked { worker: usize },
}
