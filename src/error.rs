use crate::output_parser::ParseError;
use crate::types::StageKind;
use std::time::Duration;
use thiserror::Error;

/// Errors produced by the pipeline and its components.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Missing or invalid required input. No external call was attempted.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The model answered, but its text did not have the expected shape.
    #[error("Could not parse model output: {0}")]
    Parse(#[from] ParseError),

    /// Low-level HTTP transport failure (connection refused, reset, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// HTTP error with status code and response body.
    ///
    /// Returned by backend implementations when the provider returns a
    /// non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpError {
        /// HTTP status code (e.g. 429, 500, 503).
        status: u16,
        /// Response body text.
        body: String,
    },

    /// A single external call exceeded its time ceiling.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// A successful response whose body violates the expected shape.
    #[error("Response contract violated: {0}")]
    Contract(String),

    /// Collecting a human decision failed.
    #[error("Approval failed: {0}")]
    Approval(String),

    /// The operator's input stream ended before an answer was read.
    #[error("Approval input closed")]
    InputClosed,

    /// A pipeline stage failed with a descriptive message.
    ///
    /// This is the caller-facing error returned by the orchestrator once a
    /// run terminates with an unresolved error.
    #[error("{stage} stage failed: {message}")]
    StageFailed { stage: StageKind, message: String },

    /// Invalid configuration detected at build time.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem failure while preparing or writing run output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Transient failures: transport errors, timeouts and non-2xx statuses.
    pub fn is_transport(&self) -> bool {
        match self {
            PipelineError::Request(_)
            | PipelineError::HttpError { .. }
            | PipelineError::Timeout(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
