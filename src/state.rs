//! The per-run record threaded through every stage.

use crate::error::PipelineError;
use crate::types::{ContentRecord, Decision, ErrorInfo, ImageArtifact, StageKind};
use std::path::{Path, PathBuf};

/// Mutable state of one run.
///
/// Created once per run and owned by it; never shared between runs. The
/// product description and output location are fixed at construction.
///
/// An artifact from an earlier stage may stay set while a later stage's
/// error is recorded: after a failed image stage `content` is still
/// populated and `error` describes the image failure.
#[derive(Debug, Clone)]
pub struct PipelineState {
    product_desc: String,
    output_location: PathBuf,
    pub content: Option<ContentRecord>,
    pub image: Option<ImageArtifact>,
    pub feedback: Option<Decision>,
    pub error: Option<ErrorInfo>,
}

impl PipelineState {
    pub fn new(product_desc: impl Into<String>, output_location: impl Into<PathBuf>) -> Self {
        Self {
            product_desc: product_desc.into(),
            output_location: output_location.into(),
            content: None,
            image: None,
            feedback: None,
            error: None,
        }
    }

    pub fn product_desc(&self) -> &str {
        &self.product_desc
    }

    pub fn output_location(&self) -> &Path {
        &self.output_location
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Record a stage failure, replacing any earlier error.
    pub fn record_error(&mut self, stage: StageKind, err: &PipelineError) {
        self.error = Some(ErrorInfo::new(stage, err));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Content and image when both are present and no error is pending.
    pub fn completed(&self) -> Option<(&ContentRecord, &ImageArtifact)> {
        if self.error.is_some() {
            return None;
        }
        Some((self.content.as_ref()?, self.image.as_ref()?))
    }
}
