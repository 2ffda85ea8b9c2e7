use crate::error::{PipelineError, Result};
use crate::output_parser::ParseError;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which part of the pipeline an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Content,
    Image,
    Approval,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Content => "content",
            StageKind::Image => "image",
            StageKind::Approval => "approval",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Promotional copy produced by the content stage.
///
/// All three fields are guaranteed non-empty; a record that would violate
/// this cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    title: String,
    message: String,
    tags: Vec<String>,
}

impl ContentRecord {
    /// Build a record, trimming every field and rejecting empty values.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        tags: Vec<String>,
    ) -> std::result::Result<Self, ParseError> {
        let title = title.into().trim().to_string();
        let message = message.into().trim().to_string();
        let tags: Vec<String> = tags.into_iter().map(|t| t.trim().to_string()).collect();

        if title.is_empty() {
            return Err(ParseError::EmptyField { field: "Title" });
        }
        if message.is_empty() {
            return Err(ParseError::EmptyField { field: "Message" });
        }
        if tags.is_empty() || tags.iter().any(|t| t.is_empty()) {
            return Err(ParseError::EmptyField { field: "Tags" });
        }

        Ok(Self {
            title,
            message,
            tags,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// A decoded image together with the raw bytes it came from.
#[derive(Debug, Clone)]
pub struct ImageArtifact {
    bytes: Vec<u8>,
    image: DynamicImage,
    format: ImageFormat,
}

impl ImageArtifact {
    /// Decode raw image bytes. Undecodable data is a contract violation.
    pub fn decode(bytes: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| PipelineError::Contract(format!("unrecognized image data: {}", e)))?;
        let image = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| PipelineError::Contract(format!("failed to decode image: {}", e)))?;
        Ok(Self {
            bytes,
            image,
            format,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// File extension matching the detected format (e.g. `"png"`).
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }
}

/// An operator's verdict at the approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approve => f.write_str("approve"),
            Decision::Reject => f.write_str("reject"),
        }
    }
}

/// A stage-tagged failure recorded in the pipeline state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub stage: StageKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(stage: StageKind, err: &PipelineError) -> Self {
        Self {
            stage,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stage failed: {}", self.stage, self.message)
    }
}

impl From<ErrorInfo> for PipelineError {
    fn from(info: ErrorInfo) -> Self {
        PipelineError::StageFailed {
            stage: info.stage,
            message: info.message,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_png() -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    DynamicImage::new_rgb8(4, 4)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}
