//! Backend traits and normalized request/response types.
//!
//! Two external services sit behind this module:
//!
//! ```text
//! ContentStage ─┐
//!               ├─► LlmRequest ──► Backend::complete() ──► LlmResponse
//! ImageStage ───┤                        │
//!               │                  OpenAiBackend  /v1/chat/completions
//!               │
//!               └─► SynthesisRequest ──► ImageBackend::synthesize() ──► image bytes
//!                                               │
//!                                      GenAiImageBackend  /v1/genai/{model}
//! ```
//!
//! [`MockBackend`] and [`MockImageBackend`] stand in for both during tests.

pub mod backoff;
pub mod genai;
pub mod mock;
pub mod openai;

pub use backoff::BackoffConfig;
pub use genai::GenAiImageBackend;
pub use mock::{MockBackend, MockImageBackend, MockImageReply};
pub use openai::OpenAiBackend;

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Guidance scale sent with every synthesis request.
pub const CFG_SCALE: f64 = 7.5;
/// Square output.
pub const ASPECT_RATIO: &str = "1:1";
/// Fixed seed so the same prompt yields the same image.
pub const SEED: u64 = 0;
/// Diffusion steps per image.
pub const STEPS: u32 = 50;
/// Steers the model away from low-quality output.
pub const NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, deformed";

/// Sampling configuration for text generation.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f64,

    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

impl LlmConfig {
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }
}

/// A normalized text-generation request: system instruction plus user text.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Model identifier (e.g. `"meta/llama-3.1-405b-instruct"`).
    pub model: String,

    /// Instruction framing the task.
    pub system_prompt: String,

    /// The user text.
    pub prompt: String,

    /// Sampling configuration.
    pub config: LlmConfig,
}

/// A normalized text-generation response.
#[derive(Debug)]
pub struct LlmResponse {
    /// The generated text content.
    pub text: String,

    /// HTTP status code (for diagnostics/logging).
    pub status: u16,

    /// Provider-specific metadata (token counts, model info).
    pub metadata: Option<serde_json::Value>,
}

/// Abstraction over text-generation providers.
///
/// Implementations translate [`LlmRequest`] into the provider's HTTP API.
/// Non-2xx statuses must surface as
/// [`PipelineError::HttpError`](crate::PipelineError::HttpError).
///
/// # Object Safety
///
/// This trait is object-safe and designed to be used as `Arc<dyn Backend>`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Execute a non-streaming completion.
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse>;

    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> &'static str;
}

/// JSON body of an image-synthesis call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRequest {
    pub prompt: String,
    pub cfg_scale: f64,
    pub aspect_ratio: String,
    pub seed: u64,
    pub steps: u32,
    pub negative_prompt: String,
}

impl SynthesisRequest {
    /// A request with the fixed sampling parameters and the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            cfg_scale: CFG_SCALE,
            aspect_ratio: ASPECT_RATIO.to_string(),
            seed: SEED,
            steps: STEPS,
            negative_prompt: NEGATIVE_PROMPT.to_string(),
        }
    }
}

/// Abstraction over image-synthesis providers.
///
/// A single call, no retry: callers wrap it in
/// [`ResilientInvoker`](crate::retry::ResilientInvoker). Transport failures
/// and non-2xx statuses must be transport errors; a 2xx body that does not
/// carry image data must be [`PipelineError::Contract`](crate::PipelineError::Contract).
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Request one image, returning its raw (decoded) bytes.
    async fn synthesize(
        &self,
        client: &Client,
        base_url: &str,
        request: &SynthesisRequest,
    ) -> Result<Vec<u8>>;

    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> &'static str;
}
