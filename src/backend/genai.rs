//! Backend for NVIDIA's hosted generative-image API.
//!
//! Endpoint: `POST {base}/v1/genai/{model}` with a [`SynthesisRequest`]
//! body. A successful response is `{"image": "<base64>"}`.

use super::{ImageBackend, SynthesisRequest};
use crate::error::Result;
use crate::PipelineError;
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Default image model path.
pub const DEFAULT_IMAGE_MODEL: &str = "stabilityai/stable-diffusion-3-medium";

/// Image backend for `ai.api.nvidia.com/v1/genai/...`.
///
/// # Example
///
/// ```
/// use promo_pipeline::backend::GenAiImageBackend;
///
/// let backend = GenAiImageBackend::new("nvapi-...")
///     .with_model("stabilityai/stable-diffusion-3-medium");
/// assert_eq!(backend.model(), "stabilityai/stable-diffusion-3-medium");
/// ```
#[derive(Clone)]
pub struct GenAiImageBackend {
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GenAiImageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiImageBackend")
            .field("api_key", &crate::config::redact(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

impl GenAiImageBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self, base_url: &str) -> String {
        format!(
            "{}/v1/genai/{}",
            base_url.trim_end_matches('/'),
            self.model.trim_matches('/')
        )
    }
}

/// Pull the image bytes out of a synthesis response body.
///
/// The body must be a JSON object with a string `image` field holding
/// standard base64. Anything else is a [`PipelineError::Contract`].
pub fn decode_synthesis_body(body: &[u8]) -> Result<Vec<u8>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PipelineError::Contract(format!("response body is not JSON: {}", e)))?;

    let map = value
        .as_object()
        .ok_or_else(|| PipelineError::Contract("unexpected response type".into()))?;

    let encoded = match map.get("image") {
        Some(Value::String(s)) => s,
        _ => return Err(PipelineError::Contract("response missing image data".into())),
    };

    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| PipelineError::Contract(format!("image data is not valid base64: {}", e)))
}

#[async_trait]
impl ImageBackend for GenAiImageBackend {
    async fn synthesize(
        &self,
        client: &Client,
        base_url: &str,
        request: &SynthesisRequest,
    ) -> Result<Vec<u8>> {
        let url = self.endpoint(base_url);
        debug!(url = %url, prompt = %request.prompt, "requesting image synthesis");

        let resp = client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PipelineError::HttpError { status, body: text });
        }

        let body = resp.bytes().await?;
        decode_synthesis_body(&body)
    }

    fn name(&self) -> &'static str {
        "genai"
    }
}
