//! Execution context shared by the stages of a run.
//!
//! [`ExecCtx`] carries the HTTP client, both backends, their endpoints, the
//! retry budget for image synthesis and an optional event handler. Build it
//! once per process and hand it to the [`Orchestrator`](crate::Orchestrator);
//! each run derives its own copy with a run-scoped event handler via
//! [`ExecCtx::with_event_handler`], so no run state is shared.

use crate::backend::{Backend, BackoffConfig, ImageBackend, OpenAiBackend};
use crate::error::{PipelineError, Result};
use crate::events::EventHandler;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Shared execution context for stage invocations.
///
/// Cloning is cheap: the client and backends are reference-counted.
///
/// # Example
///
/// ```
/// use promo_pipeline::ExecCtx;
/// use promo_pipeline::backend::{MockBackend, MockImageBackend};
/// use std::sync::Arc;
///
/// let ctx = ExecCtx::builder("http://localhost:8000")
///     .backend(Arc::new(MockBackend::fixed("Title: T\nMessage: M\nTags: #t")))
///     .image_backend(Arc::new(MockImageBackend::fixed(vec![])))
///     .build()
///     .unwrap();
/// assert_eq!(ctx.base_url, "http://localhost:8000");
/// ```
#[derive(Clone)]
pub struct ExecCtx {
    /// HTTP client (cheap to clone -- uses `Arc` internally).
    pub client: Client,
    /// Base URL of the text-generation provider.
    pub base_url: String,
    /// Text-generation backend. Default: [`OpenAiBackend`] without a key.
    pub backend: Arc<dyn Backend>,
    /// Base URL of the image-synthesis provider.
    pub image_base_url: String,
    /// Image-synthesis backend.
    pub image_backend: Arc<dyn ImageBackend>,
    /// Attempt budget and backoff for image synthesis.
    pub backoff: BackoffConfig,
    /// Optional event handler for lifecycle events.
    pub event_handler: Option<Arc<dyn EventHandler>>,
}

impl ExecCtx {
    /// Create a new builder with the text-generation base URL.
    pub fn builder(base_url: impl Into<String>) -> ExecCtxBuilder {
        ExecCtxBuilder {
            client: None,
            base_url: base_url.into(),
            backend: None,
            image_base_url: None,
            image_backend: None,
            backoff: None,
            event_handler: None,
            timeout: None,
        }
    }

    /// A copy of this context reporting to `handler` instead.
    pub fn with_event_handler(&self, handler: Option<Arc<dyn EventHandler>>) -> Self {
        Self {
            event_handler: handler,
            ..self.clone()
        }
    }
}

impl std::fmt::Debug for ExecCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecCtx")
            .field("base_url", &self.base_url)
            .field("backend", &self.backend.name())
            .field("image_base_url", &self.image_base_url)
            .field("image_backend", &self.image_backend.name())
            .field("backoff", &self.backoff)
            .field("has_event_handler", &self.event_handler.is_some())
            .finish()
    }
}

/// Builder for [`ExecCtx`].
pub struct ExecCtxBuilder {
    client: Option<Client>,
    base_url: String,
    backend: Option<Arc<dyn Backend>>,
    image_base_url: Option<String>,
    image_backend: Option<Arc<dyn ImageBackend>>,
    backoff: Option<BackoffConfig>,
    event_handler: Option<Arc<dyn EventHandler>>,
    timeout: Option<Duration>,
}

impl ExecCtxBuilder {
    /// Set the HTTP client. If not set, a default client is created.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the text-generation backend. Default: [`OpenAiBackend`].
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the image-synthesis base URL. Default: the text base URL.
    pub fn image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = Some(url.into());
        self
    }

    /// Set the image-synthesis backend. Required.
    pub fn image_backend(mut self, backend: Arc<dyn ImageBackend>) -> Self {
        self.image_backend = Some(backend);
        self
    }

    /// Set the image retry configuration. Default: [`BackoffConfig::standard()`].
    pub fn backoff(mut self, config: BackoffConfig) -> Self {
        self.backoff = Some(config);
        self
    }

    /// Set the event handler.
    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Set the overall HTTP request timeout. Default: 180 seconds.
    ///
    /// Applies only to a client built here; a custom client keeps its own.
    /// Image synthesis is additionally bounded per attempt by
    /// [`BackoffConfig::attempt_timeout`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the execution context.
    pub fn build(self) -> Result<ExecCtx> {
        let image_backend = self
            .image_backend
            .ok_or_else(|| PipelineError::InvalidConfig("no image backend configured".into()))?;

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout.unwrap_or(Duration::from_secs(180)))
                .build()?,
        };

        let base_url = normalize_base_url(&self.base_url);
        let image_base_url = self
            .image_base_url
            .map(|u| normalize_base_url(&u))
            .unwrap_or_else(|| base_url.clone());

        Ok(ExecCtx {
            client,
            base_url,
            backend: self
                .backend
                .unwrap_or_else(|| Arc::new(OpenAiBackend::new())),
            image_base_url,
            image_backend,
            backoff: self.backoff.unwrap_or_default(),
            event_handler: self.event_handler,
        })
    }
}

/// Strip provider path suffixes the backends append themselves.
/// e.g. "https://integrate.api.nvidia.com/v1" -> "https://integrate.api.nvidia.com"
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    for suffix in ["/v1/chat/completions", "/v1/genai", "/v1"] {
        if let Some(stripped) = trimmed.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    trimmed.to_string()
}
