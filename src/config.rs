//! Process configuration loaded from the environment.

use crate::backend::{BackoffConfig, GenAiImageBackend, OpenAiBackend};
use crate::exec_ctx::ExecCtx;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const KEYS: [&str; 10] = [
    "NVIDIA_API_KEY",
    "CONTENT_CREATOR_MODEL",
    "DIGITAL_ARTIST_MODEL",
    "IMAGE_GENERATION_MODEL",
    "LLM_BASE_URL",
    "IMAGE_BASE_URL",
    "LOG_LEVEL",
    "MAX_RETRIES",
    "TIMEOUT",
    "OUTPUT_DIR",
];

const MIN_HTTP_TIMEOUT: Duration = Duration::from_secs(180);

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,

    // Models
    pub content_model: String,
    pub artist_model: String,
    pub image_model: String,

    // Endpoints
    pub llm_base_url: String,
    pub image_base_url: String,

    pub log_level: String,

    // Image synthesis budget
    pub max_retries: u32,
    pub timeout: Duration,

    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let api_key = lookup("NVIDIA_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("NVIDIA_API_KEY is not set")?;

        let max_retries: u32 = var("MAX_RETRIES", "3")
            .parse()
            .context("MAX_RETRIES must be a positive integer")?;
        anyhow::ensure!(max_retries >= 1, "MAX_RETRIES must be at least 1");

        let timeout_secs: u64 = var("TIMEOUT", "120")
            .parse()
            .context("TIMEOUT must be a number of seconds")?;

        Ok(Self {
            api_key,
            content_model: var("CONTENT_CREATOR_MODEL", "meta/llama-3.1-405b-instruct"),
            artist_model: var("DIGITAL_ARTIST_MODEL", "mistralai/mixtral-8x7b-instruct-v0.1"),
            image_model: var("IMAGE_GENERATION_MODEL", "stabilityai/stable-diffusion-3-medium"),
            llm_base_url: var("LLM_BASE_URL", "https://integrate.api.nvidia.com"),
            image_base_url: var("IMAGE_BASE_URL", "https://ai.api.nvidia.com"),
            log_level: var("LOG_LEVEL", "info"),
            max_retries,
            timeout: Duration::from_secs(timeout_secs),
            output_dir: PathBuf::from(var("OUTPUT_DIR", "AI_Response")),
        })
    }

    /// Retry budget for image synthesis.
    pub fn backoff(&self) -> BackoffConfig {
        BackoffConfig::standard()
            .with_max_attempts(self.max_retries)
            .with_attempt_timeout(Some(self.timeout))
    }

    /// Overall HTTP client timeout. Never below the per-attempt ceiling, so
    /// a slow synthesis attempt ends as a retryable [`Timeout`] rather than
    /// being cut short by the client.
    ///
    /// [`Timeout`]: crate::PipelineError::Timeout
    pub fn http_timeout(&self) -> Duration {
        self.timeout.max(MIN_HTTP_TIMEOUT)
    }

    /// Wire the HTTP backends into an [`ExecCtx`].
    pub fn exec_ctx(&self) -> Result<ExecCtx> {
        let ctx = ExecCtx::builder(&self.llm_base_url)
            .backend(Arc::new(OpenAiBackend::new().with_api_key(&self.api_key)))
            .image_base_url(&self.image_base_url)
            .image_backend(Arc::new(
                GenAiImageBackend::new(&self.api_key).with_model(&self.image_model),
            ))
            .backoff(self.backoff())
            .timeout(self.http_timeout())
            .build()
            .context("failed to build execution context")?;
        Ok(ctx)
    }

    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  NVIDIA_API_KEY: {}", redact(&self.api_key));
        tracing::info!("  CONTENT_CREATOR_MODEL: {}", self.content_model);
        tracing::info!("  DIGITAL_ARTIST_MODEL: {}", self.artist_model);
        tracing::info!("  IMAGE_GENERATION_MODEL: {}", self.image_model);
        tracing::info!("  LLM_BASE_URL: {}", self.llm_base_url);
        tracing::info!("  IMAGE_BASE_URL: {}", self.image_base_url);
        tracing::info!(
            "  MAX_RETRIES: {} TIMEOUT: {}s OUTPUT_DIR: {}",
            self.max_retries,
            self.timeout.as_secs(),
            self.output_dir.display()
        );
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("content_model", &self.content_model)
            .field("artist_model", &self.artist_model)
            .field("image_model", &self.image_model)
            .field("llm_base_url", &self.llm_base_url)
            .field("image_base_url", &self.image_base_url)
            .field("log_level", &self.log_level)
            .field("max_retries", &self.max_retries)
            .field("timeout", &self.timeout)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

/// Environment check: one line per known variable, secrets masked.
pub fn report(lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::from("Environment variables:\n");
    for key in KEYS {
        let shown = match lookup(key).filter(|v| !v.trim().is_empty()) {
            Some(v) if key.ends_with("_KEY") => redact(&v),
            Some(v) => v,
            None if key == "NVIDIA_API_KEY" => "<not set> (required)".to_string(),
            None => "<not set> (default)".to_string(),
        };
        let _ = writeln!(out, "  {key}: {shown}");
    }
    out
}

/// Mask a secret, keeping a short prefix for recognition.
pub fn redact(value: &str) -> String {
    if value.chars().count() <= 8 {
        return "***".to_string();
    }
    let prefix: String = value.chars().take(6).collect();
    format!("{prefix}***")
}
