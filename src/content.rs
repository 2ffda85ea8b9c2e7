//! Content stage: product description in, promotional copy out.
//!
//! One generation call per invocation, no retry. The raw answer goes
//! through [`parse_content_record`]; a malformed answer is a terminal
//! content-stage error, not a transport problem.

use crate::backend::{LlmConfig, LlmRequest};
use crate::error::{PipelineError, Result};
use crate::exec_ctx::ExecCtx;
use crate::output_parser::error::truncate;
use crate::output_parser::parse_content_record;
use crate::state::PipelineState;
use crate::types::{ContentRecord, StageKind};
use tracing::{debug, error, info};

/// Default model for copywriting.
pub const DEFAULT_CONTENT_MODEL: &str = "meta/llama-3.1-405b-instruct";

/// Instruction given to the copywriting model.
pub const CONTENT_SYSTEM_PROMPT: &str = "You are an expert social media content creator.
Your task is to create a different promotion message with the given product description.
The output promotion message MUST use the following format:
Title: a powerful, short message that depicts what this product is about
Message: be creative for the promotion message, but make it short and ready for social media feeds
Tags: the hashtags humans would normally use in social media, separated by commas

Example format:
Title: Stay Hydrated in Style
Message: Keep your hydration game strong with our sleek 1L water bottle. Perfect for gym, office, or outdoor adventures!
Tags: #StayHydrated, #WaterBottle, #Fitness, #Lifestyle";

/// Produces a [`ContentRecord`] from a product description.
#[derive(Debug, Clone)]
pub struct ContentStage {
    model: String,
    system_prompt: String,
    config: LlmConfig,
}

impl Default for ContentStage {
    fn default() -> Self {
        Self {
            model: DEFAULT_CONTENT_MODEL.to_string(),
            system_prompt: CONTENT_SYSTEM_PROMPT.to_string(),
            config: LlmConfig::default(),
        }
    }
}

impl ContentStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_config(mut self, config: LlmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate and parse promotional copy.
    ///
    /// Fails with [`PipelineError::Validation`] before any call when the
    /// description is blank, with the backend's error when the call fails,
    /// and with [`PipelineError::Parse`] when the answer lacks a field.
    pub async fn run(&self, ctx: &ExecCtx, product_desc: &str) -> Result<ContentRecord> {
        if product_desc.trim().is_empty() {
            return Err(PipelineError::Validation(
                "product description is required".into(),
            ));
        }

        let request = LlmRequest {
            model: self.model.clone(),
            system_prompt: self.system_prompt.clone(),
            prompt: product_desc.to_string(),
            config: self.config.clone(),
        };

        let response = ctx.backend.complete(&ctx.client, &ctx.base_url, &request).await?;
        debug!(
            status = response.status,
            metadata = ?response.metadata,
            raw = %truncate(&response.text, 500),
            "content model response"
        );

        parse_content_record(&response.text).map_err(|e| {
            error!(error = %e, raw = %truncate(&response.text, 200), "unparseable content response");
            PipelineError::from(e)
        })
    }

    /// Run against `state`, recording the outcome.
    ///
    /// On success `content` is replaced and `error` cleared; on failure the
    /// previous `content` is kept and `error` is tagged `content`. Returns
    /// whether the stage succeeded.
    pub async fn apply(&self, ctx: &ExecCtx, state: &mut PipelineState) -> bool {
        match self.run(ctx, state.product_desc()).await {
            Ok(record) => {
                info!(title = %record.title(), tags = record.tags().len(), "content created");
                state.content = Some(record);
                state.clear_error();
                true
            }
            Err(err) => {
                error!(error = %err, "content stage failed");
                state.record_error(StageKind::Content, &err);
                false
            }
        }
    }
}
