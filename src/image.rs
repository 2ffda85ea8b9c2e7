//! Image stage: content title in, decoded image out.
//!
//! Two calls in sequence. The title is first rewritten into a richer visual
//! prompt by the text backend (single attempt), then sent to the image
//! backend under a [`ResilientInvoker`]. The synthesized bytes are decoded
//! and written into the run's output directory.

use crate::backend::{LlmConfig, LlmRequest, SynthesisRequest};
use crate::error::{PipelineError, Result};
use crate::events::{emit, Event};
use crate::exec_ctx::ExecCtx;
use crate::output::persist_image;
use crate::output_parser::parse_text;
use crate::retry::ResilientInvoker;
use crate::state::PipelineState;
use crate::types::{ImageArtifact, StageKind};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Default model for visual-prompt enhancement.
pub const DEFAULT_ARTIST_MODEL: &str = "mistralai/mixtral-8x7b-instruct-v0.1";

/// Instruction given to the enhancement model.
pub const DIGITAL_ARTIST_PROMPT: &str = "You are an expert digital artist.
Your task is to transform text descriptions into creative visual prompts.
Focus on creating vivid, detailed descriptions that would make great images.
The prompt should be detailed but concise, focusing on key visual elements.
Example: For a water bottle, describe its shape, material, color, and any unique features.";

/// Name of the guarded synthesis call in logs and retry events.
const SYNTHESIS_CALL: &str = "image_synthesis";

/// Produces an [`ImageArtifact`] from a content title.
#[derive(Debug, Clone)]
pub struct ImageStage {
    model: String,
    system_prompt: String,
    config: LlmConfig,
}

impl Default for ImageStage {
    fn default() -> Self {
        Self {
            model: DEFAULT_ARTIST_MODEL.to_string(),
            system_prompt: DIGITAL_ARTIST_PROMPT.to_string(),
            config: LlmConfig::default(),
        }
    }
}

impl ImageStage {
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

    /// Rewrite `prompt_seed` into a visual prompt (no retry).
    pub async fn enhance(&self, ctx: &ExecCtx, prompt_seed: &str) -> Result<String> {
        let request = LlmRequest {
            model: self.model.clone(),
            system_prompt: self.system_prompt.clone(),
            prompt: prompt_seed.to_string(),
            config: self.config.clone(),
        };
        let response = ctx.backend.complete(&ctx.client, &ctx.base_url, &request).await?;
        let prompt = parse_text(&response.text)?;
        debug!(prompt = %prompt, "enhanced visual prompt");
        Ok(prompt)
    }

    /// Enhance, synthesize under retry, and decode.
    pub async fn run(&self, ctx: &ExecCtx, prompt_seed: &str) -> Result<ImageArtifact> {
        if prompt_seed.trim().is_empty() {
            return Err(PipelineError::Validation("image prompt seed is empty".into()));
        }

        let visual_prompt = self.enhance(ctx, prompt_seed).await?;
        let request = SynthesisRequest::new(visual_prompt);

        let handler = ctx.event_handler.clone();
        let invoker = ResilientInvoker::new(SYNTHESIS_CALL, ctx.backoff.clone()).with_retry_hook(
            Arc::new(move |attempt, delay, reason| {
                emit(
                    &handler,
                    Event::TransportRetry {
                        call: SYNTHESIS_CALL.to_string(),
                        attempt,
                        delay_ms: delay.as_millis() as u64,
                        reason: reason.to_string(),
                    },
                );
            }),
        );

        let request = &request;
        let bytes = invoker
            .invoke(move |_attempt| {
                ctx.image_backend
                    .synthesize(&ctx.client, &ctx.image_base_url, request)
            })
            .await?;

        ImageArtifact::decode(bytes)
    }

    /// Run against `state`, seeded by the current content title.
    ///
    /// On success the image is persisted, `image` replaced and `error`
    /// cleared. Any failure, including a missing title or a failed write,
    /// leaves `image` untouched and records an `image` error. Returns
    /// whether the stage succeeded.
    pub async fn apply(&self, ctx: &ExecCtx, state: &mut PipelineState) -> bool {
        match self.produce(ctx, state).await {
            Ok(artifact) => {
                let (width, height) = artifact.dimensions();
                info!(width, height, format = artifact.extension(), "image generated");
                state.image = Some(artifact);
                state.clear_error();
                true
            }
            Err(err) => {
                error!(error = %err, "image stage failed");
                state.record_error(StageKind::Image, &err);
                false
            }
        }
    }

    async fn produce(&self, ctx: &ExecCtx, state: &PipelineState) -> Result<ImageArtifact> {
        let title = state
            .content
            .as_ref()
            .map(|c| c.title().to_string())
            .ok_or_else(|| PipelineError::Validation("no content to illustrate".into()))?;

        let artifact = self.run(ctx, &title).await?;
        let path = persist_image(state.output_location(), &artifact)?;
        info!(path = %path.display(), "image saved");
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackoffConfig, MockBackend, MockImageBackend, MockImageReply};
    use crate::events::FnEventHandler;
    use crate::types::{sample_png, ContentRecord};
    use std::sync::Mutex;
    use std::time::Duration;

    fn fast_backoff() -> BackoffConfig {
        BackoffConfig::standard()
            .with_initial_delay(Duration::from_millis(1))
            .with_attempt_timeout(Some(Duration::from_millis(50)))
    }

    fn ctx(text: Arc<MockBackend>, images: Arc<MockImageBackend>) -> ExecCtx {
        ExecCtx::builder("http://unused")
            .backend(text)
            .image_backend(images)
            .backoff(fast_backoff())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_run_enhances_then_synthesizes() {
        let text = Arc::new(MockBackend::fixed("Sure! A frosted steel bottle on a mountain ridge"));
        let images = Arc::new(MockImageBackend::fixed(sample_png()));

        let artifact = ImageStage::new()
            .run(&ctx(text.clone(), images.clone()), "Stay Hydrated in Style")
            .await
            .unwrap();

        assert_eq!(artifact.dimensions(), (4, 4));
        let requests = text.requests();
        assert_eq!(requests[0].prompt, "Stay Hydrated in Style");
        assert_eq!(requests[0].system_prompt, DIGITAL_ARTIST_PROMPT);
        assert_eq!(images.prompts(), vec!["A frosted steel bottle on a mountain ridge"]);
    }

    #[tokio::test]
    async fn test_transport_failures_are_retried_and_reported() {
        let text = Arc::new(MockBackend::fixed("a bottle"));
        let images = Arc::new(MockImageBackend::new(vec![
            MockImageReply::Status(503),
            MockImageReply::Image(sample_png()),
        ]));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let ctx = ctx(text, images.clone()).with_event_handler(Some(Arc::new(FnEventHandler(
            move |e: Event| sink.lock().unwrap().push(e),
        ))));

        ImageStage::new().run(&ctx, "title").await.unwrap();

        assert_eq!(images.call_count(), 2);
        let events = seen.lock().unwrap();
        assert!(matches!(
            &events[..],
            [Event::TransportRetry { attempt: 1, delay_ms: 1, .. }]
        ));
    }

    #[tokio::test]
    async fn test_contract_violation_is_not_retried() {
        let text = Arc::new(MockBackend::fixed("a bottle"));
        let images = Arc::new(MockImageBackend::new(vec![MockImageReply::Contract(
            "missing image key".into(),
        )]));

        let err = ImageStage::new()
            .run(&ctx(text, images.clone()), "title")
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Contract(_)));
        assert_eq!(images.call_count(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_bytes_fail_without_retry() {
        let text = Arc::new(MockBackend::fixed("a bottle"));
        let images = Arc::new(MockImageBackend::fixed(b"not an image".to_vec()));

        let err = ImageStage::new()
            .run(&ctx(text, images.clone()), "title")
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Contract(_)));
        assert_eq!(images.call_count(), 1);
    }

    #[tokio::test]
    async fn test_enhancement_failure_skips_synthesis() {
        let text = Arc::new(MockBackend::failing(500));
        let images = Arc::new(MockImageBackend::fixed(sample_png()));

        let err = ImageStage::new()
            .run(&ctx(text, images.clone()), "title")
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::HttpError { status: 500, .. }));
        assert_eq!(images.call_count(), 0);
    }

    #[tokio::test]
    async fn test_apply_persists_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let text = Arc::new(MockBackend::fixed("a bottle"));
        let images = Arc::new(MockImageBackend::fixed(sample_png()));
        let ctx = ctx(text, images);
        let stage = ImageStage::new();

        let mut state = PipelineState::new("desc", dir.path());
        assert!(!stage.apply(&ctx, &mut state).await);
        assert_eq!(state.error.as_ref().unwrap().stage, StageKind::Image);

        state.content = Some(ContentRecord::new("T", "M", vec!["#t".into()]).unwrap());
        assert!(stage.apply(&ctx, &mut state).await);
        assert!(state.image.is_some());
        assert!(!state.has_error());
        assert!(dir.path().join("output.png").is_file());
    }
}
