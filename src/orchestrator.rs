//! The run state machine.
//!
//! ```text
//! CreateContent ──► GenerateImage ──► AwaitApproval ──► Terminated
//!       ▲                 │                 │
//!       │                 └── (no approval  │
//!       │                      configured) ─┼──► Terminated
//!       └───────────────────────────────────┘
//! ```
//!
//! The image stage is skipped while an error is pending; the error is
//! carried to the approval step unchanged. The approval step decides
//! between another pass and termination with [`next_after_approval`].

use crate::approval::ApprovalSource;
use crate::content::ContentStage;
use crate::error::{PipelineError, Result};
use crate::events::{emit, Event, EventHandler, Fanout};
use crate::exec_ctx::ExecCtx;
use crate::image::ImageStage;
use crate::output::{RunDir, RunLog};
use crate::state::PipelineState;
use crate::types::{ContentRecord, Decision, ImageArtifact, StageKind};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

/// Default ceiling on passes through the content stage.
pub const DEFAULT_MAX_PASSES: u32 = 5;

/// States of the run state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    CreateContent,
    GenerateImage,
    AwaitApproval,
    Terminated,
}

impl OrchestratorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateContent => "CreateContent",
            Self::GenerateImage => "GenerateImage",
            Self::AwaitApproval => "AwaitApproval",
            Self::Terminated => "Terminated",
        }
    }
}

/// Where a run goes after the approval step.
///
/// With an error pending, approval means "try again" and rejection means
/// "give up". Without one, approval accepts the result and rejection asks
/// for a fresh attempt.
pub fn next_after_approval(error_set: bool, decision: Decision) -> OrchestratorState {
    match (error_set, decision) {
        (true, Decision::Approve) => OrchestratorState::CreateContent,
        (true, Decision::Reject) => OrchestratorState::Terminated,
        (false, Decision::Approve) => OrchestratorState::Terminated,
        (false, Decision::Reject) => OrchestratorState::CreateContent,
    }
}

/// What to do when collecting a decision fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalFailurePolicy {
    /// Record an `approval` error and continue as if rejected. Closed
    /// input still ends the run.
    #[default]
    TreatAsReject,
    /// Record an `approval` error and end the run with it.
    Fatal,
}

/// A successful run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub content: ContentRecord,
    pub image: ImageArtifact,
    pub output_location: PathBuf,
    /// Passes through the content stage, 1 when the first attempt stuck.
    pub passes: u32,
}

/// Drives content, image and approval for one product description per run.
///
/// Collaborators are injected once and shared by all runs; each run gets
/// its own [`PipelineState`], output directory and log sink, so runs may
/// execute concurrently.
pub struct Orchestrator {
    ctx: ExecCtx,
    content: ContentStage,
    image: ImageStage,
    approval: Option<Arc<dyn ApprovalSource>>,
    max_passes: u32,
    failure_policy: ApprovalFailurePolicy,
    output_root: PathBuf,
}

impl Orchestrator {
    /// Automated orchestrator (no approval step) writing under `AI_Response`.
    pub fn new(ctx: ExecCtx) -> Self {
        Self {
            ctx,
            content: ContentStage::default(),
            image: ImageStage::default(),
            approval: None,
            max_passes: DEFAULT_MAX_PASSES,
            failure_policy: ApprovalFailurePolicy::default(),
            output_root: PathBuf::from("AI_Response"),
        }
    }

    pub fn with_content_stage(mut self, stage: ContentStage) -> Self {
        self.content = stage;
        self
    }

    pub fn with_image_stage(mut self, stage: ImageStage) -> Self {
        self.image = stage;
        self
    }

    /// Enable the approval step.
    pub fn with_approval(mut self, source: Arc<dyn ApprovalSource>) -> Self {
        self.approval = Some(source);
        self
    }

    pub fn with_max_passes(mut self, passes: u32) -> Self {
        self.max_passes = passes.max(1);
        self
    }

    pub fn with_failure_policy(mut self, policy: ApprovalFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn output_root(&self) -> &std::path::Path {
        &self.output_root
    }

    /// Run the pipeline for one product description.
    ///
    /// Creates the run directory and its `execution.log` before the first
    /// stage. Returns the approved (or, without approval, the first
    /// complete) content and image, or the last recorded stage error.
    pub async fn run(&self, product_desc: &str) -> Result<RunOutput> {
        let dir = RunDir::create(&self.output_root)?;
        let log: Arc<dyn EventHandler> = Arc::new(RunLog::create(&dir.log_path())?);
        let mut state = PipelineState::new(product_desc, dir.path());
        self.drive(&mut state, Some(log)).await
    }

    /// Drive an already constructed state to termination.
    pub async fn execute(&self, state: &mut PipelineState) -> Result<RunOutput> {
        self.drive(state, None).await
    }

    async fn drive(
        &self,
        state: &mut PipelineState,
        run_log: Option<Arc<dyn EventHandler>>,
    ) -> Result<RunOutput> {
        let handler = Fanout::new()
            .push(self.ctx.event_handler.clone())
            .push(run_log)
            .into_handler();
        let ctx = self.ctx.with_event_handler(handler);
        let span = tracing::info_span!("run", run = %state.output_location().display());

        async {
            info!(product = %state.product_desc(), "run started");
            emit(
                &ctx.event_handler,
                Event::RunStart {
                    product_desc: state.product_desc().to_string(),
                    output_location: state.output_location().display().to_string(),
                },
            );

            let mut passes = 0;
            let result = match self.step_until_terminated(&ctx, state, &mut passes).await {
                Ok(()) => finish(state, passes),
                Err(err) => Err(err),
            };

            match &result {
                Ok(_) => info!(passes, "run finished"),
                Err(err) => warn!(passes, error = %err, "run finished with error"),
            }
            emit(
                &ctx.event_handler,
                Event::RunEnd {
                    ok: result.is_ok(),
                    passes,
                },
            );
            result
        }
        .instrument(span)
        .await
    }

    async fn step_until_terminated(
        &self,
        ctx: &ExecCtx,
        state: &mut PipelineState,
        passes: &mut u32,
    ) -> Result<()> {
        let mut current = OrchestratorState::CreateContent;

        while current != OrchestratorState::Terminated {
            let next = match current {
                OrchestratorState::CreateContent if *passes >= self.max_passes => {
                    warn!(max_passes = self.max_passes, "pass limit reached");
                    if !state.has_error() {
                        let err = PipelineError::Approval(format!(
                            "not approved after {} passes",
                            self.max_passes
                        ));
                        state.record_error(StageKind::Approval, &err);
                    }
                    OrchestratorState::Terminated
                }
                OrchestratorState::CreateContent => {
                    *passes += 1;
                    let pass = *passes;
                    emit(&ctx.event_handler, Event::StageStart { stage: StageKind::Content, pass });
                    let ok = self.content.apply(ctx, state).await;
                    emit(&ctx.event_handler, Event::StageEnd { stage: StageKind::Content, pass, ok });
                    OrchestratorState::GenerateImage
                }
                OrchestratorState::GenerateImage => {
                    let pass = *passes;
                    if state.has_error() {
                        debug!("image stage skipped, error pending");
                        emit(&ctx.event_handler, Event::StageSkipped { stage: StageKind::Image, pass });
                    } else {
                        emit(&ctx.event_handler, Event::StageStart { stage: StageKind::Image, pass });
                        let ok = self.image.apply(ctx, state).await;
                        emit(&ctx.event_handler, Event::StageEnd { stage: StageKind::Image, pass, ok });
                    }
                    if self.approval.is_some() {
                        OrchestratorState::AwaitApproval
                    } else {
                        OrchestratorState::Terminated
                    }
                }
                OrchestratorState::AwaitApproval => self.await_approval(ctx, state).await?,
                OrchestratorState::Terminated => OrchestratorState::Terminated,
            };

            debug!(from = current.as_str(), to = next.as_str(), "transition");
            emit(
                &ctx.event_handler,
                Event::Transition {
                    from: current.as_str(),
                    to: next.as_str(),
                },
            );
            current = next;
        }
        Ok(())
    }

    async fn await_approval(
        &self,
        ctx: &ExecCtx,
        state: &mut PipelineState,
    ) -> Result<OrchestratorState> {
        let Some(source) = &self.approval else {
            return Ok(OrchestratorState::Terminated);
        };
        let error_set = state.has_error();

        match source.collect_decision(state).await {
            Ok(decision) => {
                info!(%decision, error_set, "approval decision");
                emit(&ctx.event_handler, Event::ApprovalDecision { decision, error: None });
                state.feedback = Some(decision);
                Ok(next_after_approval(error_set, decision))
            }
            Err(err) => {
                warn!(error = %err, policy = ?self.failure_policy, "approval failed");
                emit(
                    &ctx.event_handler,
                    Event::ApprovalDecision {
                        decision: Decision::Reject,
                        error: Some(err.to_string()),
                    },
                );
                state.record_error(StageKind::Approval, &err);
                // Nobody is left to answer once input closes.
                let fatal = self.failure_policy == ApprovalFailurePolicy::Fatal
                    || matches!(err, PipelineError::InputClosed);
                if fatal {
                    return Err(PipelineError::StageFailed {
                        stage: StageKind::Approval,
                        message: err.to_string(),
                    });
                }
                state.feedback = Some(Decision::Reject);
                Ok(next_after_approval(error_set, Decision::Reject))
            }
        }
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("ctx", &self.ctx)
            .field("content", &self.content)
            .field("image", &self.image)
            .field("has_approval", &self.approval.is_some())
            .field("max_passes", &self.max_passes)
            .field("failure_policy", &self.failure_policy)
            .field("output_root", &self.output_root)
            .finish()
    }
}

/// A complete pair, or the error still recorded at termination.
fn finish(state: &PipelineState, passes: u32) -> Result<RunOutput> {
    if let Some(info) = &state.error {
        return Err(info.clone().into());
    }
    match (&state.content, &state.image) {
        (Some(content), Some(image)) => Ok(RunOutput {
            content: content.clone(),
            image: image.clone(),
            output_location: state.output_location().to_path_buf(),
            passes,
        }),
        _ => Err(PipelineError::StageFailed {
            stage: StageKind::Image,
            message: "run ended without an image".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approval::{PromptApproval, Scripted};
    use crate::backend::{BackoffConfig, MockBackend, MockImageBackend, MockImageReply};
    use crate::events::FnEventHandler;
    use crate::output_parser::ParseError;
    use crate::types::sample_png;
    use std::sync::Mutex;
    use std::time::Duration;

    const WATER_BOTTLE: &str = "Title: Stay Hydrated in Style\nMessage: Keep cool all day.\nTags: #Hydration, #Fitness";

    fn fast_backoff() -> BackoffConfig {
        BackoffConfig::standard()
            .with_initial_delay(Duration::from_millis(1))
            .with_attempt_timeout(Some(Duration::from_millis(50)))
    }

    /// Text mock answering content and enhancement calls alternately.
    fn text_backend(content: &str) -> Arc<MockBackend> {
        Arc::new(MockBackend::new(vec![
            content.to_string(),
            "A sleek insulated bottle beside a gym bag".to_string(),
        ]))
    }

    fn ctx(text: Arc<MockBackend>, images: Arc<MockImageBackend>) -> ExecCtx {
        ExecCtx::builder("http://unused")
            .backend(text)
            .image_backend(images)
            .backoff(fast_backoff())
            .build()
            .unwrap()
    }

    fn state_in(dir: &tempfile::TempDir) -> PipelineState {
        PipelineState::new("a 1-liter insulated water bottle", dir.path())
    }

    #[test]
    fn test_approval_truth_table() {
        use OrchestratorState::*;
        assert_eq!(next_after_approval(true, Decision::Approve), CreateContent);
        assert_eq!(next_after_approval(true, Decision::Reject), Terminated);
        assert_eq!(next_after_approval(false, Decision::Approve), Terminated);
        assert_eq!(next_after_approval(false, Decision::Reject), CreateContent);
    }

    #[tokio::test]
    async fn test_water_bottle_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::fixed(sample_png()));
        let orchestrator = Orchestrator::new(ctx(text_backend(WATER_BOTTLE), images.clone()));

        let mut state = state_in(&dir);
        let output = orchestrator.execute(&mut state).await.unwrap();

        assert_eq!(
            output.content,
            ContentRecord::new(
                "Stay Hydrated in Style",
                "Keep cool all day.",
                vec!["#Hydration".into(), "#Fitness".into()]
            )
            .unwrap()
        );
        assert_eq!(output.image.dimensions(), (4, 4));
        assert_eq!(output.passes, 1);
        assert!(!state.has_error());
        assert_eq!(images.call_count(), 1);
        assert!(dir.path().join("output.png").is_file());
    }

    #[tokio::test]
    async fn test_missing_message_never_calls_image_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::fixed(sample_png()));
        let orchestrator = Orchestrator::new(ctx(
            text_backend("Title: Stay Hydrated\nTags: #Hydration"),
            images.clone(),
        ));

        let mut state = state_in(&dir);
        let err = orchestrator.execute(&mut state).await.unwrap_err();

        assert!(matches!(err, PipelineError::StageFailed { stage: StageKind::Content, .. }));
        assert!(err.to_string().contains(&ParseError::MissingField { field: "Message" }.to_string()));
        assert_eq!(images.call_count(), 0);
        assert!(state.content.is_none());
    }

    #[tokio::test]
    async fn test_synthesis_timeouts_exhaust_budget() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::new(vec![MockImageReply::Hang(
            Duration::from_secs(5),
        )]));
        let orchestrator = Orchestrator::new(ctx(text_backend(WATER_BOTTLE), images.clone()));

        let mut state = state_in(&dir);
        let err = orchestrator.execute(&mut state).await.unwrap_err();

        assert!(matches!(err, PipelineError::StageFailed { stage: StageKind::Image, .. }));
        assert_eq!(images.call_count(), 3);
        assert!(state.content.is_some());
        assert!(state.image.is_none());
        assert_eq!(state.error.as_ref().unwrap().stage, StageKind::Image);
    }

    #[tokio::test]
    async fn test_reject_reruns_content_then_approve_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::fixed(sample_png()));
        let text = text_backend(WATER_BOTTLE);
        let approval = Arc::new(Scripted::new([Decision::Reject, Decision::Approve]));
        let orchestrator =
            Orchestrator::new(ctx(text.clone(), images.clone())).with_approval(approval.clone());

        let mut state = state_in(&dir);
        let output = orchestrator.execute(&mut state).await.unwrap();

        assert_eq!(output.passes, 2);
        assert_eq!(text.call_count(), 4);
        assert_eq!(images.call_count(), 2);
        assert_eq!(state.feedback, Some(Decision::Approve));
        assert_eq!(approval.remaining(), 0);
    }

    #[tokio::test]
    async fn test_error_then_approve_retries_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::new(vec![
            MockImageReply::Contract("missing image key".into()),
            MockImageReply::Image(sample_png()),
        ]));
        let approval = Arc::new(Scripted::new([Decision::Approve, Decision::Approve]));
        let orchestrator = Orchestrator::new(ctx(text_backend(WATER_BOTTLE), images.clone()))
            .with_approval(approval);

        let mut state = state_in(&dir);
        let output = orchestrator.execute(&mut state).await.unwrap();

        assert_eq!(output.passes, 2);
        assert_eq!(images.call_count(), 2);
        assert!(!state.has_error());
    }

    #[tokio::test]
    async fn test_error_then_reject_terminates_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::new(vec![MockImageReply::Contract(
            "missing image key".into(),
        )]));
        let orchestrator = Orchestrator::new(ctx(text_backend(WATER_BOTTLE), images))
            .with_approval(Arc::new(Scripted::new([Decision::Reject])));

        let mut state = state_in(&dir);
        let err = orchestrator.execute(&mut state).await.unwrap_err();

        assert!(matches!(err, PipelineError::StageFailed { stage: StageKind::Image, .. }));
        assert_eq!(state.feedback, Some(Decision::Reject));
        assert!(state.content.is_some());
    }

    #[tokio::test]
    async fn test_approval_failure_treated_as_reject() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::fixed(sample_png()));
        let text = text_backend(WATER_BOTTLE);
        let orchestrator = Orchestrator::new(ctx(text.clone(), images))
            .with_approval(Arc::new(Scripted::new(Vec::<Decision>::new())))
            .with_max_passes(3);

        let mut state = state_in(&dir);
        let err = orchestrator.execute(&mut state).await.unwrap_err();

        // Each failed collection counts as a rejection of a good result, so
        // every pass reruns content until the ceiling; the last approval
        // error is what the run reports.
        assert!(matches!(err, PipelineError::StageFailed { stage: StageKind::Approval, .. }));
        assert_eq!(text.call_count(), 6);
        assert_eq!(state.feedback, Some(Decision::Reject));
        assert!(state.content.is_some());
    }

    #[tokio::test]
    async fn test_approval_failure_fatal_policy() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::fixed(sample_png()));
        let text = text_backend(WATER_BOTTLE);
        let orchestrator = Orchestrator::new(ctx(text.clone(), images))
            .with_approval(Arc::new(Scripted::new(Vec::<Decision>::new())))
            .with_failure_policy(ApprovalFailurePolicy::Fatal);

        let mut state = state_in(&dir);
        let err = orchestrator.execute(&mut state).await.unwrap_err();

        assert!(matches!(err, PipelineError::StageFailed { stage: StageKind::Approval, .. }));
        assert_eq!(text.call_count(), 2);
        assert_eq!(state.error.as_ref().unwrap().stage, StageKind::Approval);
    }

    #[tokio::test]
    async fn test_approval_failure_with_pending_error_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::new(vec![MockImageReply::Contract(
            "missing image key".into(),
        )]));
        let text = text_backend(WATER_BOTTLE);
        let orchestrator = Orchestrator::new(ctx(text.clone(), images.clone()))
            .with_approval(Arc::new(Scripted::new(Vec::<Decision>::new())));

        let mut state = state_in(&dir);
        let err = orchestrator.execute(&mut state).await.unwrap_err();

        // A failed collection over a failed pass behaves like (error, reject).
        assert!(matches!(err, PipelineError::StageFailed { stage: StageKind::Approval, .. }));
        assert_eq!(text.call_count(), 2);
        assert_eq!(images.call_count(), 1);
        assert_eq!(state.feedback, Some(Decision::Reject));
    }

    #[tokio::test]
    async fn test_closed_input_ends_run_despite_treat_as_reject() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::fixed(sample_png()));
        let text = text_backend(WATER_BOTTLE);
        let operator = PromptApproval::new(
            tokio::io::BufReader::new(tokio_test::io::Builder::new().build()),
            Vec::<u8>::new(),
        );
        let orchestrator = Orchestrator::new(ctx(text.clone(), images))
            .with_approval(Arc::new(operator))
            .with_max_passes(5);

        let mut state = state_in(&dir);
        let err = orchestrator.execute(&mut state).await.unwrap_err();

        match err {
            PipelineError::StageFailed { stage, message } => {
                assert_eq!(stage, StageKind::Approval);
                assert!(message.contains("input closed"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(text.call_count(), 2);
    }

    #[tokio::test]
    async fn test_pass_limit_ends_endless_rejection() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::fixed(sample_png()));
        let orchestrator = Orchestrator::new(ctx(text_backend(WATER_BOTTLE), images.clone()))
            .with_approval(Arc::new(Scripted::new([Decision::Reject; 10])))
            .with_max_passes(2);

        let mut state = state_in(&dir);
        let err = orchestrator.execute(&mut state).await.unwrap_err();

        assert!(err.to_string().contains("not approved after 2 passes"));
        assert_eq!(images.call_count(), 2);
    }

    #[tokio::test]
    async fn test_events_follow_state_machine() {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::fixed(sample_png()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let ctx = ExecCtx::builder("http://unused")
            .backend(text_backend(WATER_BOTTLE))
            .image_backend(images)
            .backoff(fast_backoff())
            .event_handler(Arc::new(FnEventHandler(move |e: Event| {
                if let Event::Transition { from, to } = e {
                    sink.lock().unwrap().push((from, to));
                }
            })))
            .build()
            .unwrap();
        let orchestrator =
            Orchestrator::new(ctx).with_approval(Arc::new(Scripted::new([Decision::Approve])));

        orchestrator.execute(&mut state_in(&dir)).await.unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("CreateContent", "GenerateImage"),
                ("GenerateImage", "AwaitApproval"),
                ("AwaitApproval", "Terminated"),
            ]
        );
    }

    #[tokio::test]
    async fn test_run_creates_directory_and_log() {
        let root = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::new(ctx(
            text_backend(WATER_BOTTLE),
            Arc::new(MockImageBackend::fixed(sample_png())),
        ))
        .with_output_root(root.path());

        let output = orchestrator.run("a 1-liter insulated water bottle").await.unwrap();

        assert!(output.output_location.starts_with(root.path()));
        assert!(output.output_location.join("output.png").is_file());
        let log = std::fs::read_to_string(output.output_location.join("execution.log")).unwrap();
        assert!(log.contains("run started"));
        assert!(log.contains("GenerateImage -> Terminated"));
        assert!(log.contains("run finished: ok=true passes=1"));
    }

    #[tokio::test]
    async fn test_blank_description_is_content_error() {
        let root = tempfile::tempdir().unwrap();
        let text = text_backend(WATER_BOTTLE);
        let orchestrator = Orchestrator::new(ctx(
            text.clone(),
            Arc::new(MockImageBackend::fixed(sample_png())),
        ))
        .with_output_root(root.path());

        let err = orchestrator.run("   ").await.unwrap_err();

        assert!(matches!(err, PipelineError::StageFailed { stage: StageKind::Content, .. }));
        assert_eq!(text.call_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_runs_are_isolated() {
        let root = tempfile::tempdir().unwrap();
        let images = Arc::new(MockImageBackend::fixed(sample_png()));
        // One canned answer that works for both the content and the
        // enhancement call, whatever order the runs interleave in.
        let text = Arc::new(MockBackend::fixed(WATER_BOTTLE));
        let orchestrator = Orchestrator::new(ctx(text, images.clone())).with_output_root(root.path());

        let (a, b) = futures::join!(
            orchestrator.run("a water bottle"),
            orchestrator.run("a yoga mat")
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.output_location, b.output_location);
        assert!(a.output_location.join("output.png").is_file());
        assert!(b.output_location.join("output.png").is_file());
        assert_eq!(images.call_count(), 2);
    }
}
