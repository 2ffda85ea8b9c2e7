//! # Promo Pipeline
//!
//! Turns a product description into promotional copy and a matching image,
//! with an optional human approval loop.
//!
//! A run moves through a small state machine: the **content stage** asks a
//! language model for a `Title:` / `Message:` / `Tags:` block and parses it
//! into a [`ContentRecord`]; the **image stage** rewrites the title into a
//! visual prompt and calls an image-synthesis service under bounded retry;
//! the **approval step** (when configured) decides whether to run again.
//!
//! ## Core Concepts
//!
//! - **[`Orchestrator`]** drives one run per product description. Runs are
//!   independent and may execute concurrently.
//! - **[`ExecCtx`]** is the shared execution context: HTTP client, text and
//!   image backends, retry budget, optional event handler.
//! - **[`PipelineState`]** is the per-run record threaded through stages.
//! - **[`ResilientInvoker`](retry::ResilientInvoker)** wraps one external
//!   call with retry and exponential backoff.
//! - **[`ApprovalSource`]** supplies approve/reject verdicts, interactively
//!   or from a script.
//!
//! ## Quick Start
//!
//! ```no_run
//! use promo_pipeline::config::AppConfig;
//! use promo_pipeline::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let orchestrator = Orchestrator::new(config.exec_ctx()?)
//!         .with_output_root(&config.output_dir);
//!
//!     let output = orchestrator.run("a 1-liter insulated water bottle").await?;
//!     println!("{}: {}", output.content.title(), output.content.message());
//!     Ok(())
//! }
//! ```

pub mod approval;
pub mod backend;
pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod exec_ctx;
pub mod image;
pub mod orchestrator;
pub mod output;
pub mod output_parser;
pub mod retry;
pub mod state;
pub mod types;

pub use approval::{ApprovalSource, PromptApproval, Scripted};
pub use backend::{BackoffConfig, GenAiImageBackend, LlmConfig, MockBackend, MockImageBackend, OpenAiBackend};
pub use content::ContentStage;
pub use error::{PipelineError, Result};
pub use exec_ctx::{ExecCtx, ExecCtxBuilder};
pub use image::ImageStage;
pub use orchestrator::{ApprovalFailurePolicy, Orchestrator, OrchestratorState, RunOutput};
pub use output_parser::{parse_content_record, ParseError};
pub use retry::ResilientInvoker;
pub use state::PipelineState;
pub use types::{ContentRecord, Decision, ErrorInfo, ImageArtifact, StageKind};
