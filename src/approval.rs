//! Approval collaborators consulted after each pass.

use crate::error::{PipelineError, Result};
use crate::output::image_path;
use crate::state::PipelineState;
use crate::types::Decision;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Source of approve/reject verdicts.
///
/// Invoked once per pass through the approval step with the state as it
/// stands after the image stage.
#[async_trait]
pub trait ApprovalSource: Send + Sync {
    async fn collect_decision(&self, state: &PipelineState) -> Result<Decision>;
}

/// Asks an operator over a line-oriented reader/writer pair.
pub struct PromptApproval<R, W> {
    io: tokio::sync::Mutex<(R, W)>,
}

impl PromptApproval<BufReader<Stdin>, Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> PromptApproval<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: tokio::sync::Mutex::new((reader, writer)),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        self.io.into_inner()
    }

    /// Write `question` and read one answer line, trimmed. `None` on EOF.
    pub async fn ask(&self, question: &str) -> Result<Option<String>> {
        let mut guard = self.io.lock().await;
        let (reader, writer) = &mut *guard;

        writer.write_all(question.as_bytes()).await?;
        writer.flush().await?;

        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[async_trait]
impl<R, W> ApprovalSource for PromptApproval<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn collect_decision(&self, state: &PipelineState) -> Result<Decision> {
        let answer = self
            .ask(&summary(state))
            .await?
            .ok_or(PipelineError::InputClosed)?;
        parse_answer(&answer)
            .ok_or_else(|| PipelineError::Approval(format!("unrecognized answer: {:?}", answer)))
    }
}

/// `yes`/`y` approve, `no`/`n` reject, case-insensitively.
pub fn parse_answer(input: &str) -> Option<Decision> {
    match input.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" => Some(Decision::Approve),
        "no" | "n" => Some(Decision::Reject),
        _ => None,
    }
}

fn summary(state: &PipelineState) -> String {
    if let Some(err) = &state.error {
        return format!(
            "\nError in {} stage: {}\nDo you want to try again? (yes/no): ",
            err.stage, err.message
        );
    }

    let mut out = String::from("\nGenerated content:\n");
    if let Some(content) = &state.content {
        out.push_str(&format!(
            "Title: {}\nMessage: {}\nTags: {}\n",
            content.title(),
            content.message(),
            content.tags().join(", ")
        ));
    }
    if let Some(image) = &state.image {
        out.push_str(&format!(
            "Image: {}\n",
            image_path(state.output_location(), image).display()
        ));
    }
    out.push_str("Do you approve the content? (yes/no): ");
    out
}

/// Replays a fixed list of decisions, then fails.
#[derive(Debug, Default)]
pub struct Scripted {
    decisions: Mutex<VecDeque<Decision>>,
}

impl Scripted {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: Mutex::new(decisions.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.decisions.lock().map(|d| d.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ApprovalSource for Scripted {
    async fn collect_decision(&self, _state: &PipelineState) -> Result<Decision> {
        self.decisions
            .lock()
            .map_err(|_| PipelineError::Approval("decision script poisoned".into()))?
            .pop_front()
            .ok_or_else(|| PipelineError::Approval("no scripted decision left".into()))
    }
}
