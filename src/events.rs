//! Lifecycle events emitted while a run progresses.
//!
//! Events are an optional, non-intrusive way to observe a run: stage
//! boundaries, state-machine transitions, transport retries and approval
//! decisions. Implement [`EventHandler`] to receive them for progress
//! display, audit logs, or tests. [`RunLog`](crate::output::RunLog) writes
//! them into the run's output directory.

use crate::types::{Decision, StageKind};
use std::sync::Arc;

/// Events emitted during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A run has started.
    RunStart {
        /// Product description the run was started with.
        product_desc: String,
        /// Output location of the run.
        output_location: String,
    },
    /// A stage is about to execute.
    StageStart {
        stage: StageKind,
        /// 1-indexed pass through the pipeline.
        pass: u32,
    },
    /// A stage finished; `ok` is false when it recorded an error.
    StageEnd { stage: StageKind, pass: u32, ok: bool },
    /// The image stage was skipped because an earlier error is pending.
    StageSkipped { stage: StageKind, pass: u32 },
    /// A transport-level retry is about to back off.
    TransportRetry {
        /// Name of the guarded call.
        call: String,
        /// The next attempt number (1-indexed).
        attempt: u32,
        /// Delay before the next attempt in milliseconds.
        delay_ms: u64,
        /// Why the previous attempt failed.
        reason: String,
    },
    /// The approval collaborator answered (or failed to).
    ApprovalDecision {
        decision: Decision,
        /// Set when collecting the decision failed and `decision` is the
        /// fallback.
        error: Option<String>,
    },
    /// The state machine moved between states.
    Transition {
        from: &'static str,
        to: &'static str,
    },
    /// The run reached a final result.
    RunEnd { ok: bool, passes: u32 },
}

/// Handler for run lifecycle events.
///
/// This is entirely optional -- runs work without an event handler.
///
/// # Example
///
/// ```
/// use promo_pipeline::events::{Event, EventHandler};
///
/// struct PrintHandler;
///
/// impl EventHandler for PrintHandler {
///     fn on_event(&self, event: Event) {
///         match event {
///             Event::StageStart { stage, pass } => println!("[start] {} (pass {})", stage, pass),
///             Event::StageEnd { stage, ok, .. } => println!("[end] {} ok={}", stage, ok),
///             _ => {}
///         }
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    /// Called when the run emits an event.
    fn on_event(&self, event: Event);
}

/// Emit an event if a handler is present. No-op otherwise.
pub(crate) fn emit(handler: &Option<Arc<dyn EventHandler>>, event: Event) {
    if let Some(ref h) = handler {
        h.on_event(event);
    }
}

/// An [`EventHandler`] backed by a closure.
///
/// # Example
///
/// ```
/// use promo_pipeline::events::{Event, FnEventHandler};
/// use std::sync::Arc;
///
/// let handler = Arc::new(FnEventHandler(|event: Event| {
///     if let Event::Transition { from, to } = event {
///         println!("{} -> {}", from, to);
///     }
/// }));
/// ```
pub struct FnEventHandler<F: Fn(Event) + Send + Sync>(pub F);

impl<F: Fn(Event) + Send + Sync> EventHandler for FnEventHandler<F> {
    fn on_event(&self, event: Event) {
        (self.0)(event);
    }
}

/// Forwards every event to several handlers in order.
#[derive(Default)]
pub struct Fanout(Vec<Arc<dyn EventHandler>>);

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, handler: Option<Arc<dyn EventHandler>>) -> Self {
        if let Some(h) = handler {
            self.0.push(h);
        }
        self
    }

    /// `None` when no handler was added, so callers can skip emitting.
    pub fn into_handler(self) -> Option<Arc<dyn EventHandler>> {
        if self.0.is_empty() {
            None
        } else {
            Some(Arc::new(self))
        }
    }
}

impl EventHandler for Fanout {
    fn on_event(&self, event: Event) {
        for handler in &self.0 {
            handler.on_event(event.clone());
        }
    }
}
