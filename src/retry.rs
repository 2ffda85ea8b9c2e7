//! Bounded retry with exponential backoff around a single external call.
//!
//! [`ResilientInvoker`] runs an operation up to
//! [`BackoffConfig::max_attempts`] times. Each failure is passed through a
//! classifier: [`FailureClass::Retryable`] failures are retried after the
//! configured delay while attempts remain, [`FailureClass::Terminal`]
//! failures are returned at once. Each attempt is bounded by
//! [`BackoffConfig::attempt_timeout`]; an expired attempt becomes
//! [`PipelineError::Timeout`], which the default classifier retries.

use crate::backend::BackoffConfig;
use crate::error::{PipelineError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How a failed attempt should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Transient: back off and try again if the budget allows.
    Retryable,
    /// Permanent: surface immediately, no further attempts.
    Terminal,
}

/// Default classifier: transport failures, timeouts and non-2xx statuses
/// are retryable; everything else (contract violations, parse errors,
/// validation) is terminal.
pub fn classify_transport(err: &PipelineError) -> FailureClass {
    if err.is_transport() {
        FailureClass::Retryable
    } else {
        FailureClass::Terminal
    }
}

/// Callback invoked before each backoff sleep.
///
/// Arguments: `(next_attempt_number, delay_before_retry, reason_for_retry)`,
/// where the attempt number is 1-indexed.
pub type RetryHook = Arc<dyn Fn(u32, Duration, &str) + Send + Sync>;

/// Retry wrapper for one logical external call.
///
/// Holds no state between invocations.
///
/// # Example
///
/// ```
/// use promo_pipeline::retry::ResilientInvoker;
/// use promo_pipeline::backend::BackoffConfig;
///
/// # tokio_test::block_on(async {
/// let invoker = ResilientInvoker::new("ping", BackoffConfig::standard());
/// let value = invoker.invoke(|_attempt| async { Ok::<_, promo_pipeline::PipelineError>(42) }).await;
/// assert_eq!(value.unwrap(), 42);
/// # });
/// ```
#[derive(Clone)]
pub struct ResilientInvoker {
    name: String,
    config: BackoffConfig,
    on_retry: Option<RetryHook>,
}

impl ResilientInvoker {
    pub fn new(name: impl Into<String>, config: BackoffConfig) -> Self {
        Self {
            name: name.into(),
            config,
            on_retry: None,
        }
    }

    /// Register a callback fired before every backoff sleep.
    pub fn with_retry_hook(mut self, hook: RetryHook) -> Self {
        self.on_retry = Some(hook);
        self
    }

    pub fn config(&self) -> &BackoffConfig {
        &self.config
    }

    /// Run `op` with the default [`classify_transport`] classifier.
    ///
    /// `op` receives the 0-indexed attempt number.
    pub async fn invoke<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.invoke_classified(op, classify_transport).await
    }

    /// Run `op`, deciding retry eligibility with `classify`.
    ///
    /// Returns the first success, the first terminal failure, or the last
    /// retryable failure once the attempt budget is spent.
    pub async fn invoke_classified<T, F, Fut, C>(&self, mut op: F, classify: C) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
        C: Fn(&PipelineError) -> FailureClass,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            let outcome = match self.config.attempt_timeout {
                Some(limit) => tokio::time::timeout(limit, op(attempt))
                    .await
                    .unwrap_or(Err(PipelineError::Timeout(limit))),
                None => op(attempt).await,
            };

            let err = match outcome {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(call = %self.name, attempts = attempt + 1, "call succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            if classify(&err) == FailureClass::Terminal {
                warn!(call = %self.name, attempt = attempt + 1, error = %err, "non-retryable failure");
                return Err(err);
            }

            if attempt + 1 >= max_attempts {
                warn!(call = %self.name, attempts = max_attempts, error = %err, "retry budget exhausted");
                return Err(err);
            }

            let delay = self.config.delay_for_attempt(attempt);
            let reason = err.to_string();
            warn!(
                call = %self.name,
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                error = %reason,
                "retryable failure, backing off"
            );
            if let Some(ref hook) = self.on_retry {
                hook(attempt + 1, delay, &reason);
            }

            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl std::fmt::Debug for ResilientInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientInvoker")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("has_retry_hook", &self.on_retry.is_some())
            .finish()
    }
}
