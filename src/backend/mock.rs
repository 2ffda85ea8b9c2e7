//! Mock backends for testing without live services.
//!
//! [`MockBackend`] returns canned completions and [`MockImageBackend`]
//! replays scripted synthesis outcomes. Both count calls and cycle back to
//! the start of their script when it runs out.
//!
//! # Example
//!
//! ```
//! use promo_pipeline::backend::{MockBackend, MockImageBackend, MockImageReply};
//!
//! let text = MockBackend::fixed("Title: T\nMessage: M\nTags: #a");
//! let images = MockImageBackend::new(vec![
//!     MockImageReply::Status(503),
//!     MockImageReply::Image(vec![0x89, b'P', b'N', b'G']),
//! ]);
//! assert_eq!(text.call_count(), 0);
//! assert_eq!(images.call_count(), 0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{Backend, ImageBackend, LlmRequest, LlmResponse, SynthesisRequest};
use crate::error::Result;
use crate::PipelineError;

#[derive(Debug, Clone)]
enum Canned {
    Text(String),
    Status(u16),
}

/// A test text backend that returns canned responses in order.
#[derive(Debug)]
pub struct MockBackend {
    responses: Vec<Canned>,
    index: AtomicUsize,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockBackend {
    /// Responses are returned in order, cycling when exhausted.
    pub fn new(responses: Vec<String>) -> Self {
        Self::from_canned(responses.into_iter().map(Canned::Text).collect())
    }

    /// Always return the same response.
    pub fn fixed(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    /// Always fail with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self::from_canned(vec![Canned::Status(status)])
    }

    fn from_canned(responses: Vec<Canned>) -> Self {
        assert!(!responses.is_empty(), "MockBackend requires at least one response");
        Self {
            responses,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn complete(
        &self,
        _client: &Client,
        _base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }
        let idx = self.index.fetch_add(1, Ordering::SeqCst) % self.responses.len();
        match &self.responses[idx] {
            Canned::Text(text) => Ok(LlmResponse {
                text: text.clone(),
                status: 200,
                metadata: None,
            }),
            Canned::Status(status) => Err(PipelineError::HttpError {
                status: *status,
                body: "mock failure".into(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// One scripted outcome of [`MockImageBackend`].
#[derive(Debug, Clone)]
pub enum MockImageReply {
    /// Succeed with these raw image bytes.
    Image(Vec<u8>),
    /// Fail with this HTTP status (a transport error).
    Status(u16),
    /// Fail with a contract violation.
    Contract(String),
    /// Sleep this long, then succeed with an empty body. Used to trip the
    /// per-attempt timeout.
    Hang(Duration),
}

/// A test image backend replaying [`MockImageReply`] values in order.
#[derive(Debug)]
pub struct MockImageBackend {
    replies: Vec<MockImageReply>,
    index: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockImageBackend {
    pub fn new(replies: Vec<MockImageReply>) -> Self {
        assert!(!replies.is_empty(), "MockImageBackend requires at least one reply");
        Self {
            replies,
            index: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always succeed with the same bytes.
    pub fn fixed(bytes: Vec<u8>) -> Self {
        Self::new(vec![MockImageReply::Image(bytes)])
    }

    /// Number of synthesis calls so far.
    pub fn call_count(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Prompts received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ImageBackend for MockImageBackend {
    async fn synthesize(
        &self,
        _client: &Client,
        _base_url: &str,
        request: &SynthesisRequest,
    ) -> Result<Vec<u8>> {
        if let Ok(mut seen) = self.prompts.lock() {
            seen.push(request.prompt.clone());
        }
        let idx = self.index.fetch_add(1, Ordering::SeqCst) % self.replies.len();
        match self.replies[idx].clone() {
            MockImageReply::Image(bytes) => Ok(bytes),
            MockImageReply::Status(status) => Err(PipelineError::HttpError {
                status,
                body: "mock failure".into(),
            }),
            MockImageReply::Contract(reason) => Err(PipelineError::Contract(reason)),
            MockImageReply::Hang(duration) => {
                tokio::time::sleep(duration).await;
                Ok(Vec::new())
            }
        }
    }

    fn name(&self) -> &'static str {
        "mock-image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LlmConfig;

    fn request(prompt: &str) -> LlmRequest {
        LlmRequest {
            model: "test".to_string(),
            system_prompt: String::new(),
            prompt: prompt.to_string(),
            config: LlmConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_mock_cycles_responses() {
        let mock = MockBackend::new(vec!["first".into(), "second".into()]);
        let client = Client::new();
        let r1 = mock.complete(&client, "http://unused", &request("a")).await.unwrap();
        let r2 = mock.complete(&client, "http://unused", &request("b")).await.unwrap();
        let r3 = mock.complete(&client, "http://unused", &request("c")).await.unwrap();
        assert_eq!(r1.text, "first");
        assert_eq!(r2.text, "second");
        assert_eq!(r3.text, "first");
        assert_eq!(mock.call_count(), 3);
        let prompts: Vec<String> = mock.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let mock = MockBackend::failing(500);
        let err = mock
            .complete(&Client::new(), "http://unused", &request("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::HttpError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_mock_image_script() {
        let mock = MockImageBackend::new(vec![
            MockImageReply::Status(503),
            MockImageReply::Contract("no image".into()),
            MockImageReply::Image(vec![1, 2, 3]),
        ]);
        let client = Client::new();
        let req = SynthesisRequest::new("p");

        assert!(mock.synthesize(&client, "", &req).await.unwrap_err().is_transport());
        assert!(matches!(
            mock.synthesize(&client, "", &req).await.unwrap_err(),
            PipelineError::Contract(_)
        ));
        assert_eq!(mock.synthesize(&client, "", &req).await.unwrap(), vec![1, 2, 3]);
        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.prompts(), vec!["p", "p", "p"]);
    }
}
