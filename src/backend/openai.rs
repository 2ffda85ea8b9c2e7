//! Backend for OpenAI-compatible chat APIs.
//!
//! [`OpenAiBackend`] covers NVIDIA's hosted endpoints
//! (`integrate.api.nvidia.com`), OpenAI itself, vLLM, llama.cpp server and
//! any other provider speaking `/v1/chat/completions`.

use super::{Backend, LlmRequest, LlmResponse};
use crate::error::Result;
use crate::PipelineError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Backend for any OpenAI-compatible API.
///
/// # Example
///
/// ```
/// use promo_pipeline::backend::OpenAiBackend;
///
/// let backend = OpenAiBackend::new().with_api_key("nvapi-...");
/// assert!(backend.has_api_key());
/// ```
#[derive(Clone, Default)]
pub struct OpenAiBackend {
    /// Optional API key. If set, sent as `Authorization: Bearer {key}`.
    pub(crate) api_key: Option<String>,
}

impl std::fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiBackend")
            .field("api_key", &self.api_key.as_deref().map(crate::config::redact))
            .finish()
    }
}

impl OpenAiBackend {
    /// Create a new OpenAI-compatible backend without authentication.
    pub fn new() -> Self {
        Self { api_key: None }
    }

    /// Set the API key for authentication.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Returns `true` if an API key has been configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the request body for `/v1/chat/completions`.
    fn build_body(request: &LlmRequest) -> Value {
        let mut messages = Vec::with_capacity(2);
        if !request.system_prompt.is_empty() {
            messages.push(json!({"role": "system", "content": request.system_prompt}));
        }
        messages.push(json!({"role": "user", "content": request.prompt}));

        json!({
            "model": request.model,
            "messages": messages,
            "temperature": request.config.temperature,
            "max_tokens": request.config.max_tokens,
            "stream": false,
        })
    }

    /// Extract metadata from a completion response.
    fn extract_metadata(json_resp: &Value) -> Option<Value> {
        let mut meta = serde_json::Map::new();
        for key in ["usage", "model", "id"] {
            if let Some(v) = json_resp.get(key) {
                meta.insert(key.into(), v.clone());
            }
        }
        if meta.is_empty() {
            None
        } else {
            Some(Value::Object(meta))
        }
    }
}

#[async_trait]
impl Backend for OpenAiBackend {
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse> {
        let url = format!("{}/v1/chat/completions", base_url.trim_end_matches('/'));
        let body = Self::build_body(request);

        let mut req = client.post(&url).json(&body);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();

        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PipelineError::HttpError { status, body: text });
        }

        let json_resp: Value = resp.json().await?;

        let text = json_resp
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                PipelineError::Contract("completion response has no message content".into())
            })?
            .to_string();

        Ok(LlmResponse {
            text,
            status,
            metadata: Self::extract_metadata(&json_resp),
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LlmConfig;

    fn test_request() -> LlmRequest {
        LlmRequest {
            model: "meta/llama-3.1-405b-instruct".into(),
            system_prompt: "You are an expert social media content creator.".into(),
            prompt: "a 1-liter insulated water bottle".into(),
            config: LlmConfig::default(),
        }
    }

    #[test]
    fn test_chat_payload() {
        let body = OpenAiBackend::build_body(&test_request());

        assert_eq!(body["model"], "meta/llama-3.1-405b-instruct");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["stream"], false);

        let messages = body["messages"].as_array().expect("messages");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "a 1-liter insulated water bottle");
    }

    #[test]
    fn test_empty_system_prompt_omitted() {
        let mut request = test_request();
        request.system_prompt.clear();
        let body = OpenAiBackend::build_body(&request);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let backend = OpenAiBackend::new().with_api_key("nvapi-1234567890abcdef");
        let debug_output = format!("{:?}", backend);
        assert!(!debug_output.contains("1234567890abcdef"));
        assert!(debug_output.contains("***"));
    }

    #[tokio::test]
    async fn test_complete_extracts_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer nvapi-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":"c1","model":"m","choices":[{"message":{"role":"assistant","content":"Title: Hi"}}],"usage":{"total_tokens":9}}"#,
            )
            .create_async()
            .await;

        let backend = OpenAiBackend::new().with_api_key("nvapi-test");
        let resp = backend
            .complete(&Client::new(), &server.url(), &test_request())
            .await
            .unwrap();

        assert_eq!(resp.text, "Title: Hi");
        assert_eq!(resp.status, 200);
        assert_eq!(resp.metadata.unwrap()["usage"]["total_tokens"], 9);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let err = OpenAiBackend::new()
            .complete(&Client::new(), &server.url(), &test_request())
            .await
            .unwrap_err();

        match err {
            PipelineError::HttpError { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_missing_content_is_contract_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = OpenAiBackend::new()
            .complete(&Client::new(), &server.url(), &test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Contract(_)));
    }
}
