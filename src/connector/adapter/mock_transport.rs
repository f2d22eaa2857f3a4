use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::application::{ChatTransport, TransportRequest, TransportResponse};
use crate::domain::{ChatRequest, DomainError};

/// Offline [`ChatTransport`] that answers without touching the network.
///
/// Every request gets a well-formed completion. The reply is the configured
/// text, or the request's last user message echoed back, so each response can
/// be matched to the request that produced it. Response ids are `mock-<n>`.
pub struct MockChatTransport {
    reply: Option<String>,
    counter: AtomicU64,
}

impl MockChatTransport {
    pub fn new() -> Self {
        Self {
            reply: None,
            counter: AtomicU64::new(0),
        }
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            counter: AtomicU64::new(0),
        }
    }

    /// Number of requests answered so far.
    pub fn request_count(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    fn rough_token_count(text: &str) -> u64 {
        text.split_whitespace().count() as u64
    }
}

impl Default for MockChatTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for MockChatTransport {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, DomainError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;

        let chat_request: ChatRequest = match serde_json::from_str(&request.body) {
            Ok(r) => r,
            Err(e) => {
                let body = json!({"error": {"message": format!("invalid request body: {}", e)}});
                return Ok(TransportResponse::new(400, body.to_string()));
            }
        };

        let prompt = chat_request.last_user_content().unwrap_or_default();
        let content = self.reply.clone().unwrap_or_else(|| prompt.to_string());

        let prompt_tokens = Self::rough_token_count(prompt);
        let completion_tokens = Self::rough_token_count(&content);

        debug!("Mock transport answering request #{}", n);

        let body = json!({
            "id": format!("mock-{}", n),
            "object": "chat.completion",
            "created": 0,
            "model": chat_request.model(),
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": prompt_tokens,
                "completion_tokens": completion_tokens,
                "total_tokens": prompt_tokens + completion_tokens
            }
        });

        Ok(TransportResponse::new(200, body.to_string()))
    }
}
