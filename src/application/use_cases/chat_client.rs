use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::{ChatTransport, TransportRequest, TransportResponse};
use crate::domain::{ChatRequest, ChatResponse, ChatSettings, DomainError};

const ORGANIZATION_HEADER: &str = "OpenAI-Organization";
/// Upper bound on how much of an unrecognised error body ends up in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// OpenAI-style error envelope: `{"error": {"message": "..."}}`.
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Sends a single prompt to a chat-completion endpoint.
///
/// The client holds its own copy of [`ChatSettings`]; changing persisted
/// settings afterwards does not affect requests issued through it. Clones
/// share the transport and are independent otherwise, so any number of
/// requests may be in flight at once.
#[derive(Clone)]
pub struct ChatClient {
    transport: Arc<dyn ChatTransport>,
    settings: ChatSettings,
}

impl ChatClient {
    pub fn new(transport: Arc<dyn ChatTransport>, settings: ChatSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest::from_prompt(self.settings.model(), prompt)
    }

    /// Issue the request and wait for the parsed response.
    ///
    /// The returned response always has at least one choice.
    pub async fn complete(&self, prompt: &str) -> Result<ChatResponse, DomainError> {
        let request = self.transport_request(&self.build_request(prompt))?;

        debug!(
            "Sending chat request to {} (model {}, {} prompt chars)",
            request.url,
            self.settings.model(),
            prompt.chars().count()
        );

        let started = Instant::now();
        let response = self.transport.post(request).await?;
        let elapsed_millis = started.elapsed().as_secs_f64() * 1000.0;

        debug!(
            "Chat endpoint answered {} after {:.0} ms",
            response.status, elapsed_millis
        );

        Self::parse_response(response).map(|r| r.with_round_trip_millis(elapsed_millis))
    }

    /// Issue the request in the background and hand the outcome to `on_complete`.
    ///
    /// `on_complete` runs exactly once, on a tokio task, and never before this
    /// method has returned. Failures are logged before the callback is invoked.
    /// Must be called from within a tokio runtime.
    pub fn send_prompt<F>(&self, prompt: impl Into<String>, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<ChatResponse, DomainError>) + Send + 'static,
    {
        let client = self.clone();
        let prompt = prompt.into();

        tokio::spawn(async move {
            let result = client.complete(&prompt).await;
            if let Err(e) = &result {
                warn!("Chat request to {} failed: {}", client.settings.endpoint_url(), e);
            }
            on_complete(result);
        })
    }

    fn transport_request(&self, request: &ChatRequest) -> Result<TransportRequest, DomainError> {
        let body = serde_json::to_string(request)
            .map_err(|e| DomainError::internal(format!("Failed to serialize chat request: {}", e)))?;

        Ok(TransportRequest {
            url: self.settings.endpoint_url().to_string(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.settings.api_key()),
                ),
                (
                    ORGANIZATION_HEADER.to_string(),
                    self.settings.organization_id().to_string(),
                ),
            ],
            body,
        })
    }

    fn parse_response(response: TransportResponse) -> Result<ChatResponse, DomainError> {
        if !response.is_success() {
            return Err(DomainError::http_status(
                response.status,
                Self::error_message(&response.body),
            ));
        }

        let parsed: ChatResponse = serde_json::from_str(&response.body)
            .map_err(|e| DomainError::malformed(format!("Failed to parse chat response: {}", e)))?;

        if parsed.choices().is_empty() {
            return Err(DomainError::EmptyChoices);
        }

        Ok(parsed)
    }

    fn error_message(body: &str) -> String {
        if let Ok(api_error) = serde_json::from_str::<ApiErrorBody>(body) {
            return api_error.error.message;
        }

        let trimmed = body.trim();
        if trimmed.is_empty() {
            return "(empty body)".to_string();
        }
        if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
            let head: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return format!("{}...", head);
        }
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::oneshot;

    use super::*;

    /// Answers every request with a fixed status and body after an optional delay,
    /// recording what it was sent.
    struct ScriptedTransport {
        status: u16,
        body: String,
        delay: Duration,
        calls: AtomicUsize,
        last_request: Mutex<Option<TransportRequest>>,
    }

    impl ScriptedTransport {
        fn new(status: u16, body: impl Into<String>) -> Self {
            Self {
                status,
                body: body.into(),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl ChatTransport for ScriptedTransport {
        async fn post(&self, request: TransportRequest) -> Result<TransportResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(TransportResponse::new(self.status, self.body.clone()))
        }
    }

    struct RefusingTransport;

    #[async_trait]
    impl ChatTransport for RefusingTransport {
        async fn post(&self, _request: TransportRequest) -> Result<TransportResponse, DomainError> {
            Err(DomainError::transport("connection refused"))
        }
    }

    fn completion_body(content: &str) -> String {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 5, "completion_tokens": 1, "total_tokens": 6}
        })
        .to_string()
    }

    fn settings() -> ChatSettings {
        ChatSettings::default()
            .with_endpoint_url("https://example.test/v1/chat/completions")
            .with_api_key("sk-test")
            .with_organization_id("org-test")
            .with_model("gpt-test")
    }

    #[test]
    fn test_build_request_has_single_user_message() {
        let client = ChatClient::new(Arc::new(RefusingTransport), settings());
        let request = client.build_request("hello");

        assert_eq!(request.model(), "gpt-test");
        assert_eq!(request.messages().len(), 1);
        assert_eq!(request.messages()[0].role(), "user");
        assert_eq!(request.messages()[0].content(), "hello");
    }

    #[tokio::test]
    async fn test_complete_sends_headers_and_body() {
        let transport = Arc::new(ScriptedTransport::new(200, completion_body("world")));
        let client = ChatClient::new(transport.clone(), settings());

        let response = client.complete("hello").await.unwrap();
        assert_eq!(response.first_content(), Some("world"));

        let sent = transport.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.url, "https://example.test/v1/chat/completions");
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert_eq!(sent.header("Authorization"), Some("Bearer sk-test"));
        assert_eq!(sent.header("OpenAI-Organization"), Some("org-test"));

        let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
        assert_eq!(
            body,
            json!({"model": "gpt-test", "messages": [{"role": "user", "content": "hello"}]})
        );
    }

    #[tokio::test]
    async fn test_round_trip_time_is_bounded_by_wall_clock() {
        let transport = ScriptedTransport::new(200, completion_body("ok"))
            .with_delay(Duration::from_millis(20));
        let client = ChatClient::new(Arc::new(transport), settings());

        let outer = Instant::now();
        let response = client.complete("hi").await.unwrap();
        let wall_millis = outer.elapsed().as_secs_f64() * 1000.0;

        assert!(response.total_round_trip_millis() >= 20.0);
        assert!(response.total_round_trip_millis() <= wall_millis);
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let body = json!({
            "id": "x", "object": "chat.completion", "created": 1, "choices": []
        })
        .to_string();
        let client = ChatClient::new(Arc::new(ScriptedTransport::new(200, body)), settings());

        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, DomainError::EmptyChoices));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let client = ChatClient::new(
            Arc::new(ScriptedTransport::new(200, "<html>gateway</html>")),
            settings(),
        );

        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_malformed() {
        let body = json!({"id": "x", "object": "chat.completion", "created": "yesterday", "choices": []});
        let client = ChatClient::new(
            Arc::new(ScriptedTransport::new(200, body.to_string())),
            settings(),
        );

        let err = client.complete("hi").await.unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[tokio::test]
    async fn test_error_status_uses_api_error_message() {
        let body = json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        });
        let client = ChatClient::new(
            Arc::new(ScriptedTransport::new(401, body.to_string())),
            settings(),
        );

        match client.complete("hi").await.unwrap_err() {
            DomainError::HttpStatus { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_long_plain_body_is_truncated() {
        let body = "x".repeat(500);
        let client = ChatClient::new(Arc::new(ScriptedTransport::new(502, body)), settings());

        match client.complete("hi").await.unwrap_err() {
            DomainError::HttpStatus { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message.len(), MAX_ERROR_BODY_CHARS + 3);
                assert!(message.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_prompt_reports_transport_failure_once() {
        let client = ChatClient::new(Arc::new(RefusingTransport), settings());
        let invocations = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel();

        let counter = invocations.clone();
        let handle = client.send_prompt("hi", move |result| {
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(result);
        });
        handle.await.unwrap();

        let result = rx.await.unwrap();
        assert!(result.unwrap_err().is_transport());
        assert_eq!(invocations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_send_prompt_never_completes_before_returning() {
        let transport = Arc::new(ScriptedTransport::new(200, completion_body("ok")));
        let client = ChatClient::new(transport, settings());
        let returned = Arc::new(AtomicBool::new(false));
        let (tx, rx) = oneshot::channel();

        let flag = returned.clone();
        let handle = client.send_prompt("hi", move |result| {
            let _ = tx.send((flag.load(Ordering::SeqCst), result.is_ok()));
        });
        returned.store(true, Ordering::SeqCst);
        handle.await.unwrap();

        let (had_returned, ok) = rx.await.unwrap();
        assert!(had_returned);
        assert!(ok);
    }
}
