use async_trait::async_trait;

use crate::domain::DomainError;

/// An outbound HTTP POST carrying a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl TransportRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A fully received HTTP response. Any status code counts as a received
/// response; classifying it is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request and waits for the complete response body.
///
/// Implementations return [`DomainError::Transport`] for connection, TLS,
/// timeout and body-decoding failures, and never for HTTP status codes.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, DomainError>;
}
