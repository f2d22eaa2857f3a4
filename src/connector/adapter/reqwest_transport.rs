use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::{ChatTransport, TransportRequest, TransportResponse};
use crate::domain::DomainError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// [`ChatTransport`] backed by `reqwest`.
///
/// Completions for large scripts can take a while, so the overall timeout is
/// generous; the connect timeout keeps an unreachable host from hanging a call.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
                .build()
                .unwrap_or_default(),
        }
    }

    fn describe(e: &reqwest::Error) -> &'static str {
        if e.is_timeout() {
            "timed out"
        } else if e.is_connect() {
            "connection failed"
        } else if e.is_builder() {
            "invalid request"
        } else {
            "request failed"
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for ReqwestTransport {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, DomainError> {
        let TransportRequest { url, headers, body } = request;

        let mut builder = self.client.post(&url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(body).send().await.map_err(|e| {
            DomainError::transport(format!("{} ({}): {}", url, Self::describe(&e), e))
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            DomainError::transport(format!("{}: failed to read response body: {}", url, e))
        })?;

        debug!("POST {} -> {} ({} bytes)", url, status, body.len());

        Ok(TransportResponse::new(status, body))
    }
}
