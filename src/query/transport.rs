//! Network transport for chat-completions requests
//!
//! [`Transport`] is the seam between the pipeline and the network. The
//! pipeline only sees a status and a body; timeouts and connection errors
//! come back as [`TransportError`] and are reported like any other transport
//! failure.

use crate::config::{Credential, ProviderConfig};
use crate::prompt::RequestSpec;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Raw HTTP result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request never produced an HTTP response
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else {
            Self::Other(e.to_string())
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST the request with bearer auth and return the raw response
    async fn send(
        &self,
        request: &RequestSpec,
        credential: &Credential,
    ) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport for OpenAI-compatible endpoints
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::from)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(provider: &ProviderConfig) -> Result<Self, TransportError> {
        Self::new(provider.endpoint_url(), provider.timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &RequestSpec,
        credential: &Credential,
    ) -> Result<TransportResponse, TransportError> {
        tracing::debug!(
            url = %self.url,
            model = %request.model,
            key = %credential.fingerprint(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = TransportResponse {
            status: 204,
            body: String::new(),
        };
        let redirect = TransportResponse {
            status: 301,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_from_config_joins_endpoint() {
        let provider = ProviderConfig::default();
        let transport = HttpTransport::from_config(&provider).unwrap();
        assert_eq!(transport.url(), "https://api.siliconflow.cn/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // port 9 (discard) on localhost is closed on CI runners
        let transport =
            HttpTransport::new("http://127.0.0.1:9/chat/completions", Duration::from_secs(2))
                .unwrap();
        let request = RequestSpec {
            model: "m".into(),
            messages: vec![],
            temperature: 0.0,
            max_tokens: 1,
        };
        let result = transport.send(&request, &Credential::new("k")).await;
        assert!(result.is_err());
    }
}
