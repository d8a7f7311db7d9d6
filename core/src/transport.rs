//! Network transport for `HttpRequest` values.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

use crate::config::ClientConfig;
use crate::error::{ApiError, FALLBACK_MESSAGE};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured timeout elapsed before the exchange completed.
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Request(String),

    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => ApiError::transport(FALLBACK_MESSAGE, None),
            TransportError::Request(message) | TransportError::Build(message) => {
                ApiError::transport(message, None)
            }
        }
    }
}

/// Executes one HTTP round-trip. Non-2xx statuses are data, not errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport sharing one connection pool across calls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::Build(e.to_string()))?;
            let value = HeaderValue::from_str(value).map_err(|e| TransportError::Build(e.to_string()))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(HttpResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_fallback_message() {
        let err: ApiError = TransportError::Timeout.into();
        assert_eq!(err, ApiError::transport(FALLBACK_MESSAGE, None));
    }

    #[test]
    fn request_error_keeps_its_message() {
        let err: ApiError = TransportError::Request("connection refused".to_string()).into();
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn invalid_default_header_fails_construction() {
        let mut config = ClientConfig::default();
        config.default_headers.push(("bad header".to_string(), "x".to_string()));
        assert!(matches!(ReqwestTransport::new(&config), Err(TransportError::Build(_))));
    }
}
