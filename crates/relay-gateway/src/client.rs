//! Upstream HTTP client
//!
//! The gateway talks to upstreams through the [`UpstreamClient`] trait so
//! handlers can be exercised without a network. [`ReqwestUpstreamClient`] is
//! the production implementation.

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Client, Method};
use std::time::Duration;

use crate::bindings::SENSITIVE_HEADERS;
use crate::error::GatewayError;

/// Request built by the gateway, sent at most once
#[derive(Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    /// Value of the first header named `name`
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl std::fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, String)> = self
            .headers
            .iter()
            .map(|(key, value)| (*key, sanitize_header_for_logging(key, value)))
            .collect();

        f.debug_struct("OutboundRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}

/// Buffered upstream response
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Mask credential-bearing header values
///
/// # Security
///
/// Prevents leaking upstream API keys in logs.
pub fn sanitize_header_for_logging(key: &str, value: &str) -> String {
    if SENSITIVE_HEADERS
        .iter()
        .any(|sensitive| sensitive.eq_ignore_ascii_case(key))
    {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}

/// HTTP client trait for testability
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Execute the request once and buffer the full response.
    ///
    /// Any HTTP status counts as a completed round trip; only transport
    /// failures are errors.
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, GatewayError>;
}

/// Reqwest-based upstream client
///
/// No request timeout is set; calls run until the transport completes or
/// fails.
#[derive(Clone)]
pub struct ReqwestUpstreamClient {
    client: Client,
}

impl ReqwestUpstreamClient {
    /// Create a new client with connection pooling
    pub fn new() -> Result<Self, GatewayError> {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("relay-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                GatewayError::invalid_config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamClient for ReqwestUpstreamClient {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, GatewayError> {
        let mut builder = self.client.request(request.method.clone(), &request.url);

        for (key, value) in &request.headers {
            let mut header_value = HeaderValue::from_str(value).map_err(|_| {
                GatewayError::upstream(format!("Invalid value for header '{}'", key))
            })?;
            if SENSITIVE_HEADERS.contains(key) {
                header_value.set_sensitive(true);
            }
            builder = builder.header(*key, header_value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::upstream(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::upstream(e.to_string()))?;

        Ok(UpstreamResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Mock upstream client for testing
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockUpstreamClient {
    /// Simulated response
    response: std::sync::Arc<std::sync::Mutex<Option<UpstreamResponse>>>,
    /// Simulated transport failure message
    error: std::sync::Arc<std::sync::Mutex<Option<String>>>,
    /// Track executed requests
    requests: std::sync::Arc<std::sync::Mutex<Vec<OutboundRequest>>>,
}

#[cfg(test)]
impl MockUpstreamClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `status` and a JSON body
    pub fn with_json(self, status: u16, body: serde_json::Value) -> Self {
        self.with_raw(status, serde_json::to_vec(&body).unwrap())
    }

    /// Respond with `status` and arbitrary body bytes
    pub fn with_raw(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        *self.response.lock().unwrap() = Some(UpstreamResponse {
            status,
            body: body.into(),
        });
        self
    }

    /// Fail every call with a transport error
    pub fn with_error(self, message: impl Into<String>) -> Self {
        *self.error.lock().unwrap() = Some(message.into());
        self
    }

    /// Get all executed requests
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get count of executed requests
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, GatewayError> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref message) = *self.error.lock().unwrap() {
            return Err(GatewayError::upstream(message.clone()));
        }

        Ok(self
            .response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(UpstreamResponse {
                status: 200,
                body: br#"{"success":true}"#.to_vec(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_key() -> OutboundRequest {
        OutboundRequest {
            method: Method::POST,
            url: "https://api.anthropic.com/v1/messages".to_string(),
            headers: vec![
                ("x-api-key", "sk-ant-very-secret".to_string()),
                ("anthropic-version", "2023-06-01".to_string()),
            ],
            body: Some(b"{}".to_vec()),
        }
    }

    #[test]
    fn test_sanitize_header_for_logging() {
        assert_eq!(
            sanitize_header_for_logging("authorization", "aai-key"),
            "[REDACTED]"
        );
        assert_eq!(
            sanitize_header_for_logging("X-API-KEY", "sk-ant"),
            "[REDACTED]"
        );
        assert_eq!(
            sanitize_header_for_logging("anthropic-version", "2023-06-01"),
            "2023-06-01"
        );
    }

    #[test]
    fn test_outbound_request_debug_redacts_credentials() {
        let debug = format!("{:?}", request_with_key());
        assert!(!debug.contains("sk-ant-very-secret"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("2023-06-01"));
    }

    #[test]
    fn test_outbound_request_header_lookup() {
        let request = request_with_key();
        assert_eq!(request.header("Anthropic-Version"), Some("2023-06-01"));
        assert_eq!(request.header("content-type"), None);
    }

    #[test]
    fn test_upstream_response_success_range() {
        let ok = UpstreamResponse {
            status: 201,
            body: vec![],
        };
        let bad = UpstreamResponse {
            status: 401,
            body: vec![],
        };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestUpstreamClient::new().is_ok());
    }

    #[actix_web::test]
    async fn test_mock_client_records_requests() {
        let client = MockUpstreamClient::new().with_json(202, serde_json::json!({"id": "t1"}));

        let response = client.send(request_with_key()).await.unwrap();
        assert_eq!(response.status, 202);
        assert_eq!(client.request_count(), 1);
        assert_eq!(client.requests()[0].url, "https://api.anthropic.com/v1/messages");
    }

    #[actix_web::test]
    async fn test_mock_client_error() {
        let client = MockUpstreamClient::new().with_error("connection refused");
        let err = client.send(request_with_key()).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(client.request_count(), 1);
    }
}
