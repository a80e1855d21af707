//! Error types for forwarded requests
//!
//! Every failure is converted at the handler boundary into a local
//! `500 {"error": "<message>"}` response. Callers can only tell the
//! categories apart by message content.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Gateway error types
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required credential absent; raised before any network call
    #[error("{service} API key not configured")]
    MissingCredential { service: &'static str },

    /// Inbound payload could not be turned into an outbound body
    #[error("{0}")]
    InvalidPayload(String),

    /// Network failure or unusable outbound request
    #[error("{0}")]
    Upstream(String),

    /// Upstream body is not JSON
    #[error("Invalid JSON response from upstream: {0}")]
    InvalidUpstreamBody(#[from] serde_json::Error),

    /// Upstream client could not be constructed at startup
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl GatewayError {
    /// Create an Upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create an InvalidPayload error
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "missing_credential",
            Self::InvalidPayload(_) => "invalid_payload",
            Self::Upstream(_) => "upstream",
            Self::InvalidUpstreamBody(_) => "invalid_upstream_body",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_missing_credential_message() {
        let err = GatewayError::MissingCredential {
            service: "AssemblyAI",
        };
        assert_eq!(err.to_string(), "AssemblyAI API key not configured");
        assert_eq!(err.kind(), "missing_credential");
    }

    #[test]
    fn test_upstream_message_is_unprefixed() {
        let err = GatewayError::upstream("error sending request for url");
        assert_eq!(err.to_string(), "error sending request for url");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_slice::<serde_json::Value>(b"<html>").unwrap_err();
        let err: GatewayError = json_err.into();
        assert!(matches!(err, GatewayError::InvalidUpstreamBody(_)));
        assert!(err
            .to_string()
            .starts_with("Invalid JSON response from upstream"));
    }

    #[test]
    fn test_invalid_config_is_distinct_from_upstream() {
        let err = GatewayError::invalid_config("Failed to create HTTP client: no TLS backend");
        assert!(matches!(err, GatewayError::InvalidConfig(_)));
        assert_eq!(err.kind(), "invalid_config");
        assert_eq!(
            err.to_string(),
            "Invalid client configuration: Failed to create HTTP client: no TLS backend"
        );
    }

    #[actix_web::test]
    async fn test_every_error_is_a_local_500() {
        let errors = vec![
            GatewayError::MissingCredential { service: "Claude" },
            GatewayError::invalid_payload("audioBase64 is required"),
            GatewayError::upstream("connection refused"),
        ];

        for err in errors {
            let message = err.to_string();
            let resp = err.error_response();
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let body = to_bytes(resp.into_body()).await.unwrap();
            let parsed: ErrorBody = serde_json::from_slice(&body).unwrap();
            assert_eq!(parsed.error, message);
        }
    }
}
