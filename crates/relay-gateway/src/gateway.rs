//! Credential-injecting forwarding gateway
//!
//! [`Gateway::forward`] is the single operation every forwarding route goes
//! through:
//!
//! 1. Resolve the upstream credential (fresh on every call). Missing means
//!    fail without touching the network.
//! 2. Build the outbound request from the route binding and inbound payload.
//! 3. Send it exactly once; no retry, no timeout override.
//! 4. Validate the response body as JSON and hand it back unchanged.
//!
//! The upstream status code is not translated: a JSON error body from the
//! upstream is relayed as a success. Callers cannot tell an upstream rejection
//! apart from an accepted request except by inspecting the body.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::Value;
use shared::{CredentialSource, UpstreamConfig};
use std::sync::Arc;

use crate::bindings::{BodyMode, RouteBinding};
use crate::client::{OutboundRequest, UpstreamClient};
use crate::error::GatewayError;

/// Lenient base64 decoding: padding optional, non-zero trailing bits accepted
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Inbound call as seen by the gateway
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub path_params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl InboundRequest {
    /// Request carrying a JSON body
    pub fn json(body: Value) -> Self {
        Self {
            path_params: Vec::new(),
            body: Some(body),
        }
    }

    /// Body-less request with one path parameter
    pub fn with_param(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path_params: vec![(name.into(), value.into())],
            body: None,
        }
    }
}

/// Upstream JSON body, validated but kept as the original bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedBody(Vec<u8>);

impl RelayedBody {
    /// Accept `bytes` only if they form a JSON document
    pub fn parse(bytes: Vec<u8>) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<serde::de::IgnoredAny>(&bytes)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Parse into a JSON value
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.0)
    }
}

/// Forwarding gateway shared by all handlers
///
/// Immutable after construction; safe to share across worker threads.
#[derive(Clone)]
pub struct Gateway {
    client: Arc<dyn UpstreamClient>,
    credentials: Arc<dyn CredentialSource>,
    upstreams: UpstreamConfig,
}

impl Gateway {
    pub fn new(
        client: Arc<dyn UpstreamClient>,
        credentials: Arc<dyn CredentialSource>,
        upstreams: UpstreamConfig,
    ) -> Self {
        Self {
            client,
            credentials,
            upstreams,
        }
    }

    /// Forward one inbound call along `binding`
    pub async fn forward(
        &self,
        binding: &RouteBinding,
        inbound: InboundRequest,
    ) -> Result<RelayedBody, GatewayError> {
        let result = self.forward_inner(binding, inbound).await;

        if let Err(e) = &result {
            tracing::error!(
                route = binding.name,
                error_kind = e.kind(),
                error = %e,
                "Forwarding failed"
            );
        }

        result
    }

    async fn forward_inner(
        &self,
        binding: &RouteBinding,
        inbound: InboundRequest,
    ) -> Result<RelayedBody, GatewayError> {
        let upstream = binding.upstream;
        let credential = self
            .credentials
            .resolve(upstream.credential_key())
            .ok_or(GatewayError::MissingCredential {
                service: upstream.service_name(),
            })?;

        let url = binding.url(&self.upstreams, &inbound.path_params);
        let body = outbound_body(binding.body, inbound.body)?;

        let mut headers = upstream.headers(&credential, &self.upstreams);
        if let Some(content_type) = binding.body.content_type() {
            headers.push(("content-type", content_type.to_string()));
        }

        let request = OutboundRequest {
            method: binding.method.clone(),
            url,
            headers,
            body,
        };

        tracing::debug!(route = binding.name, request = ?request, "Sending upstream request");

        let response = self.client.send(request).await?;

        if response.is_success() {
            tracing::info!(
                route = binding.name,
                status = response.status,
                "Upstream request completed"
            );
        } else {
            tracing::warn!(
                route = binding.name,
                status = response.status,
                "Upstream returned non-success status, relaying body unchanged"
            );
        }

        Ok(RelayedBody::parse(response.body)?)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("upstreams", &self.upstreams)
            .finish_non_exhaustive()
    }
}

/// Turn the inbound body into outbound bytes according to `mode`
fn outbound_body(mode: BodyMode, body: Option<Value>) -> Result<Option<Vec<u8>>, GatewayError> {
    match mode {
        BodyMode::Empty => Ok(None),
        BodyMode::Json => {
            let value = body.unwrap_or(Value::Object(Default::default()));
            let bytes = serde_json::to_vec(&value).map_err(|e| {
                GatewayError::invalid_payload(format!("Failed to encode request body: {}", e))
            })?;
            Ok(Some(bytes))
        }
        BodyMode::Base64Upload { field } => {
            let encoded = body
                .as_ref()
                .and_then(|value| value.get(field))
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    GatewayError::invalid_payload(format!("{} must be a base64 string", field))
                })?;
            decode_base64(encoded).map(Some)
        }
    }
}

/// Decode base64 leniently: whitespace is skipped, padding is optional and the
/// URL-safe alphabet is accepted alongside the standard one
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, GatewayError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    LENIENT_BASE64
        .decode(compact.as_bytes())
        .map_err(|e| GatewayError::invalid_payload(format!("Invalid base64 payload: {}", e)))
}
