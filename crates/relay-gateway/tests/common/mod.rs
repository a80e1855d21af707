//! Common test utilities for integration tests
//!
//! Builds gateways wired to the real reqwest client, pointed at a local mock
//! upstream.

use std::sync::Arc;

use relay_gateway::{Gateway, ReqwestUpstreamClient};
use shared::credentials::{ASSEMBLYAI_API_KEY, CLAUDE_API_KEY};
use shared::{StaticCredentials, UpstreamConfig};

// Test credential values
pub const TEST_ASSEMBLYAI_KEY: &str = "aai-integration-key";
pub const TEST_CLAUDE_KEY: &str = "sk-ant-integration-key";

/// JSON limit used by the test apps
pub const TEST_JSON_LIMIT: usize = 4 * 1024 * 1024;

/// Credentials for both upstreams
pub fn test_credentials() -> StaticCredentials {
    StaticCredentials::new()
        .with(ASSEMBLYAI_API_KEY, TEST_ASSEMBLYAI_KEY)
        .with(CLAUDE_API_KEY, TEST_CLAUDE_KEY)
}

/// Upstream configuration sending both upstreams to `base_url`
pub fn upstreams_at(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        assemblyai_base_url: base_url.to_string(),
        claude_base_url: base_url.to_string(),
        ..UpstreamConfig::default()
    }
}

/// Gateway using the real HTTP client
pub fn gateway_at(base_url: &str, credentials: StaticCredentials) -> Gateway {
    let client = ReqwestUpstreamClient::new().expect("Failed to create upstream client");
    Gateway::new(Arc::new(client), Arc::new(credentials), upstreams_at(base_url))
}
