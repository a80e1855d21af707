//! Configuration management using environment variables
//!
//! The configuration is loaded once at startup and passed to the gateway
//! explicitly. Upstream API keys are deliberately not part of it: they are
//! resolved per request through a [`crate::CredentialSource`].

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use url::Url;

/// Default listener port
pub const DEFAULT_PORT: u16 = 3000;

/// Default service name reported by the health endpoint
pub const DEFAULT_SERVICE_NAME: &str = "Reflect Proxy Server";

/// Default inbound JSON body limit in megabytes
pub const DEFAULT_JSON_BODY_LIMIT_MB: usize = 50;

/// Default AssemblyAI API base URL
pub const DEFAULT_ASSEMBLYAI_BASE_URL: &str = "https://api.assemblyai.com";

/// Default Claude API base URL
pub const DEFAULT_CLAUDE_BASE_URL: &str = "https://api.anthropic.com";

/// Default value of the `anthropic-version` header
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Upstream API configuration
    pub upstreams: UpstreamConfig,

    /// CORS configuration
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Name reported by `/health`
    pub service_name: String,

    /// Maximum inbound JSON body size in bytes
    pub json_limit_bytes: usize,
}

impl ServerConfig {
    /// Listener address in `host:port` form
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            json_limit_bytes: DEFAULT_JSON_BODY_LIMIT_MB * 1024 * 1024,
        }
    }
}

/// Upstream API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// AssemblyAI base URL, without trailing slash
    pub assemblyai_base_url: String,

    /// Claude base URL, without trailing slash
    pub claude_base_url: String,

    /// Value sent in the `anthropic-version` header
    pub anthropic_version: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            assemblyai_base_url: DEFAULT_ASSEMBLYAI_BASE_URL.to_string(),
            claude_base_url: DEFAULT_CLAUDE_BASE_URL.to_string(),
            anthropic_version: DEFAULT_ANTHROPIC_VERSION.to_string(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Exact origins allowed; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("Invalid PORT: {}", e)))?,
            None => DEFAULT_PORT,
        };

        let json_limit_mb: usize = match lookup("JSON_BODY_LIMIT_MB") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("Invalid JSON_BODY_LIMIT_MB: {}", e)))?,
            None => DEFAULT_JSON_BODY_LIMIT_MB,
        };
        if json_limit_mb == 0 {
            return Err(Error::config("JSON_BODY_LIMIT_MB must be greater than 0"));
        }
        let json_limit_bytes = json_limit_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| Error::config("JSON_BODY_LIMIT_MB is too large"))?;

        Ok(Self {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.host),
                port,
                service_name: lookup("SERVICE_NAME")
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or(defaults.service_name),
                json_limit_bytes,
            },
            upstreams: UpstreamConfig {
                assemblyai_base_url: base_url(
                    "ASSEMBLYAI_BASE_URL",
                    lookup("ASSEMBLYAI_BASE_URL"),
                    DEFAULT_ASSEMBLYAI_BASE_URL,
                )?,
                claude_base_url: base_url(
                    "CLAUDE_BASE_URL",
                    lookup("CLAUDE_BASE_URL"),
                    DEFAULT_CLAUDE_BASE_URL,
                )?,
                anthropic_version: lookup("ANTHROPIC_VERSION")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_ANTHROPIC_VERSION.to_string()),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|raw| parse_origins(&raw))
                    .unwrap_or_default(),
            },
        })
    }
}

/// Validate an upstream base URL and strip its trailing slash
fn base_url(name: &str, value: Option<String>, default: &str) -> Result<String> {
    let raw = value.unwrap_or_else(|| default.to_string());
    let parsed =
        Url::parse(&raw).map_err(|e| Error::config(format!("Invalid {}: {}", name, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::config(format!(
            "Invalid {}: unsupported scheme '{}'",
            name,
            parsed.scheme()
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
