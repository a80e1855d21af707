//! Shared library for the relay gateway
//!
//! This crate provides common functionality used by the gateway binary:
//! - Configuration management
//! - Upstream credential sources
//! - Error handling types
//! - Logging infrastructure

pub mod config;
pub mod credentials;
pub mod error;

// Re-export commonly used types
pub use config::{Config, CorsConfig, ServerConfig, UpstreamConfig};
pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials};
pub use error::{Error, Result};

/// Initialize tracing subscriber for structured logging
///
/// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` switches the
/// output to JSON lines.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shared=debug,relay_gateway=debug,info".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}
