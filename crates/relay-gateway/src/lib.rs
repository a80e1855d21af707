//! Relay Gateway Library
//!
//! Credential-injecting forwarding gateway for the AssemblyAI and Claude APIs.
//! Exposed as a library for integration tests; the binary lives in `main.rs`.

pub mod bindings;
pub mod client;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use client::{ReqwestUpstreamClient, UpstreamClient};
pub use error::{ErrorBody, GatewayError};
pub use gateway::{Gateway, InboundRequest, RelayedBody};
