//! Request handlers for API endpoints

pub mod assemblyai;
pub mod claude;
pub mod health;

// Re-export commonly used handlers
pub use assemblyai::*;
pub use claude::*;
pub use health::*;

use actix_web::{http::header::ContentType, HttpResponse};

use crate::gateway::RelayedBody;

/// Relay an upstream JSON body with local status 200
pub(crate) fn relay(body: RelayedBody) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body.into_bytes())
}
