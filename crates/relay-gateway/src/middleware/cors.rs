//! CORS Middleware
//!
//! Browser clients call the gateway directly, so cross-origin requests are
//! expected.
//!
//! - No whitelist configured: any origin, method and header is accepted.
//! - `CORS_ALLOWED_ORIGINS` set: only exact matches are allowed. Wildcard and
//!   non-http(s) entries are dropped with a warning.
//!
//! # Usage
//!
//! ```ignore
//! use actix_web::App;
//! use relay_gateway::middleware::cors;
//!
//! let app = App::new()
//!     .wrap(cors(&config.cors))
//!     // ... routes
//! ```

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};
use shared::CorsConfig;
use tracing::{debug, warn};

/// Create CORS middleware from configuration
pub fn cors(config: &CorsConfig) -> Cors {
    let allowed_origins: Vec<&String> = config
        .allowed_origins
        .iter()
        .filter(|origin| {
            if origin.as_str() == "*" {
                warn!(
                    "Wildcard (*) entry ignored in CORS_ALLOWED_ORIGINS. \
                     Leave the variable unset to accept any origin."
                );
                return false;
            }

            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                warn!(
                    "Invalid origin format: {}. Origins must start with http:// or https://",
                    origin
                );
                return false;
            }

            true
        })
        .collect();

    if config.allowed_origins.is_empty() {
        debug!("CORS middleware initialized accepting any origin");
        return Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
    }

    debug!(
        "CORS middleware initialized with {} allowed origins",
        allowed_origins.len()
    );

    let mut cors = Cors::default();

    if allowed_origins.is_empty() {
        // Whitelist given but nothing valid in it
        warn!("No valid CORS origins configured. Cross-origin requests will be blocked.");
    } else {
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
            debug!("CORS: Allowing origin: {}", origin);
        }
    }

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::CONTENT_TYPE])
        // Max age for preflight requests (1 hour)
        .max_age(3600)
}
