//! Route configuration for the gateway

use actix_web::{error::InternalError, web, HttpResponse, ResponseError};

use crate::error::ErrorBody;
use crate::handlers;

/// Configure all routes
///
/// Expects `web::Data<Gateway>` and `web::Data<ServerConfig>` to be registered
/// as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check endpoint (no credentials involved)
    cfg.route("/health", web::get().to(handlers::health_check));

    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/assemblyai")
                    .route("/upload", web::post().to(handlers::upload_audio))
                    .route("/transcript", web::post().to(handlers::create_transcript))
                    .route("/transcript/{id}", web::get().to(handlers::get_transcript)),
            )
            .service(
                web::scope("/claude").route("/messages", web::post().to(handlers::create_message)),
            ),
    );
}

/// JSON extractor configuration
///
/// Any content type is accepted as long as the body parses as JSON. Bodies
/// over `limit` bytes or that fail to parse are rejected before the gateway
/// runs, with actix's status for the failure and a JSON error body.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .content_type_required(false)
        .error_handler(|err, req| {
            let status = err.status_code();
            let message = err.to_string();
            tracing::warn!(
                path = req.path(),
                status = status.as_u16(),
                error = %message,
                "Rejected inbound JSON body"
            );
            InternalError::from_response(err, HttpResponse::build(status).json(ErrorBody::new(message)))
                .into()
        })
}
