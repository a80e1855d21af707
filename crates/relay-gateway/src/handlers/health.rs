//! Health check endpoint

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use shared::ServerConfig;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Health check endpoint
///
/// Always 200; does not depend on upstream credentials or reachability.
pub async fn health_check(server: web::Data<ServerConfig>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        service: server.service_name.clone(),
    })
}
