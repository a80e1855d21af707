//! Relay Gateway
//!
//! Forwards browser requests to AssemblyAI and Claude, injecting server-held
//! API keys.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use relay_gateway::{middleware, routes, Gateway, ReqwestUpstreamClient};
use shared::{Config, EnvCredentials};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    shared::init_tracing();

    tracing::info!("Starting Relay Gateway...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    let client = ReqwestUpstreamClient::new().context("Failed to create upstream client")?;

    // Credentials are read from the environment on every request
    let gateway = web::Data::new(Gateway::new(
        Arc::new(client),
        Arc::new(EnvCredentials),
        config.upstreams.clone(),
    ));
    let server_config = web::Data::new(config.server.clone());
    let cors_config = config.cors.clone();
    let json_limit = config.server.json_limit_bytes;

    let server_addr = config.server.bind_address();
    tracing::info!(
        service = %config.server.service_name,
        "Relay Gateway listening on {}",
        server_addr
    );
    tracing::info!(
        "Health check: http://localhost:{}/health",
        config.server.port
    );

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            // Request spans
            .wrap(TracingLogger::default())
            // Add CORS middleware
            .wrap(middleware::cors(&cors_config))
            .app_data(gateway.clone())
            .app_data(server_config.clone())
            .app_data(routes::json_config(json_limit))
            // Configure routes
            .configure(routes::configure)
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind to {}", server_addr))?
    .run()
    .await
    .context("Server error")?;

    Ok(())
}
