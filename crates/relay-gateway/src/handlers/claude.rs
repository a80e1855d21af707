//! Claude forwarding endpoint

use actix_web::{web, HttpResponse};
use serde_json::Value;

use super::relay;
use crate::bindings;
use crate::error::GatewayError;
use crate::gateway::{Gateway, InboundRequest};

/// `POST /api/claude/messages`
pub async fn create_message(
    gateway: web::Data<Gateway>,
    body: web::Json<Value>,
) -> Result<HttpResponse, GatewayError> {
    let relayed = gateway
        .forward(
            &bindings::CLAUDE_MESSAGES,
            InboundRequest::json(body.into_inner()),
        )
        .await?;
    Ok(relay(relayed))
}
