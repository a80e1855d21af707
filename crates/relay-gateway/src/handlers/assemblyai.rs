//! AssemblyAI forwarding endpoints

use actix_web::{web, HttpResponse};
use serde_json::Value;

use super::relay;
use crate::bindings;
use crate::error::GatewayError;
use crate::gateway::{Gateway, InboundRequest};

/// `POST /api/assemblyai/upload`
///
/// Body `{"audioBase64": "<base64>"}`; the decoded bytes are uploaded as-is.
pub async fn upload_audio(
    gateway: web::Data<Gateway>,
    body: web::Json<Value>,
) -> Result<HttpResponse, GatewayError> {
    let relayed = gateway
        .forward(
            &bindings::ASSEMBLYAI_UPLOAD,
            InboundRequest::json(body.into_inner()),
        )
        .await?;
    Ok(relay(relayed))
}

/// `POST /api/assemblyai/transcript`
pub async fn create_transcript(
    gateway: web::Data<Gateway>,
    body: web::Json<Value>,
) -> Result<HttpResponse, GatewayError> {
    let relayed = gateway
        .forward(
            &bindings::ASSEMBLYAI_TRANSCRIPT_CREATE,
            InboundRequest::json(body.into_inner()),
        )
        .await?;
    Ok(relay(relayed))
}

/// `GET /api/assemblyai/transcript/{id}`
pub async fn get_transcript(
    gateway: web::Data<Gateway>,
    path: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
    let id = path.into_inner();
    let relayed = gateway
        .forward(
            &bindings::ASSEMBLYAI_TRANSCRIPT_STATUS,
            InboundRequest::with_param("id", id),
        )
        .await?;
    Ok(relay(relayed))
}
