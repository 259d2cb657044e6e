use axum::Json;
use serde::Serialize;

use crate::models::InboundEvent;
use crate::services::record_receive;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
pub struct ReceiveResponse {
    pub response: String,
}

/// Acknowledge an inbound topic delivery.
///
/// Only the first record is read. An event without records is rejected
/// as malformed instead of panicking on the missing index.
#[tracing::instrument(skip(event))]
pub async fn receive_message(
    Json(event): Json<InboundEvent>,
) -> Result<Json<ReceiveResponse>, AppError> {
    let message = event
        .first_message()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("malformed event: no records")))?;

    record_receive();
    tracing::info!(message = %message, "incoming message");

    Ok(Json(ReceiveResponse {
        response: "message received".to_string(),
    }))
}
