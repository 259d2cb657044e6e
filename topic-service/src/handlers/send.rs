use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::models::{Envelope, TopicArn};
use crate::services::record_publish;
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub message: String,
}

/// Publish the static test message to the configured topic.
///
/// The request carries no meaningful input; the envelope is rebuilt
/// from config on every invocation. A failed publish maps to a
/// structured 500 so the caller never waits out a platform timeout.
#[tracing::instrument(skip(state))]
pub async fn send_message(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SendResponse>), AppError> {
    let topic_arn = TopicArn::new(&state.config.aws.region, &state.config.aws.account_id)
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

    let envelope = Envelope::build(state.config.payload_shape, topic_arn)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

    match state.publisher.publish(&envelope).await {
        Ok(receipt) => {
            record_publish("success");
            tracing::info!(
                topic = %envelope.topic_arn,
                message_id = ?receipt.message_id,
                "message sent"
            );

            Ok((
                StatusCode::OK,
                Json(SendResponse {
                    message: "message sent".to_string(),
                }),
            ))
        }
        Err(e) => {
            record_publish("failure");
            tracing::error!(
                topic = %envelope.topic_arn,
                error = %e,
                "publish failed"
            );

            Err(AppError::UpstreamError(e.to_string()))
        }
    }
}
