use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::services::credit::{CreditError, PaymentEvent};
use crate::services::verifier::verify_signature;
use crate::AppState;

/// Webhook body as Flutterwave sends it. Every field is optional here; the
/// crediting service decides what is missing versus merely rejected.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub event: Option<String>,
    pub data: Option<EventData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventData {
    pub status: Option<String>,
    pub tx_ref: Option<String>,
    pub amount: Option<serde_json::Value>,
    pub meta: Option<EventMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventMeta {
    pub uid: Option<String>,
}

pub async fn flutterwave_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<WebhookPayload>,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers
        .get("verif-hash")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    if !verify_signature(signature, &state.webhook_hash) {
        tracing::warn!("rejected webhook with missing or invalid verif-hash header");
        return Err(AppError::Unauthorized(
            "invalid webhook signature".to_string(),
        ));
    }

    let data = payload.data.unwrap_or_default();
    let event = PaymentEvent {
        event_type: payload.event,
        status: data.status,
        tx_ref: data.tx_ref,
        amount: data.amount,
        uid: data.meta.and_then(|m| m.uid),
    };

    let receipt = state
        .credit
        .credit_from_event(event)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "webhook rejected");
            match e {
                CreditError::NotSuccessful => AppError::NotCompleted(e.to_string()),
                CreditError::MissingUser
                | CreditError::MissingReference
                | CreditError::InvalidAmount => AppError::Validation(e.to_string()),
                CreditError::Store(inner) => AppError::Internal(inner.to_string()),
            }
        })?;

    tracing::info!(
        uid = %receipt.user_id,
        coins = receipt.credited_coins,
        replayed = receipt.replayed,
        "wallet credited"
    );

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Wallet credited",
            "uid": receipt.user_id,
            "credited_coins": receipt.credited_coins,
        })),
    ))
}
