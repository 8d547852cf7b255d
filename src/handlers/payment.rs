use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::flutterwave::client::{Customer, PaymentMeta, PaymentRequest};
use crate::validation::{require_positive, require_str};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentLinkRequest {
    pub amount: Option<i64>,
    pub email: Option<String>,
    pub uid: Option<String>,
}

pub async fn create_payment_link(
    State(state): State<AppState>,
    Json(body): Json<CreatePaymentLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let amount = require_positive("amount", body.amount)?;
    let email = require_str("email", body.email.as_deref())?;
    let uid = require_str("uid", body.uid.as_deref())?;

    // The reference issued here becomes the idempotency key the webhook
    // consumes later, so it must be unique per payment attempt.
    let tx_ref = format!("QS-{}", Uuid::new_v4());

    let request = PaymentRequest {
        tx_ref: tx_ref.clone(),
        amount,
        currency: state.currency.clone(),
        customer: Customer {
            email: email.to_string(),
        },
        meta: PaymentMeta {
            uid: uid.to_string(),
        },
    };

    let payment = state
        .flutterwave
        .create_payment(&request)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "payment link creation failed");
            AppError::Provider(e.to_string())
        })?;

    tracing::info!(%tx_ref, uid, "payment link created");

    Ok(Json(json!({
        "link": payment.link,
        "tx_ref": tx_ref,
    })))
}
