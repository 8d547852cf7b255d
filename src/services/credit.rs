//! Ledger crediting service.
//!
//! Turns a verified payment event into an idempotent coin credit. The store
//! guarantees the atomicity of the wallet increment and the processed-
//! transaction record; this service owns the validation and conversion
//! policy in front of it.

use std::sync::Arc;

use thiserror::Error;

use crate::ports::{CreditOutcome, LedgerStore, StoreError};
use crate::validation::parse_amount;

/// A payment event as delivered by the provider, before any validation.
#[derive(Debug, Clone, Default)]
pub struct PaymentEvent {
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub tx_ref: Option<String>,
    pub amount: Option<serde_json::Value>,
    pub uid: Option<String>,
}

#[derive(Error, Debug)]
pub enum CreditError {
    #[error("payment is not in a successful state")]
    NotSuccessful,
    #[error("missing user id in event metadata")]
    MissingUser,
    #[error("missing transaction reference")]
    MissingReference,
    #[error("amount is not a non-negative number")]
    InvalidAmount,
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditReceipt {
    pub user_id: String,
    pub credited_coins: i64,
    /// True when the reference had already been processed and this delivery
    /// was acknowledged without mutating the wallet.
    pub replayed: bool,
}

#[derive(Clone)]
pub struct CreditService {
    store: Arc<dyn LedgerStore>,
    coin_rate: i64,
}

impl CreditService {
    pub fn new(store: Arc<dyn LedgerStore>, coin_rate: i64) -> Self {
        Self { store, coin_rate }
    }

    pub async fn credit_from_event(
        &self,
        event: PaymentEvent,
    ) -> Result<CreditReceipt, CreditError> {
        if event.status.as_deref() != Some("successful") {
            return Err(CreditError::NotSuccessful);
        }

        // Flutterwave sends the same status field on charge and transfer
        // events; only completed charges fund a wallet.
        if let Some(kind) = event.event_type.as_deref() {
            if kind != "charge.completed" {
                return Err(CreditError::NotSuccessful);
            }
        }

        let uid = event
            .uid
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(CreditError::MissingUser)?;

        let tx_ref = event
            .tx_ref
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(CreditError::MissingReference)?;

        let amount = event
            .amount
            .as_ref()
            .and_then(parse_amount)
            .ok_or(CreditError::InvalidAmount)?;

        // Amounts below one rate unit round down to zero coins; the delivery
        // is still recorded so a replay cannot turn it into a double credit.
        let coins = amount / self.coin_rate;

        let receipt = match self.store.apply_credit(uid, tx_ref, coins).await? {
            CreditOutcome::Applied { credited_coins } => CreditReceipt {
                user_id: uid.to_string(),
                credited_coins,
                replayed: false,
            },
            CreditOutcome::AlreadyProcessed { credited_coins } => {
                tracing::info!(tx_ref, "duplicate webhook delivery acknowledged");
                CreditReceipt {
                    user_id: uid.to_string(),
                    credited_coins,
                    replayed: true,
                }
            }
        };

        Ok(receipt)
    }
}
