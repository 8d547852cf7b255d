use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-user wallet record. `total_received` only ever grows; `balance` can be
/// spent down elsewhere but never below zero.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WalletAccount {
    pub user_id: String,
    pub balance: i64,
    pub total_received: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row per delivered payment reference, written together with the wallet
/// increment and never mutated afterwards.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProcessedTransaction {
    pub tx_ref: String,
    pub user_id: String,
    pub credited_coins: i64,
    pub processed_at: DateTime<Utc>,
}
