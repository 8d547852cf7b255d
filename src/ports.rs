//! Storage port for the wallet ledger.
//! Request handlers and the crediting service depend on this trait rather
//! than on a concrete database client.

use async_trait::async_trait;
use thiserror::Error;

use crate::db::models::WalletAccount;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of applying a credit for one transaction reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditOutcome {
    /// The wallet was incremented and the reference recorded.
    Applied { credited_coins: i64 },
    /// The reference was already recorded; nothing was mutated.
    AlreadyProcessed { credited_coins: i64 },
}

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Atomically records `tx_ref` and increments the wallet by `coins`.
    ///
    /// Both writes commit together or not at all. Redelivery of a recorded
    /// reference, concurrent or not, returns `AlreadyProcessed` with the
    /// originally credited amount and leaves the wallet untouched.
    async fn apply_credit(
        &self,
        user_id: &str,
        tx_ref: &str,
        coins: i64,
    ) -> StoreResult<CreditOutcome>;

    async fn get_wallet(&self, user_id: &str) -> StoreResult<Option<WalletAccount>>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> StoreResult<()>;
}
