//! Postgres implementation of the ledger store.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::models::{ProcessedTransaction, WalletAccount};
use crate::ports::{CreditOutcome, LedgerStore, StoreError, StoreResult};

/// Postgres-backed wallet ledger.
#[derive(Clone)]
pub struct PostgresLedgerStore {
    pool: PgPool,
}

impl PostgresLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    async fn apply_credit(
        &self,
        user_id: &str,
        tx_ref: &str,
        coins: i64,
    ) -> StoreResult<CreditOutcome> {
        let mut tx = self.pool.begin().await.map_err(StoreError::from)?;

        // The primary key on tx_ref is the idempotency guard. A concurrent
        // delivery of the same reference either loses the insert race outright
        // or serializes behind the winner's row lock and sees zero rows here.
        let inserted = sqlx::query(
            r#"
            INSERT INTO processed_transactions (tx_ref, user_id, credited_coins, processed_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (tx_ref) DO NOTHING
            "#,
        )
        .bind(tx_ref)
        .bind(user_id)
        .bind(coins)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from)?;

        if inserted.rows_affected() == 0 {
            tx.rollback().await.map_err(StoreError::from)?;

            let previous = sqlx::query_as::<_, ProcessedTransaction>(
                "SELECT * FROM processed_transactions WHERE tx_ref = $1",
            )
            .bind(tx_ref)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)?;

            return Ok(CreditOutcome::AlreadyProcessed {
                credited_coins: previous.credited_coins,
            });
        }

        sqlx::query(
            r#"
            INSERT INTO wallet_accounts (user_id, balance, total_received, created_at, updated_at)
            VALUES ($1, $2, $2, NOW(), NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET balance = wallet_accounts.balance + EXCLUDED.balance,
                total_received = wallet_accounts.total_received + EXCLUDED.total_received,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(coins)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from)?;

        tx.commit().await.map_err(StoreError::from)?;

        Ok(CreditOutcome::Applied {
            credited_coins: coins,
        })
    }

    async fn get_wallet(&self, user_id: &str) -> StoreResult<Option<WalletAccount>> {
        let wallet = sqlx::query_as::<_, WalletAccount>(
            "SELECT * FROM wallet_accounts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from)?;

        Ok(wallet)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}
