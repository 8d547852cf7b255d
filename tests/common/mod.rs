//! Shared test support: an in-memory ledger store implementing the same
//! contract as the Postgres adapter, and an app factory wired to it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;

use wallet_core::db::models::WalletAccount;
use wallet_core::flutterwave::FlutterwaveClient;
use wallet_core::ports::{CreditOutcome, LedgerStore, StoreResult};
use wallet_core::services::CreditService;
use wallet_core::{create_app, AppState};

pub const TEST_WEBHOOK_HASH: &str = "test-verif-hash";
pub const TEST_COIN_RATE: i64 = 15;

#[derive(Default)]
struct LedgerState {
    wallets: HashMap<String, WalletAccount>,
    processed: HashMap<String, i64>,
}

#[derive(Default)]
pub struct InMemoryLedgerStore {
    state: Mutex<LedgerState>,
}

impl InMemoryLedgerStore {
    pub fn wallet(&self, user_id: &str) -> Option<WalletAccount> {
        self.state.lock().unwrap().wallets.get(user_id).cloned()
    }

    pub fn processed_count(&self) -> usize {
        self.state.lock().unwrap().processed.len()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn apply_credit(
        &self,
        user_id: &str,
        tx_ref: &str,
        coins: i64,
    ) -> StoreResult<CreditOutcome> {
        // One lock over both maps gives the same both-or-neither behavior as
        // the database transaction in the Postgres adapter.
        let mut state = self.state.lock().unwrap();

        if let Some(&credited_coins) = state.processed.get(tx_ref) {
            return Ok(CreditOutcome::AlreadyProcessed { credited_coins });
        }

        state.processed.insert(tx_ref.to_string(), coins);

        let wallet = state
            .wallets
            .entry(user_id.to_string())
            .or_insert_with(|| WalletAccount {
                user_id: user_id.to_string(),
                balance: 0,
                total_received: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });
        wallet.balance += coins;
        wallet.total_received += coins;
        wallet.updated_at = Utc::now();

        Ok(CreditOutcome::Applied {
            credited_coins: coins,
        })
    }

    async fn get_wallet(&self, user_id: &str) -> StoreResult<Option<WalletAccount>> {
        Ok(self.wallet(user_id))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

pub fn test_app(store: Arc<InMemoryLedgerStore>) -> Router {
    // Port 9 is the discard port; nothing in these tests should reach the
    // provider unless a mock server URL is passed instead.
    test_app_with_provider(store, "http://127.0.0.1:9".to_string())
}

pub fn test_app_with_provider(store: Arc<InMemoryLedgerStore>, provider_url: String) -> Router {
    let store: Arc<dyn LedgerStore> = store;

    let state = AppState {
        store: store.clone(),
        credit: CreditService::new(store, TEST_COIN_RATE),
        flutterwave: FlutterwaveClient::new(provider_url, "FLWSECK_TEST-x".to_string()),
        webhook_hash: TEST_WEBHOOK_HASH.to_string(),
        currency: "NGN".to_string(),
    };

    create_app(state)
}
