pub mod adapters;
pub mod config;
pub mod db;
pub mod error;
pub mod flutterwave;
pub mod handlers;
pub mod ports;
pub mod services;
pub mod startup;
pub mod validation;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::flutterwave::FlutterwaveClient;
use crate::ports::LedgerStore;
use crate::services::CreditService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LedgerStore>,
    pub credit: CreditService,
    pub flutterwave: FlutterwaveClient,
    pub webhook_hash: String,
    pub currency: String,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/flutterwave-webhook",
            post(handlers::webhook::flutterwave_webhook),
        )
        .route(
            "/create-payment-link",
            post(handlers::payment::create_payment_link),
        )
        .route("/wallets/:uid", get(handlers::wallet::get_wallet))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
