use std::net::SocketAddr; // for SocketAddr
use std::path::Path; // for Path
use std::sync::Arc;

use sqlx::migrate::Migrator; // for Migrator
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // for .with() on registry

use wallet_core::adapters::PostgresLedgerStore;
use wallet_core::config::Config;
use wallet_core::flutterwave::FlutterwaveClient;
use wallet_core::ports::LedgerStore;
use wallet_core::services::CreditService;
use wallet_core::{create_app, db, startup, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database pool
    let pool = db::create_pool(&config).await?;

    // Run migrations
    let migrator = Migrator::new(Path::new("./migrations")).await?;
    migrator.run(&pool).await?;
    tracing::info!("Database migrations completed");

    let report = startup::validate_environment(&config, &pool).await?;
    if !report.is_valid() {
        report.print();
        for error in &report.errors {
            tracing::warn!("startup validation: {}", error);
        }
    }

    // Clients and handler state are constructed once here and passed into the
    // router; request logic never reads them from globals.
    let flutterwave = FlutterwaveClient::new(
        config.flutterwave_api_url.clone(),
        config.flutterwave_secret_key.clone(),
    );
    tracing::info!(
        "Flutterwave client initialized with URL: {}",
        config.flutterwave_api_url
    );

    let store: Arc<dyn LedgerStore> = Arc::new(PostgresLedgerStore::new(pool.clone()));

    let state = AppState {
        store: store.clone(),
        credit: CreditService::new(store, config.coin_rate),
        flutterwave,
        webhook_hash: config.flutterwave_webhook_hash.clone(),
        currency: config.payment_currency.clone(),
    };

    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
