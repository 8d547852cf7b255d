use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub flutterwave_api_url: String,
    pub flutterwave_secret_key: String,
    pub flutterwave_webhook_hash: String,
    pub payment_currency: String,
    pub coin_rate: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env file if present

        let config = Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")?,
            flutterwave_api_url: env::var("FLUTTERWAVE_API_URL")
                .unwrap_or_else(|_| "https://api.flutterwave.com/v3".to_string()),
            flutterwave_secret_key: env::var("FLW_SECRET_KEY")?,
            flutterwave_webhook_hash: env::var("FLW_SECRET_HASH")?,
            payment_currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "NGN".to_string()),
            coin_rate: env::var("COIN_RATE")
                .unwrap_or_else(|_| "15".to_string())
                .parse()?,
        };

        if config.coin_rate <= 0 {
            anyhow::bail!("COIN_RATE must be greater than zero");
        }

        Ok(config)
    }
}
