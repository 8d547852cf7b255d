use failsafe::futures::CircuitBreaker as FuturesCircuitBreaker;
use failsafe::{backoff, failure_policy, Config, Error as FailsafeError, StateMachine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlutterwaveError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("provider rejected the payment request: {0}")]
    Rejected(String),
    #[error("invalid response from Flutterwave: {0}")]
    InvalidResponse(String),
    #[error("circuit breaker open: {0}")]
    CircuitBreakerOpen(String),
}

/// Request body for the Flutterwave payment-creation endpoint. `meta.uid`
/// round-trips through the provider and comes back on the webhook, which is
/// how the credit is attributed to a user.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    pub tx_ref: String,
    pub amount: i64,
    pub currency: String,
    pub customer: Customer,
    pub meta: PaymentMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentMeta {
    pub uid: String,
}

#[derive(Debug, Deserialize)]
struct PaymentResponse {
    status: String,
    message: Option<String>,
    data: Option<PaymentLink>,
}

/// Hosted checkout link returned on success.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentLink {
    pub link: String,
}

/// HTTP client for the Flutterwave v3 API
#[derive(Clone)]
pub struct FlutterwaveClient {
    client: Client,
    base_url: String,
    secret_key: String,
    circuit_breaker: StateMachine<failure_policy::ConsecutiveFailures<backoff::EqualJittered>, ()>,
}

impl FlutterwaveClient {
    /// Creates a new client for the given API base URL, authenticated with
    /// the account's secret key
    pub fn new(base_url: String, secret_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        let backoff = backoff::equal_jittered(Duration::from_secs(60), Duration::from_secs(120));
        let policy = failure_policy::consecutive_failures(3, backoff);
        let circuit_breaker = Config::new().failure_policy(policy).build();

        FlutterwaveClient {
            client,
            base_url,
            secret_key,
            circuit_breaker,
        }
    }

    /// Creates a new client with custom circuit breaker configuration
    pub fn with_circuit_breaker(
        base_url: String,
        secret_key: String,
        failure_threshold: u32,
        reset_timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        let backoff = backoff::equal_jittered(
            Duration::from_secs(reset_timeout_secs),
            Duration::from_secs(reset_timeout_secs * 2),
        );
        let policy = failure_policy::consecutive_failures(failure_threshold, backoff);
        let circuit_breaker = Config::new().failure_policy(policy).build();

        FlutterwaveClient {
            client,
            base_url,
            secret_key,
            circuit_breaker,
        }
    }

    /// Asks the provider to create a hosted payment page for one payment
    /// attempt and returns its checkout link
    pub async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLink, FlutterwaveError> {
        let url = format!("{}/payments", self.base_url.trim_end_matches('/'));
        let client = self.client.clone();
        let secret_key = self.secret_key.clone();
        let body = request.clone();

        let result = self
            .circuit_breaker
            .call(async move {
                let response = client
                    .post(&url)
                    .bearer_auth(&secret_key)
                    .json(&body)
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    return Err(FlutterwaveError::Rejected(format!("{}: {}", status, text)));
                }

                let parsed = response.json::<PaymentResponse>().await?;
                let PaymentResponse {
                    status,
                    message,
                    data,
                } = parsed;

                if status != "success" {
                    return Err(FlutterwaveError::Rejected(message.unwrap_or(status)));
                }

                data.ok_or_else(|| {
                    FlutterwaveError::InvalidResponse("missing data.link in response".to_string())
                })
            })
            .await;

        match result {
            Ok(link) => Ok(link),
            Err(FailsafeError::Rejected) => Err(FlutterwaveError::CircuitBreakerOpen(
                "Flutterwave API circuit breaker is open".to_string(),
            )),
            Err(FailsafeError::Inner(e)) => Err(e),
        }
    }
}
