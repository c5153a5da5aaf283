//! Payment processors the relay can forward to.

use crate::config::RelayConfig;
use crate::error::RelayError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument};

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Creates a card payment intent for `amount` minor units and returns its client secret.
    async fn create_intent(&self, amount: i64) -> Result<String, RelayError>;
}

/// Stripe's REST API, called with a form body and the secret key as basic auth.
pub struct StripeProcessor {
    client: Client,
    api_base: String,
    secret_key: String,
    currency: String,
}

impl StripeProcessor {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .build()
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            currency: config.currency.clone(),
        })
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    #[instrument(skip(self))]
    async fn create_intent(&self, amount: i64) -> Result<String, RelayError> {
        let amount = amount.to_string();
        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("amount", amount.as_str()),
                ("currency", self.currency.as_str()),
                ("payment_method_types[]", "card"),
            ])
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                message: body["error"]["message"]
                    .as_str()
                    .unwrap_or("unknown error")
                    .to_string(),
            });
        }

        let secret = body["client_secret"]
            .as_str()
            .map(String::from)
            .ok_or(RelayError::MissingClientSecret)?;
        info!(intent = body["id"].as_str().unwrap_or_default(), "Payment intent created");
        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Form, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn payment_intents(
        headers: HeaderMap,
        Form(form): Form<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        // "sk_test:" in base64
        let authorized = headers
            .get("authorization")
            .is_some_and(|v| v == "Basic c2tfdGVzdDo=");
        let amount: i64 = form.get("amount").and_then(|a| a.parse().ok()).unwrap_or(0);
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": { "message": "Invalid API Key provided" } })),
            );
        }
        if amount <= 0 || form.get("payment_method_types[]").map(String::as_str) != Some("card") {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": { "message": "Invalid positive integer" } })),
            );
        }
        (
            StatusCode::OK,
            Json(json!({ "id": "pi_1", "client_secret": format!("pi_1_secret_{amount}") })),
        )
    }

    async fn processor(secret_key: &str) -> StripeProcessor {
        let router = Router::new().route("/v1/payment_intents", post(payment_intents));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        StripeProcessor::new(&RelayConfig {
            port: 0,
            secret_key: secret_key.to_string(),
            api_base: format!("http://{addr}"),
            currency: "usd".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_returns_client_secret() {
        let stripe = processor("sk_test").await;
        assert_eq!(stripe.create_intent(1170).await.unwrap(), "pi_1_secret_1170");
    }

    #[tokio::test]
    async fn test_rejection_carries_processor_message() {
        let stripe = processor("sk_test").await;
        assert_eq!(
            stripe.create_intent(0).await,
            Err(RelayError::Rejected {
                status: 400,
                message: "Invalid positive integer".to_string()
            })
        );

        let stripe = processor("sk_wrong").await;
        assert!(matches!(
            stripe.create_intent(100).await,
            Err(RelayError::Rejected { status: 401, .. })
        ));
    }
}
