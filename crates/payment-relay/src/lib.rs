//! # Payment Relay
//!
//! A small HTTP server that creates card payment intents on the client's behalf, so the
//! processor's secret key never ships with the app.
//!
//! | Route | Body | Success | Failure |
//! |-------|------|---------|---------|
//! | `POST /create-payment-intent` | `{"amount": <minor units>}` | `200 {"paymentIntent": "<client secret>"}` | `500 {"error": "Failed to create payment intent"}` |
//!
//! CORS is permissive: the caller is a mobile app, not a browser origin we control.

pub mod config;
pub mod error;
pub mod processor;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use error::RelayError;
use processor::PaymentProcessor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct RelayState {
    pub processor: Arc<dyn PaymentProcessor>,
}

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub amount: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub payment_intent: String,
}

async fn create_payment_intent(
    State(state): State<RelayState>,
    payload: Result<Json<CreateIntentRequest>, JsonRejection>,
) -> Result<Json<CreateIntentResponse>, RelayError> {
    let Json(request) = payload.map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
    let payment_intent = state.processor.create_intent(request.amount).await?;
    Ok(Json(CreateIntentResponse { payment_intent }))
}

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct FakeProcessor;

    #[async_trait]
    impl PaymentProcessor for FakeProcessor {
        async fn create_intent(&self, amount: i64) -> Result<String, RelayError> {
            if amount > 0 {
                Ok(format!("pi_secret_{amount}"))
            } else {
                Err(RelayError::Rejected {
                    status: 400,
                    message: "Invalid positive integer".to_string(),
                })
            }
        }
    }

    async fn call(body: &str) -> (StatusCode, Value) {
        let app = router(RelayState {
            processor: Arc::new(FakeProcessor),
        });
        let response = app
            .oneshot(
                Request::post("/create-payment-intent")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_intent_created() {
        let (status, body) = call(r#"{"amount": 1170}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "paymentIntent": "pi_secret_1170" }));
    }

    #[tokio::test]
    async fn test_processor_failure_is_generic_500() {
        let (status, body) = call(r#"{"amount": 0}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to create payment intent" }));
    }

    #[tokio::test]
    async fn test_missing_amount_is_generic_500() {
        let (status, body) = call("{}").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to create payment intent" }));
    }
}
