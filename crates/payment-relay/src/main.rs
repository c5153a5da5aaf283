use payment_relay::config::RelayConfig;
use payment_relay::processor::StripeProcessor;
use payment_relay::{router, RelayState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let config = RelayConfig::load()?;
    let state = RelayState {
        processor: Arc::new(StripeProcessor::new(&config)?),
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, currency = %config.currency, "Server running");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
