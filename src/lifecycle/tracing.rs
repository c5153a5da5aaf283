//! # Observability & Tracing
//!
//! Structured logging with `tracing`. Filters come from `RUST_LOG`; the output is compact and
//! leaves out module paths, since actor logs carry an `entity_type` field instead.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run   # adds request payloads and every actor message
//! RUST_LOG=food_order::favorites_actor=debug cargo run
//! ```
//!
//! An order walk at `info` looks like:
//!
//! ```text
//! INFO Created entity_type="Cart" id=cart_1 size=1
//! INFO start: Order session started restaurant_id=restaurant_1 cart_id=cart_1
//! INFO Action ok entity_type="Cart" id=cart_1
//! INFO Deleted entity_type="Cart" id=cart_1 size=0
//! INFO confirm_payment: Payment confirmed restaurant_id=restaurant_1 method=Cash on Delivery
//! ```
//!
//! Favorites sync reports each remote write as its own line, so a failing remote shows up as
//! `WARN Favorite sync failed` next to the action that queued it.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
