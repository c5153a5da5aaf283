//! # Food Order
//!
//! > **The client core of a food-ordering app, built from resource-oriented actors.**
//!
//! Restaurants are browsed and favorited, and a cart is filled from one restaurant's menu. The
//! order is then priced with a fixed tax rate, paid by one of three methods, and tracked while
//! a synthetic rider moves toward the customer.
//!
//! ## 🏗️ Design Philosophy
//!
//! Mutable domain state lives in actors. A [`ResourceActor`](resource_actor::ResourceActor)
//! owns every open cart and every loaded favorite set. It applies one message at a time, so no
//! lock guards a cart line or a favorite flag. Everything that only *reads* that state works on
//! snapshots: pricing, the order flow, the tracking view.
//!
//! - **Carts** are created when a restaurant's detail view opens and deleted when the user
//!   leaves or checks out. Checkout freezes a snapshot; nothing edits an order after that.
//! - **Favorites** change locally first. A background worker writes each change to the remote
//!   table in order and reports the outcome on a broadcast channel.
//! - **Money** is [`rust_decimal::Decimal`] throughout and is only rounded for display.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each component has its own `thiserror` enum (`CartError`, `FavoritesError`, `FlowError`, ...).
//! Validation errors come back before any state changes. Missing data is an `Option` or
//! [`Loadable::Missing`](browse::Loadable::Missing), never an error.
//!
//! ### 2. Context Injection
//! Collaborators reach actors through `run(context)`: the favorites actor gets its repository
//! and sync queue there. Remote systems sit behind traits ([`store::CatalogRepository`],
//! [`auth::AuthService`], [`location::Locator`]) with in-memory and HTTP implementations.
//!
//! ### 3. Observability
//! `tracing` everywhere, with `#[instrument]` spans on client calls. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`FoodOrderSystem`](lifecycle::FoodOrderSystem),
//!   [`shutdown`](lifecycle::FoodOrderSystem::shutdown).
//!
//! ### 2. The Interface ([`clients`], [`browse`], [`order_flow`])
//! - **Role**: Domain APIs over the actors, and the order state machine
//!   `Browsing → Checkout → PaymentSelection → Tracking`.
//! - **Key items**: [`CartClient`](clients::CartClient),
//!   [`FavoritesClient`](clients::FavoritesClient), [`OrderSession`](order_flow::OrderSession).
//!
//! ### 3. The Actors ([`cart_actor`], [`favorites_actor`])
//! - **Role**: `ActorEntity` implementations for [`Cart`](model::Cart) and
//!   [`FavoriteSet`](model::FavoriteSet).
//!
//! ### 4. The Edges ([`store`], [`auth`], [`location`], [`config`])
//! - **Role**: Remote data, identity, device position and environment settings.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod auth;
pub mod browse;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod favorites_actor;
pub mod lifecycle;
pub mod location;
pub mod model;
pub mod order_flow;
pub mod pricing;
pub mod store;
pub mod tracking;
