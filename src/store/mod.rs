//! # Remote Data Store
//!
//! Read access to the restaurant catalog and read/write access to the `favorites` table,
//! behind two traits so the actors and the browse layer never see HTTP.
//!
//! - [`InMemoryStore`] backs tests and the demo binary. It can be told to fail.
//! - [`RestStore`] talks to a PostgREST-style endpoint (`/rest/v1/<table>`).
//!
//! Calls are never retried here. Callers decide what a failure means.

pub mod memory;
pub mod rest;

pub use memory::*;
pub use rest::*;

use crate::model::{MenuItem, Restaurant, RestaurantId, UserId};
use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors from the remote data store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The request never got an answer (connection refused, timeout, TLS).
    #[error("store request failed: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The answer did not have the expected shape.
    #[error("could not decode store response: {0}")]
    Decode(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to restaurants and their menus.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every restaurant, in store order.
    async fn restaurants(&self) -> Result<Vec<Restaurant>, StoreError>;

    /// One restaurant, `None` if no row has this id.
    async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, StoreError>;

    /// The menu of one restaurant. Unknown restaurants have an empty menu.
    async fn menu(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>, StoreError>;
}

/// Rows of the `favorites` table, keyed by `(user_id, restaurant_id)`.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    async fn list(&self, user_id: &UserId) -> Result<BTreeSet<RestaurantId>, StoreError>;

    async fn insert(&self, user_id: &UserId, restaurant_id: RestaurantId) -> Result<(), StoreError>;

    async fn delete(&self, user_id: &UserId, restaurant_id: RestaurantId) -> Result<(), StoreError>;
}
