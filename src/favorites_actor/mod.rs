//! # Favorites Actor
//!
//! Keeps each signed-in user's [`FavoriteSet`] and mirrors changes to the remote `favorites`
//! table in two phases:
//!
//! 1. **Local**: `Toggle` flips membership in the actor and returns immediately.
//! 2. **Remote**: the [`sync`] worker applies the queued insert or delete and publishes a
//!    [`FavoriteEvent`].
//!
//! If the remote call fails, the local set stays ahead of the remote. `Reload` waits for the
//! queue to drain, reads the remote set, adopts it, and publishes the drift it repaired.
//!
//! ## Wiring
//!
//! ```rust,ignore
//! let (sync, worker) = FavoritesSync::new(repository.clone(), 32);
//! let (actor, generic_client) = favorites_actor::new(32);
//! tokio::spawn(worker.run());
//! tokio::spawn(actor.run(FavoritesContext { repository, sync: sync.clone() }));
//!
//! let favorites = FavoritesClient::new(generic_client);
//! favorites.open(user_id.clone()).await?;
//! favorites.toggle(user_id, RestaurantId(3)).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod sync;

pub use actions::*;
pub use entity::FavoritesContext;
pub use error::*;
pub use sync::*;

use crate::model::FavoriteSet;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Favorites actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<FavoriteSet>, ResourceClient<FavoriteSet>) {
    ResourceActor::new(buffer_size)
}
