//! Error types for the Favorites actor.

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur while opening, toggling or reloading favorites.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FavoritesError {
    /// The remote table could not be read. Opening and reloading surface this directly.
    #[error("Favorites store error: {0}")]
    Store(#[from] StoreError),

    /// The background sync worker has stopped, so the change cannot be queued.
    #[error("Favorites sync worker is not running")]
    SyncStopped,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
