//! Custom actions for the Favorites actor.

use crate::model::{FavoriteDrift, RestaurantId};

/// Operations on an open favorite set.
#[derive(Debug, Clone)]
pub enum FavoriteAction {
    /// Flips membership locally and queues the matching remote insert or delete.
    /// Does not wait for the remote.
    Toggle(RestaurantId),
    /// Waits for queued changes, then replaces the local set with the remote one.
    Reload,
}

/// Results from FavoriteActions - variants match 1:1 with FavoriteAction
#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteActionResult {
    /// Whether the restaurant is a favorite after the toggle.
    Toggle(bool),
    /// What the remote had that the local copy did not, and vice versa.
    Reload(FavoriteDrift),
}
