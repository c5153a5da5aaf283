use crate::model::{RestaurantId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The restaurants one user has marked as favorite.
///
/// The copy held by the favorites actor is the optimistic view. The remote
/// `favorites` table is authoritative and wins on [`reload`](crate::clients::FavoritesClient::reload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteSet {
    pub user_id: UserId,
    restaurants: BTreeSet<RestaurantId>,
}

/// Payload for opening a user's favorite set.
#[derive(Debug, Clone)]
pub struct FavoritesOpen {
    pub user_id: UserId,
}

/// Difference between two favorite sets, as seen from the newer one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteDrift {
    pub added: Vec<RestaurantId>,
    pub removed: Vec<RestaurantId>,
}

impl FavoriteDrift {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl FavoriteSet {
    pub fn new(user_id: UserId, restaurants: impl IntoIterator<Item = RestaurantId>) -> Self {
        Self {
            user_id,
            restaurants: restaurants.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: RestaurantId) -> bool {
        self.restaurants.contains(&id)
    }

    /// Flips membership of `id` and returns whether it is now a favorite.
    pub fn toggle(&mut self, id: RestaurantId) -> bool {
        if self.restaurants.remove(&id) {
            false
        } else {
            self.restaurants.insert(id);
            true
        }
    }

    /// Replaces the contents with `authoritative` and reports what changed.
    pub fn replace(&mut self, authoritative: BTreeSet<RestaurantId>) -> FavoriteDrift {
        let drift = FavoriteDrift {
            added: authoritative.difference(&self.restaurants).copied().collect(),
            removed: self.restaurants.difference(&authoritative).copied().collect(),
        };
        self.restaurants = authoritative;
        drift
    }

    /// Favorited ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = RestaurantId> + '_ {
        self.restaurants.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}
