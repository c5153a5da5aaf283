//! # Browse
//!
//! The read side of the app: the home list with favorite flags, and one restaurant's details
//! with its menu. Favorites are edited through [`FavoritesClient`]; everything else comes
//! straight from the [`CatalogRepository`].
//!
//! A restaurant that does not exist is [`Loadable::Missing`], which the view renders as an
//! empty state. A store that does not answer is an error.

use crate::auth::Session;
use crate::clients::FavoritesClient;
use crate::favorites_actor::FavoritesError;
use crate::model::{FavoriteDrift, MenuItem, Restaurant, RestaurantId, UserId};
use crate::store::{CatalogRepository, StoreError};
use resource_actor::ActorClient;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BrowseError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Favorites(#[from] FavoritesError),
}

/// One row of the home list.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeEntry {
    pub restaurant: Restaurant,
    pub favorited: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Loadable {
    Ready {
        restaurant: Restaurant,
        menu: Vec<MenuItem>,
    },
    Missing,
}

#[derive(Clone)]
pub struct Browser {
    catalog: Arc<dyn CatalogRepository>,
    favorites: FavoritesClient,
}

impl Browser {
    pub fn new(catalog: Arc<dyn CatalogRepository>, favorites: FavoritesClient) -> Self {
        Self { catalog, favorites }
    }

    /// Every restaurant, flagged with the signed-in user's favorites.
    ///
    /// The first load reads the favorites from the remote. Later loads reconcile the set with
    /// the remote; if that fails the local set is shown as it stands.
    #[instrument(skip_all, fields(user_id = %session.user_id()))]
    pub async fn home(&self, session: &Session) -> Result<Vec<HomeEntry>, BrowseError> {
        let user_id = session.user_id().clone();
        if !self.favorites.open(user_id.clone()).await? {
            if let Err(e) = self.favorites.reload(user_id.clone()).await {
                warn!(error = %e, "Error reloading favorites, showing local set");
            }
        }
        let favorites: BTreeSet<RestaurantId> = self
            .favorites
            .snapshot(user_id)
            .await?
            .map(|set| set.ids().collect())
            .unwrap_or_default();

        let restaurants = self.catalog.restaurants().await.map_err(|e| {
            error!(error = %e, "Error fetching restaurants");
            e
        })?;
        info!(count = restaurants.len(), favorites = favorites.len(), "Home loaded");

        Ok(restaurants
            .into_iter()
            .map(|restaurant| HomeEntry {
                favorited: favorites.contains(&restaurant.id),
                restaurant,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn details(&self, restaurant_id: RestaurantId) -> Result<Loadable, BrowseError> {
        let restaurant = self.catalog.restaurant(restaurant_id).await.map_err(|e| {
            error!(error = %e, "Error fetching restaurant");
            e
        })?;
        let Some(restaurant) = restaurant else {
            info!("Restaurant not found");
            return Ok(Loadable::Missing);
        };
        let menu = self.catalog.menu(restaurant_id).await.map_err(|e| {
            error!(error = %e, "Error fetching menu");
            e
        })?;
        Ok(Loadable::Ready { restaurant, menu })
    }

    /// Flips a favorite for the signed-in user and returns whether it is now set.
    pub async fn toggle_favorite(
        &self,
        session: &Session,
        restaurant_id: RestaurantId,
    ) -> Result<bool, BrowseError> {
        let user_id = self.opened(session).await?;
        Ok(self.favorites.toggle(user_id, restaurant_id).await?)
    }

    /// Re-reads the user's favorites from the remote.
    pub async fn refresh_favorites(&self, session: &Session) -> Result<FavoriteDrift, BrowseError> {
        let user_id = self.opened(session).await?;
        Ok(self.favorites.reload(user_id).await?)
    }

    async fn opened(&self, session: &Session) -> Result<UserId, BrowseError> {
        let user_id = session.user_id().clone();
        self.favorites.open(user_id.clone()).await?;
        Ok(user_id)
    }
}
