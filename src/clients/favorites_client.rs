//! # Favorites Client
//!
//! Domain API over a `ResourceClient<FavoriteSet>`. Sets are keyed by user, so every call takes
//! the [`UserId`] of the session it acts for.
use crate::favorites_actor::{FavoriteAction, FavoriteActionResult, FavoritesError};
use crate::model::{FavoriteDrift, FavoriteSet, FavoritesOpen, RestaurantId, UserId};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Favorites actor.
#[derive(Clone)]
pub struct FavoritesClient {
    inner: ResourceClient<FavoriteSet>,
}

impl FavoritesClient {
    pub fn new(inner: ResourceClient<FavoriteSet>) -> Self {
        Self { inner }
    }

    /// Loads the user's favorites from the remote. Opening a set that is already open is a no-op
    /// and answers `false`; a freshly loaded set answers `true`.
    #[instrument(skip(self))]
    pub async fn open(&self, user_id: UserId) -> Result<bool, FavoritesError> {
        debug!("Sending request");
        match self.inner.create(FavoritesOpen { user_id }).await {
            Ok(_) => Ok(true),
            Err(FrameworkError::AlreadyExists(_)) => Ok(false),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Flips a restaurant locally. Returns whether it is now a favorite; the remote catches up
    /// in the background.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        user_id: UserId,
        restaurant_id: RestaurantId,
    ) -> Result<bool, FavoritesError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(user_id, FavoriteAction::Toggle(restaurant_id))
            .await
            .map_err(Self::map_error)?
        {
            FavoriteActionResult::Toggle(favorited) => Ok(favorited),
            other => Err(unexpected(other)),
        }
    }

    /// Replaces the local set with the remote one and returns what changed.
    #[instrument(skip(self))]
    pub async fn reload(&self, user_id: UserId) -> Result<FavoriteDrift, FavoritesError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(user_id, FavoriteAction::Reload)
            .await
            .map_err(Self::map_error)?
        {
            FavoriteActionResult::Reload(drift) => Ok(drift),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: FavoriteActionResult) -> FavoritesError {
    FavoritesError::ActorCommunicationError(format!("unexpected action result {result:?}"))
}

#[async_trait]
impl ActorClient<FavoriteSet> for FavoritesClient {
    type Error = FavoritesError;

    fn inner(&self) -> &ResourceClient<FavoriteSet> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.downcast_entity::<FavoritesError>()
            .unwrap_or_else(|e| FavoritesError::ActorCommunicationError(e.to_string()))
    }
}
