//! [`ActorEntity`] implementation for [`FavoriteSet`].
//!
//! A favorite set is keyed by its user. Opening one loads the remote rows first, so the actor
//! never holds a set that was not seeded from the store.

use super::{FavoriteAction, FavoriteActionResult, FavoriteEvent, FavoritesError, FavoritesSync, SyncJob};
use crate::model::{FavoriteSet, FavoritesOpen, UserId};
use crate::store::FavoritesRepository;
use async_trait::async_trait;
use resource_actor::ActorEntity;
use std::sync::Arc;
use tracing::{info, warn};

/// Dependencies injected into the Favorites actor at `run()`.
#[derive(Clone)]
pub struct FavoritesContext {
    pub repository: Arc<dyn FavoritesRepository>,
    pub sync: FavoritesSync,
}

#[async_trait]
impl ActorEntity for FavoriteSet {
    type Id = UserId;
    type Create = FavoritesOpen;
    type Action = FavoriteAction;
    type ActionResult = FavoriteActionResult;
    type Context = FavoritesContext;
    type Error = FavoritesError;

    fn assign_id(_sequence: u32, params: &FavoritesOpen) -> UserId {
        params.user_id.clone()
    }

    fn from_create_params(id: UserId, _params: FavoritesOpen) -> Result<Self, FavoritesError> {
        Ok(FavoriteSet::new(id, []))
    }

    /// Seeds the set from the remote table. A failed fetch fails the open.
    async fn on_create(&mut self, ctx: &FavoritesContext) -> Result<(), FavoritesError> {
        let remote = ctx.repository.list(&self.user_id).await.map_err(|e| {
            warn!(user_id = %self.user_id, error = %e, "Could not load favorites");
            FavoritesError::from(e)
        })?;
        self.replace(remote);
        info!(user_id = %self.user_id, count = self.len(), "Favorites loaded");
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: FavoriteAction,
        ctx: &FavoritesContext,
    ) -> Result<FavoriteActionResult, FavoritesError> {
        match action {
            FavoriteAction::Toggle(restaurant_id) => {
                let favorited = self.toggle(restaurant_id);
                let user_id = self.user_id.clone();
                let job = if favorited {
                    SyncJob::Insert {
                        user_id,
                        restaurant_id,
                    }
                } else {
                    SyncJob::Delete {
                        user_id,
                        restaurant_id,
                    }
                };
                if ctx.sync.enqueue(job).await.is_err() {
                    // Without a worker the change would never reach the remote.
                    self.toggle(restaurant_id);
                    return Err(FavoritesError::SyncStopped);
                }
                Ok(FavoriteActionResult::Toggle(favorited))
            }
            FavoriteAction::Reload => {
                if !ctx.sync.flush().await {
                    return Err(FavoritesError::SyncStopped);
                }
                let remote = ctx.repository.list(&self.user_id).await?;
                let drift = self.replace(remote);
                if !drift.is_empty() {
                    info!(
                        user_id = %self.user_id,
                        added = drift.added.len(),
                        removed = drift.removed.len(),
                        "Favorites drift repaired"
                    );
                }
                ctx.sync.publish(FavoriteEvent::Reconciled {
                    user_id: self.user_id.clone(),
                    drift: drift.clone(),
                });
                Ok(FavoriteActionResult::Reload(drift))
            }
        }
    }
}
