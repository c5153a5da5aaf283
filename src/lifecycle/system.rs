use crate::auth::{AuthError, AuthService, Session};
use crate::browse::Browser;
use crate::clients::{CartClient, FavoritesClient};
use crate::config::AppConfig;
use crate::favorites_actor::{FavoriteEvent, FavoritesContext, FavoritesSync};
use crate::model::Restaurant;
use crate::order_flow::{FlowError, OrderSession};
use crate::store::{CatalogRepository, FavoritesRepository};
use resource_actor::ActorClient;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

/// Owns the running actors of the app and the clients that reach them.
///
/// # Architecture
///
/// - **Cart actor**: one cart per open restaurant view. No dependencies (`Context = ()`).
/// - **Favorites actor**: one favorite set per signed-in user. Its context carries the
///   favorites repository and the sync queue.
/// - **Sync worker**: applies queued favorite writes to the remote in order.
///
/// # Example
///
/// ```ignore
/// let system = FoodOrderSystem::new(config, catalog, favorites);
///
/// let home = system.browser().home(&session).await?;
/// let mut order = system.start_order(home[0].restaurant.clone()).await?;
/// order.add(item).await?;
///
/// drop(order);
/// system.shutdown().await?;
/// ```
pub struct FoodOrderSystem {
    pub cart_client: CartClient,
    pub favorites_client: FavoritesClient,
    sync: FavoritesSync,
    catalog: Arc<dyn CatalogRepository>,
    config: AppConfig,
    handles: Vec<JoinHandle<()>>,
}

impl FoodOrderSystem {
    /// Spawns the actors and the sync worker. Must be called inside a Tokio runtime.
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn CatalogRepository>,
        favorites: Arc<dyn FavoritesRepository>,
    ) -> Self {
        let buffer = config.actor_buffer;

        // 1. Create actors and the sync queue (no dependencies yet)
        let (cart_actor, cart_client) = crate::cart_actor::new(buffer);
        let (favorites_actor, favorites_client) = crate::favorites_actor::new(buffer);
        let (sync, worker) = FavoritesSync::new(favorites.clone(), buffer);

        // 2. Start them with their context injected
        let cart_handle = tokio::spawn(cart_actor.run(()));
        let favorites_handle = tokio::spawn(favorites_actor.run(FavoritesContext {
            repository: favorites,
            sync: sync.clone(),
        }));
        let worker_handle = tokio::spawn(worker.run());

        info!(buffer, tax_rate = %config.tax_rate, "Food order system started");
        Self {
            cart_client: CartClient::new(cart_client),
            favorites_client: FavoritesClient::new(favorites_client),
            sync,
            catalog,
            config,
            handles: vec![cart_handle, favorites_handle, worker_handle],
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Sync outcomes for every user's favorites.
    pub fn favorite_events(&self) -> broadcast::Receiver<FavoriteEvent> {
        self.sync.subscribe()
    }

    pub fn browser(&self) -> Browser {
        Browser::new(self.catalog.clone(), self.favorites_client.clone())
    }

    /// Opens a cart for `restaurant` with the configured tax rate and rider settings.
    pub async fn start_order(&self, restaurant: Restaurant) -> Result<OrderSession, FlowError> {
        OrderSession::start(
            self.cart_client.clone(),
            restaurant,
            self.config.tax_rate,
            self.config.tracking,
        )
        .await
    }

    /// Signs the session out and drops the user's favorites from the actor, so the next
    /// sign-in loads them from the remote again.
    #[instrument(skip_all, fields(user_id = %session.user_id()))]
    pub async fn sign_out(
        &self,
        auth: &dyn AuthService,
        session: &Session,
    ) -> Result<(), AuthError> {
        auth.sign_out(session).await?;
        // A user who never opened home has no set to drop.
        match self.favorites_client.discard(session.user_id().clone()).await {
            Ok(()) => info!("Favorites released"),
            Err(e) => debug!(error = %e, "No favorites to discard"),
        }
        Ok(())
    }

    /// Stops the actors, then the sync worker once the favorites actor has let go of its queue.
    ///
    /// Every `Browser` and `OrderSession` handed out must be dropped first; each holds a
    /// client that keeps its actor alive.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Closing the channels ends the actor loops; the worker ends with the last queue handle.
        drop(self.cart_client);
        drop(self.favorites_client);
        drop(self.sync);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Task failed: {:?}", e);
                return Err(format!("Task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
