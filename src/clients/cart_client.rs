//! # Cart Client
//!
//! Domain API over a `ResourceClient<Cart>`. Every edit answers with the cart as it stands
//! afterwards.
use crate::cart_actor::{CartAction, CartError};
use crate::model::{Cart, CartCreate, CartId, MenuItem, MenuItemId, RestaurantId};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    /// Opens an empty cart for `restaurant_id`.
    #[instrument(skip(self))]
    pub async fn open(&self, restaurant_id: RestaurantId) -> Result<CartId, CartError> {
        debug!("Sending request");
        self.inner
            .create(CartCreate { restaurant_id })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, item), fields(item_id = %item.id()))]
    pub async fn add(&self, cart_id: CartId, item: MenuItem) -> Result<Cart, CartError> {
        self.edit(cart_id, CartAction::Add(item)).await
    }

    #[instrument(skip(self))]
    pub async fn increment(&self, cart_id: CartId, item_id: MenuItemId) -> Result<Cart, CartError> {
        self.edit(cart_id, CartAction::Increment(item_id)).await
    }

    #[instrument(skip(self))]
    pub async fn decrement(&self, cart_id: CartId, item_id: MenuItemId) -> Result<Cart, CartError> {
        self.edit(cart_id, CartAction::Decrement(item_id)).await
    }

    async fn edit(&self, cart_id: CartId, action: CartAction) -> Result<Cart, CartError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(cart_id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    /// Domain failures come back as themselves; plumbing failures as `ActorCommunicationError`.
    fn map_error(e: FrameworkError) -> Self::Error {
        e.downcast_entity::<CartError>()
            .unwrap_or_else(|e| CartError::ActorCommunicationError(e.to_string()))
    }
}
