//! # Order Session
//!
//! Drives one order from the restaurant's detail view to the tracking view.
//!
//! While browsing, edits go to a cart in the cart actor. `checkout` takes a snapshot of that
//! cart, freezes it into an [`OrderDraft`], and discards the cart, so nothing can change the
//! order afterwards. Confirming payment starts the rider and returns the [`TrackingView`].
//!
//! Call [`OrderSession::leave`] when the user navigates away before checking out. Dropping the
//! session without leaving discards the cart in the background.

use super::{ConfirmedOrder, FlowError, FlowStage, OrderDraft, OrderFlow};
use crate::clients::CartClient;
use crate::config::TrackingSettings;
use crate::model::{Cart, CartId, MenuItem, MenuItemId, PaymentSelection, Restaurant};
use crate::pricing::{compute_totals, OrderTotals, TaxRate};
use crate::tracking::{RiderTracker, TrackingView};
use resource_actor::ActorClient;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, instrument, warn};

pub struct OrderSession {
    carts: CartClient,
    restaurant: Restaurant,
    cart_id: Option<CartId>,
    flow: OrderFlow,
    tax_rate: TaxRate,
    tracking: TrackingSettings,
}

impl OrderSession {
    /// Opens an empty cart for `restaurant` and starts browsing.
    #[instrument(skip_all, fields(restaurant_id = %restaurant.id))]
    pub async fn start(
        carts: CartClient,
        restaurant: Restaurant,
        tax_rate: TaxRate,
        tracking: TrackingSettings,
    ) -> Result<Self, FlowError> {
        let cart_id = carts.open(restaurant.id).await?;
        info!(%cart_id, "Order session started");
        Ok(Self {
            carts,
            flow: OrderFlow::new(restaurant.id),
            restaurant,
            cart_id: Some(cart_id),
            tax_rate,
            tracking,
        })
    }

    pub fn restaurant(&self) -> &Restaurant {
        &self.restaurant
    }

    pub fn stage(&self) -> FlowStage {
        self.flow.stage()
    }

    /// The frozen order, from checkout onwards.
    pub fn draft(&self) -> Option<&Arc<OrderDraft>> {
        self.flow.draft()
    }

    pub async fn add(&self, item: MenuItem) -> Result<Cart, FlowError> {
        Ok(self.carts.add(self.open_cart()?, item).await?)
    }

    pub async fn increment(&self, item_id: MenuItemId) -> Result<Cart, FlowError> {
        Ok(self.carts.increment(self.open_cart()?, item_id).await?)
    }

    pub async fn decrement(&self, item_id: MenuItemId) -> Result<Cart, FlowError> {
        Ok(self.carts.decrement(self.open_cart()?, item_id).await?)
    }

    /// The cart while browsing.
    pub async fn cart(&self) -> Result<Cart, FlowError> {
        self.carts
            .snapshot(self.open_cart()?)
            .await?
            .ok_or(FlowError::CartClosed)
    }

    /// Running totals while browsing.
    pub async fn totals(&self) -> Result<OrderTotals, FlowError> {
        Ok(compute_totals(&self.cart().await?, self.tax_rate))
    }

    /// Browsing → Checkout. On success the cart is gone from the actor.
    #[instrument(skip(self), fields(restaurant_id = %self.restaurant.id))]
    pub async fn checkout(&mut self) -> Result<Arc<OrderDraft>, FlowError> {
        if self.flow.stage() != FlowStage::Browsing {
            return Err(FlowError::InvalidTransition {
                from: self.flow.stage(),
                attempted: "begin checkout",
            });
        }
        let cart_id = self.open_cart()?;
        let cart = self
            .carts
            .snapshot(cart_id)
            .await?
            .ok_or(FlowError::CartClosed)?;
        let draft = self.flow.begin_checkout(&cart, self.tax_rate)?;
        self.cart_id = None;
        // The order is frozen either way; a cart we fail to discard is only a leak.
        if let Err(e) = self.carts.discard(cart_id).await {
            warn!(%cart_id, error = %e, "Could not discard cart after checkout");
        }
        Ok(draft)
    }

    /// Checkout → PaymentSelection.
    pub fn proceed_to_payment(&mut self) -> Result<Arc<OrderDraft>, FlowError> {
        self.flow.proceed_to_payment()
    }

    /// PaymentSelection → Tracking. Starts the rider at the restaurant.
    #[instrument(skip(self, selection), fields(restaurant_id = %self.restaurant.id))]
    pub fn confirm_payment(
        &mut self,
        selection: &PaymentSelection,
    ) -> Result<TrackingView, FlowError> {
        let order: Arc<ConfirmedOrder> = self.flow.confirm_payment(selection)?;
        let rider = RiderTracker::start(self.restaurant.coordinates(), self.tracking);
        Ok(TrackingView::new(order, rider))
    }

    /// Leaves the restaurant. Discards the cart if checkout never happened.
    pub async fn leave(mut self) -> Result<(), FlowError> {
        if let Some(cart_id) = self.cart_id.take() {
            self.carts.discard(cart_id).await?;
            info!(%cart_id, "Cart discarded");
        }
        Ok(())
    }

    fn open_cart(&self) -> Result<CartId, FlowError> {
        self.cart_id.ok_or(FlowError::CartClosed)
    }
}

impl Drop for OrderSession {
    fn drop(&mut self) {
        let Some(cart_id) = self.cart_id.take() else {
            return;
        };
        // Outside a runtime the actor is gone too.
        let Ok(runtime) = Handle::try_current() else {
            return;
        };
        let carts = self.carts.clone();
        runtime.spawn(async move {
            match carts.discard(cart_id).await {
                Ok(()) => debug!(%cart_id, "Cart discarded on drop"),
                Err(e) => warn!(%cart_id, error = %e, "Could not discard dropped cart"),
            }
        });
    }
}
