//! [`ActorEntity`] implementation for [`Cart`].
//!
//! Carts have no natural key, so the actor's sequence number becomes the [`CartId`]. The
//! reducers on [`Cart`] do the work; this impl only routes actions to them.

use super::{CartAction, CartError};
use crate::model::{Cart, CartCreate, CartId};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Action = CartAction;
    type ActionResult = Cart;
    type Context = ();
    type Error = CartError;

    fn assign_id(sequence: u32, _params: &CartCreate) -> CartId {
        CartId(sequence)
    }

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, CartError> {
        Ok(Cart::new(id, params.restaurant_id))
    }

    /// Applies the edit and hands back a snapshot.
    async fn handle_action(&mut self, action: CartAction, _ctx: &()) -> Result<Cart, CartError> {
        match action {
            CartAction::Add(item) => self.add(item)?,
            CartAction::Increment(id) => self.increment(id)?,
            CartAction::Decrement(id) => self.decrement(id),
        }
        Ok(self.clone())
    }
}
